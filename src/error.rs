use std::time::Duration;

use crate::command::error::ModemError;
use crate::command::gnss::types::GnssFix;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Neither the ready word nor an error sentinel arrived in time.
    #[error("no {ready_word:?} within {timeout:?} after {command:?}")]
    Timeout {
        command: String,
        ready_word: String,
        timeout: Duration,
    },

    /// The module answered the command with an error result code.
    #[error("command {command:?} returned error {error}")]
    CommandExecution { command: String, error: ModemError },

    /// A response arrived but does not have the expected shape.
    #[error("unexpected response, expected {expected}: {received:?}")]
    ProtocolViolation {
        expected: &'static str,
        received: String,
    },

    /// GNSS receiver answered, but has no usable fix.
    #[error("no GNSS fix ({0})")]
    NoFix(GnssFix),

    #[error("invalid {parameter}: {value:?}")]
    Validation {
        parameter: &'static str,
        value: String,
    },

    #[error("unsupported command: {0}")]
    UnsupportedCommand(String),

    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn violation(expected: &'static str, received: impl Into<String>) -> Self {
        Self::ProtocolViolation {
            expected,
            received: received.into(),
        }
    }

    pub(crate) fn invalid(parameter: &'static str, value: impl Into<String>) -> Self {
        Self::Validation {
            parameter,
            value: value.into(),
        }
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
