//! Argument and parameter types used by Mobile equipment control and status Commands and Responses
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mobile termination error reporting `+CMEE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReportingMode {
    /// Only the bare `ERROR` result code
    Disabled = 0,
    /// `+CME ERROR: <err>` with numeric codes
    Numeric = 1,
    /// `+CME ERROR: <err>` with verbose text
    Verbose = 2,
}

impl From<ErrorReportingMode> for u8 {
    fn from(mode: ErrorReportingMode) -> u8 {
        mode as u8
    }
}

impl TryFrom<u8> for ErrorReportingMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        Ok(match value {
            0 => Self::Disabled,
            1 => Self::Numeric,
            2 => Self::Verbose,
            v => return Err(v),
        })
    }
}

impl FromStr for ErrorReportingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disabled" | "0" => Ok(Self::Disabled),
            "numeric" | "1" => Ok(Self::Numeric),
            "verbose" | "2" => Ok(Self::Verbose),
            _ => Err(Error::invalid("error reporting mode", s)),
        }
    }
}
