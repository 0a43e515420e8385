//! Argument and parameter types used by General Commands and Responses
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Periodic reset mode `#ENHRST`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetMode {
    /// Unsolicited reset disabled
    Disabled = 0,
    /// Single reset after `<delay>` minutes
    OneShot = 1,
    /// Reset every `<delay>` minutes
    Periodic = 2,
}

impl From<ResetMode> for u8 {
    fn from(mode: ResetMode) -> u8 {
        mode as u8
    }
}

impl TryFrom<u8> for ResetMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        Ok(match value {
            0 => Self::Disabled,
            1 => Self::OneShot,
            2 => Self::Periodic,
            v => return Err(v),
        })
    }
}

impl FromStr for ResetMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disabled" | "0" => Ok(Self::Disabled),
            "one_shot" | "oneshot" | "1" => Ok(Self::OneShot),
            "periodic" | "2" => Ok(Self::Periodic),
            _ => Err(Error::invalid("reset mode", s)),
        }
    }
}
