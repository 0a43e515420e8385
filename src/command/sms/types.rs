//! Argument and parameter types used by Short Messages Service Commands and Responses
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Message format `+CMGF`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmsFormat {
    Pdu = 0,
    Text = 1,
}

impl From<SmsFormat> for u8 {
    fn from(format: SmsFormat) -> u8 {
        format as u8
    }
}

impl TryFrom<u8> for SmsFormat {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        Ok(match value {
            0 => Self::Pdu,
            1 => Self::Text,
            v => return Err(v),
        })
    }
}

impl FromStr for SmsFormat {
    type Err = Error;

    // `PUD` and `TXT` are the historic host spellings
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdu" | "pud" | "0" => Ok(Self::Pdu),
            "text" | "txt" | "1" => Ok(Self::Text),
            _ => Err(Error::invalid("SMS format", s)),
        }
    }
}

/// Message status filter for `+CMGL` in text mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmsStatus {
    ReceivedUnread,
    ReceivedRead,
    StoredUnsent,
    StoredSent,
    #[default]
    All,
}

impl SmsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReceivedUnread => "REC UNREAD",
            Self::ReceivedRead => "REC READ",
            Self::StoredUnsent => "STO UNSENT",
            Self::StoredSent => "STO SENT",
            Self::All => "ALL",
        }
    }
}

impl fmt::Display for SmsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SmsStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().replace('_', " ").as_str() {
            "REC UNREAD" | "RECEIVED UNREAD" => Ok(Self::ReceivedUnread),
            "REC READ" | "RECEIVED READ" => Ok(Self::ReceivedRead),
            "STO UNSENT" | "STORED UNSENT" => Ok(Self::StoredUnsent),
            "STO SENT" | "STORED SENT" => Ok(Self::StoredSent),
            "ALL" => Ok(Self::All),
            _ => Err(Error::invalid("SMS status", s)),
        }
    }
}
