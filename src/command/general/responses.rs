//! Responses for General Commands
use atat::atat_derive::AtatResp;
use chrono::{DateTime, Utc};
use heapless::String;
use serde::Serialize;

use super::types::ResetMode;
use crate::command::types::{decode, parse_timestamp};
use crate::error::{Error, Result};

/// Product serial number identification +GSN
#[derive(Debug, Clone, PartialEq, Eq, AtatResp)]
pub struct SerialNumber {
    #[at_arg(position = 0)]
    pub imei: String<20>,
}

/// Clock management +CCLK
#[derive(Debug, Clone, PartialEq, Eq, AtatResp)]
pub struct Clock {
    /// `yy/MM/dd,hh:mm:ss±zz`
    #[at_arg(position = 0)]
    pub time: String<32>,
}

/// Periodic reset #ENHRST
#[derive(Debug, Clone, PartialEq, Eq, AtatResp)]
pub struct PeriodicReset {
    #[at_arg(position = 0)]
    pub mode: u8,
    #[at_arg(position = 1)]
    pub delay: u32,
}

/// IMEI `+GSN: <imei>`
pub fn imei<S: AsRef<str>>(lines: &[S]) -> Result<std::string::String> {
    let resp: SerialNumber = decode(lines, "+GSN:", "+GSN: <digits>")?;
    if resp.imei.is_empty() || !resp.imei.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::violation("+GSN: <digits>", resp.imei.as_str()));
    }
    Ok(resp.imei.as_str().into())
}

/// Free text identification (`+GMI`, `+GMM`): the first data line, if any.
pub fn identification<S: AsRef<str>>(lines: &[S]) -> Option<std::string::String> {
    lines
        .iter()
        .map(|line| line.as_ref().trim())
        .find(|line| !line.is_empty())
        .map(Into::into)
}

/// Real time clock `+CCLK: "yy/MM/dd,hh:mm:ss±zz"`
pub fn clock<S: AsRef<str>>(lines: &[S]) -> Result<DateTime<Utc>> {
    let resp: Clock = decode(lines, "+CCLK:", "+CCLK: \"<time>\"")?;
    parse_timestamp(&resp.time)
}

/// Periodic reset configuration `#ENHRST: <mod>,<delay>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResetConfig {
    pub mode: ResetMode,
    /// Minutes
    pub delay: u32,
}

impl ResetConfig {
    pub fn decode<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let resp: PeriodicReset = decode(lines, "#ENHRST:", "#ENHRST: <mod>,<delay>")?;
        let mode = ResetMode::try_from(resp.mode)
            .map_err(|mode| Error::violation("reset mode 0..2", mode.to_string()))?;
        Ok(Self {
            mode,
            delay: resp.delay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn deserialize_gsn() {
        assert_eq!(
            atat::serde_at::from_slice::<SerialNumber>(b"+GSN: 351234567890123"),
            Ok(SerialNumber {
                imei: String::try_from("351234567890123").unwrap()
            })
        );
    }

    #[test]
    fn deserialize_cclk() {
        assert_eq!(
            atat::serde_at::from_slice::<Clock>(b"+CCLK: \"21/11/16,14:10:00+04\""),
            Ok(Clock {
                time: String::try_from("21/11/16,14:10:00+04").unwrap()
            })
        );
    }

    #[test]
    fn imei_digits() {
        assert_eq!(imei(&["+GSN: 351234567890123"]).unwrap(), "351234567890123");
        assert_eq!(imei(&["+GSN: 012345678901234"]).unwrap(), "012345678901234");
        assert!(imei(&["+GSN: 35123A"]).is_err());
        assert!(imei(&["351234567890123"]).is_err());
    }

    #[test]
    fn identification_first_line() {
        assert_eq!(identification(&["", "Telit"]), Some("Telit".into()));
        assert_eq!(identification::<&str>(&[]), None);
    }

    #[test]
    fn clock_is_utc() {
        assert_eq!(
            clock(&["+CCLK: \"21/11/16,14:10:00+04\""]).unwrap(),
            Utc.with_ymd_and_hms(2021, 11, 16, 13, 10, 0).unwrap()
        );
        assert!(clock(&["+CCLK: \"21/11/16\""]).is_err());
        assert!(clock(&["+CCLK: \"21/11/16,14:10:00é4\""]).is_err());
    }

    #[test]
    fn reset_config() {
        assert_eq!(
            ResetConfig::decode(&["#ENHRST: 2,60"]).unwrap(),
            ResetConfig {
                mode: ResetMode::Periodic,
                delay: 60
            }
        );
        assert!(matches!(
            ResetConfig::decode(&["#ENHRST: 5,60"]),
            Err(Error::ProtocolViolation { expected: "reset mode 0..2", .. })
        ));
        assert!(ResetConfig::decode(&["#ENHRST: 1"]).is_err());
    }
}
