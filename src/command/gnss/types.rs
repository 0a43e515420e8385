//! Argument and parameter types used by GNSS Commands and Responses
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Position fix reported in the `<fix>` field of `$GPSACP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GnssFix {
    #[serde(rename = "invalid")]
    Invalid = 0,
    #[serde(rename = "none")]
    NoFix = 1,
    #[serde(rename = "fix_2d")]
    Fix2D = 2,
    #[serde(rename = "fix_3d")]
    Fix3D = 3,
}

impl GnssFix {
    pub fn is_fix(self) -> bool {
        matches!(self, Self::Fix2D | Self::Fix3D)
    }
}

impl TryFrom<u8> for GnssFix {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        Ok(match value {
            0 => Self::Invalid,
            1 => Self::NoFix,
            2 => Self::Fix2D,
            3 => Self::Fix3D,
            v => return Err(v),
        })
    }
}

impl fmt::Display for GnssFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Invalid => "invalid",
            Self::NoFix => "none",
            Self::Fix2D => "fix_2d",
            Self::Fix3D => "fix_3d",
        })
    }
}

/// Latitude or longitude.
///
/// `Raw` keeps the module's `ddmm.mmmm[NS]` / `dddmm.mmmm[EW]` text,
/// `Decimal` is signed decimal degrees, negative for south and west.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Coordinate {
    Decimal(f64),
    Raw(String),
}

impl Coordinate {
    /// Parse a `$GPSACP` coordinate with `deg_digits` degree digits
    /// followed by minutes and a hemisphere letter out of `hemispheres`
    /// (positive first).
    pub(crate) fn parse(
        field: &str,
        deg_digits: usize,
        hemispheres: [char; 2],
        decimal: bool,
        expected: &'static str,
    ) -> Result<Self> {
        let bad = || Error::violation(expected, field);

        let hemisphere = field.chars().last().ok_or_else(bad)?;
        let negative = match hemisphere {
            c if c == hemispheres[0] => false,
            c if c == hemispheres[1] => true,
            _ => return Err(bad()),
        };

        let number = &field[..field.len() - hemisphere.len_utf8()];
        let (whole, fraction) = number.split_once('.').ok_or_else(bad)?;
        let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if whole.len() != deg_digits + 2 || !is_digits(whole) || !is_digits(fraction) {
            return Err(bad());
        }

        if !decimal {
            return Ok(Self::Raw(field.to_string()));
        }

        let (degrees, minutes) = number.split_at(deg_digits);
        let degrees: f64 = degrees.parse().map_err(|_| bad())?;
        let minutes: f64 = minutes.parse().map_err(|_| bad())?;
        let value = degrees + minutes / 60.0;

        Ok(Self::Decimal(if negative { -value } else { value }))
    }

    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            Self::Decimal(v) => Some(*v),
            Self::Raw(_) => None,
        }
    }
}

/// NMEA stream state selected with `$GPSNMUN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NmeaMode {
    /// NMEA stream disabled
    Disabled = 0,
    /// Sentences are emitted as unsolicited output on the AT port
    FirstFormat = 1,
    /// Unsolicited sentences are prefixed with `$GPSNMUN: `
    SecondFormat = 2,
    /// The AT port is handed over to the stream until `+++` is received
    PortLock = 3,
}

impl From<NmeaMode> for u8 {
    fn from(mode: NmeaMode) -> u8 {
        mode as u8
    }
}

impl TryFrom<u8> for NmeaMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        Ok(match value {
            0 => Self::Disabled,
            1 => Self::FirstFormat,
            2 => Self::SecondFormat,
            3 => Self::PortLock,
            v => return Err(v),
        })
    }
}

impl FromStr for NmeaMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disabled" | "0" => Ok(Self::Disabled),
            "first_format" | "1" => Ok(Self::FirstFormat),
            "second_format" | "2" => Ok(Self::SecondFormat),
            "port_lock" | "3" => Ok(Self::PortLock),
            _ => Err(Error::invalid("NMEA mode", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_coordinate_is_validated() {
        assert_eq!(
            Coordinate::parse("5546.1234N", 2, ['N', 'S'], false, "lat").unwrap(),
            Coordinate::Raw("5546.1234N".into())
        );
        assert!(Coordinate::parse("546.1234N", 2, ['N', 'S'], false, "lat").is_err());
        assert!(Coordinate::parse("5546.1234E", 2, ['N', 'S'], false, "lat").is_err());
        assert!(Coordinate::parse("5546.N", 2, ['N', 'S'], false, "lat").is_err());
        assert!(Coordinate::parse("", 2, ['N', 'S'], false, "lat").is_err());
    }

    #[test]
    fn decimal_coordinate_folds_hemisphere() {
        let lat = Coordinate::parse("5530.0000S", 2, ['N', 'S'], true, "lat").unwrap();
        assert!((lat.as_decimal().unwrap() + 55.5).abs() < 1e-9);

        let lon = Coordinate::parse("01230.0000E", 3, ['E', 'W'], true, "lon").unwrap();
        assert!((lon.as_decimal().unwrap() - 12.5).abs() < 1e-9);
    }

    #[test]
    fn nmea_mode_from_str() {
        assert_eq!("port_lock".parse::<NmeaMode>().unwrap(), NmeaMode::PortLock);
        assert_eq!("First_Format".parse::<NmeaMode>().unwrap(), NmeaMode::FirstFormat);
        assert!(matches!(
            "sometimes".parse::<NmeaMode>(),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn fix_display_matches_serialization() {
        for fix in [GnssFix::Invalid, GnssFix::NoFix, GnssFix::Fix2D, GnssFix::Fix3D] {
            assert_eq!(
                serde_json::to_value(fix).unwrap(),
                serde_json::Value::String(fix.to_string())
            );
        }
    }
}
