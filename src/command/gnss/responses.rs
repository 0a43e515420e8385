//! Responses for GNSS Commands
use core::str::FromStr;

use atat::atat_derive::AtatResp;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::types::{Coordinate, GnssFix, NmeaMode};
use crate::command::types::{decode, digit, fixed_fields, flag, payload};
use crate::error::{Error, Result};

/// GNSS controller power management $GPSP
#[derive(Debug, Clone, PartialEq, Eq, AtatResp)]
pub struct GnssPowerManagement {
    #[at_arg(position = 0)]
    pub status: u8,
}

/// Unsolicited NMEA data configuration $GPSNMUN
#[derive(Debug, Clone, PartialEq, Eq, AtatResp)]
pub struct NmeaDataConfig {
    #[at_arg(position = 0)]
    pub enable: u8,
    #[at_arg(position = 1)]
    pub gga: u8,
    #[at_arg(position = 2)]
    pub gll: u8,
    #[at_arg(position = 3)]
    pub gsa: u8,
    #[at_arg(position = 4)]
    pub gsv: u8,
    #[at_arg(position = 5)]
    pub rmc: u8,
    #[at_arg(position = 6)]
    pub vtg: u8,
}

/// Acquired position `$GPSACP`
///
/// Only produced for a 2D or 3D fix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GnssLocation {
    pub time_utc: NaiveTime,
    pub date_utc: NaiveDate,
    pub fix: GnssFix,
    pub horizontal_dilution: Option<f64>,
    pub altitude: Option<f64>,
    pub course_over_ground: Option<f64>,
    pub speed_kmh: Option<f64>,
    pub speed_knots: Option<f64>,
    pub satellites_gps: Option<u8>,
    pub satellites_glonass: Option<u8>,
    pub latitude: Coordinate,
    pub longitude: Coordinate,
}

impl GnssLocation {
    /// Decode the `$GPSACP: <UTC>,<lat>,<lon>,<hdop>,<alt>,<fix>,<cog>,
    /// <spkm>,<spkn>,<date>,<nsat_gps>,<nsat_glonass>` line.
    ///
    /// The fix is checked before anything else; without a fix the remaining
    /// fields are garbage and are not looked at. The empty fields the module
    /// leaves without a fix are why this line is split by hand.
    pub fn decode<S: AsRef<str>>(lines: &[S], decimal_degrees: bool) -> Result<Self> {
        let [utc, lat, lon, hdop, alt, fix, cog, spkm, spkn, date, nsat_gps, nsat_glonass] =
            fixed_fields::<12>(payload(lines, "$GPSACP:")?, "12 $GPSACP fields")?;

        let fix = GnssFix::try_from(digit(fix, 3, "fix 0..3")?)
            .map_err(|_| Error::violation("fix 0..3", fix))?;
        if !fix.is_fix() {
            return Err(Error::NoFix(fix));
        }

        Ok(Self {
            time_utc: parse_utc_time(utc)?,
            date_utc: parse_utc_date(date)?,
            fix,
            horizontal_dilution: optional(hdop, "horizontal dilution")?,
            altitude: optional(alt, "altitude")?,
            course_over_ground: optional(cog, "course over ground")?,
            speed_kmh: optional(spkm, "speed km/h")?,
            speed_knots: optional(spkn, "speed knots")?,
            satellites_gps: optional(nsat_gps, "GPS satellites")?,
            satellites_glonass: optional(nsat_glonass, "GLONASS satellites")?,
            latitude: Coordinate::parse(lat, 2, ['N', 'S'], decimal_degrees, "ddmm.mmmm[NS]")?,
            longitude: Coordinate::parse(lon, 3, ['E', 'W'], decimal_degrees, "dddmm.mmmm[EW]")?,
        })
    }
}

/// GNSS controller power state `$GPSP`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GnssSessionState {
    pub enabled: bool,
}

impl GnssSessionState {
    pub fn decode<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let resp: GnssPowerManagement = decode(lines, "$GPSP:", "$GPSP: 0|1")?;
        Ok(Self {
            enabled: flag(resp.status, "$GPSP: 0|1")?,
        })
    }
}

/// Unsolicited NMEA stream configuration `$GPSNMUN`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NmeaStreamConfig {
    pub mode: NmeaMode,
    #[serde(default)]
    pub gga: bool,
    #[serde(default)]
    pub gll: bool,
    #[serde(default)]
    pub gsa: bool,
    #[serde(default)]
    pub gsv: bool,
    #[serde(default)]
    pub rmc: bool,
    #[serde(default)]
    pub vtg: bool,
}

impl NmeaStreamConfig {
    /// Decode `$GPSNMUN: <mode>,<GGA>,<GLL>,<GSA>,<GSV>,<RMC>,<VTG>`.
    pub fn decode<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        const EXPECTED: &str = "$GPSNMUN: <mode>,<GGA>,<GLL>,<GSA>,<GSV>,<RMC>,<VTG>";

        let resp: NmeaDataConfig = decode(lines, "$GPSNMUN:", EXPECTED)?;
        let mode = NmeaMode::try_from(resp.enable)
            .map_err(|mode| Error::violation("NMEA mode 0..3", mode.to_string()))?;

        Ok(Self {
            mode,
            gga: flag(resp.gga, "GGA flag 0|1")?,
            gll: flag(resp.gll, "GLL flag 0|1")?,
            gsa: flag(resp.gsa, "GSA flag 0|1")?,
            gsv: flag(resp.gsv, "GSV flag 0|1")?,
            rmc: flag(resp.rmc, "RMC flag 0|1")?,
            vtg: flag(resp.vtg, "VTG flag 0|1")?,
        })
    }
}

fn optional<T: FromStr>(field: &str, expected: &'static str) -> Result<Option<T>> {
    if field.is_empty() {
        return Ok(None);
    }
    field
        .parse()
        .map(Some)
        .map_err(|_| Error::violation(expected, field))
}

fn two_digits(s: &str, at: usize) -> Option<u32> {
    s.get(at..at + 2)?.parse().ok()
}

/// `hhmmss.sss`
fn parse_utc_time(field: &str) -> Result<NaiveTime> {
    let bad = || Error::violation("UTC time hhmmss.sss", field);

    let (whole, fraction) = field.split_once('.').unwrap_or((field, ""));
    if whole.len() != 6 || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }

    let milli = if fraction.is_empty() {
        0
    } else {
        let seconds: f64 = format!("0.{}", fraction).parse().map_err(|_| bad())?;
        ((seconds * 1000.0).round() as u32).min(999)
    };

    let (h, m, s) = (
        two_digits(whole, 0).ok_or_else(bad)?,
        two_digits(whole, 2).ok_or_else(bad)?,
        two_digits(whole, 4).ok_or_else(bad)?,
    );
    NaiveTime::from_hms_milli_opt(h, m, s, milli).ok_or_else(bad)
}

/// `ddmmyy`, two digit years are taken as 20yy.
fn parse_utc_date(field: &str) -> Result<NaiveDate> {
    let bad = || Error::violation("UTC date ddmmyy", field);

    if field.len() != 6 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    let (d, m, y) = (
        two_digits(field, 0).ok_or_else(bad)?,
        two_digits(field, 2).ok_or_else(bad)?,
        two_digits(field, 4).ok_or_else(bad)?,
    );
    NaiveDate::from_ymd_opt(2000 + y as i32, m, d).ok_or_else(bad)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIX_3D: &str =
        "$GPSACP: 093446.000,5702.1608N,00956.1064E,1.4,-30.6,3,0.0,0.0,0.0,140622,04,04";

    #[test]
    fn location_decimal_degrees() {
        let location = GnssLocation::decode(&[FIX_3D], true).unwrap();

        assert_eq!(location.fix, GnssFix::Fix3D);
        assert_eq!(location.date_utc, NaiveDate::from_ymd_opt(2022, 6, 14).unwrap());
        assert_eq!(location.time_utc, NaiveTime::from_hms_opt(9, 34, 46).unwrap());
        assert_eq!(location.satellites_gps, Some(4));
        assert_eq!(location.satellites_glonass, Some(4));
        assert_eq!(location.horizontal_dilution, Some(1.4));
        assert_eq!(location.altitude, Some(-30.6));

        let lat = location.latitude.as_decimal().unwrap();
        assert!((lat - 57.036013).abs() < 1e-6);
        let lon = location.longitude.as_decimal().unwrap();
        assert!((lon - 9.935106).abs() < 1e-6);
    }

    #[test]
    fn location_raw_coordinates() {
        let location = GnssLocation::decode(&[FIX_3D], false).unwrap();
        assert_eq!(location.latitude, Coordinate::Raw("5702.1608N".into()));
        assert_eq!(location.longitude, Coordinate::Raw("00956.1064E".into()));
    }

    #[test]
    fn no_fix_short_circuits() {
        assert!(matches!(
            GnssLocation::decode(&["$GPSACP: ,,,,,1,,,,,,"], true),
            Err(Error::NoFix(GnssFix::NoFix))
        ));
        assert!(matches!(
            GnssLocation::decode(&["$GPSACP: garbage,,,,,0,,,,,,"], false),
            Err(Error::NoFix(GnssFix::Invalid))
        ));
    }

    #[test]
    fn location_wrong_shape() {
        assert!(matches!(
            GnssLocation::decode(&["$GPSACP: 093446.000,5702.1608N,3"], true),
            Err(Error::ProtocolViolation { .. })
        ));
        assert!(matches!(
            GnssLocation::decode(&["$GPSACP: ,,,,,7,,,,,,"], true),
            Err(Error::ProtocolViolation { .. })
        ));
        assert!(matches!(
            GnssLocation::decode(&["OK"], true),
            Err(Error::ProtocolViolation { .. })
        ));
    }

    #[test]
    fn location_bad_field_with_fix() {
        let line = "$GPSACP: 093446.000,5702.1608N,00956.1064E,x,-30.6,2,0.0,0.0,0.0,140622,04,04";
        assert!(matches!(
            GnssLocation::decode(&[line], true),
            Err(Error::ProtocolViolation { expected: "horizontal dilution", .. })
        ));
    }

    #[test]
    fn location_optional_fields_empty() {
        let line = "$GPSACP: 093446.000,5702.1608N,00956.1064E,,,2,,,,140622,,";
        let location = GnssLocation::decode(&[line], false).unwrap();
        assert_eq!(location.fix, GnssFix::Fix2D);
        assert_eq!(location.altitude, None);
        assert_eq!(location.satellites_gps, None);
    }

    #[test]
    fn deserialize_gpsnmun() {
        assert_eq!(
            atat::serde_at::from_slice::<NmeaDataConfig>(b"2,1,0,0,1,0,0"),
            Ok(NmeaDataConfig {
                enable: 2,
                gga: 1,
                gll: 0,
                gsa: 0,
                gsv: 1,
                rmc: 0,
                vtg: 0,
            })
        );
    }

    #[test]
    fn session_state() {
        assert!(GnssSessionState::decode(&["$GPSP: 1"]).unwrap().enabled);
        assert!(!GnssSessionState::decode(&["$GPSP: 0"]).unwrap().enabled);
        assert!(GnssSessionState::decode(&["$GPSP: on"]).is_err());
        assert!(GnssSessionState::decode(&["$GPSP: 2"]).is_err());
    }

    #[test]
    fn nmea_config_flags_are_numeric() {
        let config = NmeaStreamConfig::decode(&["$GPSNMUN: 2,1,0,0,1,0,0"]).unwrap();
        assert_eq!(
            config,
            NmeaStreamConfig {
                mode: NmeaMode::SecondFormat,
                gga: true,
                gll: false,
                gsa: false,
                gsv: true,
                rmc: false,
                vtg: false,
            }
        );
    }

    #[test]
    fn nmea_config_wrong_shape() {
        assert!(NmeaStreamConfig::decode(&["$GPSNMUN: 2,1,0,0,1,0"]).is_err());
        assert!(NmeaStreamConfig::decode(&["$GPSNMUN: 4,1,0,0,1,0,0"]).is_err());
        assert!(matches!(
            NmeaStreamConfig::decode(&["$GPSNMUN: 1,1,0,0,1,0,2"]),
            Err(Error::ProtocolViolation { expected: "VTG flag 0|1", .. })
        ));
    }

    #[test]
    fn utc_time_fraction() {
        assert_eq!(
            parse_utc_time("235959.5").unwrap(),
            NaiveTime::from_hms_milli_opt(23, 59, 59, 500).unwrap()
        );
        assert!(parse_utc_time("2359").is_err());
        assert!(parse_utc_time("246000.000").is_err());
    }
}
