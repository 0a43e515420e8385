//! Argument and parameter types shared by several command families, and the
//! helpers the response decoders are built from.
use atat::AtatResp;
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Payload following `prefix` on the first data line that carries it.
///
/// `+CMEE: 2` with prefix `+CMEE:` yields `2`. Lines without the prefix
/// (unsolicited output received before the response) are skipped.
pub(crate) fn payload<'a, S: AsRef<str>>(lines: &'a [S], prefix: &'static str) -> Result<&'a str> {
    lines
        .iter()
        .find_map(|line| line.as_ref().trim().strip_prefix(prefix))
        .map(str::trim)
        .ok_or_else(|| {
            let received: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
            Error::violation(prefix, received.join("\n"))
        })
}

/// Deserialize the parameters following `prefix` into the response `R`.
///
/// Only `+` prefixes are stripped by `serde_at` itself, so the payload is
/// handed over without it for `$` and `#` commands alike.
pub(crate) fn decode<R, S>(lines: &[S], prefix: &'static str, expected: &'static str) -> Result<R>
where
    R: AtatResp + DeserializeOwned,
    S: AsRef<str>,
{
    let params = payload(lines, prefix)?;
    atat::serde_at::from_slice::<R>(params.as_bytes()).map_err(|_| Error::violation(expected, params))
}

/// Split `s` on plain commas into exactly `N` fields.
pub(crate) fn fixed_fields<'a, const N: usize>(s: &'a str, expected: &'static str) -> Result<[&'a str; N]> {
    let fields: Vec<&str> = s.split(',').map(str::trim).collect();
    fields
        .try_into()
        .map_err(|_| Error::violation(expected, s))
}

/// Single decimal digit within `0..=max`.
pub(crate) fn digit(field: &str, max: u8, expected: &'static str) -> Result<u8> {
    match field.trim().parse::<u8>() {
        Ok(v) if v <= max && field.trim().len() == 1 => Ok(v),
        _ => Err(Error::violation(expected, field)),
    }
}

/// Boolean transmitted as `0`/`1`.
pub(crate) fn flag(value: u8, expected: &'static str) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        v => Err(Error::violation(expected, v.to_string())),
    }
}

/// Service centre time stamp `yy/MM/dd,hh:mm:ss±zz` converted to UTC.
///
/// `zz` is the offset from UTC in quarters of an hour; a positive offset is
/// subtracted from the local time, a negative one added.
pub fn parse_timestamp(scts: &str) -> Result<DateTime<Utc>> {
    let (date, time) = scts
        .trim()
        .split_once(',')
        .ok_or_else(|| Error::violation("yy/MM/dd,hh:mm:ss±zz", scts))?;
    if time.len() < 3 || !time.is_char_boundary(time.len() - 3) {
        return Err(Error::violation("yy/MM/dd,hh:mm:ss±zz", scts));
    }

    let (clock, zone) = time.split_at(time.len() - 3);
    let mut chars = zone.chars();
    let sign = chars.next();
    let quarters: i64 = chars
        .as_str()
        .parse()
        .map_err(|_| Error::violation("quarter hour offset", zone))?;
    let offset = Duration::minutes(15 * quarters);

    let local = NaiveDateTime::parse_from_str(&format!("{}T{}", date, clock), "%y/%m/%dT%H:%M:%S")
        .map_err(|_| Error::violation("yy/MM/dd,hh:mm:ss", scts))?;

    let utc = match sign {
        Some('+') => local - offset,
        Some('-') => local + offset,
        _ => return Err(Error::violation("time zone sign + or -", zone)),
    };

    Ok(Utc.from_utc_datetime(&utc))
}
