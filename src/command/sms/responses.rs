//! Responses for Short Messages Service Commands
use atat::atat_derive::AtatResp;
use chrono::{DateTime, Utc};
use heapless::String;
use serde::Serialize;

use super::types::SmsFormat;
use crate::command::types::{decode, parse_timestamp};
use crate::error::{Error, Result};

/// Message format +CMGF
#[derive(Debug, Clone, PartialEq, Eq, AtatResp)]
pub struct MessageFormat {
    #[at_arg(position = 0)]
    pub mode: u8,
}

/// Header line of a text mode +CMGL entry
#[derive(Debug, Clone, PartialEq, Eq, AtatResp)]
pub struct MessageListHeader {
    #[at_arg(position = 0)]
    pub index: u32,
    #[at_arg(position = 1)]
    pub stat: String<16>,
    #[at_arg(position = 2)]
    pub oa: String<64>,
    #[at_arg(position = 3)]
    pub alpha: String<64>,
    #[at_arg(position = 4)]
    pub scts: String<32>,
}

/// `+CMGF: <mode>`
pub fn message_format<S: AsRef<str>>(lines: &[S]) -> Result<SmsFormat> {
    let resp: MessageFormat = decode(lines, "+CMGF:", "+CMGF: 0|1")?;
    SmsFormat::try_from(resp.mode).map_err(|mode| Error::violation("+CMGF: 0|1", mode.to_string()))
}

/// One entry of a text mode `+CMGL` listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmsMessage {
    pub index: u32,
    pub status: std::string::String,
    pub sender: std::string::String,
    pub timestamp: DateTime<Utc>,
    pub body: std::string::String,
}

impl SmsMessage {
    /// Decode `+CMGL: <index>,"<stat>","<oa>","<alpha>","<scts>"[,...]`
    /// headers, each followed by the message text up to the next header.
    ///
    /// The body lines carry no prefix, so the pairing is done here rather
    /// than by `serde_at`. Lines in front of the first header are not part of
    /// the listing.
    pub fn decode_list<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Self>> {
        let mut messages = Vec::new();
        let mut current: Option<(Self, Vec<&str>)> = None;

        for line in lines.iter().map(AsRef::as_ref) {
            if line.trim_start().starts_with("+CMGL:") {
                if let Some(message) = current.take() {
                    messages.push(finish(message));
                }
                current = Some((Self::decode_header(line)?, Vec::new()));
            } else if let Some((_, body)) = current.as_mut() {
                body.push(line);
            }
        }
        if let Some(message) = current {
            messages.push(finish(message));
        }

        Ok(messages)
    }

    fn decode_header(line: &str) -> Result<Self> {
        const EXPECTED: &str = "+CMGL: <index>,<stat>,<oa>,<alpha>,<scts>";

        // `<tooa>,<length>` follow when `+CSDH=1`; they are not decoded
        let header = [leading_fields(line.trim(), 5)];
        let resp: MessageListHeader = decode(&header, "+CMGL:", EXPECTED)?;

        Ok(Self {
            index: resp.index,
            status: resp.stat.as_str().into(),
            sender: resp.oa.as_str().into(),
            timestamp: parse_timestamp(&resp.scts)?,
            body: std::string::String::new(),
        })
    }
}

/// `s` up to, not including, the comma ending its `n`th field. Commas within
/// double quotes do not count.
fn leading_fields(s: &str, n: usize) -> &str {
    let mut quoted = false;
    let mut fields = 0;

    for (i, c) in s.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                fields += 1;
                if fields == n {
                    return &s[..i];
                }
            }
            _ => {}
        }
    }
    s
}

fn finish((mut message, body): (SmsMessage, Vec<&str>)) -> SmsMessage {
    message.body = body.join("\n");
    message
}
