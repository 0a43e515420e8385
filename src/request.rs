//! Host facing command surface.
//!
//! A [`Request`] names one driver operation together with its arguments, a
//! [`Reply`] carries its result. Both map to JSON objects, e.g.
//! `{"cmd": "error_config", "mode": "verbose"}`.
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{CommandOutcome, Device, ExecuteOptions};
use crate::command::general::responses::ResetConfig;
use crate::command::general::types::ResetMode;
use crate::command::gnss::responses::{GnssLocation, GnssSessionState, NmeaStreamConfig};
use crate::command::mobile_control::types::ErrorReportingMode;
use crate::command::sms::responses::SmsMessage;
use crate::command::sms::types::{SmsFormat, SmsStatus};
use crate::error::{Error, Result};
use crate::transport::LineTransport;

fn yes() -> bool {
    true
}

fn ok() -> Vec<String> {
    vec!["OK".to_string()]
}

fn text() -> SmsFormat {
    SmsFormat::Text
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Request {
    Execute {
        command: String,
        #[serde(default = "ok")]
        ready_words: Vec<String>,
        #[serde(default = "yes")]
        keep_connection: bool,
        /// Seconds
        cooldown: Option<f64>,
        /// Seconds
        timeout: Option<f64>,
        #[serde(default = "yes")]
        raise_on_error: bool,
    },
    Imei,
    ManufacturerId,
    ModelId,
    SoftReset,
    Reset {
        mode: Option<ResetMode>,
        /// Minutes
        #[serde(default)]
        delay: u32,
    },
    Time,
    CellLocation,
    ErrorConfig {
        mode: Option<ErrorReportingMode>,
        #[serde(default)]
        force: bool,
    },
    SmsFormat {
        mode: Option<SmsFormat>,
        #[serde(default)]
        force: bool,
    },
    SmsList {
        #[serde(default)]
        status: SmsStatus,
        #[serde(default)]
        clear: bool,
        #[serde(default = "text")]
        format: SmsFormat,
    },
    SmsDelete {
        index: u32,
    },
    GnssLocation {
        #[serde(default)]
        decimal_degrees: bool,
    },
    GnssSession {
        status: Option<bool>,
        #[serde(default)]
        force: bool,
    },
    GnssNmeaDataConfig {
        config: Option<NmeaStreamConfig>,
        #[serde(default)]
        force: bool,
    },
    NmeaMessages {
        /// Seconds
        timeout: Option<f64>,
    },
    SendNmeaEscapeSequence {
        #[serde(default)]
        wait: bool,
        /// Seconds
        timeout: Option<f64>,
    },
}

impl Request {
    /// Request for the bare command `name`, with default arguments.
    pub fn query(name: &str) -> Result<Self> {
        Ok(match name {
            "imei" => Self::Imei,
            "manufacturer_id" => Self::ManufacturerId,
            "model_id" => Self::ModelId,
            "soft_reset" => Self::SoftReset,
            "reset" => Self::Reset {
                mode: None,
                delay: 0,
            },
            "time" => Self::Time,
            "cell_location" => Self::CellLocation,
            "error_config" => Self::ErrorConfig {
                mode: None,
                force: false,
            },
            "sms_format" => Self::SmsFormat {
                mode: None,
                force: false,
            },
            "sms_list" => Self::SmsList {
                status: SmsStatus::All,
                clear: false,
                format: SmsFormat::Text,
            },
            "gnss_location" => Self::GnssLocation {
                decimal_degrees: false,
            },
            "gnss_session" => Self::GnssSession {
                status: None,
                force: false,
            },
            "gnss_nmea_data_config" => Self::GnssNmeaDataConfig {
                config: None,
                force: false,
            },
            "nmea_messages" => Self::NmeaMessages { timeout: None },
            "send_nmea_escape_sequence" => Self::SendNmeaEscapeSequence {
                wait: false,
                timeout: None,
            },
            "execute" | "sms_delete" => return Err(Error::invalid("arguments", name)),
            _ => return Err(Error::UnsupportedCommand(name.to_string())),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Done,
    Outcome(CommandOutcome),
    Text(Option<String>),
    Time(DateTime<Utc>),
    Reset(ResetConfig),
    ErrorConfig(ErrorReportingMode),
    SmsFormat(SmsFormat),
    Messages(Vec<SmsMessage>),
    Location(GnssLocation),
    GnssSession(GnssSessionState),
    NmeaConfig(NmeaStreamConfig),
    Lines(Vec<String>),
    Escape(Option<CommandOutcome>),
}

/// Host supplied seconds, finite and not negative.
fn seconds(parameter: &'static str, value: Option<f64>) -> Result<Option<Duration>> {
    value
        .map(|secs| Duration::try_from_secs_f64(secs).map_err(|_| Error::invalid(parameter, secs.to_string())))
        .transpose()
}

impl<T: LineTransport> Device<T> {
    pub fn handle(&mut self, request: Request) -> Result<Reply> {
        debug!("Handling {:?}", request);

        Ok(match request {
            Request::Execute {
                command,
                ready_words,
                keep_connection,
                cooldown,
                timeout,
                raise_on_error,
            } => {
                let options = ExecuteOptions {
                    ready_words,
                    keep_connection,
                    cooldown: seconds("cooldown", cooldown)?,
                    timeout: seconds("timeout", timeout)?,
                    raise_on_error,
                };
                Reply::Outcome(self.execute(&command, options)?)
            }
            Request::Imei => Reply::Text(Some(self.imei()?)),
            Request::ManufacturerId => Reply::Text(self.manufacturer_id()?),
            Request::ModelId => Reply::Text(self.model_id()?),
            Request::SoftReset => {
                self.soft_reset()?;
                Reply::Done
            }
            Request::Reset { mode, delay } => Reply::Reset(self.reset(mode, delay)?),
            Request::Time => Reply::Time(self.time()?),
            Request::CellLocation => Reply::Outcome(self.cell_location()?),
            Request::ErrorConfig { mode, force } => Reply::ErrorConfig(self.error_config(mode, force)?),
            Request::SmsFormat { mode, force } => Reply::SmsFormat(self.sms_format(mode, force)?),
            Request::SmsList {
                status,
                clear,
                format,
            } => Reply::Messages(self.sms_list(status, clear, format)?),
            Request::SmsDelete { index } => {
                self.sms_delete(index)?;
                Reply::Done
            }
            Request::GnssLocation { decimal_degrees } => Reply::Location(self.gnss_location(decimal_degrees)?),
            Request::GnssSession { status, force } => Reply::GnssSession(self.gnss_session(status, force)?),
            Request::GnssNmeaDataConfig { config, force } => {
                Reply::NmeaConfig(self.gnss_nmea_data_config(config, force)?)
            }
            Request::NmeaMessages { timeout } => Reply::Lines(self.nmea_messages(seconds("timeout", timeout)?)?),
            Request::SendNmeaEscapeSequence { wait, timeout } => {
                Reply::Escape(self.send_nmea_escape_sequence(wait, seconds("timeout", timeout)?)?)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::gnss::types::NmeaMode;
    use crate::config::Config;
    use crate::test_helpers::MockTransport;

    fn device(transport: MockTransport) -> Device<MockTransport> {
        Device::new(
            transport,
            Config::default().with_command_timeout(Duration::from_millis(20)),
        )
    }

    #[test]
    fn query_known_commands() {
        assert_eq!(Request::query("imei").unwrap(), Request::Imei);
        assert_eq!(
            Request::query("error_config").unwrap(),
            Request::ErrorConfig {
                mode: None,
                force: false
            }
        );
    }

    #[test]
    fn query_unsupported_command() {
        match Request::query("generate_key") {
            Err(Error::UnsupportedCommand(name)) => assert_eq!(name, "generate_key"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            Request::query("sms_delete"),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn parse_requests() {
        let request: Request =
            serde_json::from_str(r#"{"cmd": "error_config", "mode": "verbose", "force": true}"#).unwrap();
        assert_eq!(
            request,
            Request::ErrorConfig {
                mode: Some(ErrorReportingMode::Verbose),
                force: true
            }
        );

        let request: Request = serde_json::from_str(
            r#"{"cmd": "gnss_nmea_data_config", "config": {"mode": "port_lock", "gga": true}}"#,
        )
        .unwrap();
        match request {
            Request::GnssNmeaDataConfig {
                config: Some(config),
                force: false,
            } => {
                assert_eq!(config.mode, NmeaMode::PortLock);
                assert!(config.gga);
                assert!(!config.vtg);
            }
            other => panic!("unexpected {:?}", other),
        }

        let request: Request = serde_json::from_str(r#"{"cmd": "sms_list"}"#).unwrap();
        assert_eq!(request, Request::query("sms_list").unwrap());

        let request: Request = serde_json::from_str(r#"{"cmd": "send_nmea_escape_sequence"}"#).unwrap();
        assert_eq!(
            request,
            Request::SendNmeaEscapeSequence {
                wait: false,
                timeout: None
            }
        );
        assert_eq!(request, Request::query("send_nmea_escape_sequence").unwrap());

        assert!(serde_json::from_str::<Request>(r#"{"cmd": "sms_format", "mode": "binary"}"#).is_err());
    }

    #[test]
    fn negative_seconds_are_rejected() {
        let mut dev = device(MockTransport::silent());
        let request: Request =
            serde_json::from_str(r#"{"cmd": "nmea_messages", "timeout": -1.0}"#).unwrap();

        assert!(matches!(
            dev.handle(request),
            Err(Error::Validation {
                parameter: "timeout",
                ..
            })
        ));
    }

    #[test]
    fn huge_timeout_is_accepted() {
        let mut dev = device(MockTransport::scripted(&[("AT", &["OK"])]));
        let request: Request =
            serde_json::from_str(r#"{"cmd": "execute", "command": "AT", "timeout": 1e19}"#).unwrap();

        match dev.handle(request).unwrap() {
            Reply::Outcome(outcome) => assert_eq!(outcome.ready_word.as_deref(), Some("OK")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn handle_execute() {
        let mut dev = device(MockTransport::scripted(&[("AT+CSQ", &["+CSQ: 17,99", "OK"])]));
        let request: Request = serde_json::from_str(r#"{"cmd": "execute", "command": "AT+CSQ"}"#).unwrap();

        let reply = dev.handle(request).unwrap();
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            serde_json::json!({
                "lines": ["+CSQ: 17,99", "OK"],
                "ready_word": "OK",
                "data": ["+CSQ: 17,99"],
                "error": null,
            })
        );
    }

    #[test]
    fn handle_replies() {
        let mut dev = device(MockTransport::scripted(&[
            ("AT+CMEE?", &["+CMEE: 1", "OK"]),
            ("ATZ", &["OK"]),
        ]));

        let reply = dev.handle(Request::query("error_config").unwrap()).unwrap();
        assert_eq!(reply, Reply::ErrorConfig(ErrorReportingMode::Numeric));
        assert_eq!(serde_json::to_value(&reply).unwrap(), serde_json::json!("numeric"));

        let reply = dev.handle(Request::SoftReset).unwrap();
        assert_eq!(serde_json::to_value(&reply).unwrap(), serde_json::Value::Null);
    }
}
