use core::fmt::Debug;
use std::thread;
use std::time::Duration;

use atat::AtatCmd;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::command::error::ModemError;
use crate::command::general::responses::ResetConfig;
use crate::command::general::types::ResetMode;
use crate::command::gnss::responses::{GnssLocation, GnssSessionState, NmeaStreamConfig};
use crate::command::gnss::types::NmeaMode;
use crate::command::mobile_control::types::ErrorReportingMode;
use crate::command::sms::responses::SmsMessage;
use crate::command::sms::types::{SmsFormat, SmsStatus};
use crate::command::{encode, general, gnss, mobile_control, sms};
use crate::config::{Config, StartupSettings};
use crate::error::{Error, Result};
use crate::transport::LineTransport;

const ESCAPE_SEQUENCE: &[u8] = b"+++";
const ESCAPE_READY_WORD: &str = "NO CARRIER";

/// How a single command is executed and completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Final result codes waited for, in order.
    pub ready_words: Vec<String>,
    /// Close the transport once the exchange is over.
    pub keep_connection: bool,
    /// Settling time after the exchange, also applied when it failed.
    pub cooldown: Option<Duration>,
    /// Per ready word, the configured command timeout when unset.
    pub timeout: Option<Duration>,
    /// Turn a matched error result code into [`Error::CommandExecution`].
    pub raise_on_error: bool,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            ready_words: vec!["OK".to_string()],
            keep_connection: true,
            cooldown: None,
            timeout: None,
            raise_on_error: true,
        }
    }
}

impl ExecuteOptions {
    #[must_use]
    pub fn with_ready_words<I, S>(self, ready_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ready_words: ready_words.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    #[must_use]
    pub fn close_connection(self) -> Self {
        Self {
            keep_connection: false,
            ..self
        }
    }

    #[must_use]
    pub fn with_cooldown(self, cooldown: Duration) -> Self {
        Self {
            cooldown: Some(cooldown),
            ..self
        }
    }

    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self
        }
    }

    #[must_use]
    pub fn without_raise(self) -> Self {
        Self {
            raise_on_error: false,
            ..self
        }
    }
}

/// Result of one executed command.
///
/// Either `ready_word` or `error` is set, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    /// Every non empty line received, including ready words and errors.
    pub lines: Vec<String>,
    /// The last ready word matched.
    pub ready_word: Option<String>,
    /// Lines preceding the last ready word, without the command echo.
    pub data: Vec<String>,
    pub error: Option<ModemError>,
}

impl CommandOutcome {
    /// First data line starting with `prefix`.
    pub fn find(&self, prefix: &str) -> Option<&str> {
        self.data
            .iter()
            .map(String::as_str)
            .find(|line| line.starts_with(prefix))
    }
}

/// Telit LE910Cx driver owning a line transport.
///
/// All operations take `&mut self`, so there is never more than one command
/// in flight on the transport.
pub struct Device<T: LineTransport> {
    transport: T,
    config: Config,
}

impl<T: LineTransport> Device<T> {
    pub fn new(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Open the transport and apply the startup settings from the config.
    pub fn open(&mut self) -> Result<()> {
        self.ensure_open()?;
        let startup = self.config.startup.clone();
        self.configure(&startup)
    }

    /// Bring up sequence: leave NMEA port lock mode if asked to, then apply
    /// the error reporting mode and GNSS session state.
    pub fn configure(&mut self, settings: &StartupSettings) -> Result<()> {
        if settings.perform_initial_nmea_escape {
            match self.send_nmea_escape_sequence(true, None) {
                Ok(_) => debug!("Left NMEA port lock mode"),
                // Port was not locked
                Err(Error::Timeout { .. }) => warn!("No answer to NMEA escape sequence"),
                Err(e) => return Err(e),
            }
        }

        if let Some(mode) = settings.error_config {
            self.error_config(Some(mode), false)?;
        }

        if let Some(enabled) = settings.gnss_session {
            self.gnss_session(Some(enabled), false)?;
        }

        Ok(())
    }

    pub fn close(&mut self) -> Result<()> {
        if self.transport.is_open() {
            info!("Closing connection");
            self.transport.close()?;
        }
        Ok(())
    }

    fn ensure_open(&mut self) -> Result<()> {
        if !self.transport.is_open() {
            info!("Opening connection");
            self.transport.open()?;
        }
        Ok(())
    }

    /// Write `command` and wait for each of the ready words in turn.
    ///
    /// An error result code ends the exchange at any step. The connection is
    /// closed (if requested) and the cooldown applied on every path, before
    /// any error is returned.
    pub fn execute(&mut self, command: &str, options: ExecuteOptions) -> Result<CommandOutcome> {
        info!("Sending command {:?}", command);
        let result = self.exchange(command, &options);

        if !options.keep_connection {
            info!("Closing connection");
            if let Err(e) = self.transport.close() {
                error!("Failed to close connection: {}", e);
            }
        }

        if let Some(cooldown) = options.cooldown {
            info!("Cooling down for {:?}", cooldown);
            thread::sleep(cooldown);
        }

        let outcome = result?;
        debug!("Response to {:?}: {:?}", command, outcome.lines);

        if let Some(error) = &outcome.error {
            error!("Command {:?} failed: {}", command, error);
            if options.raise_on_error {
                return Err(Error::CommandExecution {
                    command: command.to_string(),
                    error: error.clone(),
                });
            }
        }

        Ok(outcome)
    }

    fn exchange(&mut self, command: &str, options: &ExecuteOptions) -> Result<CommandOutcome> {
        let timeout = options.timeout.unwrap_or(self.config.command_timeout);

        self.ensure_open()?;
        self.transport.write_line(command)?;

        let mut outcome = CommandOutcome::default();
        for ready_word in &options.ready_words {
            let matched = self
                .transport
                .read_until(ready_word, timeout)?
                .ok_or_else(|| Error::Timeout {
                    command: command.to_string(),
                    ready_word: ready_word.clone(),
                    timeout,
                })?;

            outcome.lines.extend(matched.data.iter().cloned());
            outcome.lines.push(matched.line);

            if let Some(error) = matched.error {
                outcome.ready_word = None;
                outcome.data.clear();
                outcome.error = Some(error);
                break;
            }

            outcome.ready_word = Some(ready_word.clone());
            outcome.data = matched
                .data
                .into_iter()
                .filter(|line| line != command)
                .collect();
        }

        Ok(outcome)
    }

    /// Execute a typed command with default options.
    pub fn send<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<CommandOutcome> {
        self.send_with(cmd, ExecuteOptions::default())
    }

    pub fn send_with<Cmd: AtatCmd>(&mut self, cmd: &Cmd, options: ExecuteOptions) -> Result<CommandOutcome> {
        self.execute(&encode(cmd), options)
    }

    /// Read the current value, and write `desired` unless it is already set.
    /// `force` writes regardless. Writes are not read back.
    fn get_or_set<V, R, W>(
        &mut self,
        setting: &'static str,
        desired: Option<V>,
        force: bool,
        read: R,
        write: W,
    ) -> Result<V>
    where
        V: PartialEq + Debug,
        R: FnOnce(&mut Self) -> Result<V>,
        W: FnOnce(&mut Self, &V) -> Result<()>,
    {
        let current = read(self)?;

        let Some(desired) = desired else {
            return Ok(current);
        };

        if desired == current && !force {
            debug!("{} already {:?}", setting, current);
            return Ok(current);
        }

        debug!("Setting {} {:?} -> {:?}", setting, current, desired);
        write(self, &desired)?;
        Ok(desired)
    }

    pub fn imei(&mut self) -> Result<String> {
        let outcome = self.send(&general::GetImei { snt: 1 })?;
        general::responses::imei(&outcome.data)
    }

    pub fn manufacturer_id(&mut self) -> Result<Option<String>> {
        let outcome = self.send(&general::GetManufacturerId)?;
        Ok(general::responses::identification(&outcome.data))
    }

    pub fn model_id(&mut self) -> Result<Option<String>> {
        let outcome = self.send(&general::GetModelId)?;
        Ok(general::responses::identification(&outcome.data))
    }

    pub fn soft_reset(&mut self) -> Result<()> {
        self.send(&general::SoftReset)?;
        Ok(())
    }

    /// Query the periodic reset configuration, or schedule a reset with
    /// `delay` in minutes when `mode` is given.
    pub fn reset(&mut self, mode: Option<ResetMode>, delay: u32) -> Result<ResetConfig> {
        match mode {
            None => {
                let outcome = self.send(&general::GetReset)?;
                ResetConfig::decode(&outcome.data)
            }
            Some(mode) => {
                self.send(&general::SetReset {
                    mode: mode.into(),
                    delay,
                })?;
                Ok(ResetConfig { mode, delay })
            }
        }
    }

    pub fn time(&mut self) -> Result<DateTime<Utc>> {
        let outcome = self.send(&general::GetClock)?;
        general::responses::clock(&outcome.data)
    }

    /// Raw `#GTP` outcome.
    pub fn cell_location(&mut self) -> Result<CommandOutcome> {
        self.send(&general::GetCellLocation)
    }

    pub fn error_config(&mut self, mode: Option<ErrorReportingMode>, force: bool) -> Result<ErrorReportingMode> {
        self.get_or_set(
            "error reporting mode",
            mode,
            force,
            |dev| {
                let outcome = dev.send(&mobile_control::GetReportMobileTerminationError)?;
                mobile_control::responses::error_reporting(&outcome.data)
            },
            |dev, mode| {
                dev.send(&mobile_control::SetReportMobileTerminationError { n: (*mode).into() })?;
                Ok(())
            },
        )
    }

    pub fn sms_format(&mut self, format: Option<SmsFormat>, force: bool) -> Result<SmsFormat> {
        self.get_or_set(
            "SMS format",
            format,
            force,
            |dev| {
                let outcome = dev.send(&sms::GetMessageFormat)?;
                sms::responses::message_format(&outcome.data)
            },
            |dev, format| dev.write_sms_format(*format),
        )
    }

    fn write_sms_format(&mut self, format: SmsFormat) -> Result<()> {
        self.send(&sms::SetMessageFormat { mode: format.into() })?;
        Ok(())
    }

    /// List stored messages with the given status, switching the mailbox to
    /// `format` for the duration of the listing. With `clear` the listed
    /// messages are deleted afterwards.
    ///
    /// Only text mode listings can be decoded.
    pub fn sms_list(&mut self, status: SmsStatus, clear: bool, format: SmsFormat) -> Result<Vec<SmsMessage>> {
        if format != SmsFormat::Text {
            return Err(Error::invalid("SMS listing format", "pdu"));
        }

        let previous = self.sms_format(None, false)?;
        let switched = previous != format;
        if switched {
            self.write_sms_format(format)?;
        }

        let listed = self.list_messages(status, clear);

        if switched {
            if let Err(e) = self.write_sms_format(previous) {
                error!("Failed to restore SMS format {:?}: {}", previous, e);
            }
        }

        listed
    }

    fn list_messages(&mut self, status: SmsStatus, clear: bool) -> Result<Vec<SmsMessage>> {
        let outcome = self.send(&sms::ListMessages {
            stat: status.as_str(),
        })?;
        let messages = SmsMessage::decode_list(&outcome.data)?;

        if clear {
            for message in &messages {
                self.sms_delete(message.index)?;
            }
        }

        Ok(messages)
    }

    pub fn sms_delete(&mut self, index: u32) -> Result<()> {
        self.send(&sms::DeleteMessage { index })?;
        Ok(())
    }

    /// Last acquired position. Fails with [`Error::NoFix`] while the
    /// receiver has no 2D or 3D fix.
    pub fn gnss_location(&mut self, decimal_degrees: bool) -> Result<GnssLocation> {
        let outcome = self.send(&gnss::GetAcquiredPosition)?;
        GnssLocation::decode(&outcome.data, decimal_degrees)
    }

    pub fn gnss_session(&mut self, enabled: Option<bool>, force: bool) -> Result<GnssSessionState> {
        let enabled = self.get_or_set(
            "GNSS session",
            enabled,
            force,
            |dev| {
                let outcome = dev.send(&gnss::GetGnssSession)?;
                Ok(GnssSessionState::decode(&outcome.data)?.enabled)
            },
            |dev, enabled| {
                dev.send(&gnss::SetGnssSession {
                    status: (*enabled).into(),
                })?;
                Ok(())
            },
        )?;
        Ok(GnssSessionState { enabled })
    }

    /// Entering [`NmeaMode::PortLock`] is acknowledged with `CONNECT`, after
    /// which the port carries NMEA only until
    /// [`send_nmea_escape_sequence`](Self::send_nmea_escape_sequence).
    pub fn gnss_nmea_data_config(&mut self, config: Option<NmeaStreamConfig>, force: bool) -> Result<NmeaStreamConfig> {
        self.get_or_set(
            "NMEA data config",
            config,
            force,
            |dev| {
                let outcome = dev.send(&gnss::GetNmeaDataConfig)?;
                NmeaStreamConfig::decode(&outcome.data)
            },
            |dev, config| {
                let options = match config.mode {
                    NmeaMode::PortLock => ExecuteOptions::default().with_ready_words(["CONNECT"]),
                    _ => ExecuteOptions::default(),
                };
                dev.send_with(&gnss::SetNmeaDataConfig::from(config), options)?;
                Ok(())
            },
        )
    }

    /// Buffered NMEA sentences, empty if none arrive within `timeout`.
    pub fn nmea_messages(&mut self, timeout: Option<Duration>) -> Result<Vec<String>> {
        let timeout = timeout.unwrap_or(self.config.nmea_timeout);
        let lines = self
            .transport
            .read_lines(timeout, self.config.nmea_drain_interval)?;
        trace!("Read {} NMEA lines", lines.len());
        Ok(lines)
    }

    /// Write `+++` to leave NMEA port lock mode. With `wait` the sentences
    /// buffered up to the `NO CARRIER` acknowledgement are returned.
    pub fn send_nmea_escape_sequence(&mut self, wait: bool, timeout: Option<Duration>) -> Result<Option<CommandOutcome>> {
        self.ensure_open()?;
        info!("Sending NMEA escape sequence");
        self.transport.write_raw(ESCAPE_SEQUENCE)?;

        if !wait {
            return Ok(None);
        }

        let timeout = timeout.unwrap_or(self.config.escape_timeout);
        let matched = self
            .transport
            .read_until(ESCAPE_READY_WORD, timeout)?
            .ok_or_else(|| Error::Timeout {
                command: String::from_utf8_lossy(ESCAPE_SEQUENCE).into_owned(),
                ready_word: ESCAPE_READY_WORD.to_string(),
                timeout,
            })?;

        if let Some(error) = matched.error {
            return Err(Error::CommandExecution {
                command: String::from_utf8_lossy(ESCAPE_SEQUENCE).into_owned(),
                error,
            });
        }

        let mut lines = matched.data.clone();
        lines.push(matched.line);
        Ok(Some(CommandOutcome {
            lines,
            ready_word: Some(ESCAPE_READY_WORD.to_string()),
            data: matched.data,
            error: None,
        }))
    }
}

impl<T: LineTransport> Drop for Device<T> {
    fn drop(&mut self) {
        if self.transport.is_open() {
            if let Err(e) = self.transport.close() {
                error!("Failed to close connection: {}", e);
            }
        }
    }
}
