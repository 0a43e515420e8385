use std::time::Duration;

use serde::Deserialize;

use crate::command::mobile_control::types::ErrorReportingMode;
use crate::module_timing;

/// Settings applied by [`Device::open`](crate::Device::open) right after the
/// transport is opened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StartupSettings {
    /// Send `+++` first, in case a previous session left the port in NMEA
    /// port lock mode.
    pub perform_initial_nmea_escape: bool,
    pub error_config: Option<ErrorReportingMode>,
    pub gnss_session: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) command_timeout: Duration,
    pub(crate) escape_timeout: Duration,
    pub(crate) nmea_timeout: Duration,
    pub(crate) nmea_drain_interval: Duration,
    pub(crate) startup: StartupSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command_timeout: module_timing::command_timeout(),
            escape_timeout: module_timing::escape_timeout(),
            nmea_timeout: module_timing::nmea_timeout(),
            nmea_drain_interval: module_timing::nmea_drain_interval(),
            startup: StartupSettings::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_command_timeout(self, command_timeout: Duration) -> Self {
        Self {
            command_timeout,
            ..self
        }
    }

    #[must_use]
    pub fn with_escape_timeout(self, escape_timeout: Duration) -> Self {
        Self {
            escape_timeout,
            ..self
        }
    }

    #[must_use]
    pub fn with_nmea_timeout(self, nmea_timeout: Duration) -> Self {
        Self {
            nmea_timeout,
            ..self
        }
    }

    #[must_use]
    pub fn with_nmea_drain_interval(self, nmea_drain_interval: Duration) -> Self {
        Self {
            nmea_drain_interval,
            ..self
        }
    }

    #[must_use]
    pub fn with_startup(self, startup: StartupSettings) -> Self {
        Self { startup, ..self }
    }

    pub fn command_timeout(&self) -> Duration {
        self.command_timeout
    }

    pub fn startup(&self) -> &StartupSettings {
        &self.startup
    }
}
