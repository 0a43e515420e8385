//! ### GPS/GNSS Commands
pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;

use super::NoResponse;
use responses::{GnssPowerManagement, NmeaDataConfig, NmeaStreamConfig};

/// Get acquired position $GPSACP
///
/// Returns information about the last GNSS position. Fields are left empty
/// without a fix, see [`responses::GnssLocation::decode`].
#[derive(Clone, AtatCmd)]
#[at_cmd("$GPSACP", NoResponse)]
pub struct GetAcquiredPosition;

/// GNSS controller power management $GPSP
#[derive(Clone, AtatCmd)]
#[at_cmd("$GPSP?", GnssPowerManagement)]
pub struct GetGnssSession;

/// GNSS controller power management $GPSP
///
/// Powers the GNSS controller on (`1`) or off (`0`).
#[derive(Clone, AtatCmd)]
#[at_cmd("$GPSP", NoResponse)]
pub struct SetGnssSession {
    #[at_arg(position = 0)]
    pub status: u8,
}

/// Unsolicited NMEA data configuration $GPSNMUN
#[derive(Clone, AtatCmd)]
#[at_cmd("$GPSNMUN?", NmeaDataConfig)]
pub struct GetNmeaDataConfig;

/// Unsolicited NMEA data configuration $GPSNMUN
///
/// Selects the NMEA stream mode and which sentences are emitted. In port
/// lock mode the module answers `CONNECT` and the port stays dedicated to the
/// stream until the escape sequence is received.
#[derive(Clone, AtatCmd)]
#[at_cmd("$GPSNMUN", NoResponse)]
pub struct SetNmeaDataConfig {
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

impl From<&NmeaStreamConfig> for SetNmeaDataConfig {
    fn from(config: &NmeaStreamConfig) -> Self {
        Self {
            enable: config.mode.into(),
            gga: config.gga.into(),
            gll: config.gll.into(),
            gsa: config.gsa.into(),
            gsv: config.gsv.into(),
            rmc: config.rmc.into(),
            vtg: config.vtg.into(),
        }
    }
}
