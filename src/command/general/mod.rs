//! ### 3 - General Commands
pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;

use super::NoResponse;
use responses::{Clock, PeriodicReset, SerialNumber};

/// Manufacturer identification +GMI
///
/// Text string identifying the manufacturer.
#[derive(Clone, AtatCmd)]
#[at_cmd("+GMI", NoResponse)]
pub struct GetManufacturerId;

/// Model identification +GMM
#[derive(Clone, AtatCmd)]
#[at_cmd("+GMM", NoResponse)]
pub struct GetModelId;

/// Product serial number identification +GSN
///
/// With `snt = 1` the International Mobile Equipment Identity (IMEI) of the
/// module is returned as `+GSN: <imei>`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+GSN", SerialNumber)]
pub struct GetImei {
    #[at_arg(position = 0)]
    pub snt: u8,
}

/// Soft reset Z
///
/// Resets the active profile to the stored one.
#[derive(Clone, AtatCmd)]
#[at_cmd("Z", NoResponse, value_sep = false)]
pub struct SoftReset;

/// Periodic reset #ENHRST
#[derive(Clone, AtatCmd)]
#[at_cmd("#ENHRST?", PeriodicReset)]
pub struct GetReset;

/// Periodic reset #ENHRST
///
/// Schedules a single (`mode = 1`) or periodic (`mode = 2`) reset after
/// `delay` minutes, `mode = 0` disables it.
#[derive(Clone, AtatCmd)]
#[at_cmd("#ENHRST", NoResponse)]
pub struct SetReset {
    #[at_arg(position = 0)]
    pub mode: u8,
    #[at_arg(position = 1)]
    pub delay: u32,
}

/// Clock management +CCLK
#[derive(Clone, AtatCmd)]
#[at_cmd("+CCLK?", Clock)]
pub struct GetClock;

/// Cell based location #GTP
#[derive(Clone, AtatCmd)]
#[at_cmd("#GTP", NoResponse)]
pub struct GetCellLocation;
