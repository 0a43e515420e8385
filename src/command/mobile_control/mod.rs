//! ### 5 - Mobile equipment control and status Commands
pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;

use super::NoResponse;
use responses::ReportMobileTerminationError;

/// Report mobile termination error +CMEE
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMEE?", ReportMobileTerminationError)]
pub struct GetReportMobileTerminationError;

/// Report mobile termination error +CMEE
///
/// Configures the formatting of the result code `+CME ERROR: <err>` as an
/// indication of an error relating to the functionality of the MT.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMEE", NoResponse)]
pub struct SetReportMobileTerminationError {
    #[at_arg(position = 0)]
    pub n: u8,
}
