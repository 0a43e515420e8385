//! Responses for Mobile equipment control and status Commands
use atat::atat_derive::AtatResp;

use super::types::ErrorReportingMode;
use crate::command::types::decode;
use crate::error::{Error, Result};

/// 5.2 Report mobile termination error +CMEE
#[derive(Debug, Clone, PartialEq, Eq, AtatResp)]
pub struct ReportMobileTerminationError {
    #[at_arg(position = 0)]
    pub n: u8,
}

/// `+CMEE: <n>`
pub fn error_reporting<S: AsRef<str>>(lines: &[S]) -> Result<ErrorReportingMode> {
    let resp: ReportMobileTerminationError = decode(lines, "+CMEE:", "+CMEE: 0..2")?;
    ErrorReportingMode::try_from(resp.n).map_err(|n| Error::violation("+CMEE: 0..2", n.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_cmee() {
        assert_eq!(
            atat::serde_at::from_slice::<ReportMobileTerminationError>(b"+CMEE: 2"),
            Ok(ReportMobileTerminationError { n: 2 })
        );
    }

    #[test]
    fn decode_error_reporting() {
        assert_eq!(error_reporting(&["+CMEE: 2"]).unwrap(), ErrorReportingMode::Verbose);
        assert_eq!(error_reporting(&["+CMEE: 0"]).unwrap(), ErrorReportingMode::Disabled);
        assert!(matches!(
            error_reporting(&["+CMEE: 3"]),
            Err(Error::ProtocolViolation { expected: "+CMEE: 0..2", .. })
        ));
        assert!(error_reporting(&["+CMEE:"]).is_err());
        assert!(error_reporting(&["+CMEE: verbose"]).is_err());
    }

    #[test]
    fn parse_error_reporting() {
        assert_eq!("Verbose".parse::<ErrorReportingMode>().unwrap(), ErrorReportingMode::Verbose);
        assert!(matches!(
            "loud".parse::<ErrorReportingMode>(),
            Err(Error::Validation { parameter: "error reporting mode", .. })
        ));
    }
}
