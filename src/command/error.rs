use core::fmt;
use core::str::FromStr;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Final result code reported by the module instead of `OK`.
///
/// The module reports failures either as a bare `ERROR` or, depending on the
/// `+CMEE` reporting mode, as `+<TYPE> ERROR: <reason>` where `<reason>` is
/// a numeric code or a verbose text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModemError {
    Generic,
    /// Mobile termination error result code `+CME ERROR`
    Cme(String),
    /// Message service failure result code `+CMS ERROR`
    Cms(String),
    Vendor {
        kind: String,
        reason: String,
    },
}

impl ModemError {
    /// Error class, `"generic"` for a bare `ERROR`.
    pub fn kind(&self) -> &str {
        match self {
            Self::Generic => "generic",
            Self::Cme(_) => "CME",
            Self::Cms(_) => "CMS",
            Self::Vendor { kind, .. } => kind,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Generic => None,
            Self::Cme(reason) | Self::Cms(reason) | Self::Vendor { reason, .. } => Some(reason),
        }
    }
}

impl FromStr for ModemError {
    // Any line that is not an error sentinel
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "ERROR" {
            return Ok(Self::Generic);
        }

        let (kind, reason) = s
            .strip_prefix('+')
            .and_then(|rest| rest.split_once(" ERROR: "))
            .ok_or(())?;
        if kind.is_empty() || reason.trim().is_empty() {
            return Err(());
        }

        let reason = reason.trim().to_string();
        Ok(match kind {
            "CME" => Self::Cme(reason),
            "CMS" => Self::Cms(reason),
            _ => Self::Vendor {
                kind: kind.to_string(),
                reason,
            },
        })
    }
}

impl fmt::Display for ModemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => f.write_str("ERROR"),
            Self::Cme(reason) => write!(f, "+CME ERROR: {}", reason),
            Self::Cms(reason) => write!(f, "+CMS ERROR: {}", reason),
            Self::Vendor { kind, reason } => write!(f, "+{} ERROR: {}", kind, reason),
        }
    }
}

impl Serialize for ModemError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ModemError", 2)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("reason", &self.reason())?;
        state.end()
    }
}
