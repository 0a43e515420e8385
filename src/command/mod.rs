//! AT Commands for the Telit LE910Cx module family\
//! Following the Telit LE910Cx AT Commands Reference Guide (80502ST10950A)
//!
//! Commands are plain structs deriving [`atat::AtatCmd`]. Fixed shape
//! information responses derive [`atat::AtatResp`] and are deserialized with
//! `atat::serde_at`; the decoders in each family's `responses` module turn
//! them into domain types.

pub mod error;
pub mod general;
pub mod gnss;
pub mod mobile_control;
pub mod sms;
pub mod types;

use atat::atat_derive::AtatResp;
use atat::AtatCmd;

#[derive(Clone, AtatResp)]
pub struct NoResponse;

/// Render a typed command as the line written to the transport, without its
/// termination.
pub fn encode<Cmd: AtatCmd>(cmd: &Cmd) -> String {
    let mut buf = vec![0u8; Cmd::MAX_LEN];
    let len = cmd.write(&mut buf);
    String::from_utf8_lossy(&buf[..len]).trim_end().to_string()
}
