//! ### 11 - Short Messages Service
pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;

use super::NoResponse;
use responses::{MessageFormat, MessageListHeader};

/// Message format +CMGF
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGF?", MessageFormat)]
pub struct GetMessageFormat;

/// Message format +CMGF
///
/// Selects PDU (`0`) or text (`1`) mode for the message commands.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGF", NoResponse)]
pub struct SetMessageFormat {
    #[at_arg(position = 0)]
    pub mode: u8,
}

/// List messages +CMGL
///
/// In text mode `stat` is one of `"REC UNREAD"`, `"REC READ"`,
/// `"STO UNSENT"`, `"STO SENT"` or `"ALL"`. Every header line is followed
/// by the message text, see [`responses::SmsMessage::decode_list`].
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGL", MessageListHeader)]
pub struct ListMessages<'a> {
    #[at_arg(position = 0, len = 16)]
    pub stat: &'a str,
}

/// Delete message +CMGD
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGD", NoResponse)]
pub struct DeleteMessage {
    #[at_arg(position = 0)]
    pub index: u32,
}
