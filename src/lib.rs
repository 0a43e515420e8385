//! Driver for Telit LE910Cx cellular/GNSS modules.
//!
//! The module is driven over a line oriented AT interface provided by a
//! [`LineTransport`]. [`Device`] owns the transport and exposes the identity,
//! clock, SMS and GNSS operations on top of the generic [`Device::execute`].
//!
//! Every operation borrows the device mutably, so only one command is ever in
//! flight on a transport. Callers sharing a device between threads wrap it in
//! a `std::sync::Mutex`.

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod client;
pub mod command;
pub mod config;
pub mod error;
mod module_timing;
pub mod request;
#[cfg(feature = "serial")]
pub mod serial;
pub mod transport;

#[cfg(test)]
mod test_helpers;

pub use atat;
pub use client::{CommandOutcome, Device, ExecuteOptions};
pub use config::{Config, StartupSettings};
pub use error::{Error, Result};
pub use request::{Reply, Request};
pub use transport::{LineTransport, Matched};
