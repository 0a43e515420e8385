//! Line oriented connection to the module.
//!
//! Implementors only provide the primitive operations; matching ready words
//! and error result codes is shared by all transports through the provided
//! methods.
use std::io;
use std::time::{Duration, Instant};

use crate::command::error::ModemError;

/// Lines read up to, and including, a ready word or an error result code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matched {
    /// The line that ended the read, either the ready word or the error.
    pub line: String,
    /// Non empty lines received before `line`.
    pub data: Vec<String>,
    pub error: Option<ModemError>,
}

pub trait LineTransport {
    fn open(&mut self) -> io::Result<()>;

    fn close(&mut self) -> io::Result<()>;

    fn is_open(&self) -> bool;

    /// Write `line` followed by the command line termination.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Write `data` as is, without termination.
    fn write_raw(&mut self, data: &[u8]) -> io::Result<()>;

    /// Next received line without its termination, `None` if nothing
    /// complete arrived within `timeout`.
    fn read_line(&mut self, timeout: Duration) -> io::Result<Option<String>>;

    /// Read lines until one equals `ready_word` or is an error result code,
    /// whichever comes first. `None` once `timeout` is exhausted.
    fn read_until(&mut self, ready_word: &str, timeout: Duration) -> io::Result<Option<Matched>> {
        // No deadline if it lies beyond what `Instant` can represent
        let deadline = Instant::now().checked_add(timeout);
        let mut data = Vec::new();

        loop {
            let remaining = deadline.map_or(timeout, |d| d.saturating_duration_since(Instant::now()));
            if remaining.is_zero() {
                return Ok(None);
            }

            let Some(line) = self.read_line(remaining)? else {
                return Ok(None);
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if line == ready_word {
                return Ok(Some(Matched {
                    line: line.to_string(),
                    data,
                    error: None,
                }));
            }

            if let Ok(error) = line.parse::<ModemError>() {
                return Ok(Some(Matched {
                    line: line.to_string(),
                    data,
                    error: Some(error),
                }));
            }

            data.push(line.to_string());
        }
    }

    /// Drain buffered lines. Waits up to `first_timeout` for the first one,
    /// then keeps reading until the line gap exceeds `drain_interval`.
    fn read_lines(&mut self, first_timeout: Duration, drain_interval: Duration) -> io::Result<Vec<String>> {
        let mut lines = Vec::new();
        let mut timeout = first_timeout;

        while let Some(line) = self.read_line(timeout)? {
            timeout = drain_interval;
            let line = line.trim();
            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::MockTransport;

    #[test]
    fn read_until_collects_data() {
        let mut transport = MockTransport::scripted(&[("AT+GMI", &["", "Telit", "OK"])]);
        transport.write_line("AT+GMI").unwrap();

        let matched = transport
            .read_until("OK", Duration::from_millis(10))
            .unwrap()
            .unwrap();
        assert_eq!(matched.line, "OK");
        assert_eq!(matched.data, vec!["Telit".to_string()]);
        assert_eq!(matched.error, None);
    }

    #[test]
    fn read_until_stops_at_error() {
        let mut transport =
            MockTransport::scripted(&[("AT+CMGL", &["+CMS ERROR: 302", "OK"])]);
        transport.write_line("AT+CMGL").unwrap();

        let matched = transport
            .read_until("OK", Duration::from_millis(10))
            .unwrap()
            .unwrap();
        assert_eq!(matched.error, Some(ModemError::Cms("302".into())));
        assert!(matched.data.is_empty());
    }

    #[test]
    fn read_until_times_out() {
        let mut transport = MockTransport::silent();
        assert_eq!(
            transport
                .read_until("OK", Duration::from_millis(10))
                .unwrap(),
            None
        );
    }

    #[test]
    fn read_until_beyond_representable_deadline() {
        let mut transport = MockTransport::scripted(&[("AT", &["OK"])]);
        transport.write_line("AT").unwrap();

        let matched = transport.read_until("OK", Duration::MAX).unwrap().unwrap();
        assert_eq!(matched.line, "OK");

        assert_eq!(transport.read_until("OK", Duration::MAX).unwrap(), None);
    }

    #[test]
    fn read_lines_drains() {
        let mut transport = MockTransport::scripted(&[(
            "+++",
            &["$GPGGA,1", " ", "$GPRMC,2", "NO CARRIER"],
        )]);
        transport.write_raw(b"+++").unwrap();

        let lines = transport
            .read_lines(Duration::from_millis(10), Duration::from_millis(1))
            .unwrap();
        assert_eq!(lines, vec!["$GPGGA,1", "$GPRMC,2", "NO CARRIER"]);
        assert!(transport
            .read_lines(Duration::from_millis(10), Duration::from_millis(1))
            .unwrap()
            .is_empty());
    }
}
