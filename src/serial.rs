//! [`LineTransport`] over a serial port.
use std::io::{self, Read, Write};
use std::time::{Duration, Instant};

use serialport::SerialPort;

use crate::transport::LineTransport;

pub const DEFAULT_BAUD_RATE: u32 = 115_200;

pub struct SerialTransport {
    path: String,
    baud_rate: u32,
    port: Option<Box<dyn SerialPort>>,
    // Bytes of a line not yet terminated
    buffer: Vec<u8>,
}

impl SerialTransport {
    pub fn new(path: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            path: path.into(),
            baud_rate,
            port: None,
            buffer: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn port(&mut self) -> io::Result<&mut Box<dyn SerialPort>> {
        self.port
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "serial port is not open"))
    }

    fn take_line(&mut self) -> Option<String> {
        let end = self.buffer.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.buffer.drain(..=end).collect();
        Some(
            String::from_utf8_lossy(&line)
                .trim_end_matches(&['\r', '\n'][..])
                .to_string(),
        )
    }
}

impl LineTransport for SerialTransport {
    fn open(&mut self) -> io::Result<()> {
        debug!("Opening {} at {} baud", self.path, self.baud_rate);
        let port = serialport::new(self.path.as_str(), self.baud_rate)
            .timeout(Duration::from_millis(100))
            .open()?;
        self.port = Some(port);
        self.buffer.clear();
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        // Dropping the handle closes the port
        self.port = None;
        self.buffer.clear();
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        trace!("> {}", line);
        let port = self.port()?;
        port.write_all(line.as_bytes())?;
        port.write_all(b"\r")?;
        port.flush()
    }

    fn write_raw(&mut self, data: &[u8]) -> io::Result<()> {
        let port = self.port()?;
        port.write_all(data)?;
        port.flush()
    }

    fn read_line(&mut self, timeout: Duration) -> io::Result<Option<String>> {
        let deadline = Instant::now().checked_add(timeout);
        let mut chunk = [0u8; 256];

        loop {
            if let Some(line) = self.take_line() {
                trace!("< {}", line);
                return Ok(Some(line));
            }

            let remaining = deadline.map_or(timeout, |d| d.saturating_duration_since(Instant::now()));
            if remaining.is_zero() {
                return Ok(None);
            }

            let port = self.port()?;
            port.set_timeout(remaining)?;
            match port.read(&mut chunk) {
                Ok(n) => self.buffer.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::TimedOut => return Ok(None),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }
}
