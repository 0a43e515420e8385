use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::Once;
use std::time::Duration;

use crate::transport::LineTransport;

type Responder = Box<dyn FnMut(&str) -> Vec<String> + Send>;

pub fn init_logger() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Scripted stand in for the serial port.
///
/// Every written line (and raw write) is handed to the responder, the lines
/// it returns are queued for reading. Reading from an empty queue times out
/// immediately.
pub struct MockTransport {
    open: bool,
    pub opened: usize,
    pub closed: usize,
    pub written: Vec<String>,
    pub raw: Vec<Vec<u8>>,
    pending: VecDeque<String>,
    responder: Responder,
}

impl MockTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: FnMut(&str) -> Vec<String> + Send + 'static,
    {
        init_logger();
        Self {
            open: false,
            opened: 0,
            closed: 0,
            written: Vec::new(),
            raw: Vec::new(),
            pending: VecDeque::new(),
            responder: Box::new(responder),
        }
    }

    /// Fixed replies per written line, anything else gets no answer.
    pub fn scripted(script: &[(&str, &[&str])]) -> Self {
        let script: HashMap<String, Vec<String>> = script
            .iter()
            .map(|(cmd, reply)| (cmd.to_string(), reply.iter().map(|l| l.to_string()).collect()))
            .collect();
        Self::new(move |line| script.get(line).cloned().unwrap_or_default())
    }

    pub fn silent() -> Self {
        Self::new(|_| Vec::new())
    }

    /// Number of written lines starting with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.written.iter().filter(|l| l.starts_with(prefix)).count()
    }
}

impl LineTransport for MockTransport {
    fn open(&mut self) -> io::Result<()> {
        self.open = true;
        self.opened += 1;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.open = false;
        self.closed += 1;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.written.push(line.to_string());
        let reply = (self.responder)(line);
        self.pending.extend(reply);
        Ok(())
    }

    fn write_raw(&mut self, data: &[u8]) -> io::Result<()> {
        self.raw.push(data.to_vec());
        let reply = (self.responder)(&String::from_utf8_lossy(data));
        self.pending.extend(reply);
        Ok(())
    }

    fn read_line(&mut self, _timeout: Duration) -> io::Result<Option<String>> {
        Ok(self.pending.pop_front())
    }
}
