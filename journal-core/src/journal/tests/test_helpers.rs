use crate::journal::sink::{Sink, SinkError};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// In-memory sink; clones share the same line buffer.
#[derive(Clone, Default)]
pub(crate) struct RecordingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Sink for RecordingSink {
    fn write(&mut self, line: &str) -> Result<(), SinkError> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }

    fn is_connected(&self) -> bool {
        true
    }
}

/// Network sink whose every send fails, standing in for a dead collector.
#[derive(Default)]
pub(crate) struct FailingSink {
    pub(crate) attempts: Arc<Mutex<usize>>,
}

impl Sink for FailingSink {
    fn write(&mut self, _line: &str) -> Result<(), SinkError> {
        *self.attempts.lock().unwrap() += 1;
        Err(SinkError::Send {
            addr: "127.0.0.1:9".to_string(),
            source: io::Error::from(io::ErrorKind::ConnectionRefused),
        })
    }

    fn is_connected(&self) -> bool {
        false
    }
}

pub(crate) fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Strip the `[YYYY-MM-DD HH:MM:SS] ` prefix, leaving `[LEVEL] message`.
pub(crate) fn without_timestamp(line: &str) -> &str {
    assert!(line.starts_with('['), "line has no timestamp: {line}");
    let end = line.find("] ").expect("timestamp not terminated");
    &line[end + 2..]
}
