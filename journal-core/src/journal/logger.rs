use crate::importance::Importance;
use crate::journal::entry::LogEntry;
use crate::journal::error::JournalError;
use crate::journal::sink::{FileSink, MirroredSink, Sink, SocketSink};
use std::path::PathBuf;

/// Filters, formats and routes journal entries into a single owned sink.
pub struct Logger {
    sink: Box<dyn Sink>,
    default_importance: Importance,
}

impl Logger {
    pub fn new(sink: impl Sink + 'static, default_importance: Importance) -> Self {
        Self {
            sink: Box::new(sink),
            default_importance,
        }
    }

    /// File-only journal.
    pub fn to_file(
        path: impl Into<PathBuf>,
        default_importance: Importance,
    ) -> Result<Self, JournalError> {
        Ok(Self::new(FileSink::open(path)?, default_importance))
    }

    /// Journal file mirrored to a collector at `host:port`.
    pub fn to_socket_and_file(
        host: &str,
        port: u16,
        path: impl Into<PathBuf>,
        default_importance: Importance,
    ) -> Result<Self, JournalError> {
        let mirror = SocketSink::connect(host, port)?;
        let file = FileSink::open(path)?;
        Ok(Self::new(MirroredSink::new(mirror, file), default_importance))
    }

    /// Write `message` unless `importance` is below the configured default.
    ///
    /// Entries below the threshold are dropped silently. An empty message
    /// (or one starting with a newline) is rejected.
    pub fn log(&mut self, message: &str, importance: Importance) -> Result<(), JournalError> {
        if importance < self.default_importance {
            return Ok(());
        }
        if message.is_empty() || message.starts_with('\n') {
            return Err(JournalError::EmptyMessage);
        }

        let line = LogEntry::now(message, importance).format();
        self.sink.write(&line)?;
        Ok(())
    }

    /// Write `message` at the current default importance.
    pub fn log_default(&mut self, message: &str) -> Result<(), JournalError> {
        self.log(message, self.default_importance)
    }

    pub fn set_default_importance(&mut self, importance: Importance) {
        self.default_importance = importance;
    }

    pub fn default_importance(&self) -> Importance {
        self.default_importance
    }

    pub fn is_connected(&self) -> bool {
        self.sink.is_connected()
    }

    pub fn close(&mut self) -> Result<(), JournalError> {
        self.sink.close()?;
        Ok(())
    }
}
