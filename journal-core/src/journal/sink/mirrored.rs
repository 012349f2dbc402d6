use crate::journal::sink::{FileSink, Sink, SinkError};
use tracing::warn;

/// Mirrors every line to a network sink on a best-effort basis while the
/// journal file stays the record of truth.
///
/// A mirror failure is reported as a warning and swallowed; the file write
/// always happens and its outcome is the outcome of the call.
pub struct MirroredSink {
    mirror: Box<dyn Sink>,
    file: FileSink,
}

impl MirroredSink {
    pub fn new(mirror: impl Sink + 'static, file: FileSink) -> Self {
        Self {
            mirror: Box::new(mirror),
            file,
        }
    }

    pub fn mirror_connected(&self) -> bool {
        self.mirror.is_connected()
    }
}

impl Sink for MirroredSink {
    fn write(&mut self, line: &str) -> Result<(), SinkError> {
        if let Err(e) = self.mirror.write(line) {
            warn!(
                error = %e,
                path = %self.file.path().display(),
                "mirror unavailable, message saved to file only"
            );
        }

        self.file.write(line)
    }

    fn is_connected(&self) -> bool {
        self.file.is_connected()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        if let Err(e) = self.mirror.close() {
            warn!(error = %e, "failed to close mirror");
        }
        self.file.close()
    }
}
