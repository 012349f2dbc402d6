mod error;
mod file;
mod mirrored;
mod socket;

pub use error::SinkError;
pub use file::FileSink;
pub use mirrored::MirroredSink;
pub use socket::SocketSink;

/// A destination for formatted journal lines.
///
/// A sink is owned by exactly one `Logger` and moves with it onto the worker
/// thread, hence the `Send` bound. Implementations append the line terminator
/// themselves; callers pass the bare line.
pub trait Sink: Send {
    /// Deliver one formatted line.
    fn write(&mut self, line: &str) -> Result<(), SinkError>;

    /// Whether the underlying handle is currently open.
    fn is_connected(&self) -> bool;

    /// Release the underlying handle. A later `write` may reopen it.
    fn close(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl Sink for Box<dyn Sink> {
    fn write(&mut self, line: &str) -> Result<(), SinkError> {
        (**self).write(line)
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        (**self).close()
    }
}
