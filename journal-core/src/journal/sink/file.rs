use crate::journal::sink::{Sink, SinkError};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Append-only journal file.
///
/// The file is opened when the sink is built; after `close()` the next write
/// reopens it in append mode.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Option<File>,
}

impl FileSink {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let path = path.into();
        let file = open_append(&path)?;
        Ok(Self {
            path,
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn open_append(path: &Path) -> Result<File, SinkError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| SinkError::open(path, e))?;

    debug!(path = %path.display(), "journal file opened");
    Ok(file)
}

impl Sink for FileSink {
    fn write(&mut self, line: &str) -> Result<(), SinkError> {
        let file = match &mut self.file {
            Some(file) => file,
            slot @ None => slot.insert(open_append(&self.path)?),
        };

        let mut record = String::with_capacity(line.len() + 1);
        record.push_str(line);
        record.push('\n');

        file.write_all(record.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| SinkError::write(&self.path, e))
    }

    fn is_connected(&self) -> bool {
        self.file.is_some()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        if let Some(mut file) = self.file.take() {
            file.flush().map_err(|e| SinkError::write(&self.path, e))?;
        }
        Ok(())
    }
}
