use crate::conf::ConfigError;
use crate::importance::Importance;
use crate::journal::{JournalError, Logger};
use crate::journal::sink::{FileSink, MirroredSink, SocketSink};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JournalConfig {
    pub file: PathBuf,

    #[serde(default)]
    pub default_importance: Importance,

    /// Stream every entry to a collector as well as to `file`.
    pub mirror: Option<MirrorConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MirrorConfig {
    pub host: String,
    pub port: u16,
    pub connect_timeout_ms: Option<u64>,
}

impl JournalConfig {
    pub fn file(file: impl Into<PathBuf>, default_importance: Importance) -> Self {
        Self {
            file: file.into(),
            default_importance,
            mirror: None,
        }
    }

    pub fn mirrored(
        host: impl Into<String>,
        port: u16,
        file: impl Into<PathBuf>,
        default_importance: Importance,
    ) -> Self {
        Self {
            file: file.into(),
            default_importance,
            mirror: Some(MirrorConfig {
                host: host.into(),
                port,
                connect_timeout_ms: None,
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file.as_os_str().is_empty() {
            return Err(ConfigError::invalid("file", "must not be empty"));
        }
        if let Some(mirror) = &self.mirror {
            if mirror.host.trim().is_empty() {
                return Err(ConfigError::invalid("mirror.host", "must not be empty"));
            }
            if mirror.port == 0 {
                return Err(ConfigError::invalid("mirror.port", "must not be 0"));
            }
        }
        Ok(())
    }

    /// Open the sinks this configuration describes and wrap them in a logger.
    pub fn build_logger(&self) -> Result<Logger, JournalError> {
        let file = FileSink::open(&self.file)?;

        let Some(mirror) = &self.mirror else {
            return Ok(Logger::new(file, self.default_importance));
        };

        let timeout = mirror.connect_timeout_ms.map(Duration::from_millis);
        let socket = SocketSink::connect_with_timeout(&mirror.host, mirror.port, timeout)?;
        Ok(Logger::new(
            MirroredSink::new(socket, file),
            self.default_importance,
        ))
    }
}
