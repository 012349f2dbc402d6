use crate::collector::Framing;
use crate::conf::ConfigError;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorConfig {
    #[serde(default = "default_host")]
    pub host: String,

    pub port: u16,

    /// Print a report every N messages.
    pub report_every: u64,

    /// Print a report when this many seconds passed since the last one.
    pub report_interval_secs: u64,

    #[serde(default)]
    pub framing: Framing,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

impl CollectorConfig {
    pub fn new(port: u16, report_every: u64, report_interval_secs: u64) -> Self {
        Self {
            host: default_host(),
            port,
            report_every,
            report_interval_secs,
            framing: Framing::default(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::invalid("host", "must not be empty"));
        }
        if self.report_every == 0 {
            return Err(ConfigError::invalid("report_every", "must be at least 1"));
        }
        if self.report_interval_secs == 0 {
            return Err(ConfigError::invalid(
                "report_interval_secs",
                "must be at least 1 second",
            ));
        }
        Ok(())
    }
}
