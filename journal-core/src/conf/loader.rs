use crate::conf::{CollectorConfig, ConfigError, JournalConfig};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub fn load_journal_config(path: &Path) -> Result<JournalConfig, ConfigError> {
    let config: JournalConfig = load_toml(path)?;
    config.validate()?;
    Ok(config)
}

pub fn load_collector_config(path: &Path) -> Result<CollectorConfig, ConfigError> {
    let config: CollectorConfig = load_toml(path)?;
    config.validate()?;
    Ok(config)
}

fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    toml::from_str(&raw).map_err(|e| ConfigError::parse(path, e))
}
