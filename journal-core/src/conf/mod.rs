mod collector;
mod error;
mod journal;
mod loader;


pub use collector::CollectorConfig;
pub use error::ConfigError;
pub use journal::{JournalConfig, MirrorConfig};
pub use loader::{load_collector_config, load_journal_config};
