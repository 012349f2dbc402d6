use journal_core::Importance;
use journal_core::collector::Framing;
use journal_core::conf::{
    CollectorConfig, ConfigError, JournalConfig, MirrorConfig, load_collector_config,
    load_journal_config,
};
use std::path::{Path, PathBuf};

fn parse_number<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::invalid(field, format!("'{raw}' is not a valid number")))
}

fn missing(field: &'static str) -> ConfigError {
    ConfigError::invalid(field, "missing (pass it as an argument or in --config)")
}

pub struct FileArgs {
    pub filename: Option<PathBuf>,
    pub default_importance: Option<String>,
    pub config: Option<PathBuf>,
}

pub struct SocketArgs {
    pub host: Option<String>,
    pub port: Option<String>,
    pub file: FileArgs,
    pub connect_timeout_ms: Option<u64>,
}

pub struct CollectArgs {
    pub port: Option<String>,
    pub report_every: Option<String>,
    pub report_interval_secs: Option<String>,
    pub host: Option<String>,
    pub framing: Option<Framing>,
    pub config: Option<PathBuf>,
}

fn base_journal_config(config: Option<&Path>) -> Result<Option<JournalConfig>, ConfigError> {
    config.map(load_journal_config).transpose()
}

pub fn file_config(args: FileArgs) -> Result<JournalConfig, ConfigError> {
    let base = base_journal_config(args.config.as_deref())?;
    let config = resolve_file(args, base.as_ref())?;
    config.validate()?;
    Ok(config)
}

fn resolve_file(
    args: FileArgs,
    base: Option<&JournalConfig>,
) -> Result<JournalConfig, ConfigError> {
    let file = match (args.filename, base) {
        (Some(file), _) => file,
        (None, Some(base)) => base.file.clone(),
        (None, None) => return Err(missing("file")),
    };
    let default_importance = match (&args.default_importance, base) {
        (Some(token), _) => Importance::parse_lenient(token),
        (None, Some(base)) => base.default_importance,
        (None, None) => Importance::default(),
    };

    Ok(JournalConfig {
        file,
        default_importance,
        mirror: None,
    })
}

pub fn socket_config(args: SocketArgs) -> Result<JournalConfig, ConfigError> {
    let base = base_journal_config(args.file.config.as_deref())?;
    let base_mirror = base.as_ref().and_then(|b| b.mirror.as_ref());

    let host = match (args.host, base_mirror) {
        (Some(host), _) => host,
        (None, Some(mirror)) => mirror.host.clone(),
        (None, None) => return Err(missing("host")),
    };
    let port = match (args.port, base_mirror) {
        (Some(raw), _) => parse_number("port", &raw)?,
        (None, Some(mirror)) => mirror.port,
        (None, None) => return Err(missing("port")),
    };
    let connect_timeout_ms = args
        .connect_timeout_ms
        .or(base_mirror.and_then(|m| m.connect_timeout_ms));

    let mut config = resolve_file(args.file, base.as_ref())?;
    config.mirror = Some(MirrorConfig {
        host,
        port,
        connect_timeout_ms,
    });
    config.validate()?;
    Ok(config)
}

pub fn collect_config(args: CollectArgs) -> Result<CollectorConfig, ConfigError> {
    let base = args.config.as_deref().map(load_collector_config).transpose()?;

    let port = match (args.port, &base) {
        (Some(raw), _) => parse_number("port", &raw)?,
        (None, Some(base)) => base.port,
        (None, None) => return Err(missing("port")),
    };
    let report_every = match (args.report_every, &base) {
        (Some(raw), _) => parse_number("report_every", &raw)?,
        (None, Some(base)) => base.report_every,
        (None, None) => return Err(missing("report_every")),
    };
    let report_interval_secs = match (args.report_interval_secs, &base) {
        (Some(raw), _) => parse_number("report_interval_secs", &raw)?,
        (None, Some(base)) => base.report_interval_secs,
        (None, None) => return Err(missing("report_interval_secs")),
    };

    let mut config = CollectorConfig::new(port, report_every, report_interval_secs);
    if let Some(base) = base {
        config.host = base.host;
        config.framing = base.framing;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(framing) = args.framing {
        config.framing = framing;
    }

    config.validate()?;
    Ok(config)
}
