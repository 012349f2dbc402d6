use clap::{Parser, Subcommand};
use journal_core::collector::Framing;
use journal_core::logging::LogFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "journal",
    version,
    about = "Importance-filtered journal with a TCP statistics collector"
)]
pub struct Cli {
    /// Diagnostic log format on stderr (defaults to pretty on a terminal)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Journal stdin lines to a file
    File {
        filename: Option<PathBuf>,

        /// LOW, MEDIUM or HIGH; anything else means MEDIUM
        default_importance: Option<String>,

        /// TOML journal config; positional arguments override it
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Journal stdin lines to a file and mirror them to a collector
    Socket {
        host: Option<String>,

        port: Option<String>,

        filename: Option<PathBuf>,

        /// LOW, MEDIUM or HIGH; anything else means MEDIUM
        default_importance: Option<String>,

        #[arg(long)]
        config: Option<PathBuf>,

        /// Give up connecting to the collector after this many milliseconds
        #[arg(long)]
        connect_timeout_ms: Option<u64>,
    },

    /// Accept one journal client and print statistics over what it sends
    Collect {
        port: Option<String>,

        /// Report every N messages
        report_every: Option<String>,

        /// Report when T seconds passed since the last report
        report_interval_secs: Option<String>,

        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        framing: Option<Framing>,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}
