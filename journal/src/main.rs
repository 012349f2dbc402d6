mod cli;
mod input;
mod settings;

use crate::cli::{Cli, Command};
use crate::input::{InputLine, parse_input_line};
use crate::settings::{CollectArgs, FileArgs, SocketArgs};
use anyhow::{Context, Result};
use clap::Parser;
use journal_core::collector::{StatsCollector, render_report};
use journal_core::conf::{CollectorConfig, JournalConfig};
use journal_core::journal::LogManager;
use journal_core::logging::{default_log_format, init_logging};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

fn main() {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_format.unwrap_or_else(default_log_format));

    if let Err(e) = run(cli.command) {
        eprintln!("journal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::File {
            filename,
            default_importance,
            config,
        } => {
            let config = settings::file_config(FileArgs {
                filename,
                default_importance,
                config,
            })?;
            run_journal(&config)
        }

        Command::Socket {
            host,
            port,
            filename,
            default_importance,
            config,
            connect_timeout_ms,
        } => {
            let config = settings::socket_config(SocketArgs {
                host,
                port,
                file: FileArgs {
                    filename,
                    default_importance,
                    config,
                },
                connect_timeout_ms,
            })?;
            run_journal(&config)
        }

        Command::Collect {
            port,
            report_every,
            report_interval_secs,
            host,
            framing,
            config,
        } => {
            let config = settings::collect_config(CollectArgs {
                port,
                report_every,
                report_interval_secs,
                host,
                framing,
                config,
            })?;
            run_collector(&config)
        }
    }
}

fn run_journal(config: &JournalConfig) -> Result<()> {
    let logger = config
        .build_logger()
        .with_context(|| format!("failed to open journal {}", config.file.display()))?;
    let manager = LogManager::spawn(logger).context("failed to start journal worker")?;

    info!(
        file = %config.file.display(),
        default_importance = %config.default_importance,
        mirrored = config.mirror.is_some(),
        "journal ready, type messages (\"quit\" to exit)"
    );

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;

        match parse_input_line(&line, config.default_importance) {
            InputLine::Entry {
                message,
                importance,
            } => manager.log(message, importance),
            InputLine::Empty => warn!("empty message skipped"),
            InputLine::Quit => break,
        }
    }

    manager.stop().context("journal worker failed")?;
    info!(processed = manager.processed(), "journal stopped");
    Ok(())
}

fn run_collector(config: &CollectorConfig) -> Result<()> {
    let collector = StatsCollector::bind(config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = collector.run(&mut out)?;

    // Closing report, unless the last message was already reported.
    if summary.unreported > 0 {
        out.write_all(render_report(&summary.stats).as_bytes())
            .and_then(|()| out.flush())
            .context("failed to write final report")?;
    }
    Ok(())
}
