//! untick - uncheck every checked box on a live web page.
//!
//! Main entry point for the untick CLI.

mod browser;
mod cli;
mod cmd_pages;
mod cmd_sweep;
mod settings;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::warn;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use untick_config::{ConfigLoader, ConfigValidator};

use crate::cli::{Cli, Commands};

/// Initialize tracing with console output and, when `log_dir` is set, daily
/// rolling files.
///
/// `RUST_LOG` takes precedence over `level`.
fn init_tracing(level: &str, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("untick")
                .filename_suffix("log")
                .max_log_files(14)
                .build(dir)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // The guard flushes on drop, so it has to live as long as the process.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false).boxed())
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    settings::apply_overrides(&mut config, &cli);

    init_tracing(&config.logging.level, config.logging.dir.as_deref())?;

    for warning in ConfigValidator::validate(&config).into_result()? {
        warn!("{}: {}", warning.path, warning.message);
    }

    match cli.command.unwrap_or_default() {
        Commands::Run { json, .. } => cmd_sweep::handle_run(&config, json).await,
        Commands::Count { json } => cmd_sweep::handle_count(&config, json).await,
        Commands::Pages { json } => cmd_pages::handle_pages(&config, json).await,
    }
}
