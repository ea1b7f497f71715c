//! Merging CLI flags into the file configuration.

use std::time::Duration;

use untick_config::{Config, SweepConfig};
use untick_sweep::SweepOptions;

use crate::cli::{Cli, Commands};

/// Apply command-line overrides on top of the loaded configuration.
pub(crate) fn apply_overrides(config: &mut Config, cli: &Cli) {
    let args = &cli.browser;

    if let Some(ref endpoint) = args.endpoint {
        config.browser.endpoint = endpoint.clone();
    }
    if args.launch {
        config.browser.launch = true;
    }
    if args.headless {
        config.browser.headless = true;
    }
    if let Some(ref needle) = args.url_contains {
        config.target.url_contains = Some(needle.clone());
        config.target.open_url = None;
    }
    if let Some(ref url) = args.open {
        config.target.open_url = Some(url.clone());
        config.target.url_contains = None;
    }
    if let Some(Commands::Run {
        max_passes: Some(max_passes),
        ..
    }) = &cli.command
    {
        config.sweep.max_passes = *max_passes;
    }
    if let Some(ref dir) = cli.log_dir {
        config.logging.dir = Some(dir.clone());
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
}

/// Sweep tunables from the `[sweep]` section.
pub(crate) fn sweep_options(sweep: &SweepConfig) -> SweepOptions {
    SweepOptions {
        max_passes: sweep.max_passes,
        stable_passes: sweep.stable_passes,
        settle: Duration::from_millis(sweep.settle_ms),
        scroll_pause: Duration::from_millis(sweep.scroll_pause_ms),
        min_scroll_px: sweep.min_scroll_px,
        scroll_fraction: sweep.scroll_fraction,
        overflow_slack_px: sweep.overflow_slack_px,
    }
}
