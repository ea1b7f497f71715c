//! `run` and `count` subcommand handlers.

use std::sync::Arc;

use tracing::warn;

use untick_config::Config;
use untick_sweep::{count_remaining, CdpDom, RemainingChecked, SweepOutcome, SweepReport, Sweeper};

use crate::browser::Browser;
use crate::settings::sweep_options;

/// Uncheck everything on the target page.
pub(crate) async fn handle_run(config: &Config, json: bool) -> anyhow::Result<()> {
    let browser = Browser::connect(&config.browser).await?;

    let result = async {
        let session = browser.open_target(&config.target).await?;
        let dom = CdpDom::new(Arc::new(session));
        let report = Sweeper::new(dom, sweep_options(&config.sweep)).run().await?;
        print_report(&report, json)
    }
    .await;

    browser.shutdown().await;
    result
}

/// Report how many boxes are still checked without touching them.
pub(crate) async fn handle_count(config: &Config, json: bool) -> anyhow::Result<()> {
    let browser = Browser::connect(&config.browser).await?;

    let result = async {
        let session = browser.open_target(&config.target).await?;
        let dom = CdpDom::new(Arc::new(session));
        let remaining = count_remaining(&dom).await?;
        print_counts(&remaining, json)
    }
    .await;

    browser.shutdown().await;
    result
}

fn print_report(report: &SweepReport, json: bool) -> anyhow::Result<()> {
    if report.outcome == SweepOutcome::Exhausted {
        warn!(
            "Stopped after {} passes without a stable pass streak; the page may still have checked boxes",
            report.passes
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let outcome = match report.outcome {
        SweepOutcome::Stable => "stable",
        SweepOutcome::Exhausted => "pass limit reached",
    };
    println!("Scroller:                   {}", report.scroller);
    println!("Passes:                     {} ({})", report.passes, outcome);
    println!("Click attempts:             {}", report.total_unchecks);
    if report.failed_actuations > 0 {
        println!("Failed clicks:              {}", report.failed_actuations);
    }
    println!("Remaining checked (native): {}", report.remaining_native);
    println!("Remaining checked (aria):   {}", report.remaining_aria);
    Ok(())
}

fn print_counts(remaining: &RemainingChecked, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(remaining)?);
    } else {
        println!("Checked (native): {}", remaining.native);
        println!("Checked (aria):   {}", remaining.aria);
    }
    Ok(())
}
