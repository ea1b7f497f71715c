//! The drive loop.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::actuator::uncheck;
use crate::dom::Dom;
use crate::error::{DomError, SweepError};
use crate::finder::find_checked;
use crate::scroller::locate_scroll_container;
use crate::selector::Selector;

/// Tunables for one sweep.
#[derive(Debug, Clone)]
pub struct SweepOptions {
    /// Hard ceiling on passes.
    pub max_passes: u32,
    /// Consecutive empty passes that end the sweep.
    pub stable_passes: u32,
    /// Pause after each click so reactive UIs can re-render.
    pub settle: Duration,
    /// Pause after each scroll so virtualized rows can mount.
    pub scroll_pause: Duration,
    /// Minimum scroll step in pixels.
    pub min_scroll_px: f64,
    /// Scroll step as a fraction of the scroller's client height.
    pub scroll_fraction: f64,
    /// Extra content height required before a container counts as scrollable.
    pub overflow_slack_px: f64,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            max_passes: 80,
            stable_passes: 4,
            settle: Duration::from_millis(25),
            scroll_pause: Duration::from_millis(200),
            min_scroll_px: 300.0,
            scroll_fraction: 0.8,
            overflow_slack_px: 50.0,
        }
    }
}

impl SweepOptions {
    /// Vertical scroll step for a scroller of the given client height.
    pub fn scroll_step(&self, client_height: f64) -> f64 {
        self.min_scroll_px.max(client_height * self.scroll_fraction)
    }
}

/// How the sweep ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepOutcome {
    /// Enough consecutive passes found nothing checked.
    Stable,
    /// The pass ceiling was reached first; the page may still have checked boxes.
    Exhausted,
}

/// Elements still matching the checked predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemainingChecked {
    pub native: usize,
    pub aria: usize,
}

/// Summary of one sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub passes: u32,
    /// Clicks dispatched without error.
    pub total_unchecks: u64,
    /// Clicks whose target lookup or dispatch failed.
    pub failed_actuations: u64,
    pub remaining_native: usize,
    pub remaining_aria: usize,
    pub outcome: SweepOutcome,
    pub scroller: String,
}

/// Count native and ARIA checkboxes that are still checked.
pub async fn count_remaining<D: Dom>(dom: &D) -> Result<RemainingChecked, DomError> {
    Ok(RemainingChecked {
        native: dom.query_all(Selector::CheckedNativeCheckbox).await?.len(),
        aria: dom.query_all(Selector::CheckedAriaCheckbox).await?.len(),
    })
}

/// Runs the uncheck-all loop against one document.
pub struct Sweeper<D: Dom> {
    dom: D,
    options: SweepOptions,
}

impl<D: Dom> Sweeper<D> {
    pub fn new(dom: D, options: SweepOptions) -> Self {
        Self { dom, options }
    }

    /// Scroll `scroller` down by one step.
    async fn advance(&self, scroller: &D::Node) -> Result<(), DomError> {
        let metrics = self.dom.scroll_metrics(scroller).await?;
        self.dom
            .scroll_by(scroller, 0.0, self.options.scroll_step(metrics.client_height))
            .await
    }

    /// Uncheck everything, scrolling between passes.
    ///
    /// The scroll container is resolved once up front and reused for the
    /// whole run. A scroller that has since detached or throws is skipped
    /// for that pass, and failures to click one element are logged and
    /// skipped. Only losing the connection ends the run with an error.
    pub async fn run(&self) -> Result<SweepReport, SweepError> {
        let opts = &self.options;

        let scroller = locate_scroll_container(&self.dom, opts.overflow_slack_px)
            .await
            .map_err(SweepError::ScrollContainer)?;
        let scroller_label = self
            .dom
            .describe(&scroller)
            .await
            .unwrap_or_else(|e| format!("<unknown: {}>", e));
        info!("Scroller: {}", scroller_label);

        let mut total_unchecks: u64 = 0;
        let mut failed_actuations: u64 = 0;
        let mut stable_passes: u32 = 0;
        let mut passes: u32 = 0;
        let mut outcome = SweepOutcome::Exhausted;

        while passes < opts.max_passes {
            passes += 1;
            let checked = find_checked(&self.dom).await?;

            if checked.is_empty() {
                stable_passes += 1;
            } else {
                stable_passes = 0;
                for node in &checked {
                    match uncheck(&self.dom, node).await {
                        Ok(_) => {
                            total_unchecks += 1;
                            tokio::time::sleep(opts.settle).await;
                        }
                        Err(e) => {
                            failed_actuations += 1;
                            debug!(?node, "Uncheck failed: {}", e);
                        }
                    }
                }
            }

            debug!(
                pass = passes,
                found = checked.len(),
                stable_passes,
                total_unchecks,
                "Pass complete"
            );

            if stable_passes >= opts.stable_passes {
                outcome = SweepOutcome::Stable;
                break;
            }

            match self.advance(&scroller).await {
                Ok(()) => {}
                Err(DomError::Cdp(e)) => return Err(SweepError::Dom(DomError::Cdp(e))),
                Err(e) => debug!(pass = passes, "Scroll skipped: {}", e),
            }
            tokio::time::sleep(opts.scroll_pause).await;
        }

        let remaining = count_remaining(&self.dom).await?;

        info!("Done. Click attempts: {}", total_unchecks);
        info!("Remaining checked (native): {}", remaining.native);
        info!("Remaining checked (aria): {}", remaining.aria);

        Ok(SweepReport {
            passes,
            total_unchecks,
            failed_actuations,
            remaining_native: remaining.native,
            remaining_aria: remaining.aria,
            outcome,
            scroller: scroller_label,
        })
    }
}

#[cfg(test)]
#[path = "sweeper_tests.rs"]
mod tests;
