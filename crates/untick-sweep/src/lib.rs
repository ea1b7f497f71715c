//! # untick sweep
//!
//! Unchecks every checkbox-like widget on a live page.
//!
//! The sweep alternates between unchecking everything currently visible and
//! scrolling to make a virtualized list mount more rows:
//!
//! ```text
//!   ┌──────────┐ candidates ┌───────────┐
//!   │ scanning │ ─────────► │ actuating │
//!   └──────────┘            └───────────┘
//!     ▲     │ none               │
//!     │     ▼                    ▼
//!     │   ┌──────────────────────────┐ stable streak reached
//!     │   │       stable check       │ ─────────────────────► done
//!     │   └──────────────────────────┘
//!     │                │ otherwise
//!     │                ▼
//!     │         ┌───────────┐
//!     └──────── │ advancing │ (scroll, pause)
//!               └───────────┘
//! ```
//!
//! Everything is written against the [`Dom`] trait; [`CdpDom`] drives a real
//! browser tab over the Chrome DevTools Protocol.

mod actuator;
mod cdp_dom;
mod dom;
mod error;
mod finder;
mod scroller;
mod selector;
mod sweeper;

#[cfg(test)]
mod fake_dom;

pub use actuator::{activation_target, uncheck};
pub use cdp_dom::{BackendNodeId, CdpDom};
pub use dom::{Dom, ScrollMetrics};
pub use error::{DomError, SweepError};
pub use finder::find_checked;
pub use scroller::locate_scroll_container;
pub use selector::Selector;
pub use sweeper::{count_remaining, RemainingChecked, SweepOptions, SweepOutcome, SweepReport, Sweeper};
