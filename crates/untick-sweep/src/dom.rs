//! Document access used by the sweep.

use std::fmt::Debug;
use std::hash::Hash;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::DomError;
use crate::selector::Selector;

/// Scroll-related measurements of one element.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    /// Computed `overflow-y`.
    pub overflow_y: String,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Overflow allows scrolling and the content is taller than the box by
    /// more than `slack` pixels.
    pub fn scrolls(&self, slack: f64) -> bool {
        matches!(self.overflow_y.as_str(), "auto" | "scroll")
            && self.scroll_height > self.client_height + slack
    }
}

/// A live document tree.
///
/// `Node` is a non-owning identity for one element: two handles compare
/// equal exactly when they refer to the same element. The document owns the
/// elements; a handle may go stale at any time, in which case element
/// operations fail with [`DomError::Detached`].
#[async_trait]
pub trait Dom: Send + Sync {
    type Node: Clone + Eq + Hash + Debug + Send + Sync;

    /// All matches in document order.
    async fn query_all(&self, selector: Selector) -> Result<Vec<Self::Node>, DomError>;

    /// First match in document order.
    async fn query_first(&self, selector: Selector) -> Result<Option<Self::Node>, DomError>;

    async fn matches(&self, node: &Self::Node, selector: Selector) -> Result<bool, DomError>;

    /// Nearest ancestor-or-self matching `selector`.
    async fn closest(&self, node: &Self::Node, selector: Selector)
        -> Result<Option<Self::Node>, DomError>;

    /// Parent element, `None` for the root.
    async fn parent(&self, node: &Self::Node) -> Result<Option<Self::Node>, DomError>;

    /// Dispatch a user-click equivalent (`element.click()`).
    async fn click(&self, node: &Self::Node) -> Result<(), DomError>;

    async fn scroll_metrics(&self, node: &Self::Node) -> Result<ScrollMetrics, DomError>;

    /// `document.scrollingElement`.
    async fn scrolling_element(&self) -> Result<Option<Self::Node>, DomError>;

    /// `document.documentElement`.
    async fn document_element(&self) -> Result<Self::Node, DomError>;

    /// Relative scroll of `node`.
    async fn scroll_by(&self, node: &Self::Node, dx: f64, dy: f64) -> Result<(), DomError>;

    /// Short human-readable label for logs.
    async fn describe(&self, node: &Self::Node) -> Result<String, DomError>;
}
