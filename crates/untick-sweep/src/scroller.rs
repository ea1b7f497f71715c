//! Scroll-container locator.

use tracing::debug;

use crate::dom::Dom;
use crate::error::DomError;
use crate::selector::Selector;

/// Find the element to scroll so a virtualized list mounts more rows.
///
/// Candidates are `main`, then `[role="main"]`, then every `div`/`section`
/// in document order. The first one that [scrolls](crate::ScrollMetrics::scrolls)
/// with `slack` wins; otherwise the document's scrolling element, otherwise
/// the root element.
///
/// Candidates that detach while being measured are skipped.
pub async fn locate_scroll_container<D: Dom>(dom: &D, slack: f64) -> Result<D::Node, DomError> {
    let mut candidates = Vec::new();
    if let Some(main) = dom.query_first(Selector::Main).await? {
        candidates.push(main);
    }
    if let Some(role_main) = dom.query_first(Selector::RoleMain).await? {
        candidates.push(role_main);
    }
    candidates.extend(dom.query_all(Selector::Block).await?);

    for candidate in candidates {
        match dom.scroll_metrics(&candidate).await {
            Ok(metrics) if metrics.scrolls(slack) => return Ok(candidate),
            Ok(_) => {}
            Err(DomError::Detached(reason)) => {
                debug!("Skipping detached scroll candidate: {}", reason);
            }
            Err(e) => return Err(e),
        }
    }

    match dom.scrolling_element().await? {
        Some(node) => Ok(node),
        None => dom.document_element().await,
    }
}

#[cfg(test)]
#[path = "scroller_tests.rs"]
mod tests;
