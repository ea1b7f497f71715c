//! Uncheck actuator.
//!
//! Picks where to click for a checked element, in this order:
//!
//! * native checkbox: enclosing `label`, else `[role="checkbox"]`
//!   ancestor, else parent element, else the input itself.
//! * anything else: itself if it has `role="checkbox"`, else the nearest
//!   ancestor with that role, else itself.

use tracing::trace;

use crate::dom::Dom;
use crate::error::DomError;
use crate::selector::Selector;

/// The element to click in order to uncheck `node`.
pub async fn activation_target<D: Dom>(dom: &D, node: &D::Node) -> Result<D::Node, DomError> {
    if dom.matches(node, Selector::NativeCheckbox).await? {
        if let Some(label) = dom.closest(node, Selector::Label).await? {
            return Ok(label);
        }
        if let Some(container) = dom.closest(node, Selector::AriaCheckbox).await? {
            return Ok(container);
        }
        return Ok(dom.parent(node).await?.unwrap_or_else(|| node.clone()));
    }

    if dom.matches(node, Selector::AriaCheckbox).await? {
        return Ok(node.clone());
    }

    Ok(dom
        .closest(node, Selector::AriaCheckbox)
        .await?
        .unwrap_or_else(|| node.clone()))
}

/// Click the activation target of `node`. Returns the clicked element.
///
/// There is no check that the element actually became unchecked; the next
/// pass of the sweep finds anything that did not.
pub async fn uncheck<D: Dom>(dom: &D, node: &D::Node) -> Result<D::Node, DomError> {
    let target = activation_target(dom, node).await?;
    trace!(?node, ?target, "Clicking activation target");
    dom.click(&target).await?;
    Ok(target)
}

#[cfg(test)]
#[path = "actuator_tests.rs"]
mod tests;
