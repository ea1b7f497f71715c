//! Checked-element finder.

use std::collections::HashSet;

use crate::dom::Dom;
use crate::error::DomError;
use crate::selector::Selector;

/// Every element that currently looks checked.
///
/// Matches of the three predicate groups are concatenated (native inputs,
/// explicit ARIA checkboxes, anything `aria-checked="true"`) and then
/// de-duplicated keeping the first occurrence, so an element that matches
/// several groups is returned once.
pub async fn find_checked<D: Dom>(dom: &D) -> Result<Vec<D::Node>, DomError> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for selector in Selector::CHECKED_GROUPS {
        for node in dom.query_all(selector).await? {
            if seen.insert(node.clone()) {
                found.push(node);
            }
        }
    }

    Ok(found)
}

#[cfg(test)]
#[path = "finder_tests.rs"]
mod tests;
