//! Sweep errors.

use thiserror::Error;
use untick_cdp::CdpError;

/// Errors raised by a [`Dom`](crate::Dom) implementation.
#[derive(Debug, Error)]
pub enum DomError {
    /// The node is no longer attached to the document.
    #[error("Node detached: {0}")]
    Detached(String),

    /// The document has no root element.
    #[error("Document has no root element")]
    NoDocument,

    /// Page script threw while running an element operation.
    #[error("Script error: {0}")]
    Script(String),

    /// Transport-level failure talking to the browser.
    #[error(transparent)]
    Cdp(CdpError),
}

impl From<CdpError> for DomError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ElementNotFound(msg) => DomError::Detached(msg),
            CdpError::JavaScript(msg) => DomError::Script(msg),
            other => DomError::Cdp(other),
        }
    }
}

/// Errors that end a sweep early.
///
/// A sweep never fails because of page content; only losing the connection does.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Failed to locate scroll container: {0}")]
    ScrollContainer(#[source] DomError),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
}
