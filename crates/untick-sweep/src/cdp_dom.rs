//! [`Dom`] over a CDP page session.
//!
//! Elements are identified by `backendNodeId`, which stays valid for the
//! life of the document. Front-end `nodeId`s are only used transiently
//! between a query and the `DOM.describeNode` that maps them.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::trace;
use untick_cdp::{PageSession, RemoteObject};

use crate::dom::{Dom, ScrollMetrics};
use crate::error::DomError;
use crate::selector::Selector;

const FN_MATCHES: &str = "function(sel) { return this.matches(sel); }";
const FN_CLOSEST: &str = "function(sel) { return this.closest(sel); }";
const FN_PARENT: &str = "function() { return this.parentElement; }";
const FN_CLICK: &str = "function() { this.click(); }";
const FN_SCROLL_BY: &str = "function(x, y) { this.scrollBy(x, y); }";
const FN_SCROLL_METRICS: &str = "function() { \
    return { overflowY: getComputedStyle(this).overflowY, \
             scrollHeight: this.scrollHeight, \
             clientHeight: this.clientHeight }; }";

/// Stable element identity within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackendNodeId(pub i64);

/// A live browser tab seen through the [`Dom`] trait.
pub struct CdpDom {
    session: Arc<PageSession>,
}

impl CdpDom {
    pub fn new(session: Arc<PageSession>) -> Self {
        Self { session }
    }

    /// `None` when the node was removed between the query and the describe.
    async fn to_backend(&self, node_id: i64) -> Result<Option<BackendNodeId>, DomError> {
        let described = self.session.describe_node(node_id).await.map_err(DomError::from);
        Ok(unless_detached(described)?.map(|node| BackendNodeId(node.backend_node_id)))
    }

    /// Map an element handle returned by page script to its backend id and
    /// release the handle.
    async fn handle_to_node(&self, handle: RemoteObject) -> Result<Option<BackendNodeId>, DomError> {
        if handle.is_null() {
            return Ok(None);
        }
        let Some(object_id) = handle.object_id else {
            return Ok(None);
        };
        let described = self.session.describe_object(&object_id).await;
        self.release(&object_id).await;
        Ok(Some(BackendNodeId(described?.backend_node_id)))
    }

    async fn object_id(&self, node: &BackendNodeId) -> Result<String, DomError> {
        self.session
            .resolve_backend_node(node.0)
            .await?
            .object_id
            .ok_or_else(|| DomError::Detached(format!("backend node {} has no object", node.0)))
    }

    async fn release(&self, object_id: &str) {
        if let Err(e) = self.session.release_object(object_id).await {
            trace!("Failed to release {}: {}", object_id, e);
        }
    }

    /// Run `function` on `node` and return its JSON value.
    async fn call_value(
        &self,
        node: &BackendNodeId,
        function: &str,
        args: Vec<Value>,
    ) -> Result<Value, DomError> {
        let object_id = self.object_id(node).await?;
        let result = self.session.call_function_on(&object_id, function, args).await;
        self.release(&object_id).await;
        Ok(result?)
    }

    /// Run an element-returning `function` on `node`.
    async fn call_node(
        &self,
        node: &BackendNodeId,
        function: &str,
        args: Vec<Value>,
    ) -> Result<Option<BackendNodeId>, DomError> {
        let object_id = self.object_id(node).await?;
        let result = self
            .session
            .call_function_handle(&object_id, function, args)
            .await;
        self.release(&object_id).await;
        self.handle_to_node(result?).await
    }
}

/// Turn a detached-node failure into `Ok(None)`, keeping other errors.
fn unless_detached<T>(result: Result<T, DomError>) -> Result<Option<T>, DomError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(DomError::Detached(reason)) => {
            trace!("Skipping removed node: {}", reason);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[async_trait]
impl Dom for CdpDom {
    type Node = BackendNodeId;

    async fn query_all(&self, selector: Selector) -> Result<Vec<BackendNodeId>, DomError> {
        let node_ids = self.session.query_selector_all(selector.css()).await?;
        let mut nodes = Vec::with_capacity(node_ids.len());
        for node_id in node_ids {
            if let Some(node) = self.to_backend(node_id).await? {
                nodes.push(node);
            }
        }
        Ok(nodes)
    }

    async fn query_first(&self, selector: Selector) -> Result<Option<BackendNodeId>, DomError> {
        match self.session.query_selector(selector.css()).await? {
            Some(node_id) => self.to_backend(node_id).await,
            None => Ok(None),
        }
    }

    async fn matches(&self, node: &BackendNodeId, selector: Selector) -> Result<bool, DomError> {
        let value = self
            .call_value(node, FN_MATCHES, vec![json!(selector.css())])
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn closest(
        &self,
        node: &BackendNodeId,
        selector: Selector,
    ) -> Result<Option<BackendNodeId>, DomError> {
        self.call_node(node, FN_CLOSEST, vec![json!(selector.css())])
            .await
    }

    async fn parent(&self, node: &BackendNodeId) -> Result<Option<BackendNodeId>, DomError> {
        self.call_node(node, FN_PARENT, Vec::new()).await
    }

    async fn click(&self, node: &BackendNodeId) -> Result<(), DomError> {
        self.call_value(node, FN_CLICK, Vec::new()).await?;
        Ok(())
    }

    async fn scroll_metrics(&self, node: &BackendNodeId) -> Result<ScrollMetrics, DomError> {
        let value = self.call_value(node, FN_SCROLL_METRICS, Vec::new()).await?;
        serde_json::from_value(value)
            .map_err(|e| DomError::Script(format!("unexpected scroll metrics: {}", e)))
    }

    async fn scrolling_element(&self) -> Result<Option<BackendNodeId>, DomError> {
        let handle = self
            .session
            .evaluate_handle("document.scrollingElement")
            .await?;
        self.handle_to_node(handle).await
    }

    async fn document_element(&self) -> Result<BackendNodeId, DomError> {
        let handle = self
            .session
            .evaluate_handle("document.documentElement")
            .await?;
        self.handle_to_node(handle).await?.ok_or(DomError::NoDocument)
    }

    async fn scroll_by(&self, node: &BackendNodeId, dx: f64, dy: f64) -> Result<(), DomError> {
        self.call_value(node, FN_SCROLL_BY, vec![json!(dx), json!(dy)])
            .await?;
        Ok(())
    }

    async fn describe(&self, node: &BackendNodeId) -> Result<String, DomError> {
        let described = self.session.describe_backend_node(node.0).await?;
        Ok(described.summary())
    }
}
