//! DOM operations for CDP page session.

use serde_json::json;

use crate::error::CdpError;
use crate::protocol::{DomNode, RemoteObject};

use super::core::PageSession;

impl PageSession {
    /// Get the document root node (shallow).
    ///
    /// Every call resets the front-end `nodeId` mapping, so node ids from an
    /// earlier call must not be reused afterwards.
    pub async fn get_document(&self) -> Result<DomNode, CdpError> {
        let result = self
            .call("DOM.getDocument", Some(json!({"depth": 0})))
            .await?;

        let root: DomNode = serde_json::from_value(result["root"].clone())?;
        Ok(root)
    }

    /// Query selector, returning a front-end node id.
    pub async fn query_selector(&self, selector: &str) -> Result<Option<i64>, CdpError> {
        let doc = self.get_document().await?;

        let result = self
            .call(
                "DOM.querySelector",
                Some(json!({
                    "nodeId": doc.node_id,
                    "selector": selector,
                })),
            )
            .await?;

        let node_id = result["nodeId"].as_i64().unwrap_or(0);
        if node_id == 0 {
            Ok(None)
        } else {
            Ok(Some(node_id))
        }
    }

    /// Query selector all, returning front-end node ids in document order.
    pub async fn query_selector_all(&self, selector: &str) -> Result<Vec<i64>, CdpError> {
        let doc = self.get_document().await?;

        let result = self
            .call(
                "DOM.querySelectorAll",
                Some(json!({
                    "nodeId": doc.node_id,
                    "selector": selector,
                })),
            )
            .await?;

        let node_ids: Vec<i64> = result["nodeIds"]
            .as_array()
            .map(|arr| arr.iter().filter_map(|v| v.as_i64()).collect())
            .unwrap_or_default();

        Ok(node_ids)
    }

    /// Describe a node by front-end node id.
    ///
    /// Fails with [`CdpError::ElementNotFound`] when the node was removed
    /// after the query that returned its id.
    pub async fn describe_node(&self, node_id: i64) -> Result<DomNode, CdpError> {
        let result = self
            .call("DOM.describeNode", Some(json!({"nodeId": node_id})))
            .await
            .map_err(|e| node_gone(e, || format!("node {}", node_id)))?;
        Ok(serde_json::from_value(result["node"].clone())?)
    }

    /// Describe a node by backend node id.
    pub async fn describe_backend_node(&self, backend_node_id: i64) -> Result<DomNode, CdpError> {
        let result = self
            .call(
                "DOM.describeNode",
                Some(json!({"backendNodeId": backend_node_id})),
            )
            .await
            .map_err(|e| node_gone(e, || format!("backend node {}", backend_node_id)))?;
        Ok(serde_json::from_value(result["node"].clone())?)
    }

    /// Describe the node behind a remote object handle.
    pub async fn describe_object(&self, object_id: &str) -> Result<DomNode, CdpError> {
        let result = self
            .call("DOM.describeNode", Some(json!({"objectId": object_id})))
            .await?;
        Ok(serde_json::from_value(result["node"].clone())?)
    }

    /// Resolve a backend node id to a runtime object.
    pub async fn resolve_backend_node(&self, backend_node_id: i64) -> Result<RemoteObject, CdpError> {
        let result = self
            .call(
                "DOM.resolveNode",
                Some(json!({"backendNodeId": backend_node_id})),
            )
            .await
            .map_err(|e| node_gone(e, || format!("backend node {}", backend_node_id)))?;

        let obj: RemoteObject = serde_json::from_value(result["object"].clone())?;
        Ok(obj)
    }
}

/// A protocol error on a node-addressed command means the node is gone.
pub(crate) fn node_gone(err: CdpError, node: impl FnOnce() -> String) -> CdpError {
    match err {
        CdpError::Protocol { message, .. } => {
            CdpError::ElementNotFound(format!("{}: {}", node(), message))
        }
        other => other,
    }
}
