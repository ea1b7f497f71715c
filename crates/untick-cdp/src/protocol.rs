//! CDP protocol types and message definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CDP request message.
#[derive(Debug, Serialize)]
pub struct CdpRequest {
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// CDP response message.
#[derive(Debug, Deserialize)]
pub struct CdpResponse {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<CdpErrorResponse>,
    pub method: Option<String>,
    pub params: Option<Value>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// CDP error in response.
#[derive(Debug, Deserialize)]
pub struct CdpErrorResponse {
    pub code: i64,
    pub message: String,
    pub data: Option<String>,
}

/// Page info from the `/json/list` and `/json/new` endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub page_type: String,
    pub title: String,
    pub url: String,
    pub web_socket_debugger_url: Option<String>,
    pub dev_tools_frontend_url: Option<String>,
}

impl PageInfo {
    /// True for regular tabs (not workers, extensions or iframes).
    pub fn is_page(&self) -> bool {
        self.page_type == "page"
    }
}

/// Browser version info.
///
/// Note: Chrome returns PascalCase field names for this endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserVersion {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "Protocol-Version")]
    pub protocol_version: String,
    #[serde(rename = "User-Agent")]
    pub user_agent: String,
    #[serde(rename = "V8-Version")]
    pub v8_version: Option<String>,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

// ============================================================================
// DOM Types
// ============================================================================

/// DOM node from CDP (`DOM.getDocument`, `DOM.describeNode`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomNode {
    pub node_id: i64,
    pub backend_node_id: i64,
    pub node_type: i64,
    pub node_name: String,
    pub local_name: Option<String>,
    pub node_value: Option<String>,
    pub child_node_count: Option<i64>,
    /// Flat `[name, value, name, value, ...]` list.
    pub attributes: Option<Vec<String>>,
    pub frame_id: Option<String>,
}

impl DomNode {
    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.as_ref().and_then(|attrs| {
            attrs
                .chunks_exact(2)
                .find(|pair| pair[0] == name)
                .map(|pair| pair[1].as_str())
        })
    }

    /// Short CSS-like label, e.g. `div#list.scroller.tall`.
    pub fn summary(&self) -> String {
        let mut out = self
            .local_name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.node_name.to_lowercase());

        if let Some(id) = self.attribute("id").filter(|id| !id.is_empty()) {
            out.push('#');
            out.push_str(id);
        }
        if let Some(class) = self.attribute("class") {
            for c in class.split_whitespace() {
                out.push('.');
                out.push_str(c);
            }
        }
        if let Some(role) = self.attribute("role") {
            out.push_str(&format!("[role=\"{}\"]", role));
        }
        out
    }
}

// ============================================================================
// Runtime Types
// ============================================================================

/// Remote object from Runtime domain.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    #[serde(rename = "type")]
    pub object_type: String,
    pub subtype: Option<String>,
    pub class_name: Option<String>,
    pub value: Option<Value>,
    pub unserializable_value: Option<String>,
    pub description: Option<String>,
    pub object_id: Option<String>,
}

impl RemoteObject {
    /// `null` results come back as `{"type": "object", "subtype": "null"}`.
    pub fn is_null(&self) -> bool {
        self.subtype.as_deref() == Some("null") || self.object_type == "undefined"
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
