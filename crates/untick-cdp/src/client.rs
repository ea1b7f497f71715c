//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use super::error::CdpError;
use super::protocol::{BrowserVersion, CdpRequest, CdpResponse, PageInfo};
use super::session::PageSession;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>>>;

/// The WebSocket half shared by the client and every page session.
pub(crate) struct Connection {
    ws_tx: tokio::sync::Mutex<WsSink>,
    request_id: AtomicU64,
    pending: PendingMap,
    timeout: Duration,
}

impl Connection {
    /// Send a command, optionally scoped to a flattened target session, and
    /// wait for its response.
    pub(crate) async fn send(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(|s| s.to_string()),
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        {
            let mut ws = self.ws_tx.lock().await;
            if let Err(e) = ws.send(Message::Text(json.into())).await {
                self.pending.lock().remove(&id);
                return Err(e.into());
            }
        }

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }
}

/// CDP client for browser automation.
///
/// Connects to Chrome via WebSocket and provides methods for target discovery
/// and page attachment.
pub struct CdpClient {
    /// HTTP endpoint for page discovery.
    http_endpoint: String,
    conn: Arc<Connection>,
    /// Background task handle.
    recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to Chrome at the given endpoint with the default request timeout.
    ///
    /// ```rust,ignore
    /// let client = CdpClient::connect("http://localhost:9222").await?;
    /// ```
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        Self::connect_with_timeout(endpoint, DEFAULT_REQUEST_TIMEOUT).await
    }

    /// Connect to Chrome, failing any single request that takes longer than `timeout`.
    pub async fn connect_with_timeout(endpoint: &str, timeout: Duration) -> Result<Self, CdpError> {
        let http_endpoint = normalize_endpoint(endpoint)?;

        let version_url = format!("{}/json/version", http_endpoint);
        debug!("Fetching browser version from {}", version_url);

        let version: BrowserVersion = reqwest::get(&version_url)
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?;

        debug!("Connected to browser: {}", version.browser);

        let browser_ws_url = version.web_socket_debugger_url;

        let (ws_stream, _) = tokio_tungstenite::connect_async(&browser_ws_url)
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));

        let recv_task = {
            let pending = pending.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, pending).await;
            })
        };

        debug!("CDP client connected to {}", browser_ws_url);

        Ok(Self {
            http_endpoint,
            conn: Arc::new(Connection {
                ws_tx: tokio::sync::Mutex::new(ws_sink),
                request_id: AtomicU64::new(1),
                pending,
                timeout,
            }),
            recv_task,
        })
    }

    /// WebSocket receive loop.
    ///
    /// Responses are routed to their waiting request. Events are not
    /// consumed by anything in this crate and are dropped.
    async fn receive_loop(mut ws_source: WsSource, pending: PendingMap) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    match serde_json::from_str::<CdpResponse>(&text) {
                        Ok(resp) => {
                            let Some(id) = resp.id else {
                                continue;
                            };
                            let waiter = pending.lock().remove(&id);
                            if let Some(tx) = waiter {
                                let result = match resp.error {
                                    Some(error) => Err(CdpError::Protocol {
                                        code: error.code,
                                        message: error.message,
                                    }),
                                    None => Ok(resp.result.unwrap_or(Value::Null)),
                                };
                                let _ = tx.send(result);
                            }
                        }
                        Err(e) => {
                            warn!("Failed to parse CDP message: {}", e);
                        }
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed");
                    break;
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }

        // Wake every waiter; dropping the senders yields SessionClosed.
        pending.lock().clear();
    }

    /// Send a browser-level CDP command and wait for the response.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.conn.send(method, params, None).await
    }

    /// Get the HTTP endpoint this client was created with.
    pub fn endpoint(&self) -> &str {
        &self.http_endpoint
    }

    // ========================================================================
    // Target Management
    // ========================================================================

    /// List all targets exposed by the endpoint.
    pub async fn list_pages(&self) -> Result<Vec<PageInfo>, CdpError> {
        let url = format!("{}/json/list", self.http_endpoint);
        let pages: Vec<PageInfo> = reqwest::get(&url).await?.json().await?;
        Ok(pages)
    }

    /// Open a new tab on `url` and attach to it.
    pub async fn new_page(&self, url: &str) -> Result<PageSession, CdpError> {
        // Chrome requires PUT for /json/new
        let create_url = new_page_url(&self.http_endpoint, url);

        let client = reqwest::Client::new();
        let page_info: PageInfo = client.put(&create_url).send().await?.json().await?;
        debug!("Created new page: {} - {}", page_info.id, page_info.url);

        self.attach_page(&page_info.id).await
    }

    /// Attach to an existing page.
    pub async fn attach_page(&self, target_id: &str) -> Result<PageSession, CdpError> {
        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": target_id,
                    "flatten": true
                })),
            )
            .await
            .map_err(|e| match e {
                CdpError::Protocol { .. } => CdpError::PageNotFound(target_id.to_string()),
                other => other,
            })?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        let session = PageSession::new(target_id.to_string(), session_id, self.conn.clone());
        session.enable_domains().await?;

        Ok(session)
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.recv_task.abort();
    }
}

/// Validate a CDP HTTP endpoint and strip any trailing slash.
pub(crate) fn normalize_endpoint(endpoint: &str) -> Result<String, CdpError> {
    let trimmed = endpoint.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed)?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(CdpError::ConnectionFailed(format!(
            "Unsupported endpoint scheme '{}', expected http or https",
            other
        ))),
    }
}

/// `/json/new` request URL with the target percent-encoded as the whole
/// query string.
pub(crate) fn new_page_url(http_endpoint: &str, url: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
    format!("{}/json/new?{}", http_endpoint, encoded)
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
