//! Chrome DevTools Protocol (CDP) client for untick.
//!
//! Connects to Chrome/Chromium over WebSocket and speaks the CDP JSON-RPC
//! protocol. Only the domains the uncheck sweep needs are wrapped: target
//! discovery, `DOM`, `Runtime` and page navigation.
//!
//! ## Usage
//!
//! 1. Start Chrome with remote debugging (or let [`ChromeLauncher`] do it):
//!    ```bash
//!    google-chrome --remote-debugging-port=9222
//!    ```
//!
//! 2. Connect and attach:
//!    ```rust,ignore
//!    let client = CdpClient::connect("http://localhost:9222").await?;
//!    let pages = client.list_pages().await?;
//!    let page = client.attach_page(&pages[0].id).await?;
//!    ```

mod client;
mod error;
mod launcher;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use launcher::{ChromeLauncher, LauncherConfig};
pub use protocol::*;
pub use session::PageSession;
