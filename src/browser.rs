//! Reaching the browser and picking the page to work on.

use std::time::Duration;

use anyhow::{bail, Context};
use tracing::{debug, info};

use untick_cdp::{CdpClient, ChromeLauncher, LauncherConfig, PageInfo, PageSession};
use untick_config::{BrowserConfig, TargetConfig};

/// A CDP connection plus the Chrome process, if this run started it.
pub(crate) struct Browser {
    client: CdpClient,
    launcher: Option<ChromeLauncher>,
}

impl Browser {
    /// Connect to the configured endpoint, launching Chrome first when allowed.
    pub(crate) async fn connect(config: &BrowserConfig) -> anyhow::Result<Self> {
        let mut launcher = None;
        if config.launch {
            let mut chrome = ChromeLauncher::new(LauncherConfig {
                endpoint: config.endpoint.clone(),
                chrome_path: config.chrome_path.clone(),
                profile_dir: config.profile_dir.clone(),
                headless: config.headless,
            });
            if chrome.ensure_running().await? {
                launcher = Some(chrome);
            }
        }

        let timeout = Duration::from_secs(config.request_timeout_secs);
        let client = match CdpClient::connect_with_timeout(&config.endpoint, timeout).await {
            Ok(client) => client,
            Err(e) => {
                if let Some(mut chrome) = launcher {
                    chrome.shutdown().await;
                }
                return Err(e).with_context(|| format!("connecting to {}", config.endpoint));
            }
        };
        info!("Connected to Chrome at {}", client.endpoint());

        Ok(Self { client, launcher })
    }

    pub(crate) async fn pages(&self) -> anyhow::Result<Vec<PageInfo>> {
        Ok(self.client.list_pages().await?)
    }

    /// Open or attach to the page described by `target`.
    pub(crate) async fn open_target(&self, target: &TargetConfig) -> anyhow::Result<PageSession> {
        if let Some(ref url) = target.open_url {
            info!("Opening {}", url);
            let session = self.client.new_page(url).await?;
            session.wait_for_load().await?;
            return Ok(session);
        }

        let pages = self.pages().await?;
        let Some(page) = select_page(&pages, target.url_contains.as_deref()) else {
            match target.url_contains {
                Some(ref needle) => bail!("No open page whose URL contains '{}'", needle),
                None => bail!("No open pages at {}", self.client.endpoint()),
            }
        };

        info!("Attaching to {} ({})", page.url, page.title);
        let session = self
            .client
            .attach_page(&page.id)
            .await
            .with_context(|| format!("attaching to page {}", page.id))?;
        debug!("Attached session {}", session.session_id());
        Ok(session)
    }

    /// Drop the connection and stop Chrome if this run launched it.
    pub(crate) async fn shutdown(self) {
        let Self { client, launcher } = self;
        drop(client);
        if let Some(mut chrome) = launcher {
            chrome.shutdown().await;
        }
    }
}

/// First regular page whose URL contains `needle`, or the first page at all.
pub(crate) fn select_page<'a>(pages: &'a [PageInfo], needle: Option<&str>) -> Option<&'a PageInfo> {
    let mut candidates = pages.iter().filter(|p| p.is_page());
    match needle {
        Some(needle) => candidates.find(|p| p.url.contains(needle)),
        None => candidates.next(),
    }
}
