//! Chrome process launcher.
//!
//! Starts a local Chrome with remote debugging enabled when nothing is
//! listening on the configured endpoint yet. The profile directory is kept
//! separate from the user's everyday profile so logins persist between runs
//! without touching the main browser.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tracing::{info, warn};

use crate::error::CdpError;

const STARTUP_ATTEMPTS: u32 = 30;
const STARTUP_POLL: Duration = Duration::from_millis(200);

/// Launcher configuration.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// CDP HTTP endpoint, e.g. `http://localhost:9222`.
    pub endpoint: String,
    /// Explicit executable; searched for when unset.
    pub chrome_path: Option<PathBuf>,
    /// Profile directory for persistent login state.
    pub profile_dir: Option<PathBuf>,
    /// Whether to run Chrome in headless mode.
    pub headless: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9222".to_string(),
            chrome_path: None,
            profile_dir: None,
            headless: false,
        }
    }
}

impl LauncherConfig {
    /// Get the profile directory, falling back to `~/.untick/browser-profile`.
    pub fn get_profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".untick")
                .join("browser-profile")
        })
    }

    /// Debugging port taken from the endpoint URL.
    pub fn debug_port(&self) -> Result<u16, CdpError> {
        let url = url::Url::parse(&self.endpoint)?;
        url.port_or_known_default().ok_or_else(|| {
            CdpError::ConnectionFailed(format!("No port in endpoint {}", self.endpoint))
        })
    }
}

/// Launches and owns a Chrome child process.
pub struct ChromeLauncher {
    config: LauncherConfig,
    child: Option<Child>,
}

impl ChromeLauncher {
    /// Create a launcher. Nothing is started until [`ensure_running`](Self::ensure_running).
    pub fn new(config: LauncherConfig) -> Self {
        Self {
            config,
            child: None,
        }
    }

    /// Find a Chrome-family executable in the usual install locations.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    /// Command-line flags Chrome is started with.
    pub fn chrome_args(&self) -> Result<Vec<String>, CdpError> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.config.debug_port()?),
            format!("--user-data-dir={}", self.config.get_profile_dir().display()),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-background-networking".to_string(),
            "--disable-sync".to_string(),
            "--disable-translate".to_string(),
            "--metrics-recording-only".to_string(),
        ];

        if self.config.headless {
            args.push("--headless=new".to_string());
        }

        Ok(args)
    }

    /// Check whether something answers CDP discovery on the endpoint.
    pub async fn is_running(&self) -> bool {
        reqwest::get(format!(
            "{}/json/version",
            self.config.endpoint.trim_end_matches('/')
        ))
        .await
        .is_ok()
    }

    /// Make sure Chrome is reachable, launching it if needed.
    ///
    /// Returns `true` when this call started the process.
    pub async fn ensure_running(&mut self) -> Result<bool, CdpError> {
        if self.is_running().await {
            info!("Chrome already running at {}", self.config.endpoint);
            return Ok(false);
        }

        info!("Chrome not running at {}, launching...", self.config.endpoint);
        let child = self.launch()?;
        self.child = Some(child);

        for _ in 0..STARTUP_ATTEMPTS {
            tokio::time::sleep(STARTUP_POLL).await;
            if self.is_running().await {
                return Ok(true);
            }
        }

        self.shutdown().await;
        Err(CdpError::LaunchFailed(
            "Chrome failed to start within timeout".to_string(),
        ))
    }

    fn launch(&self) -> Result<Child, CdpError> {
        let chrome_path = self
            .config
            .chrome_path
            .clone()
            .or_else(Self::find_chrome)
            .ok_or(CdpError::ChromeNotFound)?;
        let profile_dir = self.config.get_profile_dir();

        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Failed to create profile directory: {}", e);
        }

        info!("Launching Chrome with profile at: {}", profile_dir.display());

        let child = Command::new(&chrome_path)
            .args(self.chrome_args()?)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CdpError::LaunchFailed(format!("{}: {}", chrome_path.display(), e)))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    /// Kill Chrome if this launcher started it.
    pub async fn shutdown(&mut self) {
        if let Some(mut child) = self.child.take() {
            info!("Shutting down Chrome...");
            let _ = child.kill().await;
        }
    }
}

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
