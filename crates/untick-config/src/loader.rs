//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").unwrap_or_else(|e| panic!("invalid env var pattern: {}", e))
});

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load `path` if it exists, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        Self::expand_paths(&mut config);
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in ENV_VAR.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    fn expand_paths(config: &mut Config) {
        for path in [
            &mut config.browser.profile_dir,
            &mut config.browser.chrome_path,
            &mut config.logging.dir,
        ]
        .into_iter()
        .flatten()
        {
            let expanded = Self::expand_path(&path.to_string_lossy());
            *path = PathBuf::from(expanded);
        }
    }

    /// Expand shell-style paths (e.g., `~/.untick`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.browser.endpoint, "http://localhost:9222");
        assert_eq!(config.sweep.max_passes, 80);
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [browser]
            endpoint = "http://127.0.0.1:9333"
            launch = true
            headless = true
            request_timeout_secs = 10

            [target]
            url_contains = "settings/interests"

            [sweep]
            max_passes = 40
            stable_passes = 3
            settle_ms = 50
            scroll_pause_ms = 400
            min_scroll_px = 250.0
            scroll_fraction = 0.5
            overflow_slack_px = 20.0

            [logging]
            level = "debug"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.browser.endpoint, "http://127.0.0.1:9333");
        assert!(config.browser.launch);
        assert!(config.browser.headless);
        assert_eq!(config.browser.request_timeout_secs, 10);
        assert_eq!(config.target.url_contains.as_deref(), Some("settings/interests"));
        assert_eq!(config.sweep.max_passes, 40);
        assert_eq!(config.sweep.stable_passes, 3);
        assert_eq!(config.sweep.settle_ms, 50);
        assert_eq!(config.sweep.scroll_pause_ms, 400);
        assert_eq!(config.sweep.min_scroll_px, 250.0);
        assert_eq!(config.sweep.scroll_fraction, 0.5);
        assert_eq!(config.sweep.overflow_slack_px, 20.0);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[sweep]").unwrap();
        writeln!(file, "max_passes = 12").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.sweep.max_passes, 12);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/untick.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            ConfigLoader::load_or_default(Path::new("/nonexistent/path/untick.toml")).unwrap();
        assert_eq!(config.sweep.max_passes, 80);
    }

    #[test]
    fn test_load_or_default_reports_bad_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[sweep").unwrap();
        assert!(ConfigLoader::load_or_default(file.path()).is_err());
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("max_passes = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result = ConfigLoader::load_str("[sweep]\nmax_passes = \"many\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("UNTICK_TEST_ENDPOINT_VAR", "http://10.0.0.2:9222");
        }
        let content = "[browser]\nendpoint = \"${UNTICK_TEST_ENDPOINT_VAR}\"";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.browser.endpoint, "http://10.0.0.2:9222");
        unsafe {
            std::env::remove_var("UNTICK_TEST_ENDPOINT_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_UNTICK_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_tilde_paths_are_expanded() {
        let content = "[browser]\nprofile_dir = \"~/untick-profile\"\n[logging]\ndir = \"~/untick-logs\"";
        let config = ConfigLoader::load_str(content).unwrap();
        let profile = config.browser.profile_dir.unwrap();
        assert!(!profile.starts_with("~"));
        assert!(profile.ends_with("untick-profile"));
        assert!(!config.logging.dir.unwrap().starts_with("~"));
    }

    #[test]
    fn test_expand_path_no_tilde() {
        let path = "/usr/bin/chromium";
        assert_eq!(ConfigLoader::expand_path(path), path);
    }
}
