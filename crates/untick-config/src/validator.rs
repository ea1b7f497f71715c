//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Fail on the first error, otherwise hand back the warnings.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_target(config, &mut result);
        Self::validate_sweep(config, &mut result);

        result
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let endpoint = &config.browser.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                "endpoint must start with http:// or https://",
            ));
        }

        if config.browser.request_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "browser.request_timeout_secs",
                "request_timeout_secs must be greater than 0",
            ));
        }

        if let Some(ref path) = config.browser.chrome_path {
            if !path.exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Chrome executable does not exist: {}", path.display()),
                ));
            }
        }
    }

    fn validate_target(config: &Config, result: &mut ValidationResult) {
        if config.target.url_contains.is_some() && config.target.open_url.is_some() {
            result.add_error(ValidationError::new(
                "target",
                "url_contains and open_url are mutually exclusive",
            ));
        }
    }

    fn validate_sweep(config: &Config, result: &mut ValidationResult) {
        let sweep = &config.sweep;

        if sweep.max_passes == 0 {
            result.add_error(ValidationError::new(
                "sweep.max_passes",
                "max_passes must be greater than 0",
            ));
        }

        if sweep.max_passes > 1000 {
            result.add_warning(ValidationWarning::new(
                "sweep.max_passes",
                "max_passes is very high (>1000), a page that keeps re-checking boxes will run for a long time",
            ));
        }

        if sweep.stable_passes == 0 {
            result.add_error(ValidationError::new(
                "sweep.stable_passes",
                "stable_passes must be greater than 0",
            ));
        } else if sweep.stable_passes >= sweep.max_passes {
            result.add_warning(ValidationWarning::new(
                "sweep.stable_passes",
                "stable_passes >= max_passes, the sweep can never end as stable",
            ));
        }

        if !(sweep.scroll_fraction > 0.0 && sweep.scroll_fraction <= 1.0) {
            result.add_error(ValidationError::new(
                "sweep.scroll_fraction",
                "scroll_fraction must be in (0, 1]",
            ));
        }

        if sweep.min_scroll_px < 0.0 {
            result.add_error(ValidationError::new(
                "sweep.min_scroll_px",
                "min_scroll_px cannot be negative",
            ));
        }

        if sweep.overflow_slack_px < 0.0 {
            result.add_error(ValidationError::new(
                "sweep.overflow_slack_px",
                "overflow_slack_px cannot be negative",
            ));
        }

        if sweep.settle_ms > 5_000 {
            result.add_warning(ValidationWarning::new(
                "sweep.settle_ms",
                "settle_ms is very high (>5s per click)",
            ));
        }

        if sweep.scroll_pause_ms > 10_000 {
            result.add_warning(ValidationWarning::new(
                "sweep.scroll_pause_ms",
                "scroll_pause_ms is very high (>10s per pass)",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
