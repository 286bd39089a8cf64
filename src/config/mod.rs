//! Configuration management for the mood-journal application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. It covers the classification endpoint (URL,
//! credential, timeout) and the directory where journal entries are stored.
//!
//! # Environment Variables
//!
//! - `MOOD_JOURNAL_API_KEY`: Credential for the classification endpoint
//! - `HF_API_KEY`: Fallback credential if MOOD_JOURNAL_API_KEY is not set
//! - `MOOD_JOURNAL_API_URL`: Classification endpoint URL (defaults to a hosted
//!   multilingual sentiment model)
//! - `MOOD_JOURNAL_DIR`: Data directory (defaults to ~/.local/share/mood-journal)
//! - `MOOD_JOURNAL_TIMEOUT_SECS`: Request timeout in seconds (defaults to 30)
//! - `HOME`: Used for expanding the default data directory path
//!
//! A missing credential is not an error: classification then always yields neutral.

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_DATA_SUBDIR, DEFAULT_TIMEOUT_SECS, ENV_VAR_API_KEY, ENV_VAR_API_URL,
    ENV_VAR_DATA_DIR, ENV_VAR_HF_API_KEY, ENV_VAR_HOME, ENV_VAR_TIMEOUT_SECS,
    REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use reqwest::Url;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the mood-journal application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use mood_journal::Config;
/// use std::path::PathBuf;
/// use std::time::Duration;
///
/// let config = Config {
///     api_key: None,
///     api_url: "https://example.com/models/sentiment".to_string(),
///     data_dir: PathBuf::from("/path/to/data"),
///     request_timeout: Duration::from_secs(10),
/// };
/// assert!(config.validate().is_ok());
/// ```
///
/// Loading configuration from environment variables:
/// ```no_run
/// use mood_journal::Config;
/// use std::env;
///
/// env::set_var("MOOD_JOURNAL_DIR", "/custom/journal/path");
///
/// let config = Config::load().expect("Failed to load configuration");
/// assert!(config.data_dir.ends_with("path"));
/// ```
pub struct Config {
    /// Bearer credential for the classification endpoint.
    ///
    /// Loaded from MOOD_JOURNAL_API_KEY, then HF_API_KEY. Empty values count as unset.
    pub api_key: Option<String>,

    /// Full URL of the classification endpoint.
    pub api_url: String,

    /// Directory holding the stored journal snapshot.
    pub data_dir: PathBuf,

    /// Timeout applied to each classification request.
    pub request_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| REDACTED_PLACEHOLDER),
            )
            .field("api_url", &self.api_url)
            .field("data_dir", &"[REDACTED_PATH]")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for Config {
    /// Creates a new Config with default values.
    fn default() -> Self {
        Config {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from(""),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Checks that an endpoint URL is an absolute http(s) URL.
    fn validate_api_url(api_url: &str) -> AppResult<()> {
        let url = Url::parse(api_url)
            .map_err(|e| AppError::Config(format!("Invalid API URL '{}': {}", api_url, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AppError::Config(format!(
                "API URL must use http or https, not '{}'",
                scheme
            ))),
        }
    }

    /// Parses the request timeout, in whole seconds.
    fn parse_timeout(raw: &str) -> AppResult<Duration> {
        let seconds: u64 = raw.trim().parse().map_err(|_| {
            AppError::Config(format!(
                "{} must be a positive number of seconds, got '{}'",
                ENV_VAR_TIMEOUT_SECS, raw
            ))
        })?;

        if seconds == 0 {
            return Err(AppError::Config(format!(
                "{} must be greater than zero",
                ENV_VAR_TIMEOUT_SECS
            )));
        }

        Ok(Duration::from_secs(seconds))
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The data directory path is expanded using `shellexpand` to handle `~` and
    /// environment variable references.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The data directory path expansion fails or yields an empty path
    /// - The API URL is not an absolute http(s) URL
    /// - The timeout is not a positive integer
    pub fn load() -> AppResult<Self> {
        let api_key = env::var(ENV_VAR_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                env::var(ENV_VAR_HF_API_KEY)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            });

        let api_url = env::var(ENV_VAR_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Config::validate_api_url(&api_url)?;

        let request_timeout = match env::var(ENV_VAR_TIMEOUT_SECS) {
            Ok(raw) => Config::parse_timeout(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let data_dir_str = env::var(ENV_VAR_DATA_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_else(|_| "".to_string());
            format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
        });

        // Expand the path (handles ~ and environment variables)
        let expanded_path = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let data_dir = PathBuf::from(expanded_path.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        Ok(Config {
            api_key,
            api_url,
            data_dir,
            request_timeout,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Data directory path is empty"
    /// - "Data directory must be an absolute path"
    /// - "Invalid API URL ..." / "API URL must use http or https ..."
    /// - "Request timeout must be greater than zero"
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        Config::validate_api_url(&self.api_url)?;

        if self.request_timeout.is_zero() {
            return Err(AppError::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
