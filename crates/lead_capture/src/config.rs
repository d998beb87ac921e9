use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "leadform.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base the applications path is appended to. Empty means same-origin.
    pub backend_url: String,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            request_timeout_secs: None,
            user_agent: concat!("lead-capture/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid backend url '{url}': {source}")]
    InvalidBackendUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("backend url '{url}' must use http or https, not '{scheme}'")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    backend_url: Option<String>,
    request_timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

/// Defaults, then `leadform.toml` in the working directory, then the process
/// environment.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => settings.apply_file(file_cfg),
            Err(err) => warn!(path = %path.display(), "config: ignoring unreadable settings file: {err}"),
        }
    }

    settings.apply_env(env);
    settings
}

impl Settings {
    fn apply_file(&mut self, file_cfg: FileSettings) {
        if let Some(v) = file_cfg.backend_url {
            self.backend_url = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            self.request_timeout_secs = Some(v);
        }
        if let Some(v) = file_cfg.user_agent {
            self.user_agent = v;
        }
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        // Later names win; VITE_BACKEND_URL is what the web build reads.
        for key in ["VITE_BACKEND_URL", "BACKEND_URL", "APP__BACKEND_URL"] {
            if let Some(v) = env(key) {
                self.backend_url = v;
            }
        }

        if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
            match v.trim().parse::<u64>() {
                Ok(0) => self.request_timeout_secs = None,
                Ok(parsed) => self.request_timeout_secs = Some(parsed),
                Err(_) => warn!(value = %v, "config: ignoring non-numeric APP__REQUEST_TIMEOUT_SECS"),
            }
        }

        if let Some(v) = env("APP__USER_AGENT") {
            self.user_agent = v;
        }
    }

    pub fn with_backend_url(mut self, backend_url: impl Into<String>) -> Self {
        self.backend_url = backend_url.into();
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Normalized backend base URL: trimmed, no trailing slash, and either
    /// empty or an absolute http(s) URL.
    pub fn backend_base(&self) -> Result<String, ConfigError> {
        normalize_backend_url(&self.backend_url)
    }
}

pub fn normalize_backend_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    let parsed = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBackendUrl {
        url: trimmed.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            url: trimmed.to_string(),
            scheme: parsed.scheme().to_string(),
        });
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
