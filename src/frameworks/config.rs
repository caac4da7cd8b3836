use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

// Runtime configuration: built-in defaults, then the TOML file, then environment.

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_CONFIG_FILE: &str = "beauty_client.toml";

pub const API_URL_VAR: &str = "BEAUTY_API_URL";
pub const SESSION_FILE_VAR: &str = "BEAUTY_SESSION_FILE";
pub const TIMEOUT_VAR: &str = "BEAUTY_REQUEST_TIMEOUT_MS";
pub const CONFIG_VAR: &str = "BEAUTY_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid api url {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("invalid request timeout {0:?}: expected milliseconds")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub session_file: PathBuf,
    // None keeps reqwest's default of no timeout.
    pub request_timeout: Option<Duration>,
}

// Shape of `beauty_client.toml`; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_url: Option<String>,
    session_file: Option<PathBuf>,
    request_timeout_ms: Option<u64>,
}

impl ClientConfig {
    // Reads `.env`, the config file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let (path, explicit) = match env::var(CONFIG_VAR) {
            Ok(path) => (PathBuf::from(path), true),
            Err(_) => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        let file = read_config_file(&path, explicit)?;
        Self::resolve(file.as_deref(), |key| env::var(key).ok())
    }

    // Layering without touching the process: file contents plus an env lookup.
    pub fn resolve(
        file: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file: FileConfig = match file {
            Some(contents) => toml::from_str(contents)?,
            None => FileConfig::default(),
        };

        let api_url = lookup(API_URL_VAR)
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = validate_api_url(&api_url)?;

        let session_file = lookup(SESSION_FILE_VAR)
            .map(PathBuf::from)
            .or(file.session_file)
            .unwrap_or_else(default_session_file);

        let timeout_ms = match lookup(TIMEOUT_VAR) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
            ),
            None => file.request_timeout_ms,
        };
        // Zero means no timeout, same as leaving it unset.
        let request_timeout = timeout_ms
            .filter(|millis| *millis > 0)
            .map(Duration::from_millis);

        Ok(Self {
            api_url,
            session_file,
            request_timeout,
        })
    }

    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, ConfigError> {
        self.api_url = validate_api_url(api_url)?;
        Ok(self)
    }
}

// A missing default file is fine; a missing file that was asked for is not.
fn read_config_file(path: &Path, explicit: bool) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            tracing::debug!(path = %path.display(), "config file loaded");
            Ok(Some(contents))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound && !explicit => Ok(None),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn validate_api_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        value: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn default_session_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("beauty_client"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("session.json")
}
