//! Application configuration management.
//!
//! This module handles loading and saving the gate configuration: where the
//! remote authority lives, which cookie carries the session token, the two
//! page paths, and how credentials are transported.
//!
//! Configuration is stored at `~/.config/bankgate/config.json`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "bankgate";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Cookie jar file name in cache directory
const COOKIE_JAR_FILE: &str = "cookies.json";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_COOKIE_NAME: &str = "token";
const DEFAULT_LOGIN_PATH: &str = "/login";
const DEFAULT_INDEX_PATH: &str = "/";

/// HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding `base_url`
pub const BASE_URL_ENV: &str = "BANKGATE_BASE_URL";

/// Environment variable overriding `cookie_name`
pub const COOKIE_NAME_ENV: &str = "BANKGATE_COOKIE_NAME";

/// How credentials travel to the login endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoginTransport {
    /// `GET /api/login?account=..&password=..`, the contract the authority has always served
    #[default]
    Query,
    /// `POST /api/login` with a form-encoded body
    FormBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub cookie_name: String,
    pub login_path: String,
    pub index_path: String,
    pub request_timeout_secs: u64,
    pub login_transport: LoginTransport,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            index_path: DEFAULT_INDEX_PATH.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            login_transport: LoginTransport::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            Self::from_json(&contents)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load the config, writing the defaults out on first run so there is a
    /// file to edit.
    pub fn load_or_init() -> Result<Self> {
        if !Self::config_path()?.exists() {
            if let Err(e) = Self::default().save() {
                warn!(error = %e, "Failed to write default config");
            }
        }
        Self::load()
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Parse a config document; missing fields take their defaults.
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Failed to parse config file")
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                self.base_url = base_url.trim().to_string();
            }
        }
        if let Ok(cookie_name) = std::env::var(COOKIE_NAME_ENV) {
            if !cookie_name.trim().is_empty() {
                self.cookie_name = cookie_name.trim().to_string();
            }
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn cookie_jar_path(&self) -> Result<PathBuf> {
        Ok(self.cache_dir()?.join(COOKIE_JAR_FILE))
    }

    pub fn base(&self) -> Result<Url> {
        Url::parse(&self.base_url).with_context(|| format!("Invalid base URL: {}", self.base_url))
    }

    /// Origin (`scheme://host:port`) that scopes the cookie jar
    pub fn origin(&self) -> Result<String> {
        Ok(self.base()?.origin().ascii_serialization())
    }
}
