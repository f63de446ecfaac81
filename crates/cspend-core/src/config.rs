use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Search endpoint of the clearspending.ru contracts API. Ends in `?` so the
/// encoded query can be appended directly.
pub const DEFAULT_BASE_URL: &str = "http://openapi.clearspending.ru/restapi/v3/contracts/search/?";

/// Contracts requested per page.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Browser-like User-Agent; the API rejects some non-browser clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; Win64; x64)";

/// Retry parameters for transient fetch failures (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// How many times the same page may be slept on and retried.
    pub max_sleep_count: u32,
    /// Fixed pause between attempts, in seconds.
    pub sleep_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_sleep_count: 3,
            sleep_secs: 10,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_sleep_count: self.max_sleep_count,
            sleep: Duration::from_secs(self.sleep_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/cspend/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CspendConfig {
    /// Search endpoint; the encoded query is appended verbatim.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Value sent as `perpage`.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for CspendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            per_page: default_per_page(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            retry: None,
        }
    }
}

impl CspendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().policy()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cspend")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CspendConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<CspendConfig> {
    if !path.exists() {
        let default_cfg = CspendConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: CspendConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
