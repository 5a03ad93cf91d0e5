// src/config/history.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

pub const ENV_CONFIG_PATH: &str = "HISTORY_CONFIG_PATH";
pub const ENV_BASE_URL: &str = "HISTORY_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "HISTORY_TIMEOUT_SECS";
pub const ENV_EXPOSE_METRICS: &str = "HISTORY_EXPOSE_METRICS";

pub const DEFAULT_BASE_URL: &str = "https://baike.baidu.com/cms/home/eventsOnHistory";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("this-day-in-history/", env!("CARGO_PKG_VERSION"));

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Upstream root; month files live at `{base_url}/{MM}.json`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. 0 falls back to the default.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Mount `/metrics` (Prometheus exposition).
    #[serde(default)]
    pub expose_metrics: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            expose_metrics: false,
        }
    }
}

impl HistoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load from an explicit path. TOML or JSON, chosen by extension.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading history config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg = parse_config(&content, &ext)
            .with_context(|| format!("parsing history config {}", path.display()))?;
        Ok(cfg.sanitized())
    }

    /// Load using env var + fallbacks, then apply env overrides:
    /// 1) $HISTORY_CONFIG_PATH
    /// 2) config/history.toml
    /// 3) config/history.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        let base = if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let toml_p = PathBuf::from("config/history.toml");
            let json_p = PathBuf::from("config/history.json");
            if toml_p.exists() {
                Self::load_from(&toml_p)?
            } else if json_p.exists() {
                Self::load_from(&json_p)?
            } else {
                Self::default()
            }
        };
        base.with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(url) = env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                self.base_url = url.trim().to_string();
            }
        }
        if let Ok(secs) = env::var(ENV_TIMEOUT_SECS) {
            self.timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be an integer, got '{secs}'"))?;
        }
        if let Ok(v) = env::var(ENV_EXPOSE_METRICS) {
            self.expose_metrics = matches!(v.trim(), "1" | "true" | "yes");
        }
        Ok(self.sanitized())
    }

    fn sanitized(mut self) -> Self {
        if self.timeout_secs == 0 {
            self.timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        if self.base_url.trim().is_empty() {
            self.base_url = default_base_url();
        }
        self
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<HistoryConfig> {
    match hint_ext {
        "json" => Ok(serde_json::from_str(s)?),
        "toml" => Ok(toml::from_str(s)?),
        // Unknown extension: JSON first, then TOML.
        _ => serde_json::from_str(s)
            .or_else(|_| toml::from_str(s))
            .map_err(|e| anyhow!("unsupported history config format: {e}")),
    }
}
