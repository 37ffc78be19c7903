use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::paths::Paths;

pub const DEFAULT_API_BASE: &str = "https://api.browser-use.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

pub const ENV_API_KEY: &str = "BROWSER_USE_API_KEY";
pub const ENV_API_BASE: &str = "BROWSER_USE_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "BROWSER_USE_TIMEOUT_SECS";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserUseConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_base: Option<String>,
    /// Long-running agent tasks need a generous default.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for BrowserUseConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub browser_use: BrowserUseConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn load_or_default(paths: &Paths) -> Result<Self> {
        let config_path = paths.config_file();
        if config_path.exists() {
            debug!(path = %config_path.display(), "Loading config");
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Config file (or defaults) with environment overrides applied on top.
    pub fn load_with_env(paths: &Paths) -> Result<Self> {
        let mut config = Self::load_or_default(paths)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup; unset keys leave the field alone.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.browser_use.api_key = key;
        }
        if let Some(base) = lookup(ENV_API_BASE) {
            self.browser_use.api_base = Some(base);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|e| {
                Error::Config(format!("{} must be a positive integer: {}", ENV_TIMEOUT_SECS, e))
            })?;
            if secs == 0 {
                return Err(Error::Config(format!("{} must be greater than zero", ENV_TIMEOUT_SECS)));
            }
            self.browser_use.timeout_secs = secs;
        }
        Ok(())
    }

    pub fn api_key(&self) -> Option<&str> {
        let key = self.browser_use.api_key.trim();
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }

    pub fn api_base(&self) -> String {
        self.browser_use
            .api_base
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string()
    }
}
