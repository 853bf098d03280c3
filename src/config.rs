use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "GitHubProfileFinder/1.0";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FinderConfig {
    pub api_base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub demo_username: String,
    pub demo_delay_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 10,
            demo_username: "torvalds".to_string(),
            demo_delay_ms: 1000,
            token: None,
        }
    }
}

impl FinderConfig {
    /// Reads the config file if there is one, then applies environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .with_context(|| format!("Can't read config file {}", config_path.display()))?;
            Self::from_json(&contents)
                .with_context(|| format!("Invalid config file {}", config_path.display()))?
        } else {
            FinderConfig::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Failed to parse config JSON")
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Can't create config directory")?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(config_path, contents).context("Can't write config file")?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").context("No HOME directory?")?;
        Ok(PathBuf::from(home).join(".config").join("ghfind").join("config.json"))
    }

    /// `lookup` is injected so tests don't touch the process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("GHFIND_API_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = lookup("GHFIND_TIMEOUT_SECS") {
            match v.parse::<u64>() {
                Ok(secs) if secs > 0 => self.request_timeout_secs = secs,
                _ => tracing::warn!(value = %v, "ignoring invalid GHFIND_TIMEOUT_SECS"),
            }
        }
        if let Some(v) = lookup("GITHUB_TOKEN").filter(|t| !t.is_empty()) {
            self.token = Some(v);
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn demo_delay(&self) -> Duration {
        Duration::from_millis(self.demo_delay_ms)
    }
}
