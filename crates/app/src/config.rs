//! Application configuration
//!
//! Read from TOML (explicit `--config` path, or `config.toml` in the
//! platform config directory), then overridden by `CLEANSWEEP_*` env vars.

use std::path::{Path, PathBuf};
use std::time::Duration;

use cleansweep_net::{SummarizerConfig, DEFAULT_TIMEOUT_SECS, URL_ENV};
use directories::ProjectDirs;
use serde::Deserialize;

const CONFIG_FILE: &str = "config.toml";
const DEFAULT_LOG_FILTER: &str = "cleansweep_app=info,cleansweep_core=info,cleansweep_net=info";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set
    pub log_filter: String,
    pub summarizer: SummarizerSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SummarizerSection {
    /// Base URL of the summarization service; without it every summary
    /// falls back to the apology line
    pub url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            summarizer: SummarizerSection::default(),
        }
    }
}

impl Default for SummarizerSection {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Load config from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// `config.toml` under the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "onyx", "cleansweep")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Apply `CLEANSWEEP_*` overrides using the given variable lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(URL_ENV) {
            let url = url.trim().to_string();
            self.summarizer.url = if url.is_empty() { None } else { Some(url) };
        }

        if let Some(value) = lookup("CLEANSWEEP_SUMMARIZER_TIMEOUT_SECS") {
            let parsed = value.trim().parse();
            self.summarizer.timeout_secs = parsed.map_err(|_| ConfigError::InvalidEnv {
                key: "CLEANSWEEP_SUMMARIZER_TIMEOUT_SECS",
                value,
            })?;
        }

        if let Some(filter) = lookup("CLEANSWEEP_LOG") {
            self.log_filter = filter;
        }

        Ok(())
    }

    /// Summarizer connection settings, if a service URL is configured
    pub fn summarizer_config(&self) -> Option<SummarizerConfig> {
        self.summarizer.url.as_ref().map(|url| {
            SummarizerConfig::new(url.clone())
                .with_timeout(Duration::from_secs(self.summarizer.timeout_secs))
        })
    }
}
