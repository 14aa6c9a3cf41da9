//! Configuration management for tagbump.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tagbump_gitlab::{GitLabClient, RetryPolicy};

use crate::error::Result;

/// tagbump configuration loaded from a TOML file.
///
/// Every field has a default, so a missing file or a partial file is valid.
/// Command-line flags take precedence over values loaded here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// GitLab instance settings.
    #[serde(default)]
    pub gitlab: GitLabConfig,

    /// Commit retry settings.
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Config {
    /// Load config from a TOML file.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// The commit retry policy described by this config.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.retry.max_retries,
            backoff_base: Duration::from_millis(self.retry.backoff_base_ms),
            retryable_statuses: self.retry.retryable_statuses.clone(),
        }
    }
}

/// GitLab instance settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabConfig {
    /// Base URL of the GitLab instance.
    #[serde(default = "default_url")]
    pub url: String,

    /// Branch that commits land on.
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            branch: default_branch(),
        }
    }
}

fn default_url() -> String {
    GitLabClient::DEFAULT_URL.into()
}

fn default_branch() -> String {
    "staging".into()
}

/// Commit retry settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first failed attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry, in milliseconds.
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,

    /// HTTP statuses that are retried.
    #[serde(default = "default_retryable_statuses")]
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            backoff_base_ms: default_backoff_base_ms(),
            retryable_statuses: default_retryable_statuses(),
        }
    }
}

const fn default_max_retries() -> u32 {
    RetryPolicy::DEFAULT_MAX_RETRIES
}

#[allow(clippy::cast_possible_truncation)]
const fn default_backoff_base_ms() -> u64 {
    RetryPolicy::DEFAULT_BACKOFF_BASE.as_millis() as u64
}

fn default_retryable_statuses() -> Vec<u16> {
    RetryPolicy::DEFAULT_RETRYABLE_STATUSES.to_vec()
}
