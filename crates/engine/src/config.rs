use serde::Deserialize;

use crate::error::ConfigError;
use crate::pools::DEFAULT_CAPACITY;
use crate::refill::{DEFAULT_PAGES_PER_BATCH, MAX_PAGES_PER_BATCH};
use crate::selector::SelectionPolicy;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// TMDB API key, only needed when fetching live
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language requested from TMDB
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Slots in the suggested window
    #[serde(default = "default_suggestion_capacity")]
    pub suggestion_capacity: usize,

    /// Catalog pages requested per fetch
    #[serde(default = "default_pages_per_batch")]
    pub pages_per_batch: u32,

    #[serde(default)]
    pub selection_policy: SelectionPolicy,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_suggestion_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_pages_per_batch() -> u32 {
    DEFAULT_PAGES_PER_BATCH
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<AppConfig>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Engine settings from the environment, before any CLI overrides.
    ///
    /// Not validated here; call [`EngineConfig::validate`] once overrides
    /// are applied.
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            suggestion_capacity: self.suggestion_capacity,
            pages_per_batch: self.pages_per_batch,
            selection_policy: self.selection_policy,
        }
    }
}

/// The part of [`AppConfig`] the engine itself reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub suggestion_capacity: usize,
    pub pages_per_batch: u32,
    pub selection_policy: SelectionPolicy,
}

impl EngineConfig {
    /// Reject a zero-slot window and page counts TMDB cannot serve
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.suggestion_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !(1..=MAX_PAGES_PER_BATCH).contains(&self.pages_per_batch) {
            return Err(ConfigError::PagesPerBatchOutOfRange {
                value: self.pages_per_batch,
                max: MAX_PAGES_PER_BATCH,
            });
        }
        Ok(self)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            suggestion_capacity: DEFAULT_CAPACITY,
            pages_per_batch: DEFAULT_PAGES_PER_BATCH,
            selection_policy: SelectionPolicy::default(),
        }
    }
}
