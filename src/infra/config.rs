// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::errors::LessonsmithError;
use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mining: MiningConfig,

    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load config.toml from the default location, falling back to defaults.
    pub fn load() -> Result<Self, LessonsmithError> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, LessonsmithError> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| LessonsmithError::Config(format!("{}: {e}", path.display())))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiningConfig {
    /// Minimum historical average success for a candidate to be emitted.
    pub min_confidence: f64,
    /// Observations required before a pattern's average counts at all.
    pub min_occurrences: u32,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.7,
            min_occurrences: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Maximum suggestions returned per request.
    pub max_suggestions: usize,
    /// Candidates fetched per source before merging and ranking.
    pub fetch_limit: u32,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 5,
            fetch_limit: 25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    /// Optional bearer token; when unset the API is open (local use).
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 8642,
            token: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Override for the database path (defaults to the platform data dir).
    pub db_path: Option<String>,
}
