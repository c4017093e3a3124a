//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use showcat_api::tvmaze::{CatalogFetchOptions, DEFAULT_BASE_URL, DEFAULT_BATCH_SIZE};
use showcat_catalog::RatingFloor;
use url::Url;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TVmaze API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Catalog loading settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Choices offered by the genre and rating filters.
    #[serde(default)]
    pub filters: FiltersConfig,
}

/// TVmaze API configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// API root URL.
    pub base_url: String,
    /// Minimum interval between requests in milliseconds.
    pub min_interval_ms: u64,
    /// Per-request timeout in seconds; `0` disables the timeout.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            min_interval_ms: 50,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Parses `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .with_context(|| format!("invalid api.base_url: {}", self.base_url))
    }

    /// Returns the rate limiter interval.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Returns the request timeout, if enabled.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

/// Catalog loading configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Index pages requested concurrently per batch.
    pub batch_size: u32,
    /// Maximum index pages to request; `0` walks until the index is exhausted.
    pub max_pages: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_pages: 6,
        }
    }
}

impl CatalogConfig {
    /// Builds fetch options, letting `max_pages_override` replace the
    /// configured cap (`0` again meaning no cap).
    #[must_use]
    pub fn fetch_options(&self, max_pages_override: Option<u32>) -> CatalogFetchOptions {
        let max_pages = max_pages_override.unwrap_or(self.max_pages);
        CatalogFetchOptions {
            batch_size: self.batch_size,
            max_pages: (max_pages > 0).then_some(max_pages),
        }
    }
}

/// Filter choice configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FiltersConfig {
    /// Genre labels offered by the genre filter.
    pub genres: Vec<String>,
    /// Rating floors offered by the rating filter, in tenths.
    pub ratings: Vec<u32>,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            genres: ["Drama", "Comedy", "Action", "Sports"]
                .into_iter()
                .map(String::from)
                .collect(),
            ratings: vec![20, 30, 40, 50, 60, 70, 80],
        }
    }
}

impl FiltersConfig {
    /// Returns the configured rating floors.
    ///
    /// # Errors
    ///
    /// Returns an error if a rating is above 100 (10.0).
    pub fn rating_floors(&self) -> Result<Vec<RatingFloor>> {
        self.ratings
            .iter()
            .map(|&tenths| {
                if tenths > 100 {
                    bail!("invalid filters.ratings entry {tenths}: ratings are tenths of 0..=10");
                }
                Ok(RatingFloor::from_tenths(tenths))
            })
            .collect()
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}
