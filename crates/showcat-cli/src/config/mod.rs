//! Application configuration module.
//!
//! Manages the TOML config file holding API, catalog-loading, and filter
//! choice settings.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{ApiConfig, AppConfig, CatalogConfig, FiltersConfig};
pub use paths::resolve_config_path;
