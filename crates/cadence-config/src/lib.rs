// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for Cadence.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`CADENCE_*`)
//!
//! # Usage
//!
//! ```ignore
//! use cadence_config::load_config;
//!
//! let config = load_config()?;
//! println!("Queue age threshold: {}s", config.strava.max_queue_age_secs);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::CadenceConfigLayer;
pub use sections::{
	DatabaseConfig, DatabaseConfigLayer, LoggingConfig, LoggingConfigLayer, StravaConfig,
	StravaConfigLayer,
};
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
	pub database: DatabaseConfig,
	pub strava: StravaConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`CADENCE_*`)
/// 2. Config file (`/etc/cadence/cadence.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<Config, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<Config, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<Config, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = CadenceConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: CadenceConfigLayer) -> Result<Config, ConfigError> {
	let database = layer.database.unwrap_or_default().finalize();
	let strava = layer.strava.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	info!(
		database = %database.url,
		max_queue_age_secs = strava.max_queue_age_secs,
		processed_max_age_days = strava.processed_max_age_days,
		"Configuration loaded"
	);

	Ok(Config {
		database,
		strava,
		logging,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_finalize_defaults() {
		let config = finalize(CadenceConfigLayer::default()).unwrap();
		assert_eq!(config.database.url, "sqlite:./cadence.db");
		assert_eq!(config.logging.level, "info");
		assert_eq!(config.strava.max_queue_age_secs, 3600);
	}

	#[test]
	fn test_finalize_uses_layer_values() {
		let layer: CadenceConfigLayer = toml::from_str(
			r#"
[database]
url = "sqlite:/var/lib/cadence/cadence.db"

[strava]
max_queue_age_secs = 7200
"#,
		)
		.unwrap();
		let config = finalize(layer).unwrap();
		assert_eq!(config.database.url, "sqlite:/var/lib/cadence/cadence.db");
		assert_eq!(config.strava.max_queue_age_secs, 7200);
		assert_eq!(config.strava.processed_max_age_days, 730);
	}
}
