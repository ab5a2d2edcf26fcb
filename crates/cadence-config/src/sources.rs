// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::CadenceConfigLayer;
use crate::sections::{DatabaseConfigLayer, LoggingConfigLayer, StravaConfigLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<CadenceConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<CadenceConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(CadenceConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/cadence/cadence.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<CadenceConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(CadenceConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: CadenceConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable configuration source (`CADENCE_*`).
pub struct EnvSource;

impl EnvSource {
	fn string_var(name: &str) -> Option<String> {
		std::env::var(name).ok().filter(|v| !v.is_empty())
	}

	fn parsed_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
		match Self::string_var(name) {
			None => Ok(None),
			Some(raw) => raw
				.parse()
				.map(Some)
				.map_err(|_| ConfigError::InvalidValue {
					name: name.to_string(),
					message: format!("cannot parse {raw:?}"),
				}),
		}
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<CadenceConfigLayer, ConfigError> {
		debug!("loading environment variables");

		let database = DatabaseConfigLayer {
			url: Self::string_var("CADENCE_DATABASE_URL"),
		};

		let strava = StravaConfigLayer {
			client_id: Self::string_var("CADENCE_STRAVA_CLIENT_ID"),
			client_secret: Self::string_var("CADENCE_STRAVA_CLIENT_SECRET"),
			token_url: Self::string_var("CADENCE_STRAVA_TOKEN_URL"),
			api_url: Self::string_var("CADENCE_STRAVA_API_URL"),
			callback_url: Self::string_var("CADENCE_STRAVA_CALLBACK_URL"),
			verify_token: Self::string_var("CADENCE_STRAVA_VERIFY_TOKEN"),
			max_queue_age_secs: Self::parsed_var("CADENCE_STRAVA_MAX_QUEUE_AGE_SECS")?,
			processed_max_age_days: Self::parsed_var("CADENCE_STRAVA_PROCESSED_MAX_AGE_DAYS")?,
		};

		let logging = LoggingConfigLayer {
			level: Self::string_var("CADENCE_LOG_LEVEL"),
		};

		Ok(CadenceConfigLayer {
			database: Some(database),
			strava: Some(strava),
			logging: Some(logging),
		})
	}
}
