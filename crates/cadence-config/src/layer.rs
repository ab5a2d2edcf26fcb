// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The merged configuration layer all sources produce.

use serde::{Deserialize, Serialize};

use crate::sections::{DatabaseConfigLayer, LoggingConfigLayer, StravaConfigLayer};

/// One layer of configuration, with every field optional.
///
/// Sources each produce a layer; layers merge in precedence order before
/// being finalized into [`crate::Config`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CadenceConfigLayer {
	pub database: Option<DatabaseConfigLayer>,
	pub strava: Option<StravaConfigLayer>,
	pub logging: Option<LoggingConfigLayer>,
}

impl CadenceConfigLayer {
	pub fn merge(&mut self, other: Self) {
		merge_section(&mut self.database, other.database, DatabaseConfigLayer::merge);
		merge_section(&mut self.strava, other.strava, StravaConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_section<T>(base: &mut Option<T>, other: Option<T>, merge: fn(&mut T, T)) {
	match (base.as_mut(), other) {
		(Some(existing), Some(incoming)) => merge(existing, incoming),
		(None, Some(incoming)) => *base = Some(incoming),
		(_, None) => {}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_merge_takes_incoming_section_when_base_empty() {
		let mut base = CadenceConfigLayer::default();
		let overlay: CadenceConfigLayer = toml::from_str(
			r#"
[logging]
level = "debug"
"#,
		)
		.unwrap();
		base.merge(overlay);
		assert_eq!(base.logging.unwrap().level, Some("debug".to_string()));
	}

	#[test]
	fn test_merge_overlays_fields_within_section() {
		let mut base: CadenceConfigLayer = toml::from_str(
			r#"
[strava]
max_queue_age_secs = 3600
processed_max_age_days = 365
"#,
		)
		.unwrap();
		let overlay: CadenceConfigLayer = toml::from_str(
			r#"
[strava]
max_queue_age_secs = 7200
"#,
		)
		.unwrap();
		base.merge(overlay);
		let strava = base.strava.unwrap();
		assert_eq!(strava.max_queue_age_secs, Some(7200));
		assert_eq!(strava.processed_max_age_days, Some(365));
	}
}
