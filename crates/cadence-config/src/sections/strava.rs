// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Strava integration configuration section.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StravaConfigLayer {
	pub client_id: Option<String>,
	pub client_secret: Option<String>,
	pub token_url: Option<String>,
	pub api_url: Option<String>,
	pub callback_url: Option<String>,
	pub verify_token: Option<String>,
	pub max_queue_age_secs: Option<u64>,
	pub processed_max_age_days: Option<u32>,
}

impl StravaConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.client_id.is_some() {
			self.client_id = other.client_id;
		}
		if other.client_secret.is_some() {
			self.client_secret = other.client_secret;
		}
		if other.token_url.is_some() {
			self.token_url = other.token_url;
		}
		if other.api_url.is_some() {
			self.api_url = other.api_url;
		}
		if other.callback_url.is_some() {
			self.callback_url = other.callback_url;
		}
		if other.verify_token.is_some() {
			self.verify_token = other.verify_token;
		}
		if other.max_queue_age_secs.is_some() {
			self.max_queue_age_secs = other.max_queue_age_secs;
		}
		if other.processed_max_age_days.is_some() {
			self.processed_max_age_days = other.processed_max_age_days;
		}
	}

	pub fn finalize(self) -> StravaConfig {
		StravaConfig {
			client_id: self.client_id.unwrap_or_default(),
			client_secret: self.client_secret.unwrap_or_default(),
			token_url: self
				.token_url
				.unwrap_or_else(|| "https://www.strava.com/oauth/token".to_string()),
			api_url: self
				.api_url
				.unwrap_or_else(|| "https://www.strava.com/api/v3".to_string()),
			callback_url: self.callback_url.unwrap_or_default(),
			verify_token: self.verify_token.unwrap_or_default(),
			max_queue_age_secs: self.max_queue_age_secs.unwrap_or(3600), // 1 hour
			processed_max_age_days: self.processed_max_age_days.unwrap_or(730), // 2 years
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StravaConfig {
	pub client_id: String,
	pub client_secret: String,
	pub token_url: String,
	pub api_url: String,
	pub callback_url: String,
	pub verify_token: String,
	pub max_queue_age_secs: u64,
	pub processed_max_age_days: u32,
}

impl Default for StravaConfig {
	fn default() -> Self {
		StravaConfigLayer::default().finalize()
	}
}
