// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Connection settings for the Strava API.
#[derive(Debug, Clone)]
pub struct StravaApiConfig {
	pub client_id: String,
	pub client_secret: String,
	/// Token endpoint for refresh exchanges.
	pub token_url: String,
	/// Base URL for the REST API (push subscriptions live under it).
	pub api_url: String,
	/// Callback URL registered when creating a webhook subscription.
	pub callback_url: String,
	/// Verification token Strava echoes back on webhook validation.
	pub verify_token: String,
}
