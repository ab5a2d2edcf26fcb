// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OAuth token refresh against the Strava token endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use cadence_core::{ClientError, OAuthTokens, TokenClient, UserStore, UserTokenRecord};

use crate::config::StravaApiConfig;

/// Strava API client.
///
/// Generic over the user store it persists rotated tokens into, so the
/// persistence backend stays swappable in tests.
pub struct StravaClient<U> {
	config: StravaApiConfig,
	http: reqwest::Client,
	users: Arc<U>,
}

impl<U> StravaClient<U> {
	pub fn new(config: StravaApiConfig, http: reqwest::Client, users: Arc<U>) -> Self {
		Self {
			config,
			http,
			users,
		}
	}

	pub(crate) fn config(&self) -> &StravaApiConfig {
		&self.config
	}

	pub(crate) fn http(&self) -> &reqwest::Client {
		&self.http
	}
}

/// Token refresh request body.
#[derive(Debug, Serialize)]
struct TokenRefreshRequest {
	client_id: String,
	client_secret: String,
	grant_type: String,
	refresh_token: String,
}

/// Successful token response from Strava. `expires_at` is epoch seconds.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
	pub access_token: String,
	pub refresh_token: String,
	pub expires_at: i64,
}

/// Error response from the token endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
	pub message: String,
}

impl TokenResponse {
	pub(crate) fn into_tokens(self) -> Result<OAuthTokens, ClientError> {
		let expires_at = DateTime::from_timestamp(self.expires_at, 0)
			.ok_or_else(|| ClientError::Serde(format!("invalid expires_at {}", self.expires_at)))?;
		Ok(OAuthTokens {
			access_token: self.access_token,
			refresh_token: self.refresh_token,
			expires_at,
		})
	}
}

#[async_trait]
impl<U: UserStore + 'static> TokenClient for StravaClient<U> {
	async fn refresh_tokens(&self, user: &UserTokenRecord) -> Result<(), ClientError> {
		let request = TokenRefreshRequest {
			client_id: self.config.client_id.clone(),
			client_secret: self.config.client_secret.clone(),
			grant_type: "refresh_token".to_string(),
			refresh_token: user.tokens.refresh_token.clone(),
		};

		debug!(user_id = %user.user_id, "Refreshing access token");

		let response = self
			.http
			.post(&self.config.token_url)
			.form(&request)
			.send()
			.await
			.map_err(|e| ClientError::Http(e.to_string()))?;

		let status = response.status();

		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			let message = serde_json::from_str::<ApiErrorResponse>(&body)
				.map(|e| e.message)
				.unwrap_or(body);
			error!(user_id = %user.user_id, status = %status, error = %message, "Token refresh failed");
			return Err(ClientError::RefreshRejected(message));
		}

		let token_response: TokenResponse = response
			.json()
			.await
			.map_err(|e| ClientError::Serde(e.to_string()))?;
		let tokens = token_response.into_tokens()?;

		self.users
			.update_tokens(&user.user_id, &tokens)
			.await
			.map_err(|e| ClientError::Store(e.to_string()))?;

		info!(user_id = %user.user_id, "Access token refreshed");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_token_response_parses() {
		let response: TokenResponse = serde_json::from_str(
			r#"{
				"token_type": "Bearer",
				"access_token": "at_new",
				"expires_at": 1704070800,
				"expires_in": 21600,
				"refresh_token": "rt_new"
			}"#,
		)
		.unwrap();
		assert_eq!(response.access_token, "at_new");
		assert_eq!(response.refresh_token, "rt_new");
		assert_eq!(response.expires_at, 1704070800);
	}

	#[test]
	fn test_into_tokens_converts_epoch() {
		let response = TokenResponse {
			access_token: "at".to_string(),
			refresh_token: "rt".to_string(),
			expires_at: 1704070800,
		};
		let tokens = response.into_tokens().unwrap();
		assert_eq!(tokens.expires_at.timestamp(), 1704070800);
	}

	#[test]
	fn test_error_response_parses_message() {
		let response: ApiErrorResponse = serde_json::from_str(
			r#"{"message": "Bad Request", "errors": [{"resource": "RefreshToken", "field": "refresh_token", "code": "invalid"}]}"#,
		)
		.unwrap();
		assert_eq!(response.message, "Bad Request");
	}

	#[test]
	fn test_into_tokens_rejects_out_of_range_epoch() {
		let response = TokenResponse {
			access_token: "at".to_string(),
			refresh_token: "rt".to_string(),
			expires_at: i64::MAX,
		};
		assert!(matches!(
			response.into_tokens(),
			Err(ClientError::Serde(_))
		));
	}
}
