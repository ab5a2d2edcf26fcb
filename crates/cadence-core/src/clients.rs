// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Strava API contracts consumed by the maintenance jobs.

use async_trait::async_trait;

use crate::error::ClientError;
use crate::types::{UserTokenRecord, Webhook};

/// OAuth token exchange against the Strava token endpoint.
#[async_trait]
pub trait TokenClient: Send + Sync {
	/// Exchange the user's refresh token for a fresh access token and
	/// persist the rotated tokens. Fails on invalid or revoked tokens.
	async fn refresh_tokens(&self, user: &UserTokenRecord) -> Result<(), ClientError>;
}

/// Webhook push subscription management.
#[async_trait]
pub trait WebhookClient: Send + Sync {
	/// The currently registered webhook subscription, if any.
	async fn get_webhook(&self) -> Result<Option<Webhook>, ClientError>;

	/// Register a new webhook subscription.
	async fn create_webhook(&self) -> Result<Webhook, ClientError>;
}
