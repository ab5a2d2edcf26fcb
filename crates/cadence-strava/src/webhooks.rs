// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Webhook push-subscription management.
//!
//! Strava allows a single push subscription per application, so the
//! query returns at most one entry and creation is only attempted when
//! none exists.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use cadence_core::{ClientError, UserStore, Webhook, WebhookClient};

use crate::client::StravaClient;

/// A push subscription as returned by the Strava API.
#[derive(Debug, Deserialize)]
pub(crate) struct PushSubscription {
	pub id: i64,
	pub callback_url: String,
}

impl PushSubscription {
	fn into_webhook(self) -> Webhook {
		Webhook {
			id: self.id.to_string(),
			callback_url: self.callback_url,
		}
	}
}

/// Subscription creation request body.
#[derive(Debug, Serialize)]
struct CreateSubscriptionRequest {
	client_id: String,
	client_secret: String,
	callback_url: String,
	verify_token: String,
}

#[async_trait]
impl<U: UserStore + 'static> WebhookClient for StravaClient<U> {
	async fn get_webhook(&self) -> Result<Option<Webhook>, ClientError> {
		let url = format!("{}/push_subscriptions", self.config().api_url);

		debug!("Querying webhook subscriptions");

		let response = self
			.http()
			.get(&url)
			.query(&[
				("client_id", self.config().client_id.as_str()),
				("client_secret", self.config().client_secret.as_str()),
			])
			.send()
			.await
			.map_err(|e| ClientError::Http(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			error!(status = %status, body = %body, "Webhook query failed");
			return Err(ClientError::Api {
				status: status.as_u16(),
				body,
			});
		}

		let subscriptions: Vec<PushSubscription> = response
			.json()
			.await
			.map_err(|e| ClientError::Serde(e.to_string()))?;

		Ok(subscriptions.into_iter().next().map(PushSubscription::into_webhook))
	}

	async fn create_webhook(&self) -> Result<Webhook, ClientError> {
		let url = format!("{}/push_subscriptions", self.config().api_url);

		let request = CreateSubscriptionRequest {
			client_id: self.config().client_id.clone(),
			client_secret: self.config().client_secret.clone(),
			callback_url: self.config().callback_url.clone(),
			verify_token: self.config().verify_token.clone(),
		};

		let response = self
			.http()
			.post(&url)
			.form(&request)
			.send()
			.await
			.map_err(|e| ClientError::Http(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			error!(status = %status, body = %body, "Webhook creation failed");
			return Err(ClientError::Api {
				status: status.as_u16(),
				body,
			});
		}

		let subscription: PushSubscription = response
			.json()
			.await
			.map_err(|e| ClientError::Serde(e.to_string()))?;
		let webhook = subscription.into_webhook();

		info!(webhook_id = %webhook.id, callback_url = %webhook.callback_url, "Webhook created");
		Ok(webhook)
	}
}
