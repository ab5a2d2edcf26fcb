// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use cadence_core::WebhookClient;
use cadence_jobs::{Job, JobError, JobReport};

/// Make sure the Strava webhook subscription is registered.
///
/// Idempotent: when a subscription already exists the job is a no-op.
/// A failed creation leaves the state absent, so the next scheduled run
/// retries it.
pub struct WebhookSetupJob<C> {
	client: Arc<C>,
}

impl<C> WebhookSetupJob<C> {
	pub fn new(client: Arc<C>) -> Self {
		Self { client }
	}
}

#[async_trait]
impl<C: WebhookClient + 'static> Job for WebhookSetupJob<C> {
	fn id(&self) -> &str {
		"strava-webhook-setup"
	}

	fn name(&self) -> &str {
		"Webhook Setup"
	}

	fn description(&self) -> &str {
		"Ensure the Strava webhook subscription is registered"
	}

	#[instrument(skip(self), fields(job_id = "strava-webhook-setup"))]
	async fn run(&self) -> Result<JobReport, JobError> {
		let current = self.client.get_webhook().await.map_err(JobError::fetch)?;

		match current {
			Some(webhook) => {
				tracing::info!(webhook_id = %webhook.id, "Webhook already registered");
			}
			None => {
				let webhook = self.client.create_webhook().await.map_err(JobError::bulk)?;
				tracing::info!(webhook_id = %webhook.id, "Webhook registered");
			}
		}

		Ok(JobReport::with_counts(self.id(), 1, 1))
	}
}
