// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use cadence_core::{TokenClient, UserStore};
use cadence_jobs::{run_batch, Job, JobError, JobReport};

/// Refresh expired Strava access tokens, one user at a time.
///
/// A user whose refresh fails keeps their expired tokens and is picked
/// up again by the next scheduled run; there is no in-invocation retry.
pub struct TokenRefreshJob<U, C> {
	users: Arc<U>,
	client: Arc<C>,
}

impl<U, C> TokenRefreshJob<U, C> {
	pub fn new(users: Arc<U>, client: Arc<C>) -> Self {
		Self { users, client }
	}
}

#[async_trait]
impl<U: UserStore + 'static, C: TokenClient + 'static> Job for TokenRefreshJob<U, C> {
	fn id(&self) -> &str {
		"strava-token-refresh"
	}

	fn name(&self) -> &str {
		"Token Refresh"
	}

	fn description(&self) -> &str {
		"Refresh expired Strava access tokens"
	}

	#[instrument(skip(self), fields(job_id = "strava-token-refresh"))]
	async fn run(&self) -> Result<JobReport, JobError> {
		let users = self.users.get_expired().await.map_err(JobError::fetch)?;

		let client = Arc::clone(&self.client);
		let outcome = run_batch(users, |user| {
			let client = Arc::clone(&client);
			async move { client.refresh_tokens(&user).await }
		})
		.await;

		tracing::info!(
			total = outcome.total,
			refreshed = outcome.succeeded,
			failed = outcome.failed(),
			"Token refresh completed"
		);

		Ok(JobReport::from_batch(self.id(), &outcome))
	}
}
