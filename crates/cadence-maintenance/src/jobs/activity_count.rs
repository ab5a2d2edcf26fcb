// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use cadence_core::{ActivityFilter, ActivityStore, AppStateStore};
use cadence_jobs::{Job, JobError, JobReport};

use crate::jobs::STATS_KEY;

/// Recompute usage counters for processed activities.
///
/// `total` and `with_linkback` are absolute values overwritten on every
/// run — unlike the expired counter, which accumulates at deletion time
/// in the cleanup job. The merge is partial, so `expired` is untouched.
pub struct ActivityCountJob<A, S> {
	activities: Arc<A>,
	app_state: Arc<S>,
}

impl<A, S> ActivityCountJob<A, S> {
	pub fn new(activities: Arc<A>, app_state: Arc<S>) -> Self {
		Self {
			activities,
			app_state,
		}
	}
}

#[async_trait]
impl<A: ActivityStore + 'static, S: AppStateStore + 'static> Job for ActivityCountJob<A, S> {
	fn id(&self) -> &str {
		"strava-activity-count"
	}

	fn name(&self) -> &str {
		"Activity Count"
	}

	fn description(&self) -> &str {
		"Recompute total and linkback activity counters"
	}

	#[instrument(skip(self), fields(job_id = "strava-activity-count"))]
	async fn run(&self) -> Result<JobReport, JobError> {
		let total = self.activities.count(None).await.map_err(JobError::bulk)?;
		let with_linkback = self
			.activities
			.count(Some(ActivityFilter::WithLinkback))
			.await
			.map_err(JobError::bulk)?;

		self.app_state
			.merge(
				STATS_KEY,
				&serde_json::json!({"activities": {"total": total, "with_linkback": with_linkback}}),
			)
			.await
			.map_err(JobError::bulk)?;

		tracing::info!(total, with_linkback, "Activity count completed");

		Ok(JobReport::with_counts(
			self.id(),
			total as usize,
			total as usize,
		))
	}
}
