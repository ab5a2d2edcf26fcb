// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::instrument;

use cadence_core::QueueStore;
use cadence_jobs::{run_batch, Job, JobError, JobReport};

/// Remove dangling activities from the processing queue.
///
/// Deletes queued activities strictly older than the configured age.
/// Items whose deletion fails stay in the queue for the next run.
pub struct QueueCleanupJob<Q> {
	queue: Arc<Q>,
	max_queue_age_secs: u64,
}

impl<Q> QueueCleanupJob<Q> {
	pub fn new(queue: Arc<Q>, max_queue_age_secs: u64) -> Self {
		Self {
			queue,
			max_queue_age_secs,
		}
	}
}

#[async_trait]
impl<Q: QueueStore + 'static> Job for QueueCleanupJob<Q> {
	fn id(&self) -> &str {
		"strava-queue-cleanup"
	}

	fn name(&self) -> &str {
		"Queue Cleanup"
	}

	fn description(&self) -> &str {
		"Remove stale activities from the processing queue"
	}

	#[instrument(skip(self), fields(job_id = "strava-queue-cleanup", max_queue_age_secs = self.max_queue_age_secs))]
	async fn run(&self) -> Result<JobReport, JobError> {
		let cutoff = Utc::now() - chrono::Duration::seconds(self.max_queue_age_secs as i64);

		let stale = self
			.queue
			.get_queued_before(cutoff)
			.await
			.map_err(JobError::fetch)?;

		if stale.is_empty() {
			tracing::info!("Removed no queued activities");
			return Ok(JobReport::success(self.id()));
		}

		let queue = Arc::clone(&self.queue);
		let outcome = run_batch(stale, |activity| {
			let queue = Arc::clone(&queue);
			async move { queue.delete_queued(&activity).await }
		})
		.await;

		tracing::info!(
			removed = outcome.succeeded,
			failed = outcome.failed(),
			"Queue cleanup completed"
		);

		Ok(JobReport::from_batch(self.id(), &outcome))
	}
}
