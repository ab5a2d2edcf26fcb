// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use cadence_core::{ActivityStore, AppStateStore};
use cadence_jobs::{Job, JobError, JobReport};

use crate::jobs::STATS_KEY;

/// Remove old processed activities and accumulate the expired counter.
///
/// The deletion is a single bulk operation; its count is added to
/// `activities.expired` in the stats document via a partial merge, so
/// sibling counters are preserved and the value only ever grows.
/// Deletion and the counter merge are two store calls: a crash between
/// them loses that run's delta. Within a run, any failure aborts the job
/// with no partial counter update.
pub struct ActivityCleanupJob<A, S> {
	activities: Arc<A>,
	app_state: Arc<S>,
	max_age_days: u32,
}

impl<A, S> ActivityCleanupJob<A, S> {
	pub fn new(activities: Arc<A>, app_state: Arc<S>, max_age_days: u32) -> Self {
		Self {
			activities,
			app_state,
			max_age_days,
		}
	}
}

#[async_trait]
impl<A: ActivityStore + 'static, S: AppStateStore + 'static> Job for ActivityCleanupJob<A, S> {
	fn id(&self) -> &str {
		"strava-activity-cleanup"
	}

	fn name(&self) -> &str {
		"Activity Cleanup"
	}

	fn description(&self) -> &str {
		"Delete aged processed activities and accumulate the expired counter"
	}

	#[instrument(skip(self), fields(job_id = "strava-activity-cleanup", max_age_days = self.max_age_days))]
	async fn run(&self) -> Result<JobReport, JobError> {
		let removed = self
			.activities
			.delete_aged(None, self.max_age_days)
			.await
			.map_err(JobError::bulk)?;

		let stats = self.app_state.get(STATS_KEY).await.map_err(JobError::bulk)?;
		let prior = stats
			.as_ref()
			.and_then(|doc| doc.pointer("/activities/expired"))
			.and_then(|value| value.as_u64())
			.unwrap_or(0);
		let expired_total = prior + removed;

		self.app_state
			.merge(
				STATS_KEY,
				&serde_json::json!({"activities": {"expired": expired_total}}),
			)
			.await
			.map_err(JobError::bulk)?;

		if removed == 0 {
			tracing::info!(expired_total, "Removed no processed activities");
		} else {
			tracing::info!(removed, expired_total, "Removed processed activities");
		}

		Ok(JobReport::with_counts(
			self.id(),
			removed as usize,
			removed as usize,
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::jobs::testing::{MockActivityStore, MockAppState};
	use serde_json::json;

	#[tokio::test]
	async fn test_accumulates_onto_prior_value() {
		let activities = Arc::new(MockActivityStore {
			delete_count: 7,
			..Default::default()
		});
		let app_state = Arc::new(MockAppState::with_document(
			STATS_KEY,
			json!({"activities": {"expired": 10}}),
		));
		let job = ActivityCleanupJob::new(activities, Arc::clone(&app_state), 730);

		let report = job.run().await.unwrap();
		assert_eq!(report.items_considered, 7);
		assert_eq!(
			app_state.document(STATS_KEY).unwrap(),
			json!({"activities": {"expired": 17}})
		);
	}

	#[tokio::test]
	async fn test_missing_prior_value_treated_as_zero() {
		let activities = Arc::new(MockActivityStore {
			delete_count: 5,
			..Default::default()
		});
		let app_state = Arc::new(MockAppState::new());
		let job = ActivityCleanupJob::new(activities, Arc::clone(&app_state), 730);

		job.run().await.unwrap();
		assert_eq!(
			app_state.document(STATS_KEY).unwrap(),
			json!({"activities": {"expired": 5}})
		);
	}

	#[tokio::test]
	async fn test_two_runs_accumulate_monotonically() {
		let app_state = Arc::new(MockAppState::with_document(
			STATS_KEY,
			json!({"activities": {"expired": 3}}),
		));

		let first = ActivityCleanupJob::new(
			Arc::new(MockActivityStore {
				delete_count: 4,
				..Default::default()
			}),
			Arc::clone(&app_state),
			730,
		);
		first.run().await.unwrap();

		let second = ActivityCleanupJob::new(
			Arc::new(MockActivityStore {
				delete_count: 6,
				..Default::default()
			}),
			Arc::clone(&app_state),
			730,
		);
		second.run().await.unwrap();

		assert_eq!(
			app_state.document(STATS_KEY).unwrap(),
			json!({"activities": {"expired": 13}})
		);
	}

	#[tokio::test]
	async fn test_merge_preserves_sibling_counters() {
		let activities = Arc::new(MockActivityStore {
			delete_count: 2,
			..Default::default()
		});
		let app_state = Arc::new(MockAppState::with_document(
			STATS_KEY,
			json!({"activities": {"total": 100, "with_linkback": 40, "expired": 1}}),
		));
		let job = ActivityCleanupJob::new(activities, Arc::clone(&app_state), 730);

		job.run().await.unwrap();
		assert_eq!(
			app_state.document(STATS_KEY).unwrap(),
			json!({"activities": {"total": 100, "with_linkback": 40, "expired": 3}})
		);
	}

	#[tokio::test]
	async fn test_delete_failure_aborts_without_counter_update() {
		let activities = Arc::new(MockActivityStore {
			fail_delete: true,
			..Default::default()
		});
		let app_state = Arc::new(MockAppState::with_document(
			STATS_KEY,
			json!({"activities": {"expired": 10}}),
		));
		let job = ActivityCleanupJob::new(activities, Arc::clone(&app_state), 730);

		let result = job.run().await;
		assert!(matches!(result, Err(JobError::Bulk(_))));
		assert_eq!(
			app_state.document(STATS_KEY).unwrap(),
			json!({"activities": {"expired": 10}})
		);
	}

	#[tokio::test]
	async fn test_merge_failure_fails_the_job() {
		let activities = Arc::new(MockActivityStore {
			delete_count: 2,
			..Default::default()
		});
		let app_state = Arc::new(MockAppState::failing_merges());
		let job = ActivityCleanupJob::new(activities, app_state, 730);

		let result = job.run().await;
		assert!(matches!(result, Err(JobError::Bulk(_))));
	}
}
