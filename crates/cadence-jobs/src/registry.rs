// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::error::{JobError, Result};
use crate::job::Job;
use crate::report::JobReport;

/// Registered maintenance jobs, triggerable by id.
///
/// The registry is the job boundary: every [`JobError`] a job returns is
/// caught here, logged, and converted into a failed [`JobReport`].
/// "Success" to the external scheduler means the job ran — item-level
/// failures inside a batch never fail the invocation. The only error
/// `trigger` returns is an unknown job id.
pub struct JobRegistry {
	jobs: HashMap<String, Arc<dyn Job>>,
}

impl JobRegistry {
	pub fn new() -> Self {
		Self {
			jobs: HashMap::new(),
		}
	}

	pub fn register(&mut self, job: Arc<dyn Job>) {
		let id = job.id().to_string();
		self.jobs.insert(id, job);
	}

	pub fn job_ids(&self) -> Vec<String> {
		let mut ids: Vec<String> = self.jobs.keys().cloned().collect();
		ids.sort();
		ids
	}

	pub fn get(&self, job_id: &str) -> Option<&Arc<dyn Job>> {
		self.jobs.get(job_id)
	}

	#[instrument(skip(self))]
	pub async fn trigger(&self, job_id: &str) -> Result<JobReport> {
		let job = self
			.jobs
			.get(job_id)
			.ok_or_else(|| JobError::NotFound(job_id.to_string()))?;

		let run_id = uuid::Uuid::new_v4().to_string();
		info!(job_id = %job.id(), run_id = %run_id, "Job started");

		let report = match job.run().await {
			Ok(report) => report,
			Err(e) => {
				error!(job_id = %job.id(), run_id = %run_id, error = %e, "Job failed");
				JobReport::failed(job.id(), &e)
			}
		};

		info!(
			job_id = %report.job_id,
			run_id = %run_id,
			status = ?report.status,
			items_considered = report.items_considered,
			items_succeeded = report.items_succeeded,
			items_failed = report.items_failed,
			"Job completed"
		);

		Ok(report)
	}
}

impl Default for JobRegistry {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::report::JobStatus;
	use async_trait::async_trait;

	struct MockJob {
		id: String,
		outcome: std::result::Result<(), String>,
	}

	impl MockJob {
		fn succeeding(id: &str) -> Self {
			Self {
				id: id.to_string(),
				outcome: Ok(()),
			}
		}

		fn failing(id: &str, message: &str) -> Self {
			Self {
				id: id.to_string(),
				outcome: Err(message.to_string()),
			}
		}
	}

	#[async_trait]
	impl Job for MockJob {
		fn id(&self) -> &str {
			&self.id
		}

		fn name(&self) -> &str {
			"Mock Job"
		}

		fn description(&self) -> &str {
			"A mock job for testing"
		}

		async fn run(&self) -> Result<JobReport> {
			match &self.outcome {
				Ok(()) => Ok(JobReport::with_counts(&self.id, 3, 3)),
				Err(message) => Err(JobError::Fetch(message.clone())),
			}
		}
	}

	#[tokio::test]
	async fn test_trigger_runs_registered_job() {
		let mut registry = JobRegistry::new();
		registry.register(Arc::new(MockJob::succeeding("mock-job")));

		let report = registry.trigger("mock-job").await.unwrap();
		assert_eq!(report.status, JobStatus::Succeeded);
		assert_eq!(report.items_considered, 3);
	}

	#[tokio::test]
	async fn test_trigger_unknown_job_returns_not_found() {
		let registry = JobRegistry::new();
		let result = registry.trigger("nonexistent").await;
		match result.unwrap_err() {
			JobError::NotFound(id) => assert_eq!(id, "nonexistent"),
			e => panic!("Expected NotFound error, got: {e:?}"),
		}
	}

	#[tokio::test]
	async fn test_job_error_becomes_failed_report() {
		let mut registry = JobRegistry::new();
		registry.register(Arc::new(MockJob::failing("broken-job", "db down")));

		let report = registry.trigger("broken-job").await.unwrap();
		assert_eq!(report.status, JobStatus::Failed);
		assert_eq!(report.items_considered, 0);
		assert_eq!(
			report.errors,
			vec!["Fetching working set failed: db down".to_string()]
		);
	}

	#[tokio::test]
	async fn test_job_ids_sorted() {
		let mut registry = JobRegistry::new();
		registry.register(Arc::new(MockJob::succeeding("zeta")));
		registry.register(Arc::new(MockJob::succeeding("alpha")));

		assert_eq!(registry.job_ids(), vec!["alpha", "zeta"]);
	}

	#[tokio::test]
	async fn test_register_same_id_replaces() {
		let mut registry = JobRegistry::new();
		registry.register(Arc::new(MockJob::failing("job", "old")));
		registry.register(Arc::new(MockJob::succeeding("job")));

		let report = registry.trigger("job").await.unwrap();
		assert_eq!(report.status, JobStatus::Succeeded);
	}
}
