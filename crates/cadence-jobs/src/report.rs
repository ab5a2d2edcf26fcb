// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::Serialize;

use crate::batch::BatchOutcome;
use crate::error::JobError;

/// Outcome of one job invocation.
///
/// A job that ran to completion is `Succeeded` even when some items
/// failed; item failures are visible in the counts and `errors`. `Failed`
/// means the invocation itself aborted (fetch or bulk failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
	Succeeded,
	Failed,
}

/// Uniform summary returned by every job invocation.
///
/// Created fresh per run, never persisted; consumed by the log/alerting
/// sink.
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
	pub job_id: String,
	pub status: JobStatus,
	pub items_considered: usize,
	pub items_succeeded: usize,
	pub items_failed: usize,
	pub errors: Vec<String>,
}

impl JobReport {
	/// Report for a job that completed without batch work.
	pub fn success(job_id: &str) -> Self {
		Self {
			job_id: job_id.to_string(),
			status: JobStatus::Succeeded,
			items_considered: 0,
			items_succeeded: 0,
			items_failed: 0,
			errors: Vec::new(),
		}
	}

	/// Report carrying explicit item counts.
	pub fn with_counts(job_id: &str, considered: usize, succeeded: usize) -> Self {
		Self {
			job_id: job_id.to_string(),
			status: JobStatus::Succeeded,
			items_considered: considered,
			items_succeeded: succeeded,
			items_failed: considered.saturating_sub(succeeded),
			errors: Vec::new(),
		}
	}

	/// Report aggregated from a batch outcome.
	pub fn from_batch(job_id: &str, outcome: &BatchOutcome) -> Self {
		Self {
			job_id: job_id.to_string(),
			status: JobStatus::Succeeded,
			items_considered: outcome.total,
			items_succeeded: outcome.succeeded,
			items_failed: outcome.failures.len(),
			errors: outcome
				.failures
				.iter()
				.map(|f| format!("{}: {}", f.item, f.error))
				.collect(),
		}
	}

	/// Report for an invocation that aborted with a job-level error.
	pub fn failed(job_id: &str, error: &JobError) -> Self {
		Self {
			job_id: job_id.to_string(),
			status: JobStatus::Failed,
			items_considered: 0,
			items_succeeded: 0,
			items_failed: 0,
			errors: vec![error.to_string()],
		}
	}
}
