// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt::Display;

/// Job-level failures.
///
/// Item-level failures are not errors: they are captured inside
/// [`crate::BatchOutcome`] and never propagate. A `JobError` aborts the
/// current invocation only; all maintenance operations are safe to
/// re-attempt on the next scheduled run.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
	#[error("Job not found: {0}")]
	NotFound(String),

	#[error("Fetching working set failed: {0}")]
	Fetch(String),

	#[error("Bulk operation failed: {0}")]
	Bulk(String),
}

impl JobError {
	/// The initial listing/query for a job's working set failed.
	pub fn fetch(err: impl Display) -> Self {
		JobError::Fetch(err.to_string())
	}

	/// A bulk delete, count, or stats write failed.
	pub fn bulk(err: impl Display) -> Self {
		JobError::Bulk(err.to_string())
	}
}

pub type Result<T> = std::result::Result<T, JobError>;
