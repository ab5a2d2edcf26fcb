// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::error::JobError;
use crate::report::JobReport;

/// A single independently schedulable maintenance operation.
///
/// Jobs are stateless single-shot invocations: no retries, no
/// cancellation, no cross-invocation state beyond externally persisted
/// counters. A returned [`JobError`] aborts this invocation only — the
/// registry converts it into a failed report, and the next scheduled run
/// retries naturally.
#[async_trait]
pub trait Job: Send + Sync {
	/// Stable identifier the external scheduler triggers by.
	fn id(&self) -> &str;

	/// Human-readable name.
	fn name(&self) -> &str;

	/// One-line description.
	fn description(&self) -> &str;

	/// Execute one invocation.
	async fn run(&self) -> Result<JobReport, JobError>;
}
