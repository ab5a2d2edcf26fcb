// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Job orchestration for Cadence maintenance tasks.
//!
//! This crate provides the failure-isolating batch executor, the [`Job`]
//! contract every maintenance task implements, and the [`JobRegistry`]
//! through which an external scheduler triggers jobs by id. Individual
//! item failures inside a batch never abort the batch and never fail the
//! invocation; job-level failures are caught at the registry boundary and
//! converted into a logged [`JobReport`] rather than propagated.

pub mod batch;
pub mod error;
pub mod job;
pub mod registry;
pub mod report;

pub use batch::{run_batch, BatchFailure, BatchItem, BatchOutcome};
pub use error::{JobError, Result};
pub use job::Job;
pub use registry::JobRegistry;
pub use report::{JobReport, JobStatus};
