// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The five Strava maintenance jobs.
//!
//! Each job is a single-shot, externally triggered invocation built from
//! the collaborator traits in `cadence-core`: fetch a working set, run
//! the failure-isolating batch executor where per-item work is involved,
//! and perform at most one app-state merge after all item work completes.

pub mod activity_cleanup;
pub mod activity_count;
pub mod queue_cleanup;
pub mod token_refresh;
pub mod webhook_setup;

pub use activity_cleanup::ActivityCleanupJob;
pub use activity_count::ActivityCountJob;
pub use queue_cleanup::QueueCleanupJob;
pub use token_refresh::TokenRefreshJob;
pub use webhook_setup::WebhookSetupJob;

/// App-state key of the shared stats document.
pub(crate) const STATS_KEY: &str = "stats";

#[cfg(test)]
pub(crate) mod testing;
