// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Failure-isolating batch execution.
//!
//! [`run_batch`] applies one fallible operation across a working set of
//! independent entities. A failure on one entity is caught, logged with
//! the entity's identity, and recorded in the outcome; the remaining
//! entities are always processed. The runner itself never errors —
//! fetching the working set happens at the job level, before the runner
//! is invoked.

use std::fmt::Display;
use std::future::Future;

use cadence_core::{QueuedActivity, UserTokenRecord};

/// Log identity for an entity processed in a batch.
pub trait BatchItem {
	fn identity(&self) -> String;
}

impl BatchItem for UserTokenRecord {
	fn identity(&self) -> String {
		format!("{} {}", self.user_id, self.display_name)
	}
}

impl BatchItem for QueuedActivity {
	fn identity(&self) -> String {
		self.id.clone()
	}
}

/// A single entity's failure inside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
	pub item: String,
	pub error: String,
}

/// Aggregated result of one batch run.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
	/// Number of items submitted.
	pub total: usize,
	/// Number of non-failing operations.
	pub succeeded: usize,
	/// Failures in processing order, one entry per failing item.
	pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
	pub fn failed(&self) -> usize {
		self.failures.len()
	}
}

/// Run `op` once per item, sequentially, isolating failures per item.
///
/// The operation takes ownership of the item; callers that need a
/// reference inside the future move the item into an `async move` block.
/// Side effects are entirely the operation's — the runner only counts.
pub async fn run_batch<T, E, F, Fut>(items: Vec<T>, mut op: F) -> BatchOutcome
where
	T: BatchItem,
	E: Display,
	F: FnMut(T) -> Fut,
	Fut: Future<Output = std::result::Result<(), E>>,
{
	let total = items.len();
	let mut succeeded = 0;
	let mut failures = Vec::new();

	for item in items {
		let identity = item.identity();
		match op(item).await {
			Ok(()) => succeeded += 1,
			Err(e) => {
				tracing::warn!(item = %identity, error = %e, "Batch operation failed");
				failures.push(BatchFailure {
					item: identity,
					error: e.to_string(),
				});
			}
		}
	}

	BatchOutcome {
		total,
		succeeded,
		failures,
	}
}


#[cfg(test)]
mod proptests {
	use super::*;
	use proptest::prelude::*;
	use std::cell::RefCell;
	use std::collections::HashMap;

	struct Item(u32);

	impl BatchItem for Item {
		fn identity(&self) -> String {
			format!("item-{}", self.0)
		}
	}

	// Aggregation invariant: for any failure subset F of N items,
	// total == N, succeeded == N - |F|, every failing item appears exactly
	// once in the failure list, and every item is invoked exactly once.
	proptest! {
		#[test]
		fn prop_batch_aggregation(fail_flags in proptest::collection::vec(proptest::bool::ANY, 0..64)) {
			let runtime = tokio::runtime::Builder::new_current_thread()
				.build()
				.unwrap();
			let (outcome, invocation_counts) = runtime.block_on(async {
				let n = fail_flags.len();
				let items: Vec<Item> = (0..n as u32).map(Item).collect();
				let invocations = RefCell::new(HashMap::new());
				let flags = fail_flags.clone();
				let outcome = run_batch(items, |item: Item| {
					*invocations.borrow_mut().entry(item.0).or_insert(0u32) += 1;
					let fail = flags[item.0 as usize];
					async move { if fail { Err("boom") } else { Ok(()) } }
				})
				.await;
				(outcome, invocations.into_inner())
			});

			let n = fail_flags.len();
			let expected_items: Vec<String> = fail_flags
				.iter()
				.enumerate()
				.filter(|(_, fail)| **fail)
				.map(|(i, _)| format!("item-{i}"))
				.collect();

			prop_assert_eq!(outcome.total, n);
			prop_assert_eq!(outcome.succeeded, n - expected_items.len());
			let failed_items: Vec<String> =
				outcome.failures.iter().map(|f| f.item.clone()).collect();
			prop_assert_eq!(failed_items, expected_items);
			prop_assert_eq!(invocation_counts.len(), n);
			for count in invocation_counts.values() {
				prop_assert_eq!(*count, 1);
			}
		}
	}
}
