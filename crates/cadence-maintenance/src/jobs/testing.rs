// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared mock stores for job tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use cadence_core::{ActivityFilter, ActivityStore, AppStateStore, StoreError};

/// In-memory app-state store honoring the deep-merge contract.
pub(crate) struct MockAppState {
	documents: Mutex<HashMap<String, serde_json::Value>>,
	fail_merges: bool,
}

impl MockAppState {
	pub fn new() -> Self {
		Self {
			documents: Mutex::new(HashMap::new()),
			fail_merges: false,
		}
	}

	pub fn with_document(key: &str, value: serde_json::Value) -> Self {
		let state = Self::new();
		state
			.documents
			.lock()
			.unwrap()
			.insert(key.to_string(), value);
		state
	}

	pub fn failing_merges() -> Self {
		Self {
			documents: Mutex::new(HashMap::new()),
			fail_merges: true,
		}
	}

	pub fn document(&self, key: &str) -> Option<serde_json::Value> {
		self.documents.lock().unwrap().get(key).cloned()
	}
}

#[async_trait]
impl AppStateStore for MockAppState {
	async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
		Ok(self.documents.lock().unwrap().get(key).cloned())
	}

	async fn merge(&self, key: &str, partial: &serde_json::Value) -> Result<(), StoreError> {
		if self.fail_merges {
			return Err(StoreError::Backend("merge failed".to_string()));
		}
		let mut documents = self.documents.lock().unwrap();
		let document = documents
			.entry(key.to_string())
			.or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
		merge_value(document, partial);
		Ok(())
	}
}

fn merge_value(base: &mut serde_json::Value, patch: &serde_json::Value) {
	match (base, patch) {
		(serde_json::Value::Object(base_map), serde_json::Value::Object(patch_map)) => {
			for (key, value) in patch_map {
				match base_map.get_mut(key) {
					Some(slot) => merge_value(slot, value),
					None => {
						base_map.insert(key.clone(), value.clone());
					}
				}
			}
		}
		(slot, value) => *slot = value.clone(),
	}
}

/// Activity store with canned counts and deletion results.
#[derive(Default)]
pub(crate) struct MockActivityStore {
	pub total: u64,
	pub with_linkback: u64,
	pub delete_count: u64,
	pub fail_delete: bool,
	pub fail_count: bool,
}

#[async_trait]
impl ActivityStore for MockActivityStore {
	async fn delete_aged(
		&self,
		_filter: Option<ActivityFilter>,
		_max_age_days: u32,
	) -> Result<u64, StoreError> {
		if self.fail_delete {
			return Err(StoreError::Backend("delete failed".to_string()));
		}
		Ok(self.delete_count)
	}

	async fn count(&self, filter: Option<ActivityFilter>) -> Result<u64, StoreError> {
		if self.fail_count {
			return Err(StoreError::Backend("count failed".to_string()));
		}
		Ok(match filter {
			None => self.total,
			Some(ActivityFilter::WithLinkback) => self.with_linkback,
		})
	}
}
