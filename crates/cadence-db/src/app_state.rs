// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use cadence_core::{AppStateStore, StoreError};

use crate::error::Result;

/// Keyed JSON documents with partial-merge writes.
///
/// `merge` deep-merges the patch into the stored document inside one
/// transaction, so concurrent merges against the same key serialize at
/// the database and keys absent from a patch are always preserved. This
/// is the capability the counter-writing jobs rely on to mutate disjoint
/// sub-fields of the shared stats document.
#[derive(Clone)]
pub struct AppStateRepository {
	pool: SqlitePool,
}

impl AppStateRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self))]
	pub async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
		let row = sqlx::query_as::<_, (String,)>("SELECT value FROM app_state WHERE key = ?")
			.bind(key)
			.fetch_optional(&self.pool)
			.await?;

		row.map(|(value,)| Ok(serde_json::from_str(&value)?)).transpose()
	}

	#[tracing::instrument(skip(self, partial))]
	pub async fn merge(&self, key: &str, partial: &serde_json::Value) -> Result<()> {
		let mut tx = self.pool.begin().await?;

		let row = sqlx::query_as::<_, (String,)>("SELECT value FROM app_state WHERE key = ?")
			.bind(key)
			.fetch_optional(&mut *tx)
			.await?;

		let mut document = match row {
			Some((value,)) => serde_json::from_str(&value)?,
			None => serde_json::Value::Object(serde_json::Map::new()),
		};
		deep_merge(&mut document, partial);

		sqlx::query(
			r#"
			INSERT INTO app_state (key, value, updated_at)
			VALUES (?, ?, ?)
			ON CONFLICT(key) DO UPDATE SET
				value = excluded.value,
				updated_at = excluded.updated_at
			"#,
		)
		.bind(key)
		.bind(document.to_string())
		.bind(Utc::now())
		.execute(&mut *tx)
		.await?;

		tx.commit().await?;
		Ok(())
	}
}

/// Recursively merge `patch` into `base`. Objects merge key by key;
/// anything else replaces the existing value.
fn deep_merge(base: &mut serde_json::Value, patch: &serde_json::Value) {
	match (base, patch) {
		(serde_json::Value::Object(base_map), serde_json::Value::Object(patch_map)) => {
			for (key, value) in patch_map {
				match base_map.get_mut(key) {
					Some(slot) => deep_merge(slot, value),
					None => {
						base_map.insert(key.clone(), value.clone());
					}
				}
			}
		}
		(slot, value) => *slot = value.clone(),
	}
}

#[async_trait]
impl AppStateStore for AppStateRepository {
	async fn get(&self, key: &str) -> std::result::Result<Option<serde_json::Value>, StoreError> {
		Ok(self.get(key).await?)
	}

	async fn merge(
		&self,
		key: &str,
		partial: &serde_json::Value,
	) -> std::result::Result<(), StoreError> {
		Ok(self.merge(key, partial).await?)
	}
}
