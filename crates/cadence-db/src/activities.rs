// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use cadence_core::{ActivityFilter, ActivityStore, StoreError};

use crate::error::Result;

#[derive(Clone)]
pub struct ActivityRepository {
	pool: SqlitePool,
}

impl ActivityRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Bulk-delete activities processed more than `max_age_days` ago,
	/// returning the number of rows removed.
	#[tracing::instrument(skip(self))]
	pub async fn delete_aged(
		&self,
		filter: Option<ActivityFilter>,
		max_age_days: u32,
	) -> Result<u64> {
		let cutoff = Utc::now() - chrono::Duration::days(max_age_days as i64);

		let query = match filter {
			None => "DELETE FROM activities WHERE processed_at < ?",
			Some(ActivityFilter::WithLinkback) => {
				"DELETE FROM activities WHERE processed_at < ? AND linkback = 1"
			}
		};

		let result = sqlx::query(query).bind(cutoff).execute(&self.pool).await?;

		Ok(result.rows_affected())
	}

	/// Count activities matching `filter` (all activities when `None`).
	#[tracing::instrument(skip(self))]
	pub async fn count(&self, filter: Option<ActivityFilter>) -> Result<u64> {
		let query = match filter {
			None => "SELECT COUNT(*) FROM activities",
			Some(ActivityFilter::WithLinkback) => {
				"SELECT COUNT(*) FROM activities WHERE linkback = 1"
			}
		};

		let row = sqlx::query_as::<_, (i64,)>(query).fetch_one(&self.pool).await?;

		Ok(row.0 as u64)
	}
}

#[async_trait]
impl ActivityStore for ActivityRepository {
	async fn delete_aged(
		&self,
		filter: Option<ActivityFilter>,
		max_age_days: u32,
	) -> std::result::Result<u64, StoreError> {
		Ok(self.delete_aged(filter, max_age_days).await?)
	}

	async fn count(&self, filter: Option<ActivityFilter>) -> std::result::Result<u64, StoreError> {
		Ok(self.count(filter).await?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{DateTime, Utc};
	use crate::testing::create_test_pool;

	async fn insert_activity(
		pool: &SqlitePool,
		id: &str,
		linkback: bool,
		processed_at: DateTime<Utc>,
	) {
		sqlx::query(
			"INSERT INTO activities (id, user_id, linkback, processed_at) VALUES (?, ?, ?, ?)",
		)
		.bind(id)
		.bind("u1")
		.bind(linkback)
		.bind(processed_at)
		.execute(pool)
		.await
		.unwrap();
	}

	#[tokio::test]
	async fn test_delete_aged_removes_only_old_rows() {
		let pool = create_test_pool().await;
		let repo = ActivityRepository::new(pool.clone());

		insert_activity(&pool, "old-1", false, Utc::now() - chrono::Duration::days(40)).await;
		insert_activity(&pool, "old-2", true, Utc::now() - chrono::Duration::days(31)).await;
		insert_activity(&pool, "recent", true, Utc::now() - chrono::Duration::days(5)).await;

		let removed = repo.delete_aged(None, 30).await.unwrap();
		assert_eq!(removed, 2);
		assert_eq!(repo.count(None).await.unwrap(), 1);
	}

	#[tokio::test]
	async fn test_delete_aged_nothing_to_remove() {
		let pool = create_test_pool().await;
		let repo = ActivityRepository::new(pool.clone());

		insert_activity(&pool, "recent", false, Utc::now() - chrono::Duration::days(1)).await;

		let removed = repo.delete_aged(None, 30).await.unwrap();
		assert_eq!(removed, 0);
	}

	#[tokio::test]
	async fn test_count_with_linkback_filter() {
		let pool = create_test_pool().await;
		let repo = ActivityRepository::new(pool.clone());

		insert_activity(&pool, "a1", true, Utc::now()).await;
		insert_activity(&pool, "a2", false, Utc::now()).await;
		insert_activity(&pool, "a3", true, Utc::now()).await;

		assert_eq!(repo.count(None).await.unwrap(), 3);
		assert_eq!(
			repo.count(Some(ActivityFilter::WithLinkback)).await.unwrap(),
			2
		);
	}
}
