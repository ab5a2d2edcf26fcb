// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use cadence_core::{QueueStore, QueuedActivity, StoreError};

use crate::error::Result;

#[derive(Clone)]
pub struct QueueRepository {
	pool: SqlitePool,
}

impl QueueRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Queued activities strictly older than `before`. An item enqueued
	/// exactly at the cutoff is kept until the next run.
	#[tracing::instrument(skip(self))]
	pub async fn get_queued_before(&self, before: DateTime<Utc>) -> Result<Vec<QueuedActivity>> {
		let rows = sqlx::query_as::<_, (String, String, DateTime<Utc>)>(
			r#"
			SELECT id, user_id, enqueued_at
			FROM queued_activities
			WHERE enqueued_at < ?
			ORDER BY enqueued_at
			"#,
		)
		.bind(before)
		.fetch_all(&self.pool)
		.await?;

		Ok(rows
			.into_iter()
			.map(|(id, user_id, enqueued_at)| QueuedActivity {
				id,
				user_id,
				enqueued_at,
			})
			.collect())
	}

	/// Delete one queued activity. Deleting an already-removed row is a
	/// no-op.
	#[tracing::instrument(skip(self, activity), fields(activity_id = %activity.id))]
	pub async fn delete_queued(&self, activity: &QueuedActivity) -> Result<()> {
		sqlx::query("DELETE FROM queued_activities WHERE id = ?")
			.bind(&activity.id)
			.execute(&self.pool)
			.await?;

		Ok(())
	}
}

#[async_trait]
impl QueueStore for QueueRepository {
	async fn get_queued_before(
		&self,
		before: DateTime<Utc>,
	) -> std::result::Result<Vec<QueuedActivity>, StoreError> {
		Ok(self.get_queued_before(before).await?)
	}

	async fn delete_queued(&self, activity: &QueuedActivity) -> std::result::Result<(), StoreError> {
		Ok(self.delete_queued(activity).await?)
	}
}
