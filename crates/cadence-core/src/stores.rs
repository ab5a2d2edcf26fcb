// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Persistence contracts consumed by the maintenance jobs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::types::{ActivityFilter, OAuthTokens, QueuedActivity, UserTokenRecord};

/// Access to connected user accounts and their OAuth tokens.
#[async_trait]
pub trait UserStore: Send + Sync {
	/// Users whose access token is expired or about to expire.
	async fn get_expired(&self) -> Result<Vec<UserTokenRecord>, StoreError>;

	/// Persist rotated tokens for a user.
	async fn update_tokens(&self, user_id: &str, tokens: &OAuthTokens) -> Result<(), StoreError>;
}

/// Access to the activity processing queue.
#[async_trait]
pub trait QueueStore: Send + Sync {
	/// Queued activities strictly older than `before` (`enqueued_at < before`).
	/// An item enqueued exactly at the cutoff is not returned.
	async fn get_queued_before(&self, before: DateTime<Utc>)
		-> Result<Vec<QueuedActivity>, StoreError>;

	/// Delete a single queued activity. Deleting an already-removed item
	/// is a no-op.
	async fn delete_queued(&self, activity: &QueuedActivity) -> Result<(), StoreError>;
}

/// Bulk operations over processed activity records.
#[async_trait]
pub trait ActivityStore: Send + Sync {
	/// Delete activities processed more than `max_age_days` ago, returning
	/// the number of rows removed.
	async fn delete_aged(
		&self,
		filter: Option<ActivityFilter>,
		max_age_days: u32,
	) -> Result<u64, StoreError>;

	/// Count activities matching `filter` (all activities when `None`).
	async fn count(&self, filter: Option<ActivityFilter>) -> Result<u64, StoreError>;
}

/// Keyed application state documents with partial-merge write semantics.
#[async_trait]
pub trait AppStateStore: Send + Sync {
	/// Read the document stored under `key`.
	async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

	/// Merge `partial` into the document stored under `key`.
	///
	/// Implementations must deep-merge field by field, atomically per
	/// call: keys absent from `partial` are preserved, and concurrent
	/// merges against the same key serialize rather than clobber each
	/// other. A missing document is treated as an empty object.
	async fn merge(&self, key: &str, partial: &serde_json::Value) -> Result<(), StoreError>;
}
