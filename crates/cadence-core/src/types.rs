// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OAuth tokens for a connected Strava account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthTokens {
	pub access_token: String,
	pub refresh_token: String,
	pub expires_at: DateTime<Utc>,
}

impl OAuthTokens {
	/// Check if the access token is expired (with 60 second buffer).
	pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
		self.expires_at < now + chrono::Duration::seconds(60)
	}
}

/// A user record with their Strava OAuth tokens.
///
/// Owned by the persistence layer. The orchestrator only reads these and
/// triggers refresh through [`crate::TokenClient`]; rotated tokens are
/// written back by the client, never by a job directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTokenRecord {
	pub user_id: String,
	pub display_name: String,
	pub tokens: OAuthTokens,
}

/// An active webhook push subscription on Strava.
///
/// A singleton resource: at most one active subscription should exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webhook {
	pub id: String,
	pub callback_url: String,
}

/// An activity waiting in the processing queue.
///
/// Created by the upstream ingestion pipeline; deleted by the queue
/// cleanup job once older than the configured age threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedActivity {
	pub id: String,
	pub user_id: String,
	pub enqueued_at: DateTime<Utc>,
}

/// Filter for activity counting and bulk deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityFilter {
	WithLinkback,
}

/// Cumulative activity counters stored under the `activities` key of the
/// app-state stats document.
///
/// `total` and `with_linkback` are absolute values recomputed by the
/// counting job on every run; `expired` accumulates deletion counts and
/// never resets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityStats {
	#[serde(default)]
	pub total: u64,
	#[serde(default)]
	pub with_linkback: u64,
	#[serde(default)]
	pub expired: u64,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens_expiring_at(expires_at: DateTime<Utc>) -> OAuthTokens {
		OAuthTokens {
			access_token: "at_test".to_string(),
			refresh_token: "rt_test".to_string(),
			expires_at,
		}
	}

	#[test]
	fn test_is_expired_past_expiry() {
		let now = Utc::now();
		let tokens = tokens_expiring_at(now - chrono::Duration::hours(1));
		assert!(tokens.is_expired(now));
	}

	#[test]
	fn test_is_expired_within_buffer() {
		let now = Utc::now();
		let tokens = tokens_expiring_at(now + chrono::Duration::seconds(30));
		assert!(tokens.is_expired(now));
	}

	#[test]
	fn test_is_expired_future_expiry() {
		let now = Utc::now();
		let tokens = tokens_expiring_at(now + chrono::Duration::hours(6));
		assert!(!tokens.is_expired(now));
	}

	#[test]
	fn test_activity_stats_defaults_missing_fields() {
		let stats: ActivityStats = serde_json::from_value(serde_json::json!({
			"expired": 5,
		}))
		.unwrap();
		assert_eq!(stats.expired, 5);
		assert_eq!(stats.total, 0);
		assert_eq!(stats.with_linkback, 0);
	}

	#[test]
	fn test_activity_stats_roundtrip() {
		let stats = ActivityStats {
			total: 100,
			with_linkback: 40,
			expired: 12,
		};
		let value = serde_json::to_value(&stats).unwrap();
		let parsed: ActivityStats = serde_json::from_value(value).unwrap();
		assert_eq!(parsed, stats);
	}
}
