// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use cadence_core::{OAuthTokens, StoreError, UserStore, UserTokenRecord};

use crate::error::{DbError, Result};

/// Tokens expiring within this window count as expired, so a refresh
/// lands before the access token actually lapses.
const EXPIRY_LOOKAHEAD_SECS: i64 = 600;

#[derive(Clone)]
pub struct UserRepository {
	pool: SqlitePool,
}

impl UserRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_expired(&self) -> Result<Vec<UserTokenRecord>> {
		let cutoff = Utc::now() + chrono::Duration::seconds(EXPIRY_LOOKAHEAD_SECS);

		let rows = sqlx::query_as::<_, (String, String, String, String, DateTime<Utc>)>(
			r#"
			SELECT id, display_name, access_token, refresh_token, token_expires_at
			FROM users
			WHERE token_expires_at <= ?
			ORDER BY token_expires_at
			"#,
		)
		.bind(cutoff)
		.fetch_all(&self.pool)
		.await?;

		Ok(rows
			.into_iter()
			.map(
				|(user_id, display_name, access_token, refresh_token, expires_at)| UserTokenRecord {
					user_id,
					display_name,
					tokens: OAuthTokens {
						access_token,
						refresh_token,
						expires_at,
					},
				},
			)
			.collect())
	}

	#[tracing::instrument(skip(self, tokens))]
	pub async fn update_tokens(&self, user_id: &str, tokens: &OAuthTokens) -> Result<()> {
		let result = sqlx::query(
			r#"
			UPDATE users
			SET access_token = ?,
			    refresh_token = ?,
			    token_expires_at = ?,
			    updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&tokens.access_token)
		.bind(&tokens.refresh_token)
		.bind(tokens.expires_at)
		.bind(Utc::now())
		.bind(user_id)
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(user_id.to_string()));
		}

		Ok(())
	}
}

#[async_trait]
impl UserStore for UserRepository {
	async fn get_expired(&self) -> std::result::Result<Vec<UserTokenRecord>, StoreError> {
		Ok(self.get_expired().await?)
	}

	async fn update_tokens(
		&self,
		user_id: &str,
		tokens: &OAuthTokens,
	) -> std::result::Result<(), StoreError> {
		Ok(self.update_tokens(user_id, tokens).await?)
	}
}
