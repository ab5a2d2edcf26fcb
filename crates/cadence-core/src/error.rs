// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Errors surfaced by the persistence collaborators.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("Backend error: {0}")]
	Backend(String),
}

/// Errors surfaced by the Strava API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
	#[error("HTTP error: {0}")]
	Http(String),

	#[error("Token refresh rejected: {0}")]
	RefreshRejected(String),

	#[error("Unexpected response ({status}): {body}")]
	Api { status: u16, body: String },

	#[error("Serialization error: {0}")]
	Serde(String),

	#[error("Persisting tokens failed: {0}")]
	Store(String),
}
