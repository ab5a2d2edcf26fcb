// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cadence maintenance jobs and registry wiring.

pub mod jobs;

use std::sync::Arc;

use sqlx::SqlitePool;

use cadence_config::Config;
use cadence_db::{ActivityRepository, AppStateRepository, QueueRepository, UserRepository};
use cadence_jobs::JobRegistry;
use cadence_strava::{StravaApiConfig, StravaClient};

use crate::jobs::{
	ActivityCleanupJob, ActivityCountJob, QueueCleanupJob, TokenRefreshJob, WebhookSetupJob,
};

/// Wire every maintenance job against the SQLite stores and the Strava
/// client, keyed by the ids the external scheduler triggers.
pub fn build_registry(config: &Config, pool: SqlitePool) -> JobRegistry {
	let users = Arc::new(UserRepository::new(pool.clone()));
	let queue = Arc::new(QueueRepository::new(pool.clone()));
	let activities = Arc::new(ActivityRepository::new(pool.clone()));
	let app_state = Arc::new(AppStateRepository::new(pool));

	let api_config = StravaApiConfig {
		client_id: config.strava.client_id.clone(),
		client_secret: config.strava.client_secret.clone(),
		token_url: config.strava.token_url.clone(),
		api_url: config.strava.api_url.clone(),
		callback_url: config.strava.callback_url.clone(),
		verify_token: config.strava.verify_token.clone(),
	};
	let strava = Arc::new(StravaClient::new(
		api_config,
		reqwest::Client::new(),
		Arc::clone(&users),
	));

	let mut registry = JobRegistry::new();
	registry.register(Arc::new(TokenRefreshJob::new(users, Arc::clone(&strava))));
	registry.register(Arc::new(WebhookSetupJob::new(strava)));
	registry.register(Arc::new(QueueCleanupJob::new(
		queue,
		config.strava.max_queue_age_secs,
	)));
	registry.register(Arc::new(ActivityCleanupJob::new(
		Arc::clone(&activities),
		Arc::clone(&app_state),
		config.strava.processed_max_age_days,
	)));
	registry.register(Arc::new(ActivityCountJob::new(activities, app_state)));

	registry
}
