// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Strava API client for Cadence.
//!
//! Implements the `cadence-core` client contracts against the Strava
//! OAuth token endpoint and the webhook push-subscription API. Rotated
//! tokens are persisted through the injected user store, so callers see
//! token refresh as a single fallible operation.

pub mod client;
pub mod config;
pub mod webhooks;

pub use client::StravaClient;
pub use config::StravaApiConfig;
