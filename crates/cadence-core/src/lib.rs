// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Domain types and collaborator contracts for Cadence.
//!
//! This crate defines the narrow interfaces the maintenance jobs consume:
//! persistence stores ([`UserStore`], [`QueueStore`], [`ActivityStore`],
//! [`AppStateStore`]) and the Strava API client ([`TokenClient`],
//! [`WebhookClient`]). It contains no logic beyond the type definitions;
//! implementations live in `cadence-db` and `cadence-strava`.

pub mod clients;
pub mod error;
pub mod stores;
pub mod types;

pub use clients::{TokenClient, WebhookClient};
pub use error::{ClientError, StoreError};
pub use stores::{ActivityStore, AppStateStore, QueueStore, UserStore};
pub use types::{ActivityFilter, ActivityStats, OAuthTokens, QueuedActivity, UserTokenRecord, Webhook};
