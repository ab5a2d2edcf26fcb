// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cadence maintenance job runner binary.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Cadence maintenance - runs Strava integration maintenance jobs.
#[derive(Parser, Debug)]
#[command(
	name = "cadence-maintenance",
	about = "Cadence maintenance job runner",
	version
)]
struct Args {
	/// Path to a config file (defaults to /etc/cadence/cadence.toml)
	#[arg(long)]
	config: Option<std::path::PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Run one maintenance job by id
	Run { job_id: String },
	/// List registered jobs
	List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	// Parse CLI arguments
	let args = Args::parse();

	// Load .env file if present
	dotenvy::dotenv().ok();

	// Load configuration
	let config = match &args.config {
		Some(path) => cadence_config::load_config_with_file(path)?,
		None => cadence_config::load_config()?,
	};

	// Setup tracing
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		database = %config.database.url,
		"starting cadence-maintenance"
	);

	// Create database pool and apply schema
	let pool = cadence_db::create_pool(&config.database.url).await?;
	cadence_db::run_migrations(&pool).await?;

	let registry = cadence_maintenance::build_registry(&config, pool);

	match args.command {
		Command::Run { job_id } => {
			let report = registry.trigger(&job_id).await?;
			println!("{}", serde_json::to_string_pretty(&report)?);
		}
		Command::List => {
			for job_id in registry.job_ids() {
				if let Some(job) = registry.get(&job_id) {
					println!("{:<28} {} - {}", job.id(), job.name(), job.description());
				}
			}
		}
	}

	Ok(())
}
