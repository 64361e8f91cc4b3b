// ABOUTME: Main server binary for the randevu booking backend
// ABOUTME: Loads configuration, opens the database, and serves the REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

//! # Randevu Server Binary
//!
//! Starts the salon booking backend: multi-tenant salon, staff, and service
//! management with availability queries and race-safe booking creation.

use anyhow::Result;
use clap::Parser;
use randevu_server::{
    config::ServerConfig,
    database::SqliteDatabase,
    logging,
    server::{self, ServerResources},
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "randevu-server")]
#[command(about = "Randevu - salon appointment booking backend")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Randevu booking server");
    info!("{}", config.summary());

    let database = SqliteDatabase::new(&config.database_url).await?;
    info!("Database connected and migrated");

    let resources = Arc::new(ServerResources::new(Arc::new(database), config));

    server::serve(resources).await?;

    Ok(())
}
