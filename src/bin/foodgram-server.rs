// ABOUTME: Server binary for the Foodgram recipe sharing API
// ABOUTME: Loads configuration, initializes logging and the database, serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

//! # Foodgram API Server Binary
//!
//! Starts the REST API with environment-driven configuration.

use anyhow::Result;
use clap::Parser;
use foodgram_api::{
    auth::{generate_jwt_secret, AuthManager},
    config::environment::ServerConfig,
    database::Database,
    logging,
    resources::ServerResources,
    routes,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "foodgram-server")]
#[command(about = "Foodgram - recipe sharing REST API")]
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

    info!("Starting Foodgram API");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!("Database initialized");

    let jwt_secret = match &config.auth.jwt_secret {
        Some(secret) => secret.clone().into_bytes(),
        None => {
            // Tokens from previous runs die with the process; fine for
            // development, set JWT_SECRET in production
            warn!("JWT_SECRET not set, generating an ephemeral secret");
            generate_jwt_secret().to_vec()
        }
    };

    let auth_manager = AuthManager::new(jwt_secret, config.auth.jwt_expiry_hours);
    info!("Authentication manager initialized");

    let http_port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, auth_manager, config));
    let app = routes::router(resources);

    let listener = TcpListener::bind(format!("0.0.0.0:{http_port}")).await?;
    info!("Listening on port {http_port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolve when the process receives a termination signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install shutdown handler: {e}");
    }
    info!("Shutdown signal received");
}
