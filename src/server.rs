// ABOUTME: HTTP server assembly and shared resources
// ABOUTME: ServerResources container, router construction with middleware, and the serve loop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

//! Server wiring
//!
//! [`ServerResources`] bundles the long-lived state handlers reach through
//! axum's `State` extractor. The router is built once at startup and served
//! over a tokio TCP listener until the process exits.

use crate::config::ServerConfig;
use crate::database::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::routes;
use crate::workflow::BookingWorkflow;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Long-lived state shared across all route handlers
pub struct ServerResources {
    /// Persistence layer
    pub database: Arc<dyn DatabaseProvider>,
    /// Application-level booking operations
    pub workflow: BookingWorkflow,
    /// Runtime configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle a database and configuration into shared server state
    #[must_use]
    pub fn new(database: Arc<dyn DatabaseProvider>, config: ServerConfig) -> Self {
        let workflow = BookingWorkflow::new(database.clone());
        Self {
            database,
            workflow,
            config,
        }
    }
}

/// The complete application router with tracing and CORS middleware
#[must_use]
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    routes::router(resources)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind the configured address and serve requests until shutdown
///
/// # Errors
///
/// Returns an error when the address cannot be bound or the server loop
/// fails.
pub async fn serve(resources: Arc<ServerResources>) -> AppResult<()> {
    let addr = format!(
        "{}:{}",
        resources.config.http_host, resources.config.http_port
    );
    let router = build_router(resources);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("failed to bind {addr}: {e}")))?;

    info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| AppError::internal(format!("server error: {e}")))
}
