// ABOUTME: Environment-based configuration for the randevu server
// ABOUTME: ServerConfig with HTTP, database, and logging settings loaded from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

//! Environment-only configuration
//!
//! All runtime settings come from environment variables with sensible
//! defaults; there is no configuration file.

use crate::errors::{AppError, AppResult};
use std::env;

/// Default HTTP port when `HTTP_PORT` is unset
const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default SQLite database location when `DATABASE_URL` is unset
const DEFAULT_DATABASE_URL: &str = "sqlite:./data/randevu.db";

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the HTTP server binds to
    pub http_port: u16,
    /// Host the HTTP server binds to
    pub http_host: String,
    /// Database connection string (sqlite URL)
    pub database_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a config error when a present variable fails to parse.
    pub fn from_env() -> AppResult<Self> {
        let http_port = match env::var("HTTP_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::config(format!("invalid HTTP_PORT '{raw}': {e}")))?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let http_host = env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        Ok(Self {
            http_port,
            http_host,
            database_url,
        })
    }

    /// One-line summary for the startup log
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "listening on {}:{}, database {}",
            self.http_host, self.http_port, self.database_url
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            http_host: "0.0.0.0".to_owned(),
            database_url: DEFAULT_DATABASE_URL.to_owned(),
        }
    }
}
