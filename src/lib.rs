// ABOUTME: Randevu server library root wiring configuration, persistence, workflow, and routes
// ABOUTME: HTTP boundary around the pure scheduling engine in randevu-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

#![deny(unsafe_code)]

//! # Randevu Server
//!
//! Multi-tenant salon appointment booking backend. Salons register staff,
//! define services with durations, and accept customer bookings against staff
//! working schedules. The availability computation itself lives in
//! `randevu-core`; this crate owns everything around it: configuration,
//! structured logging, SQLite persistence, the booking workflow, and the
//! axum route surface.

/// Public access-code generation for unauthenticated booking lookup
pub mod access_code;

/// Environment-based server configuration
pub mod config;

/// Database abstraction and the SQLite implementation
pub mod database;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Route handlers for the REST surface
pub mod routes;

/// Server assembly and startup
pub mod server;

/// Booking workflow orchestrating the database and the scheduling engine
pub mod workflow;
