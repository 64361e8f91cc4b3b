// ABOUTME: REST route registration for the randevu server
// ABOUTME: Assembles salon, staff, service, availability, booking, and health routers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

//! Route handlers for the REST surface
//!
//! Handlers stay thin: they parse the request, call into
//! [`crate::workflow::BookingWorkflow`] or the database, and serialize the
//! result. There is no authentication layer; handlers take explicit ids.

use crate::server::ServerResources;
use axum::Router;
use std::sync::Arc;

/// Availability query route
pub mod availability;

/// Booking creation, public lookup, status update, and salon listing routes
pub mod bookings;

/// Liveness route
pub mod health;

/// Salon management routes
pub mod salons;

/// Service management routes
pub mod services;

/// Staff management routes
pub mod staff;

/// All API routes merged under one router
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(health::HealthRoutes::routes())
        .merge(salons::SalonRoutes::routes(resources.clone()))
        .merge(staff::StaffRoutes::routes(resources.clone()))
        .merge(services::ServiceRoutes::routes(resources.clone()))
        .merge(availability::AvailabilityRoutes::routes(resources.clone()))
        .merge(bookings::BookingRoutes::routes(resources))
}
