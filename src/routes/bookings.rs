// ABOUTME: Booking route handlers
// ABOUTME: Booking creation, public access-code lookup, status updates, deletion, and salon listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

use crate::database::BookingFilter;
use crate::errors::AppError;
use crate::server::ServerResources;
use crate::workflow::NewBookingRequest;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use randevu_core::{BookingId, BookingStatus, SalonId, StaffId};
use serde::Deserialize;
use std::sync::Arc;

/// Request body for a booking status update
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target status
    pub status: BookingStatus,
}

/// Query parameters for listing a salon's bookings
#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    /// Only bookings on this date
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Only bookings for this staff member
    #[serde(default)]
    pub staff_id: Option<StaffId>,
    /// Only bookings in this status
    #[serde(default)]
    pub status: Option<BookingStatus>,
}

/// Booking routes
pub struct BookingRoutes;

impl BookingRoutes {
    /// Create all booking routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/bookings", post(Self::handle_create_booking))
            .route(
                "/api/bookings/code/:access_code",
                get(Self::handle_booking_by_code),
            )
            .route(
                "/api/bookings/:booking_id/status",
                put(Self::handle_update_status),
            )
            .route(
                "/api/bookings/:booking_id",
                delete(Self::handle_delete_booking),
            )
            .route(
                "/api/salons/:salon_id/bookings",
                get(Self::handle_list_salon_bookings),
            )
            .with_state(resources)
    }

    /// Create a booking with status `pending`
    ///
    /// The response carries the access code the customer uses for
    /// unauthenticated status lookup.
    async fn handle_create_booking(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<NewBookingRequest>,
    ) -> Result<Response, AppError> {
        if request.customer_name.trim().is_empty() || request.customer_phone.trim().is_empty() {
            return Err(AppError::invalid_input(
                "customer name and phone are required",
            ));
        }

        let booking = resources.workflow.create_booking(request).await?;

        Ok((StatusCode::CREATED, Json(booking)).into_response())
    }

    async fn handle_booking_by_code(
        State(resources): State<Arc<ServerResources>>,
        Path(access_code): Path<String>,
    ) -> Result<Response, AppError> {
        let booking = resources.workflow.booking_by_code(&access_code).await?;

        Ok((StatusCode::OK, Json(booking)).into_response())
    }

    async fn handle_update_status(
        State(resources): State<Arc<ServerResources>>,
        Path(booking_id): Path<BookingId>,
        Json(request): Json<UpdateStatusRequest>,
    ) -> Result<Response, AppError> {
        let booking = resources
            .workflow
            .update_status(booking_id, request.status)
            .await?;

        Ok((StatusCode::OK, Json(booking)).into_response())
    }

    async fn handle_delete_booking(
        State(resources): State<Arc<ServerResources>>,
        Path(booking_id): Path<BookingId>,
    ) -> Result<Response, AppError> {
        resources.workflow.delete_booking(booking_id).await?;

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    async fn handle_list_salon_bookings(
        State(resources): State<Arc<ServerResources>>,
        Path(salon_id): Path<SalonId>,
        Query(query): Query<BookingListQuery>,
    ) -> Result<Response, AppError> {
        let filter = BookingFilter {
            date: query.date,
            staff_id: query.staff_id,
            status: query.status,
        };

        let bookings = resources.workflow.salon_bookings(salon_id, filter).await?;

        Ok((StatusCode::OK, Json(bookings)).into_response())
    }
}
