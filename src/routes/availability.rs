// ABOUTME: Availability query route handler
// ABOUTME: Returns bookable slots for a staff member on a date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

use crate::errors::AppError;
use crate::server::ServerResources;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use randevu_core::{SalonId, StaffId};
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for an availability request
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Salon whose grid settings apply
    pub salon_id: SalonId,
    /// Staff member to compute availability for
    pub staff_id: StaffId,
    /// Date in ISO form (`YYYY-MM-DD`)
    pub date: NaiveDate,
}

/// Availability routes
pub struct AvailabilityRoutes;

impl AvailabilityRoutes {
    /// Create the availability route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/availability", get(Self::handle_availability))
            .with_state(resources)
    }

    /// Bookable slots for a (salon, staff, date) triple
    ///
    /// A closed day (holiday, inactive weekday, inactive staff) yields a
    /// `NOT_WORKING_DAY` error response, which clients render as "no
    /// availability" rather than as a failure; a fully booked open day
    /// yields an empty slot list with status 200.
    async fn handle_availability(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<AvailabilityQuery>,
    ) -> Result<Response, AppError> {
        let response = resources
            .workflow
            .available_slots(query.salon_id, query.staff_id, query.date)
            .await?;

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
