// ABOUTME: Staff management route handlers
// ABOUTME: Staff creation, lookup, salon listing, and schedule replacement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

use crate::errors::AppError;
use crate::server::ServerResources;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use randevu_core::{HolidaySet, SalonId, ServiceId, Staff, StaffId, WeeklySchedule};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Request body for creating a staff member
#[derive(Debug, Deserialize)]
pub struct CreateStaffRequest {
    /// Staff display name
    pub name: String,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Weekly working hours; the default salon week applies when omitted
    #[serde(default)]
    pub working_schedule: Option<WeeklySchedule>,
    /// Holiday dates
    #[serde(default)]
    pub holiday_dates: Option<HolidaySet>,
    /// Services this staff member offers
    #[serde(default)]
    pub service_ids: Vec<ServiceId>,
}

/// Request body for replacing a staff member's schedule
#[derive(Debug, Deserialize)]
pub struct UpdateScheduleRequest {
    /// New weekly working hours
    pub working_schedule: WeeklySchedule,
    /// New holiday dates; unchanged when omitted
    #[serde(default)]
    pub holiday_dates: Option<HolidaySet>,
}

/// Staff management routes
pub struct StaffRoutes;

impl StaffRoutes {
    /// Create all staff management routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/salons/:salon_id/staff", post(Self::handle_create_staff))
            .route("/api/salons/:salon_id/staff", get(Self::handle_list_staff))
            .route("/api/staff/:staff_id", get(Self::handle_get_staff))
            .route(
                "/api/staff/:staff_id/schedule",
                put(Self::handle_update_schedule),
            )
            .with_state(resources)
    }

    async fn handle_create_staff(
        State(resources): State<Arc<ServerResources>>,
        Path(salon_id): Path<SalonId>,
        Json(request): Json<CreateStaffRequest>,
    ) -> Result<Response, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::invalid_input("name is required"));
        }

        resources
            .database
            .get_salon(salon_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Salon"))?;

        let mut staff = Staff::new(salon_id, request.name);
        staff.email = request.email;
        staff.phone = request.phone;
        staff.service_ids = request.service_ids;
        if let Some(schedule) = request.working_schedule {
            staff.working_schedule = schedule;
        }
        if let Some(holidays) = request.holiday_dates {
            staff.holiday_dates = holidays;
        }

        resources
            .database
            .create_staff(&staff)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        info!(staff_id = %staff.id, salon_id = %salon_id, "staff member created");

        Ok((StatusCode::CREATED, Json(staff)).into_response())
    }

    async fn handle_list_staff(
        State(resources): State<Arc<ServerResources>>,
        Path(salon_id): Path<SalonId>,
    ) -> Result<Response, AppError> {
        resources
            .database
            .get_salon(salon_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Salon"))?;

        let staff = resources
            .database
            .list_staff_for_salon(salon_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(staff)).into_response())
    }

    async fn handle_get_staff(
        State(resources): State<Arc<ServerResources>>,
        Path(staff_id): Path<StaffId>,
    ) -> Result<Response, AppError> {
        let staff = resources
            .database
            .get_staff(staff_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Staff member"))?;

        Ok((StatusCode::OK, Json(staff)).into_response())
    }

    /// Replace the weekly schedule (and optionally holidays) of a staff member
    ///
    /// Takes effect on the next availability query; existing bookings are not
    /// revalidated against the new hours.
    async fn handle_update_schedule(
        State(resources): State<Arc<ServerResources>>,
        Path(staff_id): Path<StaffId>,
        Json(request): Json<UpdateScheduleRequest>,
    ) -> Result<Response, AppError> {
        let staff = resources
            .database
            .get_staff(staff_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Staff member"))?;

        let holidays = request.holiday_dates.unwrap_or(staff.holiday_dates);

        let updated = resources
            .database
            .update_staff_schedule(staff_id, &request.working_schedule, &holidays)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        if !updated {
            return Err(AppError::not_found("Staff member"));
        }

        info!(staff_id = %staff_id, "staff schedule replaced");

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
