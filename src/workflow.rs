// ABOUTME: Booking workflow orchestrating the database and the scheduling engine
// ABOUTME: Availability queries, booking creation with race handling, lookup, and status updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

//! # Booking Workflow
//!
//! The application-level operations behind the REST surface. Each operation
//! loads a consistent snapshot from the database, runs the pure scheduling
//! engine over it, and persists the outcome. The engine's conflict check is
//! an optimistic pre-check only; the booking insert re-checks the time range
//! atomically at write time, and losing that re-check surfaces as a
//! retryable race rather than a scheduling conflict.

use crate::access_code;
use crate::database::{BookingFilter, DatabaseProvider, InsertOutcome};
use crate::errors::{AppError, AppResult, ErrorCode};
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use randevu_core::scheduling::engine;
use randevu_core::{
    BookingId, BookingRecord, BookingStatus, CustomerId, SalonId, ServiceId, Slot, SlotRequest,
    StaffId,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A slot formatted for API responses (`HH:MM` strings)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    /// Slot start
    pub start_time: String,
    /// Slot end
    pub end_time: String,
}

impl From<Slot> for SlotView {
    fn from(slot: Slot) -> Self {
        Self {
            start_time: slot.start_time.format("%H:%M").to_string(),
            end_time: slot.end_time.format("%H:%M").to_string(),
        }
    }
}

/// Response to an availability query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// Date queried (ISO form)
    pub date: NaiveDate,
    /// Staff member the slots belong to
    pub staff_id: StaffId,
    /// Staff display name
    pub staff_name: String,
    /// Bookable windows in chronological order
    pub slots: Vec<SlotView>,
}

/// Request to create a booking
#[derive(Debug, Clone, Deserialize)]
pub struct NewBookingRequest {
    /// Salon the booking is for
    pub salon_id: SalonId,
    /// Staff member to book
    pub staff_id: StaffId,
    /// Service being booked; its duration determines the end time
    pub service_id: ServiceId,
    /// Registered customer account, optional
    pub customer_id: Option<CustomerId>,
    /// Customer display name
    pub customer_name: String,
    /// Customer phone number
    pub customer_phone: String,
    /// Customer email, optional
    pub customer_email: Option<String>,
    /// Appointment date
    pub date: NaiveDate,
    /// Appointment start time
    pub start_time: NaiveTime,
    /// Free-form note, optional
    pub notes: Option<String>,
}

/// Application-level booking operations over a database
#[derive(Clone)]
pub struct BookingWorkflow {
    database: Arc<dyn DatabaseProvider>,
}

impl BookingWorkflow {
    /// Create a workflow over the given database
    #[must_use]
    pub fn new(database: Arc<dyn DatabaseProvider>) -> Self {
        Self { database }
    }

    /// Bookable slots for a (salon, staff, date) triple
    ///
    /// The grid duration and buffer come from the salon settings; the actual
    /// booking length later comes from the chosen service, which may differ.
    pub async fn available_slots(
        &self,
        salon_id: SalonId,
        staff_id: StaffId,
        date: NaiveDate,
    ) -> AppResult<AvailabilityResponse> {
        let salon = self
            .database
            .get_salon(salon_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Salon"))?;

        if !salon.is_active {
            return Err(AppError::invalid_input("salon is not active"));
        }

        let staff = self
            .database
            .get_staff(staff_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Staff member"))?;

        if staff.salon_id != salon.id {
            return Err(AppError::invalid_input(
                "staff member does not work at this salon",
            ));
        }

        if !staff.is_active {
            return Err(AppError::new(
                ErrorCode::NotWorkingDay,
                "staff member is not active",
            ));
        }

        let existing = self
            .database
            .list_bookings_for_staff_on_date(staff_id, date)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let request = SlotRequest {
            date,
            schedule: staff.working_schedule.clone(),
            holidays: staff.holiday_dates.clone(),
            slot_duration_minutes: salon.settings.default_appointment_duration,
            buffer_minutes: salon.settings.slot_buffer_minutes,
            existing_bookings: existing.iter().map(BookingRecord::to_engine_booking).collect(),
        };

        let slots = engine::get_available_slots(&request)?;
        debug!(
            staff_id = %staff_id,
            date = %date,
            slot_count = slots.len(),
            "computed availability"
        );

        Ok(AvailabilityResponse {
            date,
            staff_id,
            staff_name: staff.name,
            slots: slots.into_iter().map(SlotView::from).collect(),
        })
    }

    /// Create a booking with status `pending` and a fresh access code
    ///
    /// The end time is `start + service duration`. After the engine's
    /// optimistic conflict check, the insert re-validates the whole time
    /// range atomically; losing that race is reported as retryable. An
    /// access-code collision triggers regeneration within a bounded attempt
    /// budget.
    pub async fn create_booking(&self, request: NewBookingRequest) -> AppResult<BookingRecord> {
        let salon = self
            .database
            .get_salon(request.salon_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Salon"))?;

        if !salon.is_active {
            return Err(AppError::invalid_input("salon is not active"));
        }

        if !salon.settings.allow_online_booking {
            return Err(AppError::invalid_input(
                "online booking is disabled for this salon",
            ));
        }

        let staff = self
            .database
            .get_staff(request.staff_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Staff member"))?;

        if staff.salon_id != salon.id {
            return Err(AppError::invalid_input(
                "staff member does not work at this salon",
            ));
        }

        let service = self
            .database
            .get_service(request.service_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Service"))?;

        if service.salon_id != salon.id {
            return Err(AppError::invalid_input(
                "service does not belong to this salon",
            ));
        }

        if !service.is_active {
            return Err(AppError::invalid_input("service is not active"));
        }

        let end_time = request.start_time + Duration::minutes(i64::from(service.duration_minutes));

        let existing = self
            .database
            .list_bookings_for_staff_on_date(request.staff_id, request.date)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let engine_bookings: Vec<_> = existing
            .iter()
            .map(BookingRecord::to_engine_booking)
            .collect();

        engine::validate_booking_window(
            request.date,
            request.start_time,
            end_time,
            &engine_bookings,
        )?;

        let now = Utc::now();
        let mut booking = BookingRecord {
            id: BookingId::new(),
            salon_id: request.salon_id,
            staff_id: request.staff_id,
            service_id: request.service_id,
            customer_id: request.customer_id,
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
            customer_email: request.customer_email,
            date: request.date,
            start_time: request.start_time,
            end_time,
            status: BookingStatus::Pending,
            access_code: access_code::generate(),
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };

        for attempt in 1..=access_code::MAX_ATTEMPTS {
            match self
                .database
                .insert_booking(&booking)
                .await
                .map_err(|e| AppError::database(e.to_string()))?
            {
                InsertOutcome::Inserted => {
                    info!(
                        booking_id = %booking.id,
                        staff_id = %booking.staff_id,
                        date = %booking.date,
                        "booking created"
                    );
                    return Ok(booking);
                }
                InsertOutcome::SlotTaken => {
                    // The engine's pre-check passed against a snapshot that a
                    // concurrent request has since invalidated.
                    warn!(
                        staff_id = %booking.staff_id,
                        date = %booking.date,
                        start = %booking.start_time,
                        "lost booking insert race"
                    );
                    return Err(AppError::booking_race());
                }
                InsertOutcome::AccessCodeTaken => {
                    debug!(attempt, "access code collision, regenerating");
                    booking.access_code = access_code::generate();
                }
            }
        }

        Err(AppError::internal(
            "could not allocate a unique access code",
        ))
    }

    /// Public unauthenticated booking lookup by access code
    pub async fn booking_by_code(&self, code: &str) -> AppResult<BookingRecord> {
        if !access_code::is_valid_format(code) {
            return Err(AppError::invalid_input("malformed access code"));
        }

        self.database
            .get_booking_by_access_code(code)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Booking"))
    }

    /// Transition a booking's status
    ///
    /// The status state machine is enforced here, not in the engine; the new
    /// status affects all subsequent availability computations through the
    /// canceled-exemption rule.
    pub async fn update_status(
        &self,
        booking_id: BookingId,
        new_status: BookingStatus,
    ) -> AppResult<BookingRecord> {
        let booking = self
            .database
            .get_booking(booking_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Booking"))?;

        if !booking.status.can_transition_to(new_status) {
            return Err(AppError::invalid_transition(booking.status, new_status));
        }

        let updated = self
            .database
            .update_booking_status(booking_id, new_status)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        if !updated {
            return Err(AppError::not_found("Booking"));
        }

        info!(booking_id = %booking_id, from = %booking.status, to = %new_status, "booking status updated");

        Ok(BookingRecord {
            status: new_status,
            updated_at: Utc::now(),
            ..booking
        })
    }

    /// Delete a booking outright
    ///
    /// Unlike cancelation this removes the row, so the booking also
    /// disappears from salon listings and its access code is freed.
    pub async fn delete_booking(&self, booking_id: BookingId) -> AppResult<()> {
        let deleted = self
            .database
            .delete_booking(booking_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        if !deleted {
            return Err(AppError::not_found("Booking"));
        }

        info!(booking_id = %booking_id, "booking deleted");

        Ok(())
    }

    /// A salon's bookings with optional date/staff/status filters
    pub async fn salon_bookings(
        &self,
        salon_id: SalonId,
        filter: BookingFilter,
    ) -> AppResult<Vec<BookingRecord>> {
        self.database
            .get_salon(salon_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Salon"))?;

        self.database
            .list_bookings_for_salon(salon_id, &filter)
            .await
            .map_err(|e| AppError::database(e.to_string()))
    }
}
