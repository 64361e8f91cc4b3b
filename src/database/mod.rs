// ABOUTME: Database abstraction layer for the randevu server
// ABOUTME: DatabaseProvider trait covering salons, staff, services, and bookings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use randevu_core::{
    BookingId, BookingRecord, BookingStatus, HolidaySet, Salon, SalonId, ServiceId,
    ServiceOffering, Staff, StaffId, WeeklySchedule,
};

pub mod sqlite;

pub use sqlite::SqliteDatabase;

/// Outcome of attempting to persist a new booking
///
/// The insert re-checks the time range atomically at write time rather than
/// trusting a prior read, so the two interesting rejection causes are
/// reported as data, not errors: the caller maps `SlotTaken` to a retryable
/// race response and `AccessCodeTaken` to one round of code regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The booking row was written
    Inserted,
    /// A non-canceled booking for the same staff member and date overlaps
    /// the requested time range
    SlotTaken,
    /// The generated access code collided with an existing one
    AccessCodeTaken,
}

/// Filters for listing a salon's bookings
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    /// Only bookings on this date
    pub date: Option<NaiveDate>,
    /// Only bookings for this staff member
    pub staff_id: Option<StaffId>,
    /// Only bookings in this status
    pub status: Option<BookingStatus>,
}

/// Core database abstraction trait
///
/// All database implementations must implement this trait to provide a
/// consistent interface for the application layer.
#[async_trait]
pub trait DatabaseProvider: Send + Sync {
    /// Run database migrations to set up schema
    async fn migrate(&self) -> Result<()>;

    // ================================
    // Salon Management
    // ================================

    /// Create a new salon
    async fn create_salon(&self, salon: &Salon) -> Result<()>;

    /// Get salon by ID
    async fn get_salon(&self, salon_id: SalonId) -> Result<Option<Salon>>;

    /// Get salon by its URL slug
    async fn get_salon_by_slug(&self, slug: &str) -> Result<Option<Salon>>;

    // ================================
    // Staff Management
    // ================================

    /// Create a new staff member
    async fn create_staff(&self, staff: &Staff) -> Result<()>;

    /// Get staff member by ID
    async fn get_staff(&self, staff_id: StaffId) -> Result<Option<Staff>>;

    /// List all staff of a salon
    async fn list_staff_for_salon(&self, salon_id: SalonId) -> Result<Vec<Staff>>;

    /// Replace a staff member's weekly schedule and holiday dates
    ///
    /// Returns false when the staff member does not exist.
    async fn update_staff_schedule(
        &self,
        staff_id: StaffId,
        schedule: &WeeklySchedule,
        holidays: &HolidaySet,
    ) -> Result<bool>;

    // ================================
    // Service Management
    // ================================

    /// Create a new service offering
    async fn create_service(&self, service: &ServiceOffering) -> Result<()>;

    /// Get service by ID
    async fn get_service(&self, service_id: ServiceId) -> Result<Option<ServiceOffering>>;

    /// List all services of a salon
    async fn list_services_for_salon(&self, salon_id: SalonId) -> Result<Vec<ServiceOffering>>;

    // ================================
    // Booking Management
    // ================================

    /// Attempt to insert a new booking with an atomic overlap re-check
    async fn insert_booking(&self, booking: &BookingRecord) -> Result<InsertOutcome>;

    /// Get booking by ID
    async fn get_booking(&self, booking_id: BookingId) -> Result<Option<BookingRecord>>;

    /// Get booking by its public access code
    async fn get_booking_by_access_code(&self, access_code: &str)
        -> Result<Option<BookingRecord>>;

    /// All bookings of a staff member on one date, ordered by start time
    async fn list_bookings_for_staff_on_date(
        &self,
        staff_id: StaffId,
        date: NaiveDate,
    ) -> Result<Vec<BookingRecord>>;

    /// A salon's bookings with optional filters, ordered by date then start time
    async fn list_bookings_for_salon(
        &self,
        salon_id: SalonId,
        filter: &BookingFilter,
    ) -> Result<Vec<BookingRecord>>;

    /// Set a booking's status; returns false when the booking does not exist
    async fn update_booking_status(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> Result<bool>;

    /// Delete a booking row outright; returns false when it does not exist
    async fn delete_booking(&self, booking_id: BookingId) -> Result<bool>;
}
