// ABOUTME: Core domain types and the pure scheduling engine for the randevu booking platform
// ABOUTME: Foundation crate with salon/staff/service/booking models and slot availability logic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

#![deny(unsafe_code)]

//! # Randevu Core
//!
//! Foundation crate for the randevu salon booking platform. It holds the
//! domain model (salons, staff, services, bookings, weekly schedules) and the
//! scheduling engine that computes bookable slots and validates proposed
//! bookings against existing ones.
//!
//! Everything in this crate is a plain value type or a pure function:
//! persistence, HTTP, and notification concerns live in the server crate and
//! call in with data they loaded themselves. Correctness of the engine
//! depends only on its inputs, never on hidden state.
//!
//! ## Modules
//!
//! - **models**: Salon, staff, service, and booking types plus typed ids
//! - **scheduling**: Day resolution, slot generation, and the availability engine

/// Core data models (`Salon`, `Staff`, `ServiceOffering`, `BookingRecord`, typed ids)
pub mod models;

/// Day resolution, slot generation, and the availability engine
pub mod scheduling;

pub use models::booking::{BookingRecord, BookingStatus};
pub use models::ids::{BookingId, CustomerId, SalonId, ServiceId, StaffId};
pub use models::salon::{Salon, SalonSettings};
pub use models::schedule::{DayWindow, HolidaySet, Weekday, WeeklySchedule};
pub use models::service::ServiceOffering;
pub use models::staff::Staff;
pub use scheduling::calendar::{ClosedReason, DayResolution};
pub use scheduling::engine::{Booking, SchedulingError, Slot, SlotRequest};
