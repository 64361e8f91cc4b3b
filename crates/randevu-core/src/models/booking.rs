// ABOUTME: Booking record model and booking status lifecycle
// ABOUTME: BookingRecord persisted shape, BookingStatus enum, and transition rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

use crate::models::ids::{BookingId, CustomerId, SalonId, ServiceId, StaffId};
use crate::scheduling::engine::Booking;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a booking
///
/// `pending → confirmed | canceled`, `confirmed → completed | canceled |
/// no_show`; `completed`, `canceled`, and `no_show` are terminal. Only
/// `canceled` bookings release their time window: a `pending` booking still
/// holds the slot, which is a deliberate business rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created by a customer, awaiting salon confirmation
    Pending,
    /// Confirmed by the salon
    Confirmed,
    /// The appointment took place
    Completed,
    /// Canceled by either side; releases the time window
    Canceled,
    /// Customer did not show up
    NoShow,
}

impl BookingStatus {
    /// Whether a booking in this status occupies its time window
    ///
    /// Everything except `canceled` blocks the slot.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        !matches!(self, Self::Canceled)
    }

    /// Whether this status admits no further transitions
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Canceled | Self::NoShow)
    }

    /// Whether transitioning to `next` is a legal lifecycle step
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::Pending => matches!(next, Self::Confirmed | Self::Canceled),
            Self::Confirmed => {
                matches!(next, Self::Completed | Self::Canceled | Self::NoShow)
            }
            Self::Completed | Self::Canceled | Self::NoShow => false,
        }
    }

    /// Wire/database representation (`"pending"` .. `"no_show"`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
            Self::NoShow => "no_show",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            "no_show" => Ok(Self::NoShow),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

/// A customer booking as persisted and returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Unique booking identifier
    pub id: BookingId,
    /// Salon the booking belongs to
    pub salon_id: SalonId,
    /// Staff member performing the service
    pub staff_id: StaffId,
    /// Booked service
    pub service_id: ServiceId,
    /// Registered customer account, if the booking was made while signed in
    pub customer_id: Option<CustomerId>,
    /// Customer display name
    pub customer_name: String,
    /// Customer phone number used for confirmations
    pub customer_phone: String,
    /// Customer email, optional
    pub customer_email: Option<String>,
    /// Calendar date of the appointment (salon local time)
    pub date: NaiveDate,
    /// Appointment start (inclusive)
    pub start_time: NaiveTime,
    /// Appointment end (exclusive)
    pub end_time: NaiveTime,
    /// Lifecycle status
    pub status: BookingStatus,
    /// Public 8-character code for unauthenticated status lookup
    pub access_code: String,
    /// Free-form note from the customer
    pub notes: Option<String>,
    /// When the booking was created
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated
    pub updated_at: DateTime<Utc>,
}

impl BookingRecord {
    /// Project this record to the value object the scheduling engine consumes
    #[must_use]
    pub const fn to_engine_booking(&self) -> Booking {
        Booking {
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            status: self.status,
        }
    }
}
