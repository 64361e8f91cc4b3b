// ABOUTME: Salon (tenant) model and per-salon settings
// ABOUTME: Salon profile fields plus SalonSettings controlling booking behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

use crate::models::ids::SalonId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A salon: one independent business account in the multi-tenant setup
///
/// All staff, services, and bookings are scoped to exactly one salon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Salon {
    /// Unique salon identifier
    pub id: SalonId,
    /// Salon display name
    pub name: String,
    /// URL-safe slug (public booking page path)
    pub slug: String,
    /// Contact email, optional
    pub email: Option<String>,
    /// Contact phone, optional
    pub phone: Option<String>,
    /// Street address, optional
    pub address: Option<String>,
    /// Whether the salon accepts any traffic at all
    pub is_active: bool,
    /// Booking behavior settings
    pub settings: SalonSettings,
    /// When the salon was created
    pub created_at: DateTime<Utc>,
    /// When the salon was last updated
    pub updated_at: DateTime<Utc>,
}

impl Salon {
    /// Create a new active salon with default settings
    #[must_use]
    pub fn new(name: String, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: SalonId::new(),
            name,
            slug,
            email: None,
            phone: None,
            address: None,
            is_active: true,
            settings: SalonSettings::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Per-salon booking settings
///
/// Serde defaults keep this parseable from partial settings blobs written by
/// earlier versions of the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalonSettings {
    /// Whether customers may book online at all
    #[serde(default = "default_true")]
    pub allow_online_booking: bool,
    /// Duration in minutes of the availability grid offered to customers
    ///
    /// This is salon-wide; the booked service's own duration determines the
    /// actual appointment length, which may exceed one grid slot.
    #[serde(default = "default_appointment_duration")]
    pub default_appointment_duration: u32,
    /// Dead time in minutes inserted between generated slots
    #[serde(default)]
    pub slot_buffer_minutes: u32,
    /// Minimum notice in minutes before an appointment may start
    #[serde(default = "default_minimum_notice")]
    pub minimum_notice_minutes: u32,
    /// How many hours before the start a customer may still cancel
    #[serde(default = "default_cancelation_limit")]
    pub cancelation_limit_hours: u32,
}

const fn default_true() -> bool {
    true
}

const fn default_appointment_duration() -> u32 {
    30
}

const fn default_minimum_notice() -> u32 {
    60
}

const fn default_cancelation_limit() -> u32 {
    24
}

impl Default for SalonSettings {
    fn default() -> Self {
        Self {
            allow_online_booking: true,
            default_appointment_duration: 30,
            slot_buffer_minutes: 0,
            minimum_notice_minutes: 60,
            cancelation_limit_hours: 24,
        }
    }
}
