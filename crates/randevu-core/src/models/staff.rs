// ABOUTME: Staff member (hairdresser) model with individual weekly schedule
// ABOUTME: Staff profile, offered services, working schedule, and holiday calendar
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

use crate::models::ids::{SalonId, ServiceId, StaffId};
use crate::models::schedule::{HolidaySet, WeeklySchedule};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A staff member (hairdresser) employed by a salon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    /// Unique staff identifier
    pub id: StaffId,
    /// Salon this staff member works at
    pub salon_id: SalonId,
    /// Display name
    pub name: String,
    /// Contact email, optional
    pub email: Option<String>,
    /// Contact phone, optional
    pub phone: Option<String>,
    /// Recurring weekly working hours
    pub working_schedule: WeeklySchedule,
    /// Dates on which this staff member is off regardless of the schedule
    pub holiday_dates: HolidaySet,
    /// Services this staff member offers
    pub service_ids: Vec<ServiceId>,
    /// Inactive staff accept no bookings and report no availability
    pub is_active: bool,
    /// When the staff member was created
    pub created_at: DateTime<Utc>,
    /// When the staff member was last updated
    pub updated_at: DateTime<Utc>,
}

impl Staff {
    /// Create an active staff member with the default salon week
    #[must_use]
    pub fn new(salon_id: SalonId, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: StaffId::new(),
            salon_id,
            name,
            email: None,
            phone: None,
            working_schedule: WeeklySchedule::default(),
            holiday_dates: HolidaySet::new(),
            service_ids: Vec::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this staff member offers the given service
    #[must_use]
    pub fn offers_service(&self, service_id: ServiceId) -> bool {
        self.service_ids.contains(&service_id)
    }
}
