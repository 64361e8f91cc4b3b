// ABOUTME: Service offering model for salons
// ABOUTME: Service name, price, duration, and active flag scoped to one salon
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

use crate::models::ids::{SalonId, ServiceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookable service a salon offers (cut, color, ...)
///
/// The service duration determines the length of the booking created for it,
/// independent of the salon's availability-grid duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceOffering {
    /// Unique service identifier
    pub id: ServiceId,
    /// Salon this service belongs to
    pub salon_id: SalonId,
    /// Service display name
    pub name: String,
    /// Price in the salon's currency
    pub price: f64,
    /// Appointment length in minutes
    pub duration_minutes: u32,
    /// Description shown to customers, optional
    pub description: Option<String>,
    /// Inactive services cannot be booked
    pub is_active: bool,
    /// When the service was created
    pub created_at: DateTime<Utc>,
    /// When the service was last updated
    pub updated_at: DateTime<Utc>,
}

impl ServiceOffering {
    /// Create an active service with the default 30-minute duration
    #[must_use]
    pub fn new(salon_id: SalonId, name: String, price: f64) -> Self {
        let now = Utc::now();
        Self {
            id: ServiceId::new(),
            salon_id,
            name,
            price,
            duration_minutes: 30,
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
