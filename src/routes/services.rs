// ABOUTME: Service management route handlers
// ABOUTME: Service creation and salon listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

use crate::errors::AppError;
use crate::server::ServerResources;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use randevu_core::{SalonId, ServiceOffering};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Request body for creating a service
#[derive(Debug, Deserialize)]
pub struct CreateServiceRequest {
    /// Service display name
    pub name: String,
    /// Price in the salon's currency
    pub price: f64,
    /// Appointment length in minutes; defaults to 30
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Description shown to customers
    #[serde(default)]
    pub description: Option<String>,
}

/// Service management routes
pub struct ServiceRoutes;

impl ServiceRoutes {
    /// Create all service management routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/salons/:salon_id/services",
                post(Self::handle_create_service),
            )
            .route(
                "/api/salons/:salon_id/services",
                get(Self::handle_list_services),
            )
            .with_state(resources)
    }

    async fn handle_create_service(
        State(resources): State<Arc<ServerResources>>,
        Path(salon_id): Path<SalonId>,
        Json(request): Json<CreateServiceRequest>,
    ) -> Result<Response, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::invalid_input("name is required"));
        }
        if let Some(0) = request.duration_minutes {
            return Err(AppError::invalid_input("duration must be positive"));
        }

        resources
            .database
            .get_salon(salon_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Salon"))?;

        let mut service = ServiceOffering::new(salon_id, request.name, request.price);
        if let Some(duration) = request.duration_minutes {
            service.duration_minutes = duration;
        }
        service.description = request.description;

        resources
            .database
            .create_service(&service)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        info!(service_id = %service.id, salon_id = %salon_id, "service created");

        Ok((StatusCode::CREATED, Json(service)).into_response())
    }

    async fn handle_list_services(
        State(resources): State<Arc<ServerResources>>,
        Path(salon_id): Path<SalonId>,
    ) -> Result<Response, AppError> {
        resources
            .database
            .get_salon(salon_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Salon"))?;

        let services = resources
            .database
            .list_services_for_salon(salon_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(services)).into_response())
    }
}
