// ABOUTME: Salon management route handlers
// ABOUTME: Salon creation and lookup by id or slug
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
use randevu_core::{Salon, SalonId, SalonSettings};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Request body for creating a salon
#[derive(Debug, Deserialize)]
pub struct CreateSalonRequest {
    /// Salon display name
    pub name: String,
    /// URL-safe slug, unique across the platform
    pub slug: String,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Street address
    #[serde(default)]
    pub address: Option<String>,
    /// Booking settings; defaults apply when omitted
    #[serde(default)]
    pub settings: Option<SalonSettings>,
}

/// Salon management routes
pub struct SalonRoutes;

impl SalonRoutes {
    /// Create all salon management routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/salons", post(Self::handle_create_salon))
            .route("/api/salons/:salon_id", get(Self::handle_get_salon))
            .route(
                "/api/salons/by-slug/:slug",
                get(Self::handle_get_salon_by_slug),
            )
            .with_state(resources)
    }

    async fn handle_create_salon(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateSalonRequest>,
    ) -> Result<Response, AppError> {
        if request.name.trim().is_empty() || request.slug.trim().is_empty() {
            return Err(AppError::invalid_input("name and slug are required"));
        }

        let mut salon = Salon::new(request.name, request.slug);
        salon.email = request.email;
        salon.phone = request.phone;
        salon.address = request.address;
        if let Some(settings) = request.settings {
            salon.settings = settings;
        }

        resources
            .database
            .create_salon(&salon)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        info!(salon_id = %salon.id, slug = %salon.slug, "salon created");

        Ok((StatusCode::CREATED, Json(salon)).into_response())
    }

    async fn handle_get_salon(
        State(resources): State<Arc<ServerResources>>,
        Path(salon_id): Path<SalonId>,
    ) -> Result<Response, AppError> {
        let salon = resources
            .database
            .get_salon(salon_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Salon"))?;

        Ok((StatusCode::OK, Json(salon)).into_response())
    }

    async fn handle_get_salon_by_slug(
        State(resources): State<Arc<ServerResources>>,
        Path(slug): Path<String>,
    ) -> Result<Response, AppError> {
        let salon = resources
            .database
            .get_salon_by_slug(&slug)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Salon"))?;

        Ok((StatusCode::OK, Json(salon)).into_response())
    }
}
