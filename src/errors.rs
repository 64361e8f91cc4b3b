// ABOUTME: Unified error handling system for the randevu server
// ABOUTME: Standard error codes, AppError type, and HTTP response formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

//! # Unified Error Handling System
//!
//! Standard error codes, a single `AppError` carrier, and consistent JSON
//! error responses across all routes. Every error here is an expected,
//! recoverable condition reported to the caller; nothing in the booking
//! pipeline is allowed to crash the process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use randevu_core::{ClosedReason, SchedulingError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (1000-1999)
    /// Request data failed validation or parsing
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 1000,

    // Resources (2000-2999)
    /// A referenced salon, staff member, service, or booking does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 2000,

    // Scheduling (3000-3999)
    /// The staff member has no availability on the requested date
    #[serde(rename = "NOT_WORKING_DAY")]
    NotWorkingDay = 3000,
    /// The requested time overlaps an existing booking
    #[serde(rename = "BOOKING_CONFLICT")]
    BookingConflict = 3001,
    /// A concurrent booking won the write race; the client should reselect
    #[serde(rename = "BOOKING_RACE")]
    BookingRace = 3002,
    /// The requested booking status transition is not allowed
    #[serde(rename = "INVALID_STATUS_TRANSITION")]
    InvalidStatusTransition = 3003,

    // Internal (5000-5999)
    /// Database operation failed
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 5000,
    /// Configuration error encountered
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 5001,
    /// An internal server error occurred
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 5002,
}

impl ErrorCode {
    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::ResourceNotFound => 404,
            Self::NotWorkingDay => 404,
            Self::BookingConflict | Self::BookingRace | Self::InvalidStatusTransition => 409,
            Self::DatabaseError | Self::ConfigError | Self::InternalError => 500,
        }
    }

    /// Generic description of this error code
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "Request data is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::NotWorkingDay => "No availability on the requested date",
            Self::BookingConflict => "The requested time is already booked",
            Self::BookingRace => "The slot was taken by a concurrent booking",
            Self::InvalidStatusTransition => "The booking status change is not allowed",
            Self::DatabaseError => "Database operation failed",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal server error occurred",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Structured details attached to the response, if any
    pub details: serde_json::Value,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: serde_json::Value::Null,
            source: None,
        }
    }

    /// Attach structured details to the error response
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Concurrent booking race; tells the client to reselect a slot
    #[must_use]
    pub fn booking_race() -> Self {
        Self::new(
            ErrorCode::BookingRace,
            "The selected time was just booked by someone else, please pick another slot",
        )
        .with_details(serde_json::json!({ "retryable": true }))
    }

    /// Illegal booking status transition
    pub fn invalid_transition(from: impl fmt::Display, to: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidStatusTransition,
            format!("cannot change booking status from {from} to {to}"),
        )
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Conversion from the scheduling engine's error taxonomy
///
/// A closed day carries the resolution reason; a conflict carries the
/// conflicting interval as details so clients can render it, while the
/// message stays a single generic sentence.
impl From<SchedulingError> for AppError {
    fn from(error: SchedulingError) -> Self {
        match error {
            SchedulingError::NotWorkingDay(reason) => {
                Self::new(ErrorCode::NotWorkingDay, reason.message()).with_details(
                    serde_json::json!({ "reason": closed_reason_tag(reason) }),
                )
            }
            SchedulingError::Conflict {
                conflict_start,
                conflict_end,
            } => Self::new(
                ErrorCode::BookingConflict,
                "another booking exists in this time window",
            )
            .with_details(serde_json::json!({
                "conflict_start": conflict_start.format("%H:%M").to_string(),
                "conflict_end": conflict_end.format("%H:%M").to_string(),
            })),
            SchedulingError::InvalidWindow => {
                Self::invalid_input("booking end time must be after start time")
            }
        }
    }
}

const fn closed_reason_tag(reason: ClosedReason) -> &'static str {
    match reason {
        ClosedReason::Holiday => "holiday",
        ClosedReason::NotWorkingDay => "not_working_day",
        ClosedReason::InvalidWindow => "invalid_window",
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::new(ErrorCode::InternalError, error.to_string())
    }
}

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Body of an error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Structured details, omitted when empty
    #[serde(skip_serializing_if = "serde_json::Value::is_null", default)]
    pub details: serde_json::Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
                details: error.details,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(code = ?self.code, message = %self.message, "request failed");
        }
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}
