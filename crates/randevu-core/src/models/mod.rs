// ABOUTME: Domain models for the randevu booking platform
// ABOUTME: Re-exports typed ids, salon, staff, service, booking, and schedule types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

//! # Data Models
//!
//! Value types shared across the platform. All models are serde-serializable
//! and carry no behavior beyond construction helpers and small invariant
//! checks; the scheduling engine consumes them as plain data.

/// Typed UUID wrappers for salon, staff, service, booking, and customer ids
pub mod ids;

/// Booking record, status enum, and the status transition rules
pub mod booking;

/// Salon (tenant) model and per-salon settings
pub mod salon;

/// Weekly schedule, day windows, weekdays, and holiday sets
pub mod schedule;

/// Service offering model (name, price, duration)
pub mod service;

/// Staff member model with individual schedule and holiday calendar
pub mod staff;
