// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides temp-file database creation and salon/staff/service fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu
#![allow(dead_code, missing_docs, clippy::unwrap_used, clippy::expect_used)]

//! Shared test utilities for `randevu_server`
//!
//! Each test gets its own SQLite file inside a temp directory; the returned
//! `TempDir` must stay alive for as long as the database is in use.

use anyhow::Result;
use randevu_core::{Salon, ServiceOffering, Staff};
use randevu_server::database::{DatabaseProvider, SqliteDatabase};
use tempfile::TempDir;

/// Create a fresh, migrated database backed by a temp file
pub async fn create_test_database() -> Result<(SqliteDatabase, TempDir)> {
    let temp_dir = tempfile::tempdir()?;
    let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());
    let database = SqliteDatabase::new(&database_url).await?;
    Ok((database, temp_dir))
}

/// Create and persist a salon with default settings
pub async fn seed_salon(database: &SqliteDatabase) -> Result<Salon> {
    let salon = Salon::new("Salon Elif".to_owned(), "salon-elif".to_owned());
    database.create_salon(&salon).await?;
    Ok(salon)
}

/// Create and persist an active staff member with the default week
pub async fn seed_staff(database: &SqliteDatabase, salon: &Salon) -> Result<Staff> {
    let staff = Staff::new(salon.id, "Ayşe".to_owned());
    database.create_staff(&staff).await?;
    Ok(staff)
}

/// Create and persist an active service with the given duration
pub async fn seed_service(
    database: &SqliteDatabase,
    salon: &Salon,
    duration_minutes: u32,
) -> Result<ServiceOffering> {
    let mut service = ServiceOffering::new(salon.id, "Saç kesimi".to_owned(), 350.0);
    service.duration_minutes = duration_minutes;
    database.create_service(&service).await?;
    Ok(service)
}
