// ABOUTME: End-to-end booking workflow tests over a real SQLite database
// ABOUTME: Availability, booking creation, races, access codes, and status transitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

mod common;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, Utc};
use randevu_core::{BookingId, BookingRecord, BookingStatus};
use randevu_server::access_code;
use randevu_server::database::{BookingFilter, DatabaseProvider, InsertOutcome, SqliteDatabase};
use randevu_server::errors::ErrorCode;
use randevu_server::workflow::{BookingWorkflow, NewBookingRequest};
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

// 2025-06-02 is a Monday; the default week opens 09:00-18:00.
const MONDAY: (i32, u32, u32) = (2025, 6, 2);

fn workflow_over(database: &SqliteDatabase) -> BookingWorkflow {
    BookingWorkflow::new(Arc::new(database.clone()))
}

fn booking_request(
    salon: &randevu_core::Salon,
    staff: &randevu_core::Staff,
    service: &randevu_core::ServiceOffering,
    start: NaiveTime,
) -> NewBookingRequest {
    NewBookingRequest {
        salon_id: salon.id,
        staff_id: staff.id,
        service_id: service.id,
        customer_id: None,
        customer_name: "Deniz".to_owned(),
        customer_phone: "+90 555 000 0000".to_owned(),
        customer_email: None,
        date: date(MONDAY.0, MONDAY.1, MONDAY.2),
        start_time: start,
        notes: None,
    }
}

#[tokio::test]
async fn test_availability_on_empty_day_is_full_grid() -> Result<()> {
    let (database, _guard) = common::create_test_database().await?;
    let salon = common::seed_salon(&database).await?;
    let staff = common::seed_staff(&database, &salon).await?;
    let workflow = workflow_over(&database);

    let response = workflow
        .available_slots(salon.id, staff.id, date(MONDAY.0, MONDAY.1, MONDAY.2))
        .await?;

    assert_eq!(response.slots.len(), 18);
    assert_eq!(response.slots[0].start_time, "09:00");
    assert_eq!(response.slots[17].end_time, "18:00");
    assert_eq!(response.staff_name, staff.name);
    Ok(())
}

#[tokio::test]
async fn test_availability_on_holiday_is_not_working_day() -> Result<()> {
    let (database, _guard) = common::create_test_database().await?;
    let salon = common::seed_salon(&database).await?;
    let mut staff = randevu_core::Staff::new(salon.id, "Ayşe".to_owned());
    staff
        .holiday_dates
        .insert(date(MONDAY.0, MONDAY.1, MONDAY.2));
    database.create_staff(&staff).await?;
    let workflow = workflow_over(&database);

    let error = workflow
        .available_slots(salon.id, staff.id, date(MONDAY.0, MONDAY.1, MONDAY.2))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::NotWorkingDay);
    assert_eq!(error.details["reason"], "holiday");
    Ok(())
}

#[tokio::test]
async fn test_availability_rejects_staff_from_another_salon() -> Result<()> {
    let (database, _guard) = common::create_test_database().await?;
    let salon = common::seed_salon(&database).await?;
    let other = randevu_core::Salon::new("Kuaför Merve".to_owned(), "kuafor-merve".to_owned());
    database.create_salon(&other).await?;
    let staff = common::seed_staff(&database, &other).await?;
    let workflow = workflow_over(&database);

    let error = workflow
        .available_slots(salon.id, staff.id, date(MONDAY.0, MONDAY.1, MONDAY.2))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_create_booking_then_slot_disappears() -> Result<()> {
    let (database, _guard) = common::create_test_database().await?;
    let salon = common::seed_salon(&database).await?;
    let staff = common::seed_staff(&database, &salon).await?;
    let service = common::seed_service(&database, &salon, 30).await?;
    let workflow = workflow_over(&database);

    let booking = workflow
        .create_booking(booking_request(&salon, &staff, &service, time(10, 0)))
        .await?;

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.end_time, time(10, 30));
    assert!(access_code::is_valid_format(&booking.access_code));

    let response = workflow
        .available_slots(salon.id, staff.id, booking.date)
        .await?;
    assert_eq!(response.slots.len(), 17);
    assert!(!response.slots.iter().any(|s| s.start_time == "10:00"));
    Ok(())
}

#[tokio::test]
async fn test_long_service_blocks_every_grid_slot_it_covers() -> Result<()> {
    let (database, _guard) = common::create_test_database().await?;
    let salon = common::seed_salon(&database).await?;
    let staff = common::seed_staff(&database, &salon).await?;
    let service = common::seed_service(&database, &salon, 45).await?;
    let workflow = workflow_over(&database);

    let booking = workflow
        .create_booking(booking_request(&salon, &staff, &service, time(9, 0)))
        .await?;
    assert_eq!(booking.end_time, time(9, 45));

    // The 45-minute appointment covers both the 09:00 and 09:30 grid slots.
    let response = workflow
        .available_slots(salon.id, staff.id, booking.date)
        .await?;
    assert_eq!(response.slots.len(), 16);
    assert!(!response.slots.iter().any(|s| s.start_time == "09:00"));
    assert!(!response.slots.iter().any(|s| s.start_time == "09:30"));
    assert!(response.slots.iter().any(|s| s.start_time == "10:00"));
    Ok(())
}

#[tokio::test]
async fn test_double_booking_same_slot_is_conflict() -> Result<()> {
    let (database, _guard) = common::create_test_database().await?;
    let salon = common::seed_salon(&database).await?;
    let staff = common::seed_staff(&database, &salon).await?;
    let service = common::seed_service(&database, &salon, 30).await?;
    let workflow = workflow_over(&database);

    workflow
        .create_booking(booking_request(&salon, &staff, &service, time(10, 0)))
        .await?;

    let error = workflow
        .create_booking(booking_request(&salon, &staff, &service, time(10, 0)))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::BookingConflict);
    assert_eq!(error.details["conflict_start"], "10:00");
    Ok(())
}

#[tokio::test]
async fn test_touching_bookings_do_not_conflict() -> Result<()> {
    let (database, _guard) = common::create_test_database().await?;
    let salon = common::seed_salon(&database).await?;
    let staff = common::seed_staff(&database, &salon).await?;
    let service = common::seed_service(&database, &salon, 30).await?;
    let workflow = workflow_over(&database);

    workflow
        .create_booking(booking_request(&salon, &staff, &service, time(10, 0)))
        .await?;
    let second = workflow
        .create_booking(booking_request(&salon, &staff, &service, time(10, 30)))
        .await?;

    assert_eq!(second.start_time, time(10, 30));
    Ok(())
}

#[tokio::test]
async fn test_insert_race_closed_at_write_time() -> Result<()> {
    let (database, _guard) = common::create_test_database().await?;
    let salon = common::seed_salon(&database).await?;
    let staff = common::seed_staff(&database, &salon).await?;
    let service = common::seed_service(&database, &salon, 30).await?;
    let workflow = workflow_over(&database);

    let winner = workflow
        .create_booking(booking_request(&salon, &staff, &service, time(11, 0)))
        .await?;

    // A concurrent request that passed validation against the old snapshot
    // is rejected by the insert's own overlap re-check.
    let now = Utc::now();
    let loser = BookingRecord {
        id: BookingId::new(),
        access_code: access_code::generate(),
        created_at: now,
        updated_at: now,
        ..winner.clone()
    };
    assert_eq!(
        database.insert_booking(&loser).await?,
        InsertOutcome::SlotTaken
    );

    // The same holds for a window that merely overlaps at a different start,
    // which no start-time uniqueness alone would catch.
    let overlapping = BookingRecord {
        id: BookingId::new(),
        start_time: time(11, 15),
        end_time: time(11, 45),
        access_code: access_code::generate(),
        ..loser.clone()
    };
    assert_eq!(
        database.insert_booking(&overlapping).await?,
        InsertOutcome::SlotTaken
    );

    // Same access code on a free slot is the access-code constraint.
    let collider = BookingRecord {
        id: BookingId::new(),
        start_time: time(12, 0),
        end_time: time(12, 30),
        access_code: winner.access_code.clone(),
        ..loser
    };
    assert_eq!(
        database.insert_booking(&collider).await?,
        InsertOutcome::AccessCodeTaken
    );
    Ok(())
}

#[tokio::test]
async fn test_inactive_salon_accepts_no_traffic() -> Result<()> {
    let (database, _guard) = common::create_test_database().await?;
    let mut salon = randevu_core::Salon::new("Salon Elif".to_owned(), "salon-elif".to_owned());
    salon.is_active = false;
    database.create_salon(&salon).await?;
    let staff = common::seed_staff(&database, &salon).await?;
    let service = common::seed_service(&database, &salon, 30).await?;
    let workflow = workflow_over(&database);

    let error = workflow
        .available_slots(salon.id, staff.id, date(MONDAY.0, MONDAY.1, MONDAY.2))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    let error = workflow
        .create_booking(booking_request(&salon, &staff, &service, time(10, 0)))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_deleting_a_booking_removes_it_entirely() -> Result<()> {
    let (database, _guard) = common::create_test_database().await?;
    let salon = common::seed_salon(&database).await?;
    let staff = common::seed_staff(&database, &salon).await?;
    let service = common::seed_service(&database, &salon, 30).await?;
    let workflow = workflow_over(&database);

    let booking = workflow
        .create_booking(booking_request(&salon, &staff, &service, time(10, 0)))
        .await?;

    workflow.delete_booking(booking.id).await?;

    assert!(database.get_booking(booking.id).await?.is_none());
    let error = workflow
        .booking_by_code(&booking.access_code)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);

    // Deletion frees the slot and the access code for reuse.
    let response = workflow
        .available_slots(salon.id, staff.id, booking.date)
        .await?;
    assert!(response.slots.iter().any(|s| s.start_time == "10:00"));

    let error = workflow.delete_booking(booking.id).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_canceling_frees_the_slot_for_rebooking() -> Result<()> {
    let (database, _guard) = common::create_test_database().await?;
    let salon = common::seed_salon(&database).await?;
    let staff = common::seed_staff(&database, &salon).await?;
    let service = common::seed_service(&database, &salon, 30).await?;
    let workflow = workflow_over(&database);

    let booking = workflow
        .create_booking(booking_request(&salon, &staff, &service, time(14, 0)))
        .await?;

    let canceled = workflow
        .update_status(booking.id, BookingStatus::Canceled)
        .await?;
    assert_eq!(canceled.status, BookingStatus::Canceled);

    let response = workflow
        .available_slots(salon.id, staff.id, booking.date)
        .await?;
    assert!(response.slots.iter().any(|s| s.start_time == "14:00"));

    // The insert's overlap re-check ignores canceled rows, so rebooking commits.
    let rebooked = workflow
        .create_booking(booking_request(&salon, &staff, &service, time(14, 0)))
        .await?;
    assert_eq!(rebooked.start_time, time(14, 0));
    Ok(())
}

#[tokio::test]
async fn test_access_code_lookup() -> Result<()> {
    let (database, _guard) = common::create_test_database().await?;
    let salon = common::seed_salon(&database).await?;
    let staff = common::seed_staff(&database, &salon).await?;
    let service = common::seed_service(&database, &salon, 30).await?;
    let workflow = workflow_over(&database);

    let booking = workflow
        .create_booking(booking_request(&salon, &staff, &service, time(10, 0)))
        .await?;

    let found = workflow.booking_by_code(&booking.access_code).await?;
    assert_eq!(found.id, booking.id);

    let malformed = workflow.booking_by_code("nope").await.unwrap_err();
    assert_eq!(malformed.code, ErrorCode::InvalidInput);

    let missing = workflow.booking_by_code("ZZZZ9999").await.unwrap_err();
    assert_eq!(missing.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_status_state_machine_enforced() -> Result<()> {
    let (database, _guard) = common::create_test_database().await?;
    let salon = common::seed_salon(&database).await?;
    let staff = common::seed_staff(&database, &salon).await?;
    let service = common::seed_service(&database, &salon, 30).await?;
    let workflow = workflow_over(&database);

    let booking = workflow
        .create_booking(booking_request(&salon, &staff, &service, time(10, 0)))
        .await?;

    // pending -> completed skips confirmation and is rejected.
    let error = workflow
        .update_status(booking.id, BookingStatus::Completed)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidStatusTransition);

    let confirmed = workflow
        .update_status(booking.id, BookingStatus::Confirmed)
        .await?;
    assert_eq!(confirmed.status, BookingStatus::Confirmed);

    let completed = workflow
        .update_status(booking.id, BookingStatus::Completed)
        .await?;
    assert_eq!(completed.status, BookingStatus::Completed);

    // completed is terminal.
    let error = workflow
        .update_status(booking.id, BookingStatus::Canceled)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidStatusTransition);
    Ok(())
}

#[tokio::test]
async fn test_online_booking_gate() -> Result<()> {
    let (database, _guard) = common::create_test_database().await?;
    let mut salon = randevu_core::Salon::new("Salon Elif".to_owned(), "salon-elif".to_owned());
    salon.settings.allow_online_booking = false;
    database.create_salon(&salon).await?;
    let staff = common::seed_staff(&database, &salon).await?;
    let service = common::seed_service(&database, &salon, 30).await?;
    let workflow = workflow_over(&database);

    let error = workflow
        .create_booking(booking_request(&salon, &staff, &service, time(10, 0)))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_salon_booking_list_filters() -> Result<()> {
    let (database, _guard) = common::create_test_database().await?;
    let salon = common::seed_salon(&database).await?;
    let staff = common::seed_staff(&database, &salon).await?;
    let other_staff = common::seed_staff(&database, &salon).await?;
    let service = common::seed_service(&database, &salon, 30).await?;
    let workflow = workflow_over(&database);

    let first = workflow
        .create_booking(booking_request(&salon, &staff, &service, time(9, 0)))
        .await?;
    workflow
        .create_booking(booking_request(&salon, &other_staff, &service, time(9, 0)))
        .await?;
    workflow
        .update_status(first.id, BookingStatus::Confirmed)
        .await?;

    let all = workflow
        .salon_bookings(salon.id, BookingFilter::default())
        .await?;
    assert_eq!(all.len(), 2);

    let by_staff = workflow
        .salon_bookings(
            salon.id,
            BookingFilter {
                staff_id: Some(staff.id),
                ..BookingFilter::default()
            },
        )
        .await?;
    assert_eq!(by_staff.len(), 1);
    assert_eq!(by_staff[0].id, first.id);

    let confirmed = workflow
        .salon_bookings(
            salon.id,
            BookingFilter {
                status: Some(BookingStatus::Confirmed),
                ..BookingFilter::default()
            },
        )
        .await?;
    assert_eq!(confirmed.len(), 1);

    let on_date = workflow
        .salon_bookings(
            salon.id,
            BookingFilter {
                date: Some(date(MONDAY.0, MONDAY.1, MONDAY.2)),
                ..BookingFilter::default()
            },
        )
        .await?;
    assert_eq!(on_date.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_booking_survives_storage_round_trip() -> Result<()> {
    let (database, _guard) = common::create_test_database().await?;
    let salon = common::seed_salon(&database).await?;
    let staff = common::seed_staff(&database, &salon).await?;
    let service = common::seed_service(&database, &salon, 30).await?;
    let workflow = workflow_over(&database);

    let mut request = booking_request(&salon, &staff, &service, time(10, 0));
    request.notes = Some("pencere kenarı".to_owned());
    let created = workflow.create_booking(request).await?;

    let loaded = database.get_booking(created.id).await?.unwrap();
    assert_eq!(loaded.start_time, created.start_time);
    assert_eq!(loaded.end_time, created.end_time);
    assert_eq!(loaded.status, created.status);
    assert_eq!(loaded.access_code, created.access_code);
    assert_eq!(loaded.notes.as_deref(), Some("pencere kenarı"));
    Ok(())
}
