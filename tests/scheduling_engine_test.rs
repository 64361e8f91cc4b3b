// ABOUTME: Scenario tests driving the scheduling engine through its public API
// ABOUTME: Composed availability/validation sequences a booking day actually goes through
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use chrono::{NaiveDate, NaiveTime};
use randevu_core::scheduling::engine::{get_available_slots, validate_booking_window};
use randevu_core::{
    Booking, BookingStatus, ClosedReason, DayWindow, HolidaySet, SchedulingError, SlotRequest,
    Weekday, WeeklySchedule,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn request_for(date: NaiveDate, bookings: Vec<Booking>) -> SlotRequest {
    SlotRequest {
        date,
        schedule: WeeklySchedule::default(),
        holidays: HolidaySet::new(),
        slot_duration_minutes: 30,
        buffer_minutes: 0,
        existing_bookings: bookings,
    }
}

fn blocking(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Booking {
    Booking {
        date,
        start_time: start,
        end_time: end,
        status: BookingStatus::Confirmed,
    }
}

// Every slot the engine offers must itself pass validation against the same
// booking set, otherwise customers get offered times they cannot book.
#[test]
fn test_offered_slots_are_always_bookable() {
    let monday = date(2025, 6, 2);
    let bookings = vec![
        blocking(monday, time(9, 0), time(9, 45)),
        blocking(monday, time(11, 10), time(12, 5)),
        Booking {
            date: monday,
            start_time: time(14, 0),
            end_time: time(14, 30),
            status: BookingStatus::Pending,
        },
        Booking {
            date: monday,
            start_time: time(15, 0),
            end_time: time(15, 30),
            status: BookingStatus::Canceled,
        },
    ];

    let slots = get_available_slots(&request_for(monday, bookings.clone())).unwrap();
    assert!(!slots.is_empty());

    for slot in &slots {
        validate_booking_window(monday, slot.start_time, slot.end_time, &bookings)
            .unwrap_or_else(|e| panic!("offered slot {slot:?} failed validation: {e}"));
    }
}

// A day fills up booking by booking; each successful booking removes at least
// the slot it covers, and the engine never resurrects a taken time.
#[test]
fn test_day_fills_up_monotonically() {
    let monday = date(2025, 6, 2);
    let mut bookings = Vec::new();
    let mut previous_count = get_available_slots(&request_for(monday, bookings.clone()))
        .unwrap()
        .len();
    assert_eq!(previous_count, 18);

    while previous_count > 0 {
        let slots = get_available_slots(&request_for(monday, bookings.clone())).unwrap();
        let next = slots[0];
        validate_booking_window(monday, next.start_time, next.end_time, &bookings).unwrap();
        bookings.push(blocking(monday, next.start_time, next.end_time));

        let count = get_available_slots(&request_for(monday, bookings.clone()))
            .unwrap()
            .len();
        assert!(count < previous_count);
        previous_count = count;
    }

    assert_eq!(bookings.len(), 18);
}

// Canceling releases exactly the canceled window and nothing else.
#[test]
fn test_cancelation_restores_only_its_window() {
    let monday = date(2025, 6, 2);
    let mut bookings = vec![
        blocking(monday, time(10, 0), time(10, 30)),
        blocking(monday, time(13, 0), time(13, 30)),
    ];
    let before = get_available_slots(&request_for(monday, bookings.clone())).unwrap();
    assert_eq!(before.len(), 16);

    bookings[0].status = BookingStatus::Canceled;
    let after = get_available_slots(&request_for(monday, bookings.clone())).unwrap();
    assert_eq!(after.len(), 17);
    assert!(after.iter().any(|s| s.start_time == time(10, 0)));
    assert!(!after.iter().any(|s| s.start_time == time(13, 0)));
}

// A service longer than the grid removes every slot it touches, and the
// validation path agrees with the availability path about it.
#[test]
fn test_long_appointment_consistent_across_both_operations() {
    let monday = date(2025, 6, 2);
    let long = blocking(monday, time(9, 0), time(9, 45));

    let slots = get_available_slots(&request_for(monday, vec![long])).unwrap();
    assert!(!slots.iter().any(|s| s.start_time == time(9, 0)));
    assert!(!slots.iter().any(|s| s.start_time == time(9, 30)));
    assert_eq!(slots[0].start_time, time(10, 0));

    assert!(validate_booking_window(monday, time(9, 30), time(10, 0), &[long]).is_err());
    assert!(validate_booking_window(monday, time(9, 45), time(10, 15), &[long]).is_ok());
}

// Closed-day reasons come through with their precedence: holiday beats an
// inactive weekday, which beats a malformed window.
#[test]
fn test_closed_day_reason_precedence() {
    let monday = date(2025, 6, 2);

    let mut request = request_for(monday, Vec::new());
    request
        .schedule
        .set_day(Weekday::Monday, DayWindow::closed(time(9, 0), time(18, 0)));
    request.holidays.insert(monday);
    assert_eq!(
        get_available_slots(&request),
        Err(SchedulingError::NotWorkingDay(ClosedReason::Holiday))
    );

    let mut request = request_for(monday, Vec::new());
    request
        .schedule
        .set_day(Weekday::Monday, DayWindow::closed(time(18, 0), time(9, 0)));
    assert_eq!(
        get_available_slots(&request),
        Err(SchedulingError::NotWorkingDay(ClosedReason::NotWorkingDay))
    );

    let mut request = request_for(monday, Vec::new());
    request
        .schedule
        .set_day(Weekday::Monday, DayWindow::open(time(18, 0), time(9, 0)));
    assert_eq!(
        get_available_slots(&request),
        Err(SchedulingError::NotWorkingDay(ClosedReason::InvalidWindow))
    );
}

// A buffer thins the grid but availability filtering still works on it.
#[test]
fn test_buffered_grid_with_bookings() {
    let monday = date(2025, 6, 2);
    let mut request = request_for(
        monday,
        vec![blocking(monday, time(9, 45), time(10, 30))],
    );
    request.slot_duration_minutes = 45;
    request.buffer_minutes = 15;

    // 09:00-18:00 tiles to 09:00, 10:00, 11:00, ... 17:00 starts; the booking
    // overlaps only the 10:00 candidate.
    let slots = get_available_slots(&request).unwrap();
    assert_eq!(slots.len(), 8);
    assert!(!slots.iter().any(|s| s.start_time == time(10, 0)));
    assert!(slots.iter().any(|s| s.start_time == time(9, 0)));
    assert!(slots.iter().any(|s| s.start_time == time(11, 0)));
}

// Saturday uses its own shorter window from the default week.
#[test]
fn test_weekday_specific_windows() {
    // 2025-06-07 is a Saturday; default week opens 09:00-16:00 there.
    let saturday = date(2025, 6, 7);
    let slots = get_available_slots(&request_for(saturday, Vec::new())).unwrap();
    assert_eq!(slots.len(), 14);
    assert_eq!(slots.last().unwrap().end_time, time(16, 0));

    // 2025-06-08 is a Sunday, closed by default.
    let sunday = date(2025, 6, 8);
    assert_eq!(
        get_available_slots(&request_for(sunday, Vec::new())),
        Err(SchedulingError::NotWorkingDay(ClosedReason::NotWorkingDay))
    );
}
