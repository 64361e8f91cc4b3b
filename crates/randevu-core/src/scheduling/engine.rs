// ABOUTME: Availability engine combining day resolution, slot generation, and bookings
// ABOUTME: SlotRequest/Slot/Booking value objects, SchedulingError, and the two public operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

use crate::models::booking::BookingStatus;
use crate::models::schedule::{HolidaySet, WeeklySchedule};
use crate::scheduling::calendar::{self, ClosedReason, DayResolution};
use crate::scheduling::slots;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A candidate or confirmed-available booking window
///
/// Half-open: the end instant itself is not included, so a slot ending at
/// 09:30 does not conflict with one starting at 09:30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Slot start (inclusive)
    pub start_time: NaiveTime,
    /// Slot end (exclusive)
    pub end_time: NaiveTime,
}

/// Minimal view of a booking as the engine consumes it
///
/// The persistence layer projects its richer records down to this; the engine
/// never sees customer data or ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Booking {
    /// Calendar date of the booking
    pub date: NaiveDate,
    /// Booking start (inclusive)
    pub start_time: NaiveTime,
    /// Booking end (exclusive)
    pub end_time: NaiveTime,
    /// Lifecycle status; canceled bookings never block
    pub status: BookingStatus,
}

/// Everything needed to answer one availability query
#[derive(Debug, Clone)]
pub struct SlotRequest {
    /// Date being queried
    pub date: NaiveDate,
    /// Staff member's recurring weekly hours
    pub schedule: WeeklySchedule,
    /// Staff member's holiday dates
    pub holidays: HolidaySet,
    /// Length of each offered slot in minutes (salon-wide grid setting)
    pub slot_duration_minutes: u32,
    /// Dead time between slots in minutes
    pub buffer_minutes: u32,
    /// Already-existing bookings; entries for other dates are ignored
    pub existing_bookings: Vec<Booking>,
}

/// Errors produced by the scheduling engine
///
/// All of these are expected, recoverable conditions reported to the caller;
/// none are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SchedulingError {
    /// The staff member has no working window on the requested date
    #[error("no availability: {0}")]
    NotWorkingDay(ClosedReason),

    /// The proposed window overlaps an existing booking
    #[error("requested time overlaps an existing booking ({conflict_start}-{conflict_end})")]
    Conflict {
        /// Start of the conflicting existing booking
        conflict_start: NaiveTime,
        /// End of the conflicting existing booking
        conflict_end: NaiveTime,
    },

    /// The proposed window itself is degenerate (`end <= start`)
    #[error("booking end time must be after start time")]
    InvalidWindow,
}

/// Half-open interval overlap test
///
/// `[a_start, a_end)` and `[b_start, b_end)` overlap iff each starts before
/// the other ends. Touching endpoints do not overlap.
#[must_use]
pub fn overlaps(a_start: NaiveTime, a_end: NaiveTime, b_start: NaiveTime, b_end: NaiveTime) -> bool {
    a_start < b_end && b_start < a_end
}

/// Compute the bookable slots for a (staff, date) pair
///
/// Resolves the day against the weekly schedule and holidays, tiles the open
/// window, and drops candidates that overlap any non-canceled booking on the
/// same date. Slot order is chronological as generated. A fully booked day is
/// an empty success, distinct from the closed-day error.
pub fn get_available_slots(request: &SlotRequest) -> Result<Vec<Slot>, SchedulingError> {
    let (open_time, close_time) =
        match calendar::resolve_day(request.date, &request.schedule, &request.holidays) {
            DayResolution::Open {
                open_time,
                close_time,
            } => (open_time, close_time),
            DayResolution::Closed(reason) => return Err(SchedulingError::NotWorkingDay(reason)),
        };

    let busy = busy_intervals(&request.existing_bookings, request.date);

    let available = slots::generate_slots(
        open_time,
        close_time,
        request.slot_duration_minutes,
        request.buffer_minutes,
    )
    .into_iter()
    .filter(|slot| {
        !busy
            .iter()
            .any(|&(start, end)| overlaps(slot.start_time, slot.end_time, start, end))
    })
    .collect();

    Ok(available)
}

/// Validate a proposed booking window against existing bookings
///
/// The proposed window is arbitrary; it need not align with the generated
/// slot grid. The first conflicting booking is reported. Callers must pair
/// this optimistic check with an exclusive write path (unique constraint or
/// serialization point) when persisting, since two concurrent requests can
/// both pass validation against a snapshot that contains neither.
pub fn validate_booking_window(
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    existing_bookings: &[Booking],
) -> Result<(), SchedulingError> {
    if end_time <= start_time {
        return Err(SchedulingError::InvalidWindow);
    }

    for (busy_start, busy_end) in busy_intervals(existing_bookings, date) {
        if overlaps(start_time, end_time, busy_start, busy_end) {
            return Err(SchedulingError::Conflict {
                conflict_start: busy_start,
                conflict_end: busy_end,
            });
        }
    }

    Ok(())
}

/// Time ranges occupied by non-canceled bookings on `date`
fn busy_intervals(bookings: &[Booking], date: NaiveDate) -> Vec<(NaiveTime, NaiveTime)> {
    bookings
        .iter()
        .filter(|booking| booking.date == date && booking.status.is_blocking())
        .map(|booking| (booking.start_time, booking.end_time))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::{DayWindow, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn booking(d: NaiveDate, start: NaiveTime, end: NaiveTime, status: BookingStatus) -> Booking {
        Booking {
            date: d,
            start_time: start,
            end_time: end,
            status,
        }
    }

    // 2025-06-02 is a Monday; the default week opens 09:00-18:00.
    fn monday_request(bookings: Vec<Booking>) -> SlotRequest {
        SlotRequest {
            date: date(2025, 6, 2),
            schedule: WeeklySchedule::default(),
            holidays: HolidaySet::new(),
            slot_duration_minutes: 30,
            buffer_minutes: 0,
            existing_bookings: bookings,
        }
    }

    #[test]
    fn test_empty_day_yields_full_grid() {
        let slots = get_available_slots(&monday_request(Vec::new())).unwrap();
        assert_eq!(slots.len(), 18);
        assert_eq!(slots[0].start_time, time(9, 0));
        assert_eq!(slots[17].end_time, time(18, 0));
    }

    #[test]
    fn test_confirmed_booking_removes_exactly_its_slot() {
        let day = date(2025, 6, 2);
        let slots = get_available_slots(&monday_request(vec![booking(
            day,
            time(10, 0),
            time(10, 30),
            BookingStatus::Confirmed,
        )]))
        .unwrap();

        assert_eq!(slots.len(), 17);
        assert!(!slots
            .iter()
            .any(|slot| slot.start_time == time(10, 0)));
        // Order preserved around the gap
        assert_eq!(slots[1].start_time, time(9, 30));
        assert_eq!(slots[2].start_time, time(10, 30));
    }

    #[test]
    fn test_canceled_booking_does_not_block() {
        let day = date(2025, 6, 2);
        let slots = get_available_slots(&monday_request(vec![booking(
            day,
            time(10, 0),
            time(10, 30),
            BookingStatus::Canceled,
        )]))
        .unwrap();
        assert_eq!(slots.len(), 18);
        assert!(slots.iter().any(|slot| slot.start_time == time(10, 0)));
    }

    #[test]
    fn test_pending_booking_still_holds_the_slot() {
        let day = date(2025, 6, 2);
        let slots = get_available_slots(&monday_request(vec![booking(
            day,
            time(10, 0),
            time(10, 30),
            BookingStatus::Pending,
        )]))
        .unwrap();
        assert_eq!(slots.len(), 17);
    }

    #[test]
    fn test_bookings_on_other_dates_are_ignored() {
        let slots = get_available_slots(&monday_request(vec![booking(
            date(2025, 6, 3),
            time(10, 0),
            time(10, 30),
            BookingStatus::Confirmed,
        )]))
        .unwrap();
        assert_eq!(slots.len(), 18);
    }

    #[test]
    fn test_holiday_short_circuits_regardless_of_schedule() {
        let mut request = monday_request(Vec::new());
        let mut holidays = HolidaySet::new();
        holidays.insert(request.date);
        request.holidays = holidays;

        assert_eq!(
            get_available_slots(&request),
            Err(SchedulingError::NotWorkingDay(ClosedReason::Holiday))
        );
    }

    #[test]
    fn test_inactive_day_is_error_not_empty_success() {
        let mut request = monday_request(Vec::new());
        request
            .schedule
            .set_day(Weekday::Monday, DayWindow::closed(time(9, 0), time(18, 0)));

        assert_eq!(
            get_available_slots(&request),
            Err(SchedulingError::NotWorkingDay(ClosedReason::NotWorkingDay))
        );
    }

    #[test]
    fn test_fully_booked_day_is_empty_success() {
        let day = date(2025, 6, 2);
        let slots = get_available_slots(&monday_request(vec![booking(
            day,
            time(9, 0),
            time(18, 0),
            BookingStatus::Confirmed,
        )]))
        .unwrap();
        assert!(slots.is_empty());
    }

    #[test]
    fn test_overlap_predicate_symmetry_and_self() {
        let cases = [
            (time(9, 0), time(9, 30), time(9, 15), time(9, 45)),
            (time(9, 0), time(10, 0), time(9, 30), time(9, 45)),
            (time(9, 0), time(9, 30), time(10, 0), time(10, 30)),
        ];
        for (a_start, a_end, b_start, b_end) in cases {
            assert_eq!(
                overlaps(a_start, a_end, b_start, b_end),
                overlaps(b_start, b_end, a_start, a_end)
            );
        }
        assert!(overlaps(time(9, 0), time(9, 30), time(9, 0), time(9, 30)));
    }

    #[test]
    fn test_touching_boundary_is_not_conflict() {
        let day = date(2025, 6, 2);
        let existing = vec![booking(
            day,
            time(9, 30),
            time(10, 0),
            BookingStatus::Confirmed,
        )];
        assert!(validate_booking_window(day, time(9, 0), time(9, 30), &existing).is_ok());
        assert!(validate_booking_window(day, time(10, 0), time(10, 30), &existing).is_ok());
    }

    #[test]
    fn test_partial_overlap_is_conflict() {
        let day = date(2025, 6, 2);
        let existing = vec![booking(
            day,
            time(9, 0),
            time(9, 30),
            BookingStatus::Confirmed,
        )];
        assert_eq!(
            validate_booking_window(day, time(9, 15), time(9, 45), &existing),
            Err(SchedulingError::Conflict {
                conflict_start: time(9, 0),
                conflict_end: time(9, 30),
            })
        );
    }

    #[test]
    fn test_off_grid_proposal_is_checked_as_a_whole() {
        // A 45-minute service booked at 09:10 must conflict with a booking
        // covering 09:40-10:10 even though neither aligns to a 30-minute grid.
        let day = date(2025, 6, 2);
        let existing = vec![booking(
            day,
            time(9, 40),
            time(10, 10),
            BookingStatus::Confirmed,
        )];
        assert!(validate_booking_window(day, time(9, 10), time(9, 55), &existing).is_err());
    }

    #[test]
    fn test_canceled_booking_exempt_from_conflict() {
        let day = date(2025, 6, 2);
        let existing = vec![booking(
            day,
            time(9, 0),
            time(9, 30),
            BookingStatus::Canceled,
        )];
        assert!(validate_booking_window(day, time(9, 0), time(9, 30), &existing).is_ok());
    }

    #[test]
    fn test_degenerate_proposal_rejected() {
        let day = date(2025, 6, 2);
        assert_eq!(
            validate_booking_window(day, time(9, 30), time(9, 30), &[]),
            Err(SchedulingError::InvalidWindow)
        );
        assert_eq!(
            validate_booking_window(day, time(10, 0), time(9, 0), &[]),
            Err(SchedulingError::InvalidWindow)
        );
    }
}
