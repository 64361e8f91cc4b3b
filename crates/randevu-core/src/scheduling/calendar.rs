// ABOUTME: Schedule calendar resolving a date against weekly hours and holidays
// ABOUTME: DayResolution and ClosedReason types plus the pure resolve_day function
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

use crate::models::schedule::{HolidaySet, Weekday, WeeklySchedule};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a date yields no working window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosedReason {
    /// The date is in the staff member's holiday set
    Holiday,
    /// The weekday is marked inactive in the weekly schedule
    NotWorkingDay,
    /// The weekday is active but `open_time >= close_time`
    InvalidWindow,
}

impl ClosedReason {
    /// Human-readable message for API responses
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Holiday => "staff member is on holiday",
            Self::NotWorkingDay => "staff member does not work on this day",
            Self::InvalidWindow => "working hours for this day are invalid",
        }
    }
}

impl fmt::Display for ClosedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of resolving a date against a schedule and holiday set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayResolution {
    /// The staff member works this date within `[open_time, close_time)`
    Open {
        /// Start of working hours
        open_time: NaiveTime,
        /// End of working hours
        close_time: NaiveTime,
    },
    /// No working window on this date
    Closed(ClosedReason),
}

impl DayResolution {
    /// Whether the day resolved to an open window
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

/// Resolve whether the staff member works on `date` and with which window
///
/// Precedence: a holiday closes the day outright, then an inactive weekday,
/// then a degenerate window (`open_time >= close_time`). The degenerate case
/// is treated as closed rather than rejected so that malformed schedule data
/// can never crash an availability query.
#[must_use]
pub fn resolve_day(
    date: NaiveDate,
    schedule: &WeeklySchedule,
    holidays: &HolidaySet,
) -> DayResolution {
    if holidays.contains(date) {
        return DayResolution::Closed(ClosedReason::Holiday);
    }

    let window = schedule.day(Weekday::from_date(date));
    if !window.is_active {
        return DayResolution::Closed(ClosedReason::NotWorkingDay);
    }

    if window.open_time >= window.close_time {
        return DayResolution::Closed(ClosedReason::InvalidWindow);
    }

    DayResolution::Open {
        open_time: window.open_time,
        close_time: window.close_time,
    }
}
