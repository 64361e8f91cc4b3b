// ABOUTME: Weekly working schedule types for staff and salons
// ABOUTME: Weekday enum, DayWindow open/close hours, WeeklySchedule mapping, and HolidaySet
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Day of the week, Monday = 0 convention throughout the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    /// Monday (index 0)
    Monday,
    /// Tuesday (index 1)
    Tuesday,
    /// Wednesday (index 2)
    Wednesday,
    /// Thursday (index 3)
    Thursday,
    /// Friday (index 4)
    Friday,
    /// Saturday (index 5)
    Saturday,
    /// Sunday (index 6)
    Sunday,
}

impl Weekday {
    /// All seven weekdays in Monday-first order
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Weekday of a calendar date
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        // chrono's num_days_from_monday already uses the Monday = 0 convention
        Self::ALL[date.weekday().num_days_from_monday() as usize]
    }

    /// Zero-based index, Monday = 0 through Sunday = 6
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase English day name (`"monday"` .. `"sunday"`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monday" => Ok(Self::Monday),
            "tuesday" => Ok(Self::Tuesday),
            "wednesday" => Ok(Self::Wednesday),
            "thursday" => Ok(Self::Thursday),
            "friday" => Ok(Self::Friday),
            "saturday" => Ok(Self::Saturday),
            "sunday" => Ok(Self::Sunday),
            other => Err(format!("unknown weekday: {other}")),
        }
    }
}

/// Open/close window for a single weekday
///
/// When `is_active` is false the day contributes no slots regardless of the
/// times present. `open_time >= close_time` is not structurally rejected;
/// the scheduling engine treats such a window as closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    /// Whether the staff member works this day at all
    pub is_active: bool,
    /// Start of working hours (local wall-clock time)
    pub open_time: NaiveTime,
    /// End of working hours (local wall-clock time)
    pub close_time: NaiveTime,
}

impl DayWindow {
    /// Active window with the given open/close times
    #[must_use]
    pub const fn open(open_time: NaiveTime, close_time: NaiveTime) -> Self {
        Self {
            is_active: true,
            open_time,
            close_time,
        }
    }

    /// Inactive window; times are kept so re-activating restores them
    #[must_use]
    pub const fn closed(open_time: NaiveTime, close_time: NaiveTime) -> Self {
        Self {
            is_active: false,
            open_time,
            close_time,
        }
    }
}

/// Recurring weekly availability: a fixed 7-entry mapping from weekday to
/// [`DayWindow`]
///
/// The original system stored schedules as free-form JSON keyed by day-name
/// strings; this is the typed replacement, so a misspelled day name is a
/// deserialization error instead of a silent "never works" schedule. The
/// serialized form stays wire-compatible with the old blobs:
///
/// ```json
/// { "monday": { "is_active": true, "open_time": "09:00:00", "close_time": "18:00:00" }, ... }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    /// Monday working hours
    pub monday: DayWindow,
    /// Tuesday working hours
    pub tuesday: DayWindow,
    /// Wednesday working hours
    pub wednesday: DayWindow,
    /// Thursday working hours
    pub thursday: DayWindow,
    /// Friday working hours
    pub friday: DayWindow,
    /// Saturday working hours
    pub saturday: DayWindow,
    /// Sunday working hours
    pub sunday: DayWindow,
}

impl WeeklySchedule {
    /// Window for the given weekday
    #[must_use]
    pub const fn day(&self, weekday: Weekday) -> DayWindow {
        match weekday {
            Weekday::Monday => self.monday,
            Weekday::Tuesday => self.tuesday,
            Weekday::Wednesday => self.wednesday,
            Weekday::Thursday => self.thursday,
            Weekday::Friday => self.friday,
            Weekday::Saturday => self.saturday,
            Weekday::Sunday => self.sunday,
        }
    }

    /// Replace the window for the given weekday
    pub fn set_day(&mut self, weekday: Weekday, window: DayWindow) {
        match weekday {
            Weekday::Monday => self.monday = window,
            Weekday::Tuesday => self.tuesday = window,
            Weekday::Wednesday => self.wednesday = window,
            Weekday::Thursday => self.thursday = window,
            Weekday::Friday => self.friday = window,
            Weekday::Saturday => self.saturday = window,
            Weekday::Sunday => self.sunday = window,
        }
    }
}

impl Default for WeeklySchedule {
    /// Default salon week: Mon-Fri 09:00-18:00, Sat 09:00-16:00, Sun closed
    fn default() -> Self {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default();
        let sixteen = NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default();
        let eighteen = NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default();
        let weekday = DayWindow::open(nine, eighteen);

        Self {
            monday: weekday,
            tuesday: weekday,
            wednesday: weekday,
            thursday: weekday,
            friday: weekday,
            saturday: DayWindow::open(nine, sixteen),
            sunday: DayWindow::closed(nine, eighteen),
        }
    }
}

/// Calendar dates on which a staff member is fully unavailable, overriding
/// the weekly schedule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidaySet(BTreeSet<NaiveDate>);

impl HolidaySet {
    /// Empty holiday set
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Whether the given date is a holiday
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    /// Add a holiday date
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.0.insert(date)
    }

    /// Remove a holiday date
    pub fn remove(&mut self, date: NaiveDate) -> bool {
        self.0.remove(&date)
    }

    /// Number of holiday dates
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the holiday dates in ascending order
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
