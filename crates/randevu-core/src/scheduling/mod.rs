// ABOUTME: Scheduling engine for the randevu booking platform
// ABOUTME: Day resolution, slot generation, and availability/conflict computation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

//! # Scheduling
//!
//! Three cooperating pieces, pure computation throughout:
//!
//! - [`calendar`]: resolves whether a staff member works on a given date and,
//!   if so, the day's open/close window (weekly schedule + holiday overrides).
//! - [`slots`]: tiles an open window into fixed-duration candidate slots.
//! - [`engine`]: combines both with the set of existing bookings to answer
//!   "which slots are bookable" and "does this proposed booking conflict".
//!
//! All interval logic is half-open: a booking occupies `[start, end)`, so
//! adjacent bookings may touch without conflicting.
//!
//! None of this suspends, blocks, or performs I/O, so it is safe to call from
//! any number of concurrent tasks. The check-then-act race between conflict
//! validation and booking insertion is closed at the persistence boundary,
//! not here; the engine's contract is correctness given a consistent snapshot
//! of bookings.

/// Resolves a (date, schedule, holidays) triple to an open window or a closed day
pub mod calendar;

/// Combines day resolution, slot generation, and bookings into availability answers
pub mod engine;

/// Tiles an open window into fixed-duration candidate slots
pub mod slots;
