// ABOUTME: Slot generator tiling an open window into fixed-duration candidates
// ABOUTME: Pure window-tiling primitive with optional inter-slot buffer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

use crate::scheduling::engine::Slot;
use chrono::{Duration, NaiveTime};

/// Upper bound on `duration + buffer`; anything that cannot repeat within a
/// single day produces no slots
const MINUTES_PER_DAY: u32 = 24 * 60;

/// Tile `[open, close)` into candidate slots of `duration_minutes` each,
/// separated by `buffer_minutes` of dead time
///
/// Starting at `open`, a slot `[cursor, cursor + duration)` is emitted while
/// it still fits entirely before `close`; the cursor then advances by
/// `duration + buffer`. Slots are back-to-back when the buffer is zero.
///
/// Degenerate inputs produce an empty result instead of looping or wrapping:
/// a zero duration, a `duration + buffer` of 24 hours or more (including
/// overflow), a window too short for one slot, and any slot whose arithmetic
/// would cross midnight all terminate generation. Knows nothing about
/// bookings.
#[must_use]
pub fn generate_slots(
    open: NaiveTime,
    close: NaiveTime,
    duration_minutes: u32,
    buffer_minutes: u32,
) -> Vec<Slot> {
    if duration_minutes == 0 {
        return Vec::new();
    }

    // NaiveTime arithmetic is modulo 24h, so a step of a day or more would
    // wrap around and fabricate slots. No such step fits a window anyway.
    let step_minutes = match duration_minutes.checked_add(buffer_minutes) {
        Some(total) if total < MINUTES_PER_DAY => total,
        _ => return Vec::new(),
    };

    let duration = Duration::minutes(i64::from(duration_minutes));
    let step = Duration::minutes(i64::from(step_minutes));

    let mut slots = Vec::new();
    let mut cursor = open;

    loop {
        // NaiveTime arithmetic wraps at midnight; a wrapped end lands before
        // the cursor and must end generation, not emit a bogus slot.
        let end = cursor + duration;
        if end < cursor || end > close {
            break;
        }

        slots.push(Slot {
            start_time: cursor,
            end_time: end,
        });

        let next = cursor + step;
        if next <= cursor {
            break;
        }
        cursor = next;
    }

    slots
}
