// ABOUTME: Public access-code generation for unauthenticated booking lookup
// ABOUTME: 8-character uppercase alphanumeric codes with a bounded uniqueness-retry budget
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

//! Booking access codes
//!
//! Every booking gets a short public code (e.g. `K7Q2M9XA`) that lets an
//! unauthenticated customer look up its status. Uniqueness is enforced by a
//! database constraint, not by polling: the caller generates a candidate,
//! attempts the insert, and regenerates only on an access-code constraint
//! violation, at most [`MAX_ATTEMPTS`] times.

use rand::Rng;

/// Length of a booking access code
pub const CODE_LENGTH: usize = 8;

/// Alphabet for access codes: uppercase letters and digits
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Insert attempts before giving up on finding an unused code
///
/// 36^8 possible codes make consecutive collisions vanishingly unlikely at
/// any realistic booking volume; the cap exists so adversarial or corrupted
/// data can never turn generation into an unbounded loop.
pub const MAX_ATTEMPTS: u32 = 5;

/// Generate a random candidate access code
#[must_use]
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}

/// Whether `code` has the shape of a valid access code
#[must_use]
pub fn is_valid_format(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}
