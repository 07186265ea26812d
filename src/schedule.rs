//! Frequency code → display time slots.
//!
//! Static presentation data. No calendar math and no interval enforcement.

use crate::models::Frequency;

/// Slot shown for as-needed medications.
pub const AS_NEEDED_SLOT: &str = "As needed";
/// Slot shown for every-other-day medications.
pub const ALTERNATE_DAYS_SLOT: &str = "08:00 (alt days)";
/// Single slot used when a label prefers bedtime dosing.
pub const BEDTIME_SLOT: &str = "22:00";

/// Canonical time slots for a frequency code. Never empty.
pub fn slots_for(frequency: Frequency) -> &'static [&'static str] {
    match frequency {
        Frequency::Qd => &["08:00"],
        Frequency::Bid => &["08:00", "20:00"],
        Frequency::Tid => &["08:00", "14:00", "20:00"],
        Frequency::Qid => &["06:00", "12:00", "18:00", "22:00"],
        Frequency::Qod => &[ALTERNATE_DAYS_SLOT],
        Frequency::Prn => &[AS_NEEDED_SLOT],
    }
}

/// True when the slot is a plain `HH:MM` clock time.
pub fn is_clock_time(slot: &str) -> bool {
    let bytes = slot.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit)
}
