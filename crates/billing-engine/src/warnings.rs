//! Advisory warnings attached to a resolved calculation.
//!
//! Warnings never change the billed calls. They point out a session that is
//! a few minutes short of the next tier, and (for progress notes) a start
//! time that is not on the hour or half hour.

use serde::Serialize;

use crate::clock::ClockTime;
use crate::tiers::{next_tier, NoteCategory};

/// How close (in minutes) a session must be to the next tier to be flagged.
pub const WARNING_WINDOW_MINUTES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Extending the session to `suggested_end_time` would bill `next_calls`.
    NearNextTier {
        current_calls: u32,
        next_calls: u32,
        minutes_to_next: u32,
        suggested_end_time: ClockTime,
    },
    /// The start minute is not `:00` or `:30`.
    StartMisaligned { suggested_start_time: ClockTime },
}

/// Compute every applicable warning for a resolved calculation.
///
/// The near-next-tier warning, if any, comes first.
pub fn evaluate_warnings(
    duration: u32,
    calls: u32,
    start: ClockTime,
    category: NoteCategory,
) -> Vec<Warning> {
    let mut warnings = Vec::new();
    if let Some(warning) = near_next_tier(duration, calls, start, category) {
        warnings.push(warning);
    }
    if category == NoteCategory::ProgressNote {
        if let Some(warning) = start_alignment(start) {
            warnings.push(warning);
        }
    }
    warnings
}

/// Flag a session that ends within [`WARNING_WINDOW_MINUTES`] of the next
/// tier's threshold. Nothing is raised at the top tier.
pub fn near_next_tier(
    duration: u32,
    calls: u32,
    start: ClockTime,
    category: NoteCategory,
) -> Option<Warning> {
    let next = next_tier(calls, category)?;
    let minutes_to_next = next.threshold_minutes.checked_sub(duration)?;
    if minutes_to_next == 0 || minutes_to_next > WARNING_WINDOW_MINUTES {
        return None;
    }
    Some(Warning::NearNextTier {
        current_calls: calls,
        next_calls: next.calls,
        minutes_to_next,
        suggested_end_time: start.add_minutes(next.threshold_minutes),
    })
}

/// Suggest the nearest hour or half hour for a misaligned start.
///
/// Minutes 0-14 round down to the hour, 15-44 to the half hour, and 45-59 up
/// to the next hour (wrapping 23:45 to 00:00).
pub fn start_alignment(start: ClockTime) -> Option<Warning> {
    let (hour, minute) = (start.hour(), start.minute());
    if minute == 0 || minute == 30 {
        return None;
    }
    let suggested = match minute {
        0..15 => ClockTime::new(hour, 0),
        15..45 => ClockTime::new(hour, 30),
        _ => ClockTime::new((hour + 1) % 24, 0),
    }?;
    Some(Warning::StartMisaligned {
        suggested_start_time: suggested,
    })
}
