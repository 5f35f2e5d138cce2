//! Note categories, the static billing tables, and tier resolution.
//!
//! The two tables are matched differently:
//!
//! - **Progress notes** use a nearest ceiling: the first row whose billing
//!   maximum is at least the duration.
//! - **Consults** use exact ranges: the first row whose inclusive
//!   `[min, max]` window contains the duration.
//!
//! Row order is significant. Both scans take the first qualifying row in
//! ascending table order.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::clock::ClockTime;
use crate::error::{BillingError, UnknownNoteCategory};

/// Longest billable progress-note session, in minutes.
pub const PROGRESS_NOTE_MAXIMUM_MINUTES: u32 = 165;
/// Shortest billable consult session, in minutes.
pub const CONSULT_MINIMUM_MINUTES: u32 = 61;
/// Longest billable consult session, in minutes.
pub const CONSULT_MAXIMUM_MINUTES: u32 = 180;
/// Calls billed when the progress-note table has no rows at all.
pub const DEFAULT_PROGRESS_NOTE_CALLS: u32 = 3;

// ── NoteCategory ────────────────────────────────────────────────────────────

/// Which kind of note is being billed. Selects the table and the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteCategory {
    #[default]
    ProgressNote,
    Consult,
}

impl NoteCategory {
    pub const ALL: [NoteCategory; 2] = [NoteCategory::ProgressNote, NoteCategory::Consult];

    /// Stable identifier (`"progress-note"`, `"consult"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteCategory::ProgressNote => "progress-note",
            NoteCategory::Consult => "consult",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            NoteCategory::ProgressNote => "Progress Note",
            NoteCategory::Consult => "Consult",
        }
    }

    /// Longest duration this category can bill.
    pub fn maximum_minutes(&self) -> u32 {
        match self {
            NoteCategory::ProgressNote => PROGRESS_NOTE_MAXIMUM_MINUTES,
            NoteCategory::Consult => CONSULT_MAXIMUM_MINUTES,
        }
    }
}

impl fmt::Display for NoteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteCategory {
    type Err = UnknownNoteCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "progress-note" | "progress_note" | "progressnote" | "progress" | "pn" => {
                Ok(NoteCategory::ProgressNote)
            }
            "consult" => Ok(NoteCategory::Consult),
            _ => Err(UnknownNoteCategory(s.trim().to_string())),
        }
    }
}

// ── Tier rows ───────────────────────────────────────────────────────────────

/// One progress-note row: sessions up to `billing_max_minutes` bill `calls`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ProgressNoteTier {
    /// Allotted billing time including documentation.
    pub billing_max_minutes: u32,
    /// Face-to-face time that earns this row.
    pub face_to_face_minutes: u32,
    pub calls: u32,
}

/// One consult row: sessions within `[min_minutes, max_minutes]` bill `calls`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ConsultTier {
    pub min_minutes: u32,
    pub max_minutes: u32,
    pub calls: u32,
}

impl ConsultTier {
    pub fn contains(&self, duration: u32) -> bool {
        (self.min_minutes..=self.max_minutes).contains(&duration)
    }
}

/// A row from either table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BillingTier {
    ProgressNote(ProgressNoteTier),
    Consult(ConsultTier),
}

impl BillingTier {
    pub fn calls(&self) -> u32 {
        match self {
            BillingTier::ProgressNote(tier) => tier.calls,
            BillingTier::Consult(tier) => tier.calls,
        }
    }

    /// Short description, e.g. `"Max: 45 min, Actual: 36 min"` or `"61-71 min"`.
    pub fn description(&self) -> String {
        match self {
            BillingTier::ProgressNote(tier) => format!(
                "Max: {} min, Actual: {} min",
                tier.billing_max_minutes, tier.face_to_face_minutes
            ),
            BillingTier::Consult(tier) => {
                format!("{}-{} min", tier.min_minutes, tier.max_minutes)
            }
        }
    }
}

impl From<ProgressNoteTier> for BillingTier {
    fn from(tier: ProgressNoteTier) -> Self {
        BillingTier::ProgressNote(tier)
    }
}

impl From<ConsultTier> for BillingTier {
    fn from(tier: ConsultTier) -> Self {
        BillingTier::Consult(tier)
    }
}

// ── Tables ──────────────────────────────────────────────────────────────────

const fn progress(
    billing_max_minutes: u32,
    face_to_face_minutes: u32,
    calls: u32,
) -> ProgressNoteTier {
    ProgressNoteTier {
        billing_max_minutes,
        face_to_face_minutes,
        calls,
    }
}

const fn consult(min_minutes: u32, max_minutes: u32, calls: u32) -> ConsultTier {
    ConsultTier {
        min_minutes,
        max_minutes,
        calls,
    }
}

/// Progress-note table, ascending by billing maximum.
pub const PROGRESS_NOTE_TIERS: &[ProgressNoteTier] = &[
    progress(30, 24, 3),
    progress(45, 36, 4),
    progress(60, 48, 5),
    progress(75, 60, 6),
    progress(90, 72, 7),
    progress(105, 84, 8),
    progress(120, 96, 9),
    progress(135, 108, 10),
    progress(150, 120, 11),
    progress(165, 132, 12),
];

/// Consult table, ascending and contiguous from 61 to 180 minutes.
pub const CONSULT_TIERS: &[ConsultTier] = &[
    consult(61, 71, 1),
    consult(72, 86, 2),
    consult(87, 101, 3),
    consult(102, 116, 4),
    consult(117, 131, 5),
    consult(132, 146, 6),
    consult(147, 161, 7),
    consult(162, 176, 8),
    consult(177, 180, 9),
];

/// The rows for `category`, in table order.
///
/// # Examples
///
/// ```
/// use billing_engine::tiers::{table_for, NoteCategory};
///
/// let table = table_for(NoteCategory::Consult);
/// assert_eq!(table.len(), 9);
/// assert_eq!(table[0].description(), "61-71 min");
/// ```
pub fn table_for(category: NoteCategory) -> Vec<BillingTier> {
    match category {
        NoteCategory::ProgressNote => PROGRESS_NOTE_TIERS
            .iter()
            .copied()
            .map(Into::into)
            .collect(),
        NoteCategory::Consult => CONSULT_TIERS.iter().copied().map(Into::into).collect(),
    }
}

// ── Resolution ──────────────────────────────────────────────────────────────

/// Calls billed for a duration, and the row that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierMatch {
    pub calls: u32,
    /// `None` only for the empty-table fallback.
    pub tier: Option<BillingTier>,
}

/// The first row above the current calls count, used for near-tier advisories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextTier {
    /// Face-to-face minutes (progress notes) or minimum minutes (consults).
    pub threshold_minutes: u32,
    pub calls: u32,
}

/// Minutes from `start` to `end` on the same day.
///
/// # Errors
///
/// Returns [`BillingError::StartAfterEnd`] if `end` is earlier than `start`.
/// Ranges crossing midnight are not supported.
pub fn duration_between(start: ClockTime, end: ClockTime) -> Result<u32, BillingError> {
    end.minutes_since_midnight()
        .checked_sub(start.minutes_since_midnight())
        .ok_or(BillingError::StartAfterEnd { start, end })
}

/// Check `duration` against the category's bounds and look up its tier.
///
/// # Errors
///
/// - [`BillingError::BelowConsultMinimum`] for consults under 61 minutes.
/// - [`BillingError::DurationExceedsMaximum`] above 165 (progress note) or
///   180 (consult) minutes.
/// - [`BillingError::NoMatchingConsultTier`] if an in-bounds consult duration
///   falls between rows.
pub fn resolve_tier(duration: u32, category: NoteCategory) -> Result<TierMatch, BillingError> {
    if category == NoteCategory::Consult && duration < CONSULT_MINIMUM_MINUTES {
        return Err(BillingError::BelowConsultMinimum { duration });
    }
    let maximum = category.maximum_minutes();
    if duration > maximum {
        return Err(BillingError::DurationExceedsMaximum { duration, maximum });
    }

    match category {
        NoteCategory::ProgressNote => Ok(match_progress_note(duration, PROGRESS_NOTE_TIERS)),
        NoteCategory::Consult => match_consult(duration, CONSULT_TIERS),
    }
}

/// Nearest ceiling on the billing maximum. Falls back to the first row, then
/// to [`DEFAULT_PROGRESS_NOTE_CALLS`] with no row when the table is empty.
fn match_progress_note(duration: u32, tiers: &[ProgressNoteTier]) -> TierMatch {
    let tier = tiers
        .iter()
        .find(|tier| tier.billing_max_minutes >= duration)
        .or_else(|| tiers.first());

    match tier {
        Some(tier) => TierMatch {
            calls: tier.calls,
            tier: Some((*tier).into()),
        },
        None => TierMatch {
            calls: DEFAULT_PROGRESS_NOTE_CALLS,
            tier: None,
        },
    }
}

fn match_consult(duration: u32, tiers: &[ConsultTier]) -> Result<TierMatch, BillingError> {
    tiers
        .iter()
        .find(|tier| tier.contains(duration))
        .map(|tier| TierMatch {
            calls: tier.calls,
            tier: Some((*tier).into()),
        })
        .ok_or(BillingError::NoMatchingConsultTier { duration })
}

/// The first row, in table order, billing more than `current_calls`.
pub fn next_tier(current_calls: u32, category: NoteCategory) -> Option<NextTier> {
    match category {
        NoteCategory::ProgressNote => PROGRESS_NOTE_TIERS
            .iter()
            .find(|tier| tier.calls > current_calls)
            .map(|tier| NextTier {
                threshold_minutes: tier.face_to_face_minutes,
                calls: tier.calls,
            }),
        NoteCategory::Consult => CONSULT_TIERS
            .iter()
            .find(|tier| tier.calls > current_calls)
            .map(|tier| NextTier {
                threshold_minutes: tier.min_minutes,
                calls: tier.calls,
            }),
    }
}
