//! The `calculate` entry point: time-range text in, billed calls out.

use serde::Serialize;

use crate::clock::ClockTime;
use crate::error::BillingError;
use crate::range::parse_range;
use crate::tiers::{duration_between, resolve_tier, BillingTier, NoteCategory};
use crate::warnings::{evaluate_warnings, Warning};

/// The outcome of one successful calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationResult {
    /// Billed calls.
    pub calls: u32,
    /// Session length in minutes.
    pub duration: u32,
    pub start: ClockTime,
    pub end: ClockTime,
    /// The table row that produced `calls`.
    pub matched_tier: Option<BillingTier>,
    pub category: NoteCategory,
    /// Advisories, near-next-tier first.
    pub warnings: Vec<Warning>,
}

impl CalculationResult {
    /// The normalized range, e.g. `"09:00-09:45"`.
    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }

    /// One-line summary, e.g. `"09:00-09:45, 4 calls"`.
    pub fn summary(&self) -> String {
        format!("{}, {} calls", self.time_range(), self.calls)
    }

    /// The warning to surface first: a misaligned start, else a near-next-tier.
    pub fn preferred_warning(&self) -> Option<&Warning> {
        self.warnings
            .iter()
            .find(|w| matches!(w, Warning::StartMisaligned { .. }))
            .or_else(|| {
                self.warnings
                    .iter()
                    .find(|w| matches!(w, Warning::NearNextTier { .. }))
            })
    }

    /// The range this result would have if `warning`'s suggestion were applied.
    pub fn suggested_range(&self, warning: &Warning) -> String {
        match warning {
            Warning::NearNextTier {
                suggested_end_time, ..
            } => format!("{}-{}", self.start, suggested_end_time),
            Warning::StartMisaligned {
                suggested_start_time,
            } => format!("{}-{}", suggested_start_time, self.end),
        }
    }
}

/// Convert a time-range string into billed calls for `category`.
///
/// # Arguments
///
/// * `input` — A range such as `"09:00-09:45"`, `"9:00 AM to 10:30 AM"`,
///   `"0900-0945"` or `"9:00AM-10:30AM"`
/// * `category` — Selects the billing table and duration bounds
///
/// # Errors
///
/// - [`BillingError::InvalidFormat`] if no `-` or ` to ` separator is found.
/// - [`BillingError::InvalidTime`] if either side is not a valid time.
/// - [`BillingError::StartAfterEnd`] if the end is earlier than the start.
/// - [`BillingError::BelowConsultMinimum`] for consults under 61 minutes.
/// - [`BillingError::DurationExceedsMaximum`] above the category's ceiling.
/// - [`BillingError::NoMatchingConsultTier`] if a consult duration falls
///   between table rows.
///
/// # Examples
///
/// ```
/// use billing_engine::{calculate, NoteCategory};
///
/// let result = calculate("09:00-09:45", NoteCategory::ProgressNote).unwrap();
/// assert_eq!(result.calls, 4);
/// assert_eq!(result.duration, 45);
/// assert_eq!(result.summary(), "09:00-09:45, 4 calls");
/// ```
pub fn calculate(input: &str, category: NoteCategory) -> Result<CalculationResult, BillingError> {
    let (start, end) = parse_range(input)?;
    let duration = duration_between(start, end)?;
    let matched = resolve_tier(duration, category)?;
    let warnings = evaluate_warnings(duration, matched.calls, start, category);

    Ok(CalculationResult {
        calls: matched.calls,
        duration,
        start,
        end,
        matched_tier: matched.tier,
        category,
        warnings,
    })
}
