//! # billing-engine
//!
//! Deterministic billing-call computation for clinical time tracking.
//!
//! Given a human-entered clock-time range (`"09:00-09:45"`,
//! `"9:00 AM to 10:30 AM"`, `"0900-0945"`) and a note category, the engine
//! parses both times, derives the session length, looks up the billed calls
//! in a fixed table, and attaches advisory warnings. Every function is pure:
//! no I/O, no clock access, no shared mutable state.
//!
//! ## Modules
//!
//! - [`clock`] — `ClockTime` and the 12/24-hour time token parser
//! - [`range`] — Split a range string on `-` or ` to `
//! - [`tiers`] — Note categories, the two billing tables, tier resolution
//! - [`warnings`] — Near-next-tier and start-alignment advisories
//! - [`calculator`] — The [`calculate`] entry point and [`CalculationResult`]
//! - [`report`] — Plain-text rendering of results and tables
//! - [`error`] — Error types

pub mod calculator;
pub mod clock;
pub mod error;
pub mod range;
pub mod report;
pub mod tiers;
pub mod warnings;

pub use calculator::{calculate, CalculationResult};
pub use clock::{parse_clock_time, ClockTime};
pub use error::{BillingError, UnknownNoteCategory};
pub use range::{parse_range, split_range};
pub use tiers::{
    duration_between, next_tier, resolve_tier, table_for, BillingTier, ConsultTier, NextTier,
    NoteCategory, ProgressNoteTier, TierMatch, CONSULT_MAXIMUM_MINUTES, CONSULT_MINIMUM_MINUTES,
    CONSULT_TIERS, PROGRESS_NOTE_MAXIMUM_MINUTES, PROGRESS_NOTE_TIERS,
};
pub use warnings::{evaluate_warnings, Warning, WARNING_WINDOW_MINUTES};
