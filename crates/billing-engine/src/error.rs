//! Error types for billing-engine operations.

use thiserror::Error;

use crate::clock::ClockTime;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    #[error(
        "Invalid format. Use HH:MM-HH:MM or HH:MM to HH:MM, or 12h format \
         (e.g., 09:00-10:30, 09:00 to 10:30, 9:00 AM to 10:30 AM)"
    )]
    InvalidFormat,

    #[error(
        "Invalid time value '{0}'. Use 24h format (00:00-23:59 or 0000-2359) \
         or 12h format (1:00 AM-11:59 PM, with or without colons)"
    )]
    InvalidTime(String),

    #[error("Start time {start} must be before end time {end}")]
    StartAfterEnd { start: ClockTime, end: ClockTime },

    #[error(
        "Consult notes require a duration that matches the billing table \
         (61-180 minutes), got {duration} minutes"
    )]
    BelowConsultMinimum { duration: u32 },

    #[error("Duration of {duration} minutes exceeds maximum of {maximum} minutes")]
    DurationExceedsMaximum { duration: u32, maximum: u32 },

    /// A duration inside the consult bounds fell between table rows.
    #[error("No consult billing tier matches a duration of {duration} minutes")]
    NoMatchingConsultTier { duration: u32 },
}

impl BillingError {
    /// Stable snake_case identifier, used for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            BillingError::InvalidFormat => "invalid_format",
            BillingError::InvalidTime(_) => "invalid_time",
            BillingError::StartAfterEnd { .. } => "start_after_end",
            BillingError::BelowConsultMinimum { .. } => "below_consult_minimum",
            BillingError::DurationExceedsMaximum { .. } => "duration_exceeds_maximum",
            BillingError::NoMatchingConsultTier { .. } => "no_matching_consult_tier",
        }
    }
}

/// A note category name that is neither a progress note nor a consult.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown note category '{0}' (expected progress-note or consult)")]
pub struct UnknownNoteCategory(pub String);

pub type Result<T> = std::result::Result<T, BillingError>;
