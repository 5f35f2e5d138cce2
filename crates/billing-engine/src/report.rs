//! Plain-text rendering of results, warnings and billing tables.
//!
//! Everything here is a pure `String` builder so any front end (terminal,
//! GUI, clipboard) can reuse the same wording.

use crate::calculator::CalculationResult;
use crate::tiers::{table_for, BillingTier, NoteCategory};
use crate::warnings::Warning;

const RULE_WIDTH: usize = 60;
const MATCH_MARKER: &str = ">>> ";
const NO_MARKER: &str = "    ";

/// Dialog-style title for a warning.
pub fn warning_title(warning: &Warning) -> &'static str {
    match warning {
        Warning::NearNextTier { .. } => "Near Next Tier",
        Warning::StartMisaligned { .. } => "Start Time Not Aligned",
    }
}

/// Human-readable explanation of a warning.
///
/// # Examples
///
/// ```
/// use billing_engine::report::warning_message;
/// use billing_engine::{ClockTime, Warning};
///
/// let warning = Warning::NearNextTier {
///     current_calls: 3,
///     next_calls: 4,
///     minutes_to_next: 1,
///     suggested_end_time: ClockTime::new(9, 36).unwrap(),
/// };
/// assert!(warning_message(&warning).starts_with("You're only 1 minute away"));
/// ```
pub fn warning_message(warning: &Warning) -> String {
    match warning {
        Warning::NearNextTier {
            current_calls,
            next_calls,
            minutes_to_next,
            suggested_end_time,
        } => {
            let unit = if *minutes_to_next == 1 {
                "minute"
            } else {
                "minutes"
            };
            format!(
                "You're only {minutes_to_next} {unit} away from the next tier \
                 ({next_calls} calls). Current: {current_calls} calls. \
                 Suggested end time: {suggested_end_time}"
            )
        }
        Warning::StartMisaligned {
            suggested_start_time,
        } => format!(
            "Start time should be on the hour (e.g., 09:00) or half-hour (e.g., 09:30). \
             Suggested start time: {suggested_start_time}"
        ),
    }
}

/// The "Calculation Details" block. `suggested_range` is shown when present.
pub fn render_details(result: &CalculationResult, suggested_range: Option<&str>) -> String {
    let mut lines = vec![
        "Calculation Details:".to_string(),
        format!("Duration: {} minutes", result.duration),
        format!("Time Range: {} - {}", result.start, result.end),
    ];
    if let Some(tier) = &result.matched_tier {
        lines.push(format!("Matched Tier: {}", tier.description()));
    }
    if let Some(range) = suggested_range {
        lines.push(String::new());
        lines.push(format!("Suggested Time Range: {range}"));
    }
    join_lines(&lines)
}

/// The billing table for `category`, marking rows that bill the same calls
/// as `matched`.
pub fn render_table(category: NoteCategory, matched: Option<&BillingTier>) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let headers = match category {
        NoteCategory::ProgressNote => ("With Documentation", "Face to Face", "Calls"),
        NoteCategory::Consult => ("Min Minutes", "Max Minutes", "Calls"),
    };

    let mut lines = vec![
        format!("Billing Table ({}):", category.label()),
        rule.clone(),
        table_row("", headers.0, headers.1, headers.2),
        rule,
    ];
    lines.extend(table_for(category).into_iter().map(|tier| {
        let is_match = matched.is_some_and(|m| m.calls() == tier.calls());
        let marker = if is_match { MATCH_MARKER } else { NO_MARKER };
        let (first, second) = match tier {
            BillingTier::ProgressNote(row) => (row.billing_max_minutes, row.face_to_face_minutes),
            BillingTier::Consult(row) => (row.min_minutes, row.max_minutes),
        };
        table_row(
            marker,
            &first.to_string(),
            &second.to_string(),
            &tier.calls().to_string(),
        )
    }));
    join_lines(&lines)
}

fn table_row(marker: &str, first: &str, second: &str, third: &str) -> String {
    format!("{marker}{first:<20} {second:<20} {third:<10}")
        .trim_end()
        .to_string()
}

/// Newline-terminated lines.
fn join_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Full report: summary line, details, warnings, and the table.
///
/// The suggested range shown in the details comes from
/// [`CalculationResult::preferred_warning`].
pub fn render_report(result: &CalculationResult) -> String {
    let suggested = result
        .preferred_warning()
        .map(|warning| result.suggested_range(warning));

    let mut out = format!("{}\n\n", result.summary());
    out.push_str(&render_details(result, suggested.as_deref()));
    if !result.warnings.is_empty() {
        let warnings: Vec<String> = result
            .warnings
            .iter()
            .map(|warning| {
                format!(
                    "warning: {}: {}",
                    warning_title(warning),
                    warning_message(warning)
                )
            })
            .collect();
        out.push('\n');
        out.push_str(&join_lines(&warnings));
    }
    out.push('\n');
    out.push_str(&render_table(result.category, result.matched_tier.as_ref()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::calculate;
    use crate::clock::ClockTime;

    #[test]
    fn test_warning_message_pluralizes() {
        let near = |minutes_to_next| Warning::NearNextTier {
            current_calls: 3,
            next_calls: 4,
            minutes_to_next,
            suggested_end_time: ClockTime::new(9, 36).unwrap(),
        };
        assert!(warning_message(&near(1)).contains("only 1 minute away"));
        assert!(warning_message(&near(6)).contains("only 6 minutes away"));
        assert!(warning_message(&near(6)).ends_with("Suggested end time: 09:36"));
    }

    #[test]
    fn test_alignment_message() {
        let warning = Warning::StartMisaligned {
            suggested_start_time: ClockTime::new(9, 0).unwrap(),
        };
        assert_eq!(warning_title(&warning), "Start Time Not Aligned");
        assert!(warning_message(&warning).ends_with("Suggested start time: 09:00"));
    }

    #[test]
    fn test_details_block() {
        let result = calculate("09:00-09:45", NoteCategory::ProgressNote).unwrap();
        let details = render_details(&result, None);
        assert_eq!(
            details,
            "Calculation Details:\n\
             Duration: 45 minutes\n\
             Time Range: 09:00 - 09:45\n\
             Matched Tier: Max: 45 min, Actual: 36 min\n"
        );
    }

    #[test]
    fn test_details_with_suggestion() {
        let result = calculate("09:00-09:30", NoteCategory::ProgressNote).unwrap();
        let details = render_details(&result, Some("09:00-09:36"));
        assert!(details.ends_with("\nSuggested Time Range: 09:00-09:36\n"));
    }

    #[test]
    fn test_progress_table_marks_matched_row() {
        let result = calculate("09:00-09:45", NoteCategory::ProgressNote).unwrap();
        let table = render_table(NoteCategory::ProgressNote, result.matched_tier.as_ref());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Billing Table (Progress Note):");
        assert_eq!(lines[1], "-".repeat(60));
        assert!(lines[2].starts_with("With Documentation"));
        assert_eq!(lines.len(), 4 + 10);
        let marked: Vec<&&str> = lines.iter().filter(|l| l.starts_with(">>> ")).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].starts_with(">>> 45 "));
        assert!(marked[0].ends_with(" 4"));
    }

    #[test]
    fn test_consult_table_without_match() {
        let table = render_table(NoteCategory::Consult, None);
        assert!(table.contains("Min Minutes"));
        assert!(!table.contains(">>>"));
        assert!(table.lines().any(|l| l.starts_with("    177 ")));
    }

    #[test]
    fn test_full_report_sections() {
        let result = calculate("09:10-09:40", NoteCategory::ProgressNote).unwrap();
        let report = render_report(&result);
        assert!(report.starts_with("09:10-09:40, 3 calls\n"));
        assert!(report.contains("Suggested Time Range: 09:00-09:40"));
        assert!(report.contains("warning: Near Next Tier: "));
        assert!(report.contains("warning: Start Time Not Aligned: "));
        assert!(report.contains("Billing Table (Progress Note):"));
    }

    #[test]
    fn test_full_report_layout() {
        let quiet = calculate("09:00-12:00", NoteCategory::Consult).unwrap();
        let report = render_report(&quiet);
        assert!(report.starts_with("09:00-12:00, 9 calls\n\nCalculation Details:\n"));
        assert!(report.contains("Time Range: 09:00 - 12:00\nMatched Tier: "));
        assert!(report.contains(" min\n\nBilling Table (Consult):\n"));
        assert!(report.ends_with("9\n"));

        let warned = calculate("09:10-09:40", NoteCategory::ProgressNote).unwrap();
        let report = render_report(&warned);
        assert!(report.contains("Suggested Time Range: 09:00-09:40\n\nwarning: "));
        assert!(report.contains("\n\nBilling Table (Progress Note):\n"));
        assert_eq!(report.matches("warning: ").count(), 2);
    }
}
