use billing_engine::NoteCategory;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "billcalc")]
#[command(version)]
#[command(about = "Convert a clock-time range into billable calls")]
#[command(after_help = "Examples:\n  \
    billcalc 09:00-09:45\n  \
    billcalc -c consult \"9:00 AM to 10:05 AM\"\n  \
    billcalc --table -c consult\n  \
    printf '0900-0945\\n1300-1430\\n' | billcalc --stdin --format json")]
pub struct Cli {
    /// Time range, e.g. "09:00-09:45", "9:00 AM to 10:30 AM" or "0900-0945"
    #[arg(required_unless_present_any = ["stdin", "table"], conflicts_with = "stdin")]
    pub range: Option<String>,

    /// Note category: progress-note or consult
    #[arg(short, long, default_value_t = NoteCategory::ProgressNote)]
    pub category: NoteCategory,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the billing table for the category and exit
    #[arg(long)]
    pub table: bool,

    /// Read one range per line from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Recalculate using the suggested range when a warning offers one
    #[arg(long)]
    pub apply_suggestions: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
