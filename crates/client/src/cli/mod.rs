//! CLI command definitions.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use leavecal_core::calendar::EventId;
use leavecal_engine::ConflictPolicy;

/// Developer CLI for the leave calendar collaborators.
#[derive(Debug, Parser)]
#[command(name = "leavecal-client")]
#[command(about = "Query holidays and reschedule leave requests", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "LEAVECAL_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[arg(long, env = "LEAVECAL_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the holidays of a year.
    Holidays {
        /// Calendar year.
        year: i32,
    },
    /// Check a date range against the holiday calendar.
    Check(CheckArgs),
    /// Move a leave request to a new date range.
    Reschedule {
        /// Leave request ID.
        id: EventId,
        #[command(flatten)]
        check: CheckArgs,
        /// Submit without checking holidays first.
        #[arg(long)]
        skip_check: bool,
    },
}

/// A date range plus the policy for an unreachable holiday service.
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// First day (YYYY-MM-DD).
    #[arg(long)]
    pub start: NaiveDate,

    /// Last day, inclusive (YYYY-MM-DD).
    #[arg(long)]
    pub end: NaiveDate,

    /// What to do when holidays cannot be fetched (`open` or `closed`).
    #[arg(long, env = "LEAVECAL_CONFLICT_POLICY", default_value = "open")]
    pub policy: ConflictPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reschedule() {
        let cli = Cli::try_parse_from([
            "leavecal-client",
            "--format",
            "json",
            "reschedule",
            "7",
            "--start",
            "2025-03-10",
            "--end",
            "2025-03-15",
            "--policy",
            "closed",
        ])
        .unwrap();

        let Commands::Reschedule {
            id,
            check,
            skip_check,
        } = cli.command
        else {
            panic!("expected reschedule");
        };
        assert_eq!(id, EventId::new("7"));
        assert_eq!(check.start, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(check.end, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        assert_eq!(check.policy, ConflictPolicy::FailClosed);
        assert!(!skip_check);
    }

    #[test]
    fn test_rejects_bad_date() {
        assert!(Cli::try_parse_from([
            "leavecal-client",
            "check",
            "--start",
            "10/03/2025",
            "--end",
            "2025-03-15",
        ])
        .is_err());
    }
}
