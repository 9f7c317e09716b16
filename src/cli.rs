use std::path::PathBuf;

use chrono::{FixedOffset, NaiveDate, NaiveTime};
use clap::{ArgAction, Parser};

use crate::cmd::Commands;
use crate::fields::{parse_date, parse_priority, parse_time, Priority};

/// Interactive task list with coloured priority and due-date marks.
/// Storage defaults to ./tasklist.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "tasklist", version, about = "Interactive terminal task list")]
pub struct Cli {
    /// Path to the JSON task file.
    #[arg(long, global = true, default_value = "tasklist.json")]
    pub db: PathBuf,

    /// UTC offset used to decide which day is "today", e.g. -08:00 or +05:30.
    #[arg(long, global = true, default_value = "-08:00", allow_hyphen_values = true, value_parser = offset_arg)]
    pub utc_offset: FixedOffset,

    /// Log more to stderr (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Defaults to the interactive prompt.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

pub fn offset_arg(s: &str) -> Result<FixedOffset, String> {
    s.parse::<FixedOffset>()
        .map_err(|e| format!("expected an offset like -08:00 ({e})"))
}

pub fn priority_arg(s: &str) -> Result<Priority, String> {
    parse_priority(s).ok_or_else(|| format!("expected one of C, H, N, L, got '{s}'"))
}

pub fn date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("expected a valid yyyy-mm-dd date, got '{s}'"))
}

pub fn time_arg(s: &str) -> Result<NaiveTime, String> {
    parse_time(s).ok_or_else(|| format!("expected a valid hh:mm time, got '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tasklist"]).unwrap();
        assert_eq!(cli.db, PathBuf::from("tasklist.json"));
        assert_eq!(cli.utc_offset, FixedOffset::west_opt(8 * 3600).unwrap());
        assert_eq!(cli.verbose, 0);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["tasklist", "print", "--utc-offset", "+05:30", "-vv"]).unwrap();
        assert_eq!(cli.utc_offset, FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap());
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Print)));
    }

    #[test]
    fn test_add_arguments_are_validated() {
        let cli = Cli::try_parse_from([
            "tasklist", "add", "Buy milk", "--priority", "c", "--date", "2024-3-1", "--time", "9:00",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add { text, priority, date, time }) => {
                assert_eq!(text, "Buy milk");
                assert_eq!(priority, Priority::Critical);
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
                assert_eq!(time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
            }
            _ => panic!("expected add"),
        }

        let bad = Cli::try_parse_from([
            "tasklist", "add", "x", "--priority", "Q", "--date", "2024-03-01", "--time", "09:00",
        ]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_edit_needs_a_field() {
        assert!(Cli::try_parse_from(["tasklist", "edit", "1"]).is_err());
        assert!(Cli::try_parse_from(["tasklist", "edit", "1", "--time", "10:15"]).is_ok());
    }
}
