//! # Tasklist
//!
//! A small terminal task list. Each task has a free-text body, a priority code
//! (C, H, N, L) and a due date and time. The list is shown as a bordered table
//! with two coloured marks per task:
//!
//! - **P**: priority. Red for critical, yellow for high, green for normal,
//!   blue for low.
//! - **D**: due date. Green while it is ahead, yellow on the day, red once
//!   overdue. "Today" is taken at a fixed UTC offset (`--utc-offset`,
//!   default `-08:00`).
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive prompt: add, print, edit, delete, end
//! tasklist
//!
//! # One-shot commands against the same file
//! tasklist add "Buy milk" --priority C --date 2024-03-01 --time 09:00
//! tasklist print
//! tasklist edit 1 --time 10:30
//! tasklist delete 1
//! ```
//!
//! Tasks are kept in `./tasklist.json` (or `--db <PATH>`) as a flat JSON array.

use clap::Parser;
use log::{debug, LevelFilter};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

pub mod classify;
pub mod cli;
pub mod cmd;
pub mod db;
pub mod error;
pub mod fields;
pub mod prompt;
pub mod table;
pub mod task;

use classify::today_in;
use cli::Cli;
use cmd::*;
use db::Database;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Completions don't touch the task file.
    if let Some(Commands::Completions { shell }) = cli.command {
        cmd_completions(shell);
        return;
    }

    let db_path = cli.db;
    let mut db = match Database::load(&db_path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", db_path.display());
            std::process::exit(1);
        }
    };
    let today = today_in(cli.utc_offset);
    debug!("Today is {today} at offset {}", cli.utc_offset);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run(db, &db_path, today),
        Commands::Print => cmd_print(&db, today),
        Commands::Add { text, priority, date, time } =>
            cmd_add(&mut db, &db_path, text, priority, date, time),
        Commands::Edit { position, priority, date, time, task } =>
            cmd_edit(&mut db, &db_path, position, priority, date, time, task),
        Commands::Delete { position } => cmd_delete(&mut db, &db_path, position),
        Commands::Completions { .. } => unreachable!("completions handled above"),
    }
}

/// Diagnostics go to stderr so they never mix with the table on stdout.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    // Only fails if a logger is already installed.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}
