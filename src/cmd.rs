//! Command implementations for the CLI interface.
//!
//! `run` hosts the interactive prompt; the other subcommands apply a single
//! change (or print the table) and exit, which makes the task file scriptable.

use std::io;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use clap::{ArgGroup, Subcommand};
use clap_complete::{generate, Shell};
use log::info;

use crate::cli::{date_arg, priority_arg, time_arg};
use crate::db::Database;
use crate::fields::{FieldValue, Priority};
use crate::prompt::Session;
use crate::table::render;

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive prompt (the default).
    Run,

    /// Print the task table.
    Print,

    /// Add a new task.
    Add {
        /// Task text. Use "\n" inside the quotes for several lines.
        text: String,
        /// Priority: C (critical) | H (high) | N (normal) | L (low).
        #[arg(long, short, value_parser = priority_arg)]
        priority: Priority,
        /// Due date, yyyy-mm-dd.
        #[arg(long, short, value_parser = date_arg)]
        date: NaiveDate,
        /// Due time, hh:mm.
        #[arg(long, short, value_parser = time_arg)]
        time: NaiveTime,
    },

    /// Change fields of a task.
    #[command(group(
        ArgGroup::new("field")
            .required(true)
            .multiple(true)
            .args(["priority", "date", "time", "task"])
    ))]
    Edit {
        /// Task number as shown by `print`.
        position: usize,
        #[arg(long, short, value_parser = priority_arg)]
        priority: Option<Priority>,
        #[arg(long, short, value_parser = date_arg)]
        date: Option<NaiveDate>,
        #[arg(long, short, value_parser = time_arg)]
        time: Option<NaiveTime>,
        /// New task text.
        #[arg(long)]
        task: Option<String>,
    },

    /// Delete a task by number; later tasks move up.
    Delete {
        /// Task number as shown by `print`.
        position: usize,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Run the interactive prompt on stdin/stdout and save on exit.
pub fn cmd_run(db: Database, db_path: &Path, today: NaiveDate) {
    let stdin = io::stdin();
    let session = Session::new(stdin.lock(), io::stdout(), db, today);
    let db = match session.run() {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Terminal error: {e}");
            std::process::exit(1);
        }
    };
    save_or_exit(&db, db_path);
    println!("Tasklist exiting!");
}

/// Print the task table.
pub fn cmd_print(db: &Database, today: NaiveDate) {
    println!("{}", render(db, today));
}

/// Add a task and save.
pub fn cmd_add(
    db: &mut Database,
    db_path: &Path,
    text: String,
    priority: Priority,
    date: NaiveDate,
    time: NaiveTime,
) {
    let text = text.replace("\\n", "\n");
    match db.add(&text, priority, date, time) {
        Ok(position) => {
            save_or_exit(db, db_path);
            println!("Added task {position}");
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Apply every given field change to one task, then save.
pub fn cmd_edit(
    db: &mut Database,
    db_path: &Path,
    position: usize,
    priority: Option<Priority>,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    task: Option<String>,
) {
    let changes = [
        priority.map(FieldValue::Priority),
        date.map(FieldValue::Date),
        time.map(FieldValue::Time),
        task.map(|t| FieldValue::Text(t.replace("\\n", "\n"))),
    ];
    // Work on a copy so a failure part-way leaves the file untouched.
    let mut edited = db.clone();
    for change in changes.into_iter().flatten() {
        if let Err(e) = edited.edit_field(position, change) {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
    *db = edited;
    save_or_exit(db, db_path);
    println!("The task is changed");
}

/// Delete a task and save.
pub fn cmd_delete(db: &mut Database, db_path: &Path, position: usize) {
    match db.delete(position) {
        Ok(task) => {
            info!("Removed {:?}", task.text);
            save_or_exit(db, db_path);
            println!("The task is deleted");
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}

fn save_or_exit(db: &Database, db_path: &Path) {
    if let Err(e) = db.save(db_path) {
        eprintln!("Failed to save tasks: {e}");
        std::process::exit(1);
    }
}
