//! Line-oriented interactive session.
//!
//! Reads actions and field values one line at a time and re-asks until the
//! input is valid. Generic over the reader and writer so tests can drive it
//! with in-memory buffers.

use std::io::{self, BufRead, ErrorKind, Write};

use chrono::{NaiveDate, NaiveTime};
use log::{debug, warn};

use crate::db::Database;
use crate::fields::{parse_date, parse_field, parse_priority, parse_time, Field, FieldValue, Priority};
use crate::table::render;

pub struct Session<R, W> {
    input: R,
    output: W,
    db: Database,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, db: Database, today: NaiveDate) -> Self {
        Session { input, output, db, today }
    }

    /// Run until `end` or end of input, then hand the task list back.
    pub fn run(mut self) -> io::Result<Database> {
        match self.action_loop() {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => debug!("Input closed, ending session"),
            Err(e) => return Err(e),
        }
        Ok(self.db)
    }

    fn action_loop(&mut self) -> io::Result<()> {
        loop {
            let action = self.ask("Input an action (add, print, edit, delete, end):")?;
            match action.trim() {
                "add" => self.add()?,
                "print" => self.print()?,
                "edit" => self.edit()?,
                "delete" => self.delete()?,
                "end" => return Ok(()),
                other => {
                    debug!("Unknown action {other:?}");
                    self.say("The input action is invalid")?;
                }
            }
        }
    }

    fn add(&mut self) -> io::Result<()> {
        let priority = self.read_priority()?;
        let date = self.read_date()?;
        let time = self.read_time()?;
        let text = self.read_text()?;
        match self.db.add(&text, priority, date, time) {
            Ok(_) => Ok(()),
            Err(e) => self.say(&e.to_string()),
        }
    }

    fn print(&mut self) -> io::Result<()> {
        let table = render(&self.db, self.today);
        self.say(&table)
    }

    fn edit(&mut self) -> io::Result<()> {
        self.print()?;
        if self.db.is_empty() {
            return Ok(());
        }
        let position = self.read_position()?;
        let field = loop {
            let line = self.ask("Input a field to edit (priority, date, time, task):")?;
            match parse_field(&line) {
                Some(field) => break field,
                None => self.say("Invalid field")?,
            }
        };
        let value = match field {
            Field::Priority => FieldValue::Priority(self.read_priority()?),
            Field::Date => FieldValue::Date(self.read_date()?),
            Field::Time => FieldValue::Time(self.read_time()?),
            Field::Task => FieldValue::Text(self.read_text()?),
        };
        match self.db.edit_field(position, value) {
            Ok(()) => self.say("The task is changed"),
            Err(e) => self.say(&e.to_string()),
        }
    }

    fn delete(&mut self) -> io::Result<()> {
        self.print()?;
        if self.db.is_empty() {
            return Ok(());
        }
        let position = self.read_position()?;
        match self.db.delete(position) {
            Ok(_) => self.say("The task is deleted"),
            Err(e) => self.say(&e.to_string()),
        }
    }

    fn read_position(&mut self) -> io::Result<usize> {
        let prompt = format!("Input the task number (1-{}):", self.db.len());
        loop {
            let line = self.ask(&prompt)?;
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=self.db.len()).contains(&n) => return Ok(n),
                _ => self.say("Invalid task number")?,
            }
        }
    }

    fn read_priority(&mut self) -> io::Result<Priority> {
        loop {
            let line = self.ask("Input the task priority (C, H, N, L):")?;
            if let Some(priority) = parse_priority(&line) {
                return Ok(priority);
            }
        }
    }

    fn read_date(&mut self) -> io::Result<NaiveDate> {
        loop {
            let line = self.ask("Input the date (yyyy-mm-dd):")?;
            match parse_date(&line) {
                Some(date) => return Ok(date),
                None => self.say("The input date is invalid")?,
            }
        }
    }

    fn read_time(&mut self) -> io::Result<NaiveTime> {
        loop {
            let line = self.ask("Input the time (hh:mm):")?;
            match parse_time(&line) {
                Some(time) => return Ok(time),
                None => self.say("The input time is invalid")?,
            }
        }
    }

    /// Task body: trimmed lines until the first blank one.
    fn read_text(&mut self) -> io::Result<String> {
        self.say("Input a new task (enter a blank line to end):")?;
        let mut lines = Vec::new();
        loop {
            let line = match self.read_line() {
                Ok(line) => line,
                // A body cut off by end of input still counts.
                Err(e) if e.kind() == ErrorKind::UnexpectedEof && !lines.is_empty() => break,
                Err(e) => return Err(e),
            };
            let line = line.trim();
            if line.is_empty() {
                break;
            }
            lines.push(line.to_string());
        }
        Ok(lines.join("\n"))
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.say(prompt)?;
        self.read_line()
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        } else {
            warn!("Last input line had no line terminator");
        }
        Ok(line)
    }
}
