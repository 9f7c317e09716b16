//! Bordered text table for the task list.
//!
//! ```text
//! +----+------------+-------+---+---+--------------------------------------------+
//! | N  |    Date    | Time  | P | D |                   Task                     |
//! +----+------------+-------+---+---+--------------------------------------------+
//! | 1  | 2024-03-01 | 09:00 | ▇ | ▇ |Buy milk                                    |
//! +----+------------+-------+---+---+--------------------------------------------+
//! ```
//!
//! The P and D cells hold colour marks whose escape sequences are longer than
//! the single cell they occupy, so all padding is computed from
//! [`Cell::display_width`] rather than from string length.

use std::fmt;

use chrono::NaiveDate;
use log::debug;

use crate::classify::Mark;
use crate::db::Database;
use crate::task::Task;

/// Output for an empty task list.
pub const EMPTY_MESSAGE: &str = "No tasks have been input";

/// Content of one table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Mark(Mark),
}

impl Cell {
    /// Terminal cells the content occupies.
    pub fn display_width(&self) -> usize {
        match self {
            Cell::Text(s) => s.chars().count(),
            Cell::Mark(_) => Mark::DISPLAY_WIDTH,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Mark(m) => write!(f, "{m}"),
        }
    }
}

/// How a column lays out its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Single line, centred.
    Center,
    /// Wrapped onto as many lines as needed, left-aligned.
    Wrap,
}

/// A fixed table column: width in cells, header label and content extractor.
#[derive(Clone, Copy)]
pub struct Column {
    pub width: usize,
    pub header: &'static str,
    /// Extra cells the header is pulled to the left of centre.
    pub header_shift: usize,
    pub align: Align,
    /// Cell content for a task at a 1-based position, given today's date.
    pub content: fn(&Task, usize, NaiveDate) -> Cell,
}

pub const COLUMNS: [Column; 6] = [
    Column { width: 4, header: "N", header_shift: 0, align: Align::Center, content: number },
    Column { width: 12, header: "Date", header_shift: 0, align: Align::Center, content: date },
    Column { width: 7, header: "Time", header_shift: 0, align: Align::Center, content: time },
    Column { width: 3, header: "P", header_shift: 0, align: Align::Center, content: priority },
    Column { width: 3, header: "D", header_shift: 0, align: Align::Center, content: due },
    Column { width: 44, header: "Task", header_shift: 1, align: Align::Wrap, content: body },
];

fn number(_: &Task, position: usize, _: NaiveDate) -> Cell {
    Cell::Text(position.to_string())
}

fn date(task: &Task, _: usize, _: NaiveDate) -> Cell {
    Cell::Text(task.date_string())
}

fn time(task: &Task, _: usize, _: NaiveDate) -> Cell {
    Cell::Text(task.time_string())
}

fn priority(task: &Task, _: usize, _: NaiveDate) -> Cell {
    Cell::Mark(task.priority_mark())
}

fn due(task: &Task, _: usize, today: NaiveDate) -> Cell {
    Cell::Mark(task.due_mark(today))
}

fn body(task: &Task, _: usize, _: NaiveDate) -> Cell {
    Cell::Text(task.text.clone())
}

/// Render the whole task list, or [`EMPTY_MESSAGE`] when there is nothing to show.
pub fn render(db: &Database, today: NaiveDate) -> String {
    if db.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }
    let divider = border();
    let mut lines = vec![divider.clone(), header(), divider.clone()];
    for (i, task) in db.tasks.iter().enumerate() {
        lines.extend(task_lines(task, i + 1, today));
        lines.push(divider.clone());
    }
    debug!("Rendered {} task(s) into {} line(s)", db.len(), lines.len());
    lines.join("\n")
}

/// `+----+---...+` spanning every column.
pub fn border() -> String {
    let mut line = String::from("+");
    for col in &COLUMNS {
        line.push_str(&"-".repeat(col.width));
        line.push('+');
    }
    line
}

fn header() -> String {
    let mut line = String::from("|");
    for col in &COLUMNS {
        let width = col.header.chars().count();
        let left = (col.width.saturating_sub(width) / 2).saturating_sub(col.header_shift);
        let right = col.width.saturating_sub(width + left);
        line.push_str(&" ".repeat(left));
        line.push_str(col.header);
        line.push_str(&" ".repeat(right));
        line.push('|');
    }
    line
}

/// Physical lines for one task: the first carries every column, later ones
/// only the continuation of wrapped columns.
fn task_lines(task: &Task, position: usize, today: NaiveDate) -> Vec<String> {
    let columns: Vec<Vec<String>> = COLUMNS
        .iter()
        .map(|col| {
            let cell = (col.content)(task, position, today);
            match col.align {
                Align::Center => vec![centered(&cell, col.width)],
                Align::Wrap => wrap_text(&cell.to_string(), col.width)
                    .into_iter()
                    .map(|chunk| left_aligned(&chunk, col.width))
                    .collect(),
            }
        })
        .collect();
    let height = columns.iter().map(Vec::len).max().unwrap_or(1);

    (0..height)
        .map(|row| {
            let mut line = String::from("|");
            for (col, parts) in COLUMNS.iter().zip(&columns) {
                match parts.get(row) {
                    Some(part) => line.push_str(part),
                    None => line.push_str(&" ".repeat(col.width)),
                }
                line.push('|');
            }
            line
        })
        .collect()
}

fn centered(cell: &Cell, width: usize) -> String {
    let content = cell.display_width();
    let left = width.saturating_sub(content) / 2;
    let right = width.saturating_sub(content + left);
    format!("{}{}{}", " ".repeat(left), cell, " ".repeat(right))
}

fn left_aligned(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.chars().count());
    format!("{}{}", text, " ".repeat(pad))
}

/// Split on line breaks, then cut each line into chunks of at most `width`
/// characters. Empty lines produce no chunk; a text with no chunks at all
/// yields a single empty one.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut chunks: Vec<String> = text
        .split('\n')
        .flat_map(|segment| {
            let chars: Vec<char> = segment.trim_end_matches('\r').chars().collect();
            chars
                .chunks(width)
                .map(|c| c.iter().collect::<String>())
                .collect::<Vec<_>>()
        })
        .collect();
    if chunks.is_empty() {
        chunks.push(String::new());
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{FieldValue, Priority};
    use chrono::NaiveTime;

    const BORDER: &str =
        "+----+------------+-------+---+---+--------------------------------------------+";
    const HEADER: &str =
        "| N  |    Date    | Time  | P | D |                   Task                     |";
    const BLANK_CELLS: &str = "|    |            |       |   |   |";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn nine() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    fn db_with(texts: &[&str]) -> Database {
        let mut db = Database::default();
        for text in texts {
            db.add(text, Priority::Normal, date(2024, 3, 1), nine()).unwrap();
        }
        db
    }

    #[test]
    fn test_border_and_header() {
        assert_eq!(border(), BORDER);
        assert_eq!(header(), HEADER);
        assert_eq!(header().chars().count(), BORDER.len());
    }

    #[test]
    fn test_empty_store_renders_message_only() {
        let out = render(&Database::default(), date(2024, 3, 1));
        assert_eq!(out, EMPTY_MESSAGE);
        assert!(!out.contains('+'));
        assert!(!out.contains('|'));
    }

    #[test]
    fn test_single_task_due_today() {
        let mut db = Database::default();
        db.add("Buy milk", Priority::Critical, date(2024, 3, 1), nine()).unwrap();
        let out = render(&db, date(2024, 3, 1));

        let row = format!(
            "| 1  | 2024-03-01 | 09:00 | {} | {} |Buy milk{}|",
            Mark::Red,
            Mark::Yellow,
            " ".repeat(36)
        );
        let expected = [BORDER, HEADER, BORDER, row.as_str(), BORDER].join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_marks_are_padded_by_display_width() {
        let db = db_with(&["x"]);
        let out = render(&db, date(2024, 3, 1));
        let row = out.lines().nth(3).unwrap();
        let mark = Mark::Green.to_string();
        let visible = row.replace(&mark, "#").replace(&Mark::Yellow.to_string(), "#");
        assert_eq!(visible.chars().count(), BORDER.len());
    }

    #[test]
    fn test_long_text_wraps_onto_blank_rows() {
        let text = "a".repeat(88);
        let db = db_with(&[text.as_str()]);
        let out = render(&db, date(2024, 3, 1));
        let lines: Vec<&str> = out.lines().collect();
        // border, header, border, two task lines, border
        assert_eq!(lines.len(), 6);
        assert!(lines[3].ends_with(&format!("|{}|", "a".repeat(44))));
        assert_eq!(lines[4], format!("{}{}|", BLANK_CELLS, "a".repeat(44)));
        assert_eq!(lines[5], BORDER);
    }

    #[test]
    fn test_ninety_chars_spill_onto_a_third_line() {
        let text = "b".repeat(90);
        let db = db_with(&[text.as_str()]);
        let out = render(&db, date(2024, 3, 1));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[5], format!("{}bb{}|", BLANK_CELLS, " ".repeat(42)));
    }

    #[test]
    fn test_multiline_text() {
        let db = db_with(&["first line\nsecond line"]);
        let out = render(&db, date(2024, 3, 1));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[3].ends_with(&format!("|first line{}|", " ".repeat(34))));
        assert_eq!(lines[4], format!("{}second line{}|", BLANK_CELLS, " ".repeat(33)));
    }

    #[test]
    fn test_border_between_tasks() {
        let db = db_with(&["one", "two"]);
        let out = render(&db, date(2024, 3, 1));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[4], BORDER);
        assert!(lines[5].starts_with("| 2  |"));
        assert_eq!(lines[6], BORDER);
    }

    #[test]
    fn test_numbers_follow_current_position() {
        let mut db = db_with(&["one", "two", "three"]);
        db.delete(1).unwrap();
        let out = render(&db, date(2024, 3, 1));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[3].starts_with("| 1  |"));
        assert!(lines[3].contains("|two "));
        assert!(lines[5].starts_with("| 2  |"));
        assert!(lines[5].contains("|three "));
    }

    #[test]
    fn test_render_is_idempotent() {
        let long = "long ".repeat(30);
        let mut db = db_with(&["one", long.as_str()]);
        db.edit_field(2, FieldValue::Priority(Priority::High)).unwrap();
        let today = date(2024, 2, 1);
        assert_eq!(render(&db, today), render(&db, today));
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("", 44), vec![String::new()]);
        assert_eq!(wrap_text("abc", 44), vec!["abc"]);
        assert_eq!(wrap_text("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap_text("ab\ncd", 4), vec!["ab", "cd"]);
        assert_eq!(wrap_text("ab\n\ncd", 4), vec!["ab", "cd"]);
        assert_eq!(wrap_text("abcd", 4), vec!["abcd"]);
    }

    #[test]
    fn test_wrap_counts_characters_not_bytes() {
        let text = "é".repeat(45);
        let chunks = wrap_text(&text, 44);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 44);
        assert_eq!(chunks[1], "é");
    }

    #[test]
    fn test_cell_display_width() {
        assert_eq!(Cell::Mark(Mark::Red).display_width(), 1);
        assert!(Mark::Red.to_string().len() > 1);
        assert_eq!(Cell::Text("09:00".into()).display_width(), 5);
    }
}
