//! Priority and due-date classification into coloured table marks.

use std::fmt;

use chrono::{FixedOffset, NaiveDate, Utc};
use crossterm::style::{force_color_output, Color, Stylize};

use crate::fields::Priority;

/// A one-cell coloured block drawn in the P and D columns.
///
/// The escape sequence around the block is several bytes long but the
/// terminal shows a single cell, see [`Mark::DISPLAY_WIDTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Red,
    Yellow,
    Green,
    Blue,
}

impl Mark {
    /// Terminal cells occupied by a rendered mark.
    pub const DISPLAY_WIDTH: usize = 1;

    fn color(self) -> Color {
        match self {
            Mark::Red => Color::Red,
            Mark::Yellow => Color::Yellow,
            Mark::Green => Color::Green,
            Mark::Blue => Color::Blue,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The mark is the colour; NO_COLOR must not blank it out.
        force_color_output(true);
        write!(f, "{}", " ".on(self.color()))
    }
}

/// Colour for a priority code. A fixed lookup, not an ordering.
pub fn priority_color(priority: Priority) -> Mark {
    match priority {
        Priority::Critical => Mark::Red,
        Priority::High => Mark::Yellow,
        Priority::Normal => Mark::Green,
        Priority::Low => Mark::Blue,
    }
}

/// Colour for a due date seen from `today`: green while it is still ahead,
/// yellow on the day itself and red once it has passed.
pub fn due_color(due: NaiveDate, today: NaiveDate) -> Mark {
    match due.signed_duration_since(today).num_days().signum() {
        1 => Mark::Green,
        0 => Mark::Yellow,
        _ => Mark::Red,
    }
}

/// Current calendar date at a fixed UTC offset.
pub fn today_in(offset: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&offset).date_naive()
}
