//! The task store and its JSON file.
//!
//! `Database` owns the ordered task list. Tasks are addressed by their 1-based
//! position, so deleting a task renumbers everything after it.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, TaskError};
use crate::fields::{FieldValue, Priority};
use crate::task::Task;

/// In-memory task list, persisted as a flat JSON array.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Database {
    pub tasks: Vec<Task>,
}

impl Database {
    /// Load the task list, starting empty if the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let mut buf = String::new();
        match File::open(path) {
            Ok(mut f) => f.read_to_string(&mut buf)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No task file at {}, starting empty", path.display());
                return Ok(Database::default());
            }
            Err(e) => return Err(e.into()),
        };
        let db: Database = serde_json::from_str(&buf)?;
        debug!("Loaded {} task(s) from {}", db.len(), path.display());
        Ok(db)
    }

    /// Save the task list using an atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(self)?;
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(&tmp, path)?;
        debug!("Saved {} task(s) to {}", self.len(), path.display());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get the task at a 1-based position.
    #[cfg(test)]
    pub fn get(&self, position: usize) -> Option<&Task> {
        position.checked_sub(1).and_then(|i| self.tasks.get(i))
    }

    /// Append a new task. Blank text is rejected.
    pub fn add(
        &mut self,
        text: &str,
        priority: Priority,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<usize, TaskError> {
        let text = non_blank(text)?;
        self.tasks.push(Task::new(text, priority, date, time));
        info!("Added task {} with priority {}", self.len(), priority.code());
        Ok(self.len())
    }

    /// Replace one field of the task at a 1-based position.
    pub fn edit_field(&mut self, position: usize, value: FieldValue) -> Result<(), TaskError> {
        let index = self.index_of(position)?;
        let value = match value {
            FieldValue::Text(text) => FieldValue::Text(non_blank(&text)?),
            other => other,
        };
        info!("Editing {:?} of task {}", value.field(), position);
        self.tasks[index].apply(value);
        Ok(())
    }

    /// Remove the task at a 1-based position, shifting later tasks down.
    pub fn delete(&mut self, position: usize) -> Result<Task, TaskError> {
        let index = self.index_of(position)?;
        info!("Deleting task {}", position);
        Ok(self.tasks.remove(index))
    }

    fn index_of(&self, position: usize) -> Result<usize, TaskError> {
        if position == 0 || position > self.len() {
            return Err(TaskError::OutOfRange { position, len: self.len() });
        }
        Ok(position - 1)
    }
}

fn non_blank(text: &str) -> Result<String, TaskError> {
    let text = text.trim();
    if text.is_empty() {
        Err(TaskError::EmptyTask)
    } else {
        Ok(text.to_string())
    }
}
