//! Database operations and display helpers for the task list.
//!
//! This module provides the `Database` struct that holds the full ordered
//! task list, its load/save operations against a JSON file, and the
//! formatting helpers used by both the CLI and the interactive menu.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fields::Priority;
use crate::task::Task;

/// Errors from the storage layer and the prompt loops built on top of it.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("task file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// In-memory database holding the full task list.
///
/// Serializes transparently as a JSON array of task objects; the file on
/// disk is the entire state of the system and is rewritten wholesale on
/// every save.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Database {
    pub tasks: Vec<Task>,
}

impl Database {
    /// Load the task list from a JSON file.
    ///
    /// A missing file is an empty list, not an error. Unreadable or
    /// malformed contents are fatal — the file is the system's entire
    /// state, so it is never silently discarded.
    pub fn load(path: &Path) -> Result<Self, DbError> {
        if !path.exists() {
            return Ok(Database::default());
        }
        let mut buf = String::new();
        File::open(path)?.read_to_string(&mut buf)?;
        let mut db: Database = serde_json::from_str(&buf)?;
        // Files from earlier versions carry no ids; assign them on load.
        let mut next = db.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        for t in db.tasks.iter_mut() {
            if t.id == 0 {
                t.id = next;
                next += 1;
            }
        }
        Ok(db)
    }

    /// Save the task list to a JSON file using a temp file + rename.
    pub fn save(&self, path: &Path) -> Result<(), DbError> {
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        let data = serde_json::to_string_pretty(self)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    /// Generate the next available task ID.
    pub fn next_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Get a mutable reference to a task by ID.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        self.tasks.get_mut(idx)
    }

    /// Remove a task by ID, returning it if it was present.
    pub fn remove(&mut self, id: u64) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }
}

/// Format a priority for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::High => "high",
        Priority::Medium => "medium",
        Priority::Low => "low",
    }
}

/// Parse a priority string from interactive input.
pub fn parse_priority(s: &str) -> Option<Priority> {
    match s.trim().to_lowercase().as_str() {
        "high" => Some(Priority::High),
        "medium" => Some(Priority::Medium),
        "low" => Some(Priority::Low),
        _ => None,
    }
}

/// Render one checklist line: `N. [✓/✗] description (Priority: p)`.
pub fn format_line(position: usize, task: &Task) -> String {
    let status = if task.completed { "✓" } else { "✗" };
    format!(
        "{}. [{}] {} (Priority: {})",
        position,
        status,
        task.description,
        format_priority(task.priority)
    )
}

/// Print tasks in a formatted table with IDs, for the scriptable CLI.
pub fn print_table(tasks: &[&Task]) {
    println!("{:<5} {:<5} {:<9} {}", "ID", "Done", "Priority", "Task");
    for t in tasks {
        println!(
            "{:<5} {:<5} {:<9} {}",
            t.id,
            if t.completed { "✓" } else { "✗" },
            format_priority(t.priority),
            t.description
        );
    }
}
