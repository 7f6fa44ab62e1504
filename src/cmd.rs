//! Command implementations for the CLI interface.
//!
//! This module contains the command handlers for the scriptable
//! subcommands, from basic CRUD operations to file backups, plus the entry
//! point into the interactive menu.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use std::fs;
use std::path::Path;

use chrono::{Local, TimeZone, Utc};

use crate::db::{format_priority, print_table, Database};
use crate::fields::Priority;
use crate::menu::run_menu;
use crate::task::Task;

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive menu (default when no subcommand is given).
    Menu,

    /// Add a new task.
    Add {
        /// What needs doing.
        description: String,
        /// Priority: high | medium | low.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
    },

    /// List tasks in a table with their IDs.
    List {
        /// Show only tasks that are not yet completed.
        #[arg(long)]
        pending: bool,
    },

    /// View a single task by ID.
    View {
        /// Task ID to view.
        id: u64,
    },

    /// Mark a task as completed.
    Complete {
        /// Task ID to complete.
        id: u64,
    },

    /// Reopen a completed task.
    Reopen {
        /// Task ID to reopen.
        id: u64,
    },

    /// Delete a task by ID.
    Delete {
        /// Task ID to delete.
        id: u64,
    },

    /// Create a timestamped backup of the task file.
    Backup,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the interactive menu loop.
pub fn cmd_menu(db_path: &Path) {
    if let Err(e) = run_menu(db_path) {
        eprintln!("Menu error: {e}");
        std::process::exit(1);
    }
}

/// Add a new task to the database.
pub fn cmd_add(db: &mut Database, db_path: &Path, description: String, priority: Priority) {
    let id = db.next_id();
    db.tasks.push(Task::new(id, description, priority));
    if let Err(e) = db.save(db_path) {
        eprintln!("Failed to save tasks: {e}");
        std::process::exit(1);
    }
    println!("Added task {}", id);
}

/// List tasks, optionally hiding completed ones.
pub fn cmd_list(db: &Database, pending: bool) {
    let filtered: Vec<&Task> = db
        .tasks
        .iter()
        .filter(|t| !pending || !t.completed)
        .collect();
    if filtered.is_empty() {
        println!("No tasks available.");
        return;
    }
    print_table(&filtered);
}

/// View detailed information about a specific task.
pub fn cmd_view(db: &Database, id: u64) {
    let Some(task) = db.get(id) else {
        eprintln!("Task {} not found.", id);
        std::process::exit(1);
    };
    println!("ID:           {}", task.id);
    println!("Task:         {}", task.description);
    println!("Priority:     {}", format_priority(task.priority));
    println!("Completed:    {}", if task.completed { "yes" } else { "no" });
    println!("Created UTC:  {}", format_timestamp(task.created_at_utc));
    println!("Updated UTC:  {}", format_timestamp(task.updated_at_utc));
}

fn format_timestamp(ts: i64) -> String {
    match Utc.timestamp_opt(ts, 0).single() {
        Some(t) if ts != 0 => t.to_rfc3339(),
        _ => "-".into(),
    }
}

/// Mark a task as completed.
pub fn cmd_complete(db: &mut Database, db_path: &Path, id: u64) {
    let Some(task) = db.get_mut(id) else {
        eprintln!("Task {} not found.", id);
        std::process::exit(1);
    };
    task.set_completed(true);
    if let Err(e) = db.save(db_path) {
        eprintln!("Failed to save tasks: {e}");
        std::process::exit(1);
    }
    println!("Marked task {} as completed.", id);
}

/// Reopen a completed task.
pub fn cmd_reopen(db: &mut Database, db_path: &Path, id: u64) {
    let Some(task) = db.get_mut(id) else {
        eprintln!("Task {} not found.", id);
        std::process::exit(1);
    };
    task.set_completed(false);
    if let Err(e) = db.save(db_path) {
        eprintln!("Failed to save tasks: {e}");
        std::process::exit(1);
    }
    println!("Reopened task {}", id);
}

/// Delete a task by ID.
pub fn cmd_delete(db: &mut Database, db_path: &Path, id: u64) {
    if db.remove(id).is_none() {
        eprintln!("Task {} not found.", id);
        std::process::exit(1);
    }
    if let Err(e) = db.save(db_path) {
        eprintln!("Failed to save tasks: {e}");
        std::process::exit(1);
    }
    println!("Deleted task {}", id);
}

/// Copy the task file into a timestamped file under `backup/` next to it.
pub fn create_backup(db_path: &Path) -> Result<String, std::io::Error> {
    if !db_path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "task file does not exist",
        ));
    }

    let parent_dir = db_path.parent().unwrap_or_else(|| Path::new("."));
    let backup_dir = parent_dir.join("backup");
    fs::create_dir_all(&backup_dir)?;

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let db_filename = db_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("tasks.json");
    let backup_path = backup_dir.join(format!("{}_{}", timestamp, db_filename));

    fs::copy(db_path, &backup_path)?;

    Ok(backup_path.to_string_lossy().to_string())
}

/// Create a timestamped backup of the task file.
pub fn cmd_backup(db_path: &Path) {
    match create_backup(db_path) {
        Ok(backup_path) => println!("Backup created: {}", backup_path),
        Err(e) => {
            eprintln!("Failed to create backup: {}", e);
            std::process::exit(1);
        }
    }
}

/// Generate shell completion scripts for the given shell.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;

    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_of_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = create_backup(&dir.path().join("tasks.json")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn backup_copies_the_task_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let db = Database {
            tasks: vec![Task::new(1, "Buy milk".into(), Priority::Low)],
        };
        db.save(&path).unwrap();

        let backup_path = create_backup(&path).unwrap();
        let copied = Database::load(Path::new(&backup_path)).unwrap();
        assert_eq!(copied.tasks, db.tasks);
        assert!(backup_path.contains("backup"));
        assert!(backup_path.ends_with("_tasks.json"));
    }
}
