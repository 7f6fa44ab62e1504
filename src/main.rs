//! # todo - To-Do List CLI
//!
//! A single-user command-line to-do list manager with an interactive menu
//! and a scriptable subcommand interface.
//!
//! ## Key Features
//!
//! - **Interactive Menu**: a numbered read-eval loop for adding, deleting,
//!   completing, and viewing tasks
//! - **Scriptable CLI**: every menu action is also a subcommand for use in
//!   scripts and shell one-liners
//! - **Local File Storage**: one human-readable JSON file, rewritten in full
//!   on every change, with timestamped backups on demand
//! - **Stable Task IDs**: every task gets a permanent numeric ID at creation,
//!   so identically-worded tasks never get mixed up
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the interactive menu
//! todo
//!
//! # Add a task without entering the menu
//! todo add "Buy milk" --priority low
//!
//! # List tasks with their IDs
//! todo list
//!
//! # Complete and delete by ID
//! todo complete 2
//! todo delete 1
//! ```
//!
//! Tasks live in `./tasks.json` by default; pass `--db <path>` to keep the
//! list somewhere else.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod db;
pub mod fields;
pub mod menu;
pub mod task;

use cli::Cli;
use cmd::*;
use db::Database;

fn main() {
    let cli = Cli::parse();

    let db_path = cli.db.unwrap_or_else(|| PathBuf::from("tasks.json"));
    let command = cli.command.unwrap_or(Commands::Menu);

    // Handle commands that work on the file itself rather than its contents.
    match &command {
        Commands::Menu => {
            cmd_menu(&db_path);
            return;
        }
        Commands::Backup => {
            cmd_backup(&db_path);
            return;
        }
        Commands::Completions { shell } => {
            cmd_completions(*shell);
            return;
        }
        _ => {}
    }

    let mut db = match Database::load(&db_path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", db_path.display());
            std::process::exit(1);
        }
    };

    match command {
        Commands::Menu | Commands::Backup | Commands::Completions { .. } => {
            unreachable!("handled above")
        }

        Commands::Add { description, priority } => cmd_add(&mut db, &db_path, description, priority),

        Commands::List { pending } => cmd_list(&db, pending),

        Commands::View { id } => cmd_view(&db, id),

        Commands::Complete { id } => cmd_complete(&mut db, &db_path, id),

        Commands::Reopen { id } => cmd_reopen(&mut db, &db_path, id),

        Commands::Delete { id } => cmd_delete(&mut db, &db_path, id),
    }
}
