//! Task data structure.
//!
//! This module defines the `Task` struct that represents a single to-do item:
//! a description, a priority, a completion flag, and bookkeeping timestamps.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::fields::Priority;

/// A single to-do item.
///
/// Tasks carry a stable `id` assigned at creation, so duplicate descriptions
/// stay distinguishable. The description serializes under the `task` key and
/// the timestamps default to zero, so files written by earlier versions of
/// the tool still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "task")]
    pub description: String,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at_utc: i64,
    #[serde(default)]
    pub updated_at_utc: i64,
}

impl Task {
    /// Create a pending task stamped with the current time.
    pub fn new(id: u64, description: String, priority: Priority) -> Self {
        let now_utc = Utc::now().timestamp();
        Task {
            id,
            description,
            priority,
            completed: false,
            created_at_utc: now_utc,
            updated_at_utc: now_utc,
        }
    }

    /// Set the completion flag and refresh the update timestamp.
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
        self.updated_at_utc = Utc::now().timestamp();
    }
}
