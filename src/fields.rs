//! Field types for tasks.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task priority. Stored on disk as lowercase text ("high", "medium", "low").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}
