//! Aggregate statistics over the task list.
//!
//! Stats are derived, never stored. `now` is an explicit input so callers
//! (and tests) control the overdue boundary.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
}

/// Derive counts from `tasks` as of the instant `now`.
pub fn aggregate(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();
    let overdue = tasks.iter().filter(|task| task.is_overdue(now)).count();

    TaskStats {
        total,
        completed,
        pending: total - completed,
        overdue,
    }
}
