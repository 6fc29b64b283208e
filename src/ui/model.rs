//! Derived view state for the terminal UI.
//!
//! Everything here is pure: the UI recomputes these derivations from the
//! store on every redraw instead of caching mutable copies.

use crate::filter::TaskFilter;
use crate::task::{Priority, Task, PRIORITIES};

/// Positions of the tasks visible under `filter`, in source order.
pub fn visible_indices(tasks: &[Task], filter: &TaskFilter) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| filter.matches(task))
        .map(|(idx, _)| idx)
        .collect()
}

/// Advance the priority filter: all -> low -> medium -> high -> all.
pub fn cycle_priority(current: Option<Priority>) -> Option<Priority> {
    match current {
        None => Some(PRIORITIES[0]),
        Some(priority) => {
            let pos = PRIORITIES.iter().position(|entry| *entry == priority);
            match pos {
                Some(pos) if pos + 1 < PRIORITIES.len() => Some(PRIORITIES[pos + 1]),
                _ => None,
            }
        }
    }
}

/// Advance the completion filter: all -> pending -> completed -> all.
pub fn cycle_completed(current: Option<bool>) -> Option<bool> {
    match current {
        None => Some(false),
        Some(false) => Some(true),
        Some(true) => None,
    }
}

/// Advance the category filter through the derived category set.
pub fn cycle_category(current: Option<&str>, categories: &[String]) -> Option<String> {
    if categories.is_empty() {
        return None;
    }
    match current {
        None => Some(categories[0].clone()),
        Some(current) => {
            let pos = categories.iter().position(|entry| entry == current);
            match pos {
                Some(pos) if pos + 1 < categories.len() => Some(categories[pos + 1].clone()),
                _ => None,
            }
        }
    }
}
