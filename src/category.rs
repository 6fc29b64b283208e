//! Category derivation.
//!
//! Categories are free-text labels, not an enumeration. The visible set is
//! the union of the configured defaults and every category present in the
//! task list, deduplicated, defaults first.

use std::collections::HashSet;

use crate::task::Task;

pub const DEFAULT_CATEGORIES: [&str; 5] = ["Work", "Personal", "Shopping", "Health", "Study"];

/// Derive the ordered unique category set: defaults in given order, then
/// task-discovered categories in first-occurrence order.
pub fn derive_categories(tasks: &[Task], defaults: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut categories = Vec::new();

    for name in defaults {
        if seen.insert(name.clone()) {
            categories.push(name.clone());
        }
    }
    for task in tasks {
        if seen.insert(task.category.clone()) {
            categories.push(task.category.clone());
        }
    }

    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use chrono::Utc;

    fn task(category: &str) -> Task {
        let now = Utc::now();
        Task {
            id: format!("task-{category}"),
            title: category.to_string(),
            description: None,
            priority: Priority::Low,
            category: category.to_string(),
            due_date: None,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn defaults(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn defaults_come_first_then_discovered_in_order() {
        let tasks = vec![task("Garden"), task("Work"), task("Reading")];
        let categories = derive_categories(&tasks, &defaults(&["Work", "Personal"]));
        assert_eq!(categories, vec!["Work", "Personal", "Garden", "Reading"]);
    }

    #[test]
    fn no_duplicates_across_repeated_categories() {
        let tasks = vec![task("Work"), task("Work"), task("Garden"), task("Garden")];
        let categories = derive_categories(&tasks, &defaults(&["Work"]));
        assert_eq!(categories, vec!["Work", "Garden"]);
    }

    #[test]
    fn empty_inputs_yield_empty_set() {
        assert!(derive_categories(&[], &[]).is_empty());
    }
}
