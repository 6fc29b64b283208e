//! Task filtering.
//!
//! A filter is a set of optional predicates AND-combined over the task
//! list. Filtering is a pure derivation: source order is preserved and the
//! input is never mutated.

use serde::{Deserialize, Serialize};

use crate::task::{Priority, Task};

/// Filter specification. An absent field places no constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaskFilter {
    /// Case-insensitive substring match against title or description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Exact category match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Exact priority match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// Exact completion-state match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskFilter {
    /// True when no field constrains anything (the identity filter).
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.completed.is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(search) = self.search.as_deref() {
            let needle = search.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_description = task
                .description
                .as_deref()
                .map(|text| text.to_lowercase().contains(&needle))
                .unwrap_or(false);
            if !in_title && !in_description {
                return false;
            }
        }
        if let Some(category) = self.category.as_deref() {
            if task.category != category {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(completed) = self.completed {
            if task.completed != completed {
                return false;
            }
        }
        true
    }
}

/// Derive the filtered view of `tasks` under `filter`.
pub fn filter_tasks(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(title: &str, description: Option<&str>, category: &str) -> Task {
        let now = Utc::now();
        Task {
            id: format!("task-{title}"),
            title: title.to_string(),
            description: description.map(|text| text.to_string()),
            priority: Priority::Medium,
            category: category.to_string(),
            due_date: None,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_filter_is_identity() {
        let tasks = vec![task("a", None, "Work"), task("b", None, "Home")];
        let filtered = filter_tasks(&tasks, &TaskFilter::default());
        assert_eq!(filtered, tasks);
    }

    #[test]
    fn search_matches_title_or_description_case_insensitively() {
        let tasks = vec![
            task("Design landing page", None, "Work"),
            task("Groceries", Some("milk and BREAD"), "Shopping"),
        ];

        let filter = TaskFilter {
            search: Some("DESIGN".to_string()),
            ..TaskFilter::default()
        };
        assert_eq!(filter_tasks(&tasks, &filter).len(), 1);

        let filter = TaskFilter {
            search: Some("bread".to_string()),
            ..TaskFilter::default()
        };
        let filtered = filter_tasks(&tasks, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Groceries");
    }

    #[test]
    fn predicates_are_conjunctive() {
        let mut done = task("done", None, "Work");
        done.completed = true;
        let tasks = vec![task("open", None, "Work"), done];

        let filter = TaskFilter {
            category: Some("Work".to_string()),
            completed: Some(true),
            ..TaskFilter::default()
        };
        let filtered = filter_tasks(&tasks, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "done");
    }
}
