//! Task model and in-memory store.
//!
//! The store owns the authoritative task list for one session. State is
//! transient: nothing is written to disk and every process starts from the
//! seed list (or empty).

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::config::TasksConfig;
use crate::error::{Error, Result};

const ULID_RANDOM_LEN: usize = 16;

pub const PRIORITIES: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

/// Task priority. Ordered so that comparisons rank `high` above `low`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(Error::InvalidArgument(format!(
                "priority must be low, medium, or high (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single to-do item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// A task is overdue when it is not completed and its due date lies in
    /// the past. The calendar date is widened to midnight UTC and compared
    /// strictly against `now`, so a task due today counts once the day has
    /// started.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        if self.completed {
            return false;
        }
        match self.due_date {
            Some(due) => due.and_time(NaiveTime::MIN).and_utc() < now,
            None => false,
        }
    }
}

/// The mutable-field bundle accepted by [`TaskStore::add_task`] and
/// [`TaskStore::update_task`]. Identity and `created_at` are never part of
/// a draft.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub category: String,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
}

/// In-memory task store. Exclusively owns the task list; collaborators read
/// derived views and express intent only through the mutation operations.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    config: TasksConfig,
}

impl TaskStore {
    pub fn new(config: TasksConfig) -> Self {
        Self {
            tasks: Vec::new(),
            config,
        }
    }

    pub fn with_tasks(config: TasksConfig, tasks: Vec<Task>) -> Self {
        Self { tasks, config }
    }

    pub fn config(&self) -> &TasksConfig {
        &self.config
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Create a task from a draft. Generates a fresh id, stamps both
    /// timestamps, and prepends the task (most-recent-first ordering).
    ///
    /// The store does not validate the draft; rejecting empty titles or
    /// categories is the caller's job.
    pub fn add_task(&mut self, draft: TaskDraft) -> &Task {
        let now = Utc::now();
        let task = Task {
            id: self.generate_task_id(),
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            category: draft.category,
            due_date: draft.due_date,
            completed: draft.completed,
            created_at: now,
            updated_at: now,
        };
        tracing::debug!(id = %task.id, "task created");
        self.tasks.insert(0, task);
        &self.tasks[0]
    }

    /// Replace all mutable fields of the matching task and refresh
    /// `updated_at`. `id` and `created_at` are preserved. Returns false
    /// (silent no-op) when the id is unknown.
    pub fn update_task(&mut self, id: &str, draft: TaskDraft) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.title = draft.title;
                task.description = draft.description;
                task.priority = draft.priority;
                task.category = draft.category;
                task.due_date = draft.due_date;
                task.completed = draft.completed;
                task.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Remove the matching task. Returns false when the id is unknown.
    pub fn delete_task(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// Flip `completed` on the matching task and refresh `updated_at`.
    /// Returns the updated task, or `None` when the id is unknown.
    pub fn toggle_complete(&mut self, id: &str) -> Option<&Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = !task.completed;
        task.updated_at = Utc::now();
        Some(&*task)
    }

    /// Generate a unique id of the form `<prefix>-<suffix>`, where the
    /// suffix is drawn from the random part of a ULID. The suffix starts at
    /// the configured minimum length and grows on collision.
    pub fn generate_task_id(&self) -> String {
        let prefix = self.config.id_prefix.trim();
        let existing: HashSet<&str> = self.tasks.iter().map(|task| task.id.as_str()).collect();
        let mut len = self.config.id_min_len.clamp(1, ULID_RANDOM_LEN);
        loop {
            let base = Ulid::new().to_string().to_ascii_lowercase();
            let random = &base[base.len() - ULID_RANDOM_LEN..];
            let candidate = format!("{prefix}-{}", &random[..len]);
            if !existing.contains(candidate.as_str()) {
                return candidate;
            }
            if len < ULID_RANDOM_LEN {
                len += 1;
            }
        }
    }

    /// Resolve a full id or unique prefix to the canonical task id.
    ///
    /// Matching is case-insensitive and also accepts a prefix of the part
    /// after the configured id prefix, so `tm show 8f` finds `task-8f3k`.
    /// This is presentation-layer convenience; the mutation operations above
    /// stay silent on unknown ids.
    pub fn resolve_id(&self, input: &str) -> Result<String> {
        let needle = input.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(Error::InvalidArgument("task id cannot be empty".to_string()));
        }

        let mut matches: Vec<String> = Vec::new();
        for task in &self.tasks {
            let id = task.id.to_ascii_lowercase();
            if id == needle {
                return Ok(task.id.clone());
            }
            let suffix = id.rsplit_once('-').map(|(_, s)| s).unwrap_or(&id);
            if id.starts_with(&needle) || suffix.starts_with(&needle) {
                matches.push(task.id.clone());
            }
        }

        match matches.len() {
            0 => Err(Error::TaskNotFound(input.trim().to_string())),
            1 => Ok(matches.remove(0)),
            _ => Err(Error::InvalidArgument(format!(
                "ambiguous task id '{}': {}",
                input.trim(),
                matches.join(", ")
            ))),
        }
    }
}
