//! tm task command implementations.

use chrono::NaiveDate;
use serde::Serialize;

use crate::cli::Context;
use crate::error::{Error, Result};
use crate::filter::{filter_tasks, TaskFilter};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{Priority, Task, TaskDraft};

pub struct AddOptions {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub category: String,
    pub due: Option<String>,
    pub completed: bool,
}

pub struct ListOptions {
    pub search: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub completed: bool,
    pub pending: bool,
    pub limit: Option<usize>,
}

pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub clear_description: bool,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub due: Option<String>,
    pub clear_due: bool,
    pub completed: Option<bool>,
}

#[derive(Serialize)]
struct TaskListOutput {
    total: usize,
    tasks: Vec<Task>,
}

#[derive(Serialize)]
struct DeletedOutput {
    id: String,
}

pub fn run_add(mut ctx: Context, options: AddOptions, out: OutputOptions) -> Result<()> {
    // The store accepts anything; non-empty title and category are enforced
    // here, at the entry point.
    let title = options.title.trim();
    if title.is_empty() {
        return Err(Error::InvalidArgument("title cannot be empty".to_string()));
    }
    let category = options.category.trim();
    if category.is_empty() {
        return Err(Error::InvalidArgument(
            "category cannot be empty".to_string(),
        ));
    }

    let priority = match options.priority.as_deref() {
        Some(value) => Priority::parse(value)?,
        None => ctx.config.tasks.default_priority,
    };
    let due_date = options.due.as_deref().map(parse_due).transpose()?;

    let task = ctx
        .store
        .add_task(TaskDraft {
            title: title.to_string(),
            description: options
                .description
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string),
            priority,
            category: category.to_string(),
            due_date,
            completed: options.completed,
        })
        .clone();

    let mut human = HumanOutput::new("Task created");
    human.push_summary("ID", task.id.clone());
    human.push_summary("Title", task.title.clone());
    human.push_summary("Category", task.category.clone());
    human.push_summary("Priority", task.priority.to_string());
    if let Some(due) = task.due_date {
        human.push_summary("Due", due.to_string());
    }

    emit_success(out, "add", &task, Some(&human))
}

pub fn run_list(ctx: Context, options: ListOptions, out: OutputOptions) -> Result<()> {
    let filter = TaskFilter {
        search: options.search,
        category: options.category,
        priority: options.priority.as_deref().map(Priority::parse).transpose()?,
        completed: if options.completed {
            Some(true)
        } else if options.pending {
            Some(false)
        } else {
            None
        },
    };

    let mut tasks = filter_tasks(ctx.store.tasks(), &filter);
    if let Some(limit) = options.limit {
        tasks.truncate(limit);
    }

    let mut human = HumanOutput::new("Tasks");
    human.push_summary("Total", tasks.len().to_string());
    if !filter.is_empty() {
        human.push_summary("Filtered", "yes".to_string());
    }
    for task in &tasks {
        human.push_detail(task_line(task));
    }

    let output = TaskListOutput {
        total: tasks.len(),
        tasks,
    };

    emit_success(out, "list", &output, Some(&human))
}

pub fn run_show(ctx: Context, id: &str, out: OutputOptions) -> Result<()> {
    let id = ctx.store.resolve_id(id)?;
    let task = ctx
        .store
        .get(&id)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(id.clone()))?;

    emit_success(out, "show", &task, Some(&task_human(&task)))
}

pub fn run_edit(mut ctx: Context, options: EditOptions, out: OutputOptions) -> Result<()> {
    let id = ctx.store.resolve_id(&options.id)?;
    let current = ctx
        .store
        .get(&id)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(id.clone()))?;

    // An update replaces every mutable field; unspecified flags carry the
    // current value into the draft.
    let title = match options.title {
        Some(title) => {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(Error::InvalidArgument("title cannot be empty".to_string()));
            }
            title
        }
        None => current.title.clone(),
    };
    let category = match options.category {
        Some(category) => {
            let category = category.trim().to_string();
            if category.is_empty() {
                return Err(Error::InvalidArgument(
                    "category cannot be empty".to_string(),
                ));
            }
            category
        }
        None => current.category.clone(),
    };
    let description = if options.clear_description {
        None
    } else {
        match options.description {
            Some(text) => {
                let text = text.trim().to_string();
                if text.is_empty() {
                    None
                } else {
                    Some(text)
                }
            }
            None => current.description.clone(),
        }
    };
    let priority = match options.priority.as_deref() {
        Some(value) => Priority::parse(value)?,
        None => current.priority,
    };
    let due_date = if options.clear_due {
        None
    } else {
        match options.due.as_deref() {
            Some(value) => Some(parse_due(value)?),
            None => current.due_date,
        }
    };
    let completed = options.completed.unwrap_or(current.completed);

    ctx.store.update_task(
        &id,
        TaskDraft {
            title,
            description,
            priority,
            category,
            due_date,
            completed,
        },
    );
    let task = ctx
        .store
        .get(&id)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(id.clone()))?;

    let mut human = task_human(&task);
    human.push_next_step(format!("tm show {id}"));
    emit_success(out, "edit", &task, Some(&human))
}

pub fn run_done(mut ctx: Context, id: &str, out: OutputOptions) -> Result<()> {
    let id = ctx.store.resolve_id(id)?;
    let task = ctx
        .store
        .toggle_complete(&id)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(id.clone()))?;

    let header = if task.completed {
        "Task completed"
    } else {
        "Task reopened"
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("ID", task.id.clone());
    human.push_summary("Title", task.title.clone());
    human.push_summary("Completed", task.completed.to_string());

    emit_success(out, "done", &task, Some(&human))
}

pub fn run_rm(mut ctx: Context, id: &str, out: OutputOptions) -> Result<()> {
    let id = ctx.store.resolve_id(id)?;
    ctx.store.delete_task(&id);

    let mut human = HumanOutput::new("Task deleted");
    human.push_summary("ID", id.clone());

    emit_success(out, "rm", &DeletedOutput { id }, Some(&human))
}

pub(crate) fn parse_due(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        Error::InvalidArgument(format!("due date must be YYYY-MM-DD (got '{value}')"))
    })
}

fn task_line(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!(
        "[{mark}][{}] {} {} ({})",
        task.priority, task.id, task.title, task.category
    );
    if let Some(due) = task.due_date {
        line.push_str(&format!(" due {due}"));
    }
    line
}

fn task_human(task: &Task) -> HumanOutput {
    let mut human = HumanOutput::new(format!("Task {}", task.id));
    human.push_summary("Title", task.title.clone());
    human.push_summary("Category", task.category.clone());
    human.push_summary("Priority", task.priority.to_string());
    human.push_summary("Completed", task.completed.to_string());
    if let Some(due) = task.due_date {
        human.push_summary("Due", due.to_string());
    }
    human.push_summary("Created", task.created_at.to_rfc3339());
    human.push_summary("Updated", task.updated_at.to_rfc3339());
    if let Some(description) = task.description.as_deref() {
        human.push_detail(description.to_string());
    }
    human
}
