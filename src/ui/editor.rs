//! Form editor for creating and editing tasks.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::task::{Priority, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    NewTask,
    EditTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFieldId {
    Title,
    Category,
    Priority,
    Due,
    Description,
}

#[derive(Debug, Clone)]
pub struct EditorField {
    pub id: EditorFieldId,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
}

/// Validated field values ready to become a draft.
#[derive(Debug, Clone)]
pub struct EditorSubmit {
    pub title: String,
    pub category: String,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Cancel,
    Submit,
}

#[derive(Debug, Clone)]
pub struct EditorState {
    kind: EditorKind,
    fields: Vec<EditorField>,
    active: usize,
    confirming: bool,
    error: Option<String>,
    task_id: Option<String>,
}

fn fields_with(title: &str, category: &str, priority: &str, due: &str, description: &str) -> Vec<EditorField> {
    vec![
        EditorField {
            id: EditorFieldId::Title,
            label: "Title",
            value: title.to_string(),
            required: true,
        },
        EditorField {
            id: EditorFieldId::Category,
            label: "Category",
            value: category.to_string(),
            required: true,
        },
        EditorField {
            id: EditorFieldId::Priority,
            label: "Priority",
            value: priority.to_string(),
            required: false,
        },
        EditorField {
            id: EditorFieldId::Due,
            label: "Due (YYYY-MM-DD)",
            value: due.to_string(),
            required: false,
        },
        EditorField {
            id: EditorFieldId::Description,
            label: "Description",
            value: description.to_string(),
            required: false,
        },
    ]
}

impl EditorState {
    pub fn new_task(default_priority: Priority) -> Self {
        Self {
            kind: EditorKind::NewTask,
            fields: fields_with("", "", default_priority.as_str(), "", ""),
            active: 0,
            confirming: false,
            error: None,
            task_id: None,
        }
    }

    pub fn edit_task(task: &Task) -> Self {
        Self {
            kind: EditorKind::EditTask,
            fields: fields_with(
                &task.title,
                &task.category,
                task.priority.as_str(),
                &task
                    .due_date
                    .map(|due| due.to_string())
                    .unwrap_or_default(),
                task.description.as_deref().unwrap_or(""),
            ),
            active: 0,
            confirming: false,
            error: None,
            task_id: Some(task.id.clone()),
        }
    }

    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn fields(&self) -> &[EditorField] {
        &self.fields
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn confirming(&self) -> bool {
        self.confirming
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
        self.confirming = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        if self.confirming {
            return self.handle_confirm_key(key);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('u') {
            if let Some(field) = self.current_field_mut() {
                field.value.clear();
            }
            self.error = None;
            return EditorAction::None;
        }

        match key.code {
            KeyCode::Esc => return EditorAction::Cancel,
            KeyCode::Tab | KeyCode::Down => {
                self.move_active(1);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_active(-1);
            }
            KeyCode::Enter => {
                if self.active + 1 >= self.fields.len() {
                    return self.attempt_confirm();
                }
                self.move_active(1);
            }
            KeyCode::Backspace => {
                if let Some(field) = self.current_field_mut() {
                    field.value.pop();
                }
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return EditorAction::None;
                }
                if !ch.is_control() {
                    if let Some(field) = self.current_field_mut() {
                        field.value.push(ch);
                    }
                }
            }
            _ => {}
        }

        self.error = None;
        EditorAction::None
    }

    pub fn build_submit(&self) -> Result<EditorSubmit, String> {
        self.validate()?;
        let priority = match non_empty(self.field_value(EditorFieldId::Priority)) {
            Some(value) => Some(parse_priority(&value)?),
            None => None,
        };
        let due_date = match non_empty(self.field_value(EditorFieldId::Due)) {
            Some(value) => Some(parse_due(&value)?),
            None => None,
        };

        Ok(EditorSubmit {
            title: self.field_value(EditorFieldId::Title).trim().to_string(),
            category: self.field_value(EditorFieldId::Category).trim().to_string(),
            priority,
            due_date,
            description: non_empty(self.field_value(EditorFieldId::Description)),
        })
    }

    fn attempt_confirm(&mut self) -> EditorAction {
        match self.validate() {
            Ok(()) => {
                self.confirming = true;
                EditorAction::None
            }
            Err(err) => {
                self.error = Some(err);
                self.confirming = false;
                EditorAction::None
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> EditorAction {
        match key.code {
            KeyCode::Esc => EditorAction::Cancel,
            KeyCode::Backspace | KeyCode::Char('e') => {
                self.confirming = false;
                self.error = None;
                EditorAction::None
            }
            KeyCode::Char('y') | KeyCode::Enter => EditorAction::Submit,
            _ => EditorAction::None,
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.field_value(EditorFieldId::Title).trim().is_empty() {
            return Err("title is required".to_string());
        }
        if self.field_value(EditorFieldId::Category).trim().is_empty() {
            return Err("category is required".to_string());
        }
        if let Some(priority) = non_empty(self.field_value(EditorFieldId::Priority)) {
            parse_priority(&priority)?;
        }
        if let Some(due) = non_empty(self.field_value(EditorFieldId::Due)) {
            parse_due(&due)?;
        }
        Ok(())
    }

    fn move_active(&mut self, delta: isize) {
        let len = self.fields.len() as isize;
        if len == 0 {
            self.active = 0;
            return;
        }
        let next = (self.active as isize + delta).rem_euclid(len);
        self.active = next as usize;
    }

    fn current_field_mut(&mut self) -> Option<&mut EditorField> {
        self.fields.get_mut(self.active)
    }

    fn field_value(&self, id: EditorFieldId) -> &str {
        self.fields
            .iter()
            .find(|field| field.id == id)
            .map(|field| field.value.as_str())
            .unwrap_or("")
    }

    #[cfg(test)]
    fn set_field(&mut self, id: EditorFieldId, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|field| field.id == id) {
            field.value = value.to_string();
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    Priority::parse(value).map_err(|_| "priority must be low, medium, or high".to_string())
}

fn parse_due(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| "due date must be YYYY-MM-DD".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn confirm_through(editor: &mut EditorState) {
        for _ in 0..editor.fields().len() {
            let action = editor.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
            assert_eq!(action, EditorAction::None);
        }
    }

    #[test]
    fn editor_requires_title_and_category() {
        let mut editor = EditorState::new_task(Priority::Medium);
        confirm_through(&mut editor);
        assert_eq!(editor.error(), Some("title is required"));

        editor.set_field(EditorFieldId::Title, "Water the plants");
        confirm_through(&mut editor);
        assert_eq!(editor.error(), Some("category is required"));
    }

    #[test]
    fn editor_validates_priority_and_due() {
        let mut editor = EditorState::new_task(Priority::Medium);
        editor.set_field(EditorFieldId::Title, "T");
        editor.set_field(EditorFieldId::Category, "Work");
        editor.set_field(EditorFieldId::Priority, "urgent");
        confirm_through(&mut editor);
        assert_eq!(editor.error(), Some("priority must be low, medium, or high"));

        editor.set_field(EditorFieldId::Priority, "high");
        editor.set_field(EditorFieldId::Due, "July 25");
        confirm_through(&mut editor);
        assert_eq!(editor.error(), Some("due date must be YYYY-MM-DD"));
    }

    #[test]
    fn submit_parses_field_values() {
        let mut editor = EditorState::new_task(Priority::Low);
        editor.set_field(EditorFieldId::Title, "  Ship release  ");
        editor.set_field(EditorFieldId::Category, "Work");
        editor.set_field(EditorFieldId::Priority, "high");
        editor.set_field(EditorFieldId::Due, "2024-07-25");

        let submit = editor.build_submit().expect("submit");
        assert_eq!(submit.title, "Ship release");
        assert_eq!(submit.category, "Work");
        assert_eq!(submit.priority, Some(Priority::High));
        assert_eq!(
            submit.due_date,
            NaiveDate::from_ymd_opt(2024, 7, 25)
        );
        assert_eq!(submit.description, None);
    }

    #[test]
    fn edit_prefills_from_task() {
        let now = Utc::now();
        let task = Task {
            id: "task-9".to_string(),
            title: "Prefill".to_string(),
            description: Some("details".to_string()),
            priority: Priority::High,
            category: "Home".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 8, 1),
            completed: false,
            created_at: now,
            updated_at: now,
        };

        let editor = EditorState::edit_task(&task);
        assert_eq!(editor.kind(), EditorKind::EditTask);
        assert_eq!(editor.task_id(), Some("task-9"));
        let submit = editor.build_submit().expect("submit");
        assert_eq!(submit.title, "Prefill");
        assert_eq!(submit.priority, Some(Priority::High));
        assert_eq!(submit.due_date, NaiveDate::from_ymd_opt(2024, 8, 1));
        assert_eq!(submit.description.as_deref(), Some("details"));
    }
}
