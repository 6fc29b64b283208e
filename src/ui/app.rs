//! Interactive terminal UI.
//!
//! Single-threaded event loop: poll for input, mutate the store, redraw.
//! Derived views (filtered list, stats, categories) are recomputed from the
//! store on every redraw.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::category::derive_categories;
use crate::config::Config;
use crate::error::Result;
use crate::filter::TaskFilter;
use crate::task::{Priority, Task, TaskDraft, TaskStore};

use super::editor::{EditorAction, EditorKind, EditorState};
use super::model;
use super::view;

const EVENT_POLL_MS: u64 = 120;

#[derive(Clone, Copy)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

pub(crate) struct DeleteConfirmState {
    pub(crate) task_id: String,
    pub(crate) title: String,
}

pub struct AppState {
    pub(crate) store: TaskStore,
    pub(crate) default_categories: Vec<String>,
    pub(crate) visible: Vec<usize>,
    pub(crate) selected: Option<usize>,
    pub(crate) search: String,
    pub(crate) search_active: bool,
    pub(crate) category_filter: Option<String>,
    pub(crate) priority_filter: Option<Priority>,
    pub(crate) completed_filter: Option<bool>,
    pub(crate) editor: Option<EditorState>,
    pub(crate) delete_confirm: Option<DeleteConfirmState>,
    pub(crate) show_help: bool,
    pub(crate) show_detail: bool,
    info_message: Option<String>,
    error_message: Option<String>,
}

impl AppState {
    fn new(store: TaskStore, config: &Config) -> Self {
        let mut app = Self {
            store,
            default_categories: config.categories.defaults.clone(),
            visible: Vec::new(),
            selected: None,
            search: String::new(),
            search_active: false,
            category_filter: None,
            priority_filter: None,
            completed_filter: None,
            editor: None,
            delete_confirm: None,
            show_help: false,
            show_detail: true,
            info_message: None,
            error_message: None,
        };
        app.refresh();
        app
    }

    /// The filter currently assembled from the UI controls.
    pub(crate) fn filter(&self) -> TaskFilter {
        let search = self.search.trim();
        TaskFilter {
            search: if search.is_empty() {
                None
            } else {
                Some(search.to_string())
            },
            category: self.category_filter.clone(),
            priority: self.priority_filter,
            completed: self.completed_filter,
        }
    }

    /// Recompute the visible set and keep the selection in range.
    pub(crate) fn refresh(&mut self) {
        self.visible = model::visible_indices(self.store.tasks(), &self.filter());
        self.selected = match self.selected {
            _ if self.visible.is_empty() => None,
            None => Some(0),
            Some(pos) => Some(pos.min(self.visible.len() - 1)),
        };
    }

    pub(crate) fn selected_task(&self) -> Option<&Task> {
        let pos = self.selected?;
        let idx = *self.visible.get(pos)?;
        self.store.tasks().get(idx)
    }

    pub(crate) fn categories(&self) -> Vec<String> {
        derive_categories(self.store.tasks(), &self.default_categories)
    }

    pub(crate) fn has_filters(&self) -> bool {
        !self.filter().is_empty()
    }

    pub(crate) fn status_line(&self) -> Option<(String, StatusKind)> {
        if let Some(message) = self.error_message.as_ref() {
            return Some((message.clone(), StatusKind::Error));
        }
        if let Some(message) = self.info_message.as_ref() {
            return Some((message.clone(), StatusKind::Info));
        }
        None
    }

    pub(crate) fn footer_hint(&self) -> String {
        if self.delete_confirm.is_some() {
            return "y confirm delete  esc cancel".to_string();
        }
        if let Some(editor) = self.editor.as_ref() {
            if editor.confirming() {
                return "enter/y confirm  e edit  esc cancel".to_string();
            }
            return "enter next/confirm  tab move  ctrl-u clear field  esc cancel".to_string();
        }
        if self.search_active {
            return "type to search  backspace delete  enter done  esc clear".to_string();
        }
        "j/k move  / search  c category  p priority  f state  a add  e edit  x toggle  d delete  enter detail  ? help  q quit"
            .to_string()
    }

    fn set_info(&mut self, message: impl Into<String>) {
        self.info_message = Some(message.into());
        self.error_message = None;
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
        self.info_message = None;
    }

    fn clear_messages(&mut self) {
        self.info_message = None;
        self.error_message = None;
    }

    fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            self.selected = None;
            return;
        }
        let last = self.visible.len() as isize - 1;
        let current = self.selected.unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, last);
        self.selected = Some(next as usize);
    }

    fn clear_filters(&mut self) {
        self.search.clear();
        self.search_active = false;
        self.category_filter = None;
        self.priority_filter = None;
        self.completed_filter = None;
        self.refresh();
    }
}

pub fn run(store: TaskStore, config: Config) -> Result<()> {
    let mut app = AppState::new(store, &config);
    run_terminal(&mut app)
}

fn run_terminal(app: &mut AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| view::render(frame, app))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(app, key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
    }
    Ok(())
}

/// Handle one key event. Returns true to quit.
fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.editor.is_some() {
        handle_editor_key(app, key);
        return false;
    }
    if app.delete_confirm.is_some() {
        handle_delete_key(app, key);
        return false;
    }
    if app.show_help {
        app.show_help = false;
        return false;
    }
    if app.search_active {
        handle_search_key(app, key);
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc => {
            if app.has_filters() {
                app.clear_filters();
            } else {
                return true;
            }
        }
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::Char('g') | KeyCode::Home => {
            if !app.visible.is_empty() {
                app.selected = Some(0);
            }
        }
        KeyCode::Char('G') | KeyCode::End => {
            if !app.visible.is_empty() {
                app.selected = Some(app.visible.len() - 1);
            }
        }
        KeyCode::Char('/') => {
            app.clear_messages();
            app.search_active = true;
        }
        KeyCode::Char('c') => {
            let categories = app.categories();
            app.category_filter =
                model::cycle_category(app.category_filter.as_deref(), &categories);
            app.refresh();
        }
        KeyCode::Char('p') => {
            app.priority_filter = model::cycle_priority(app.priority_filter);
            app.refresh();
        }
        KeyCode::Char('f') => {
            app.completed_filter = model::cycle_completed(app.completed_filter);
            app.refresh();
        }
        KeyCode::Char('x') | KeyCode::Char(' ') => toggle_selected(app),
        KeyCode::Char('a') | KeyCode::Char('n') => {
            app.clear_messages();
            app.editor = Some(EditorState::new_task(
                app.store.config().default_priority,
            ));
        }
        KeyCode::Char('e') => {
            app.clear_messages();
            if let Some(task) = app.selected_task() {
                app.editor = Some(EditorState::edit_task(task));
            }
        }
        KeyCode::Char('d') => {
            app.clear_messages();
            if let Some(task) = app.selected_task() {
                app.delete_confirm = Some(DeleteConfirmState {
                    task_id: task.id.clone(),
                    title: task.title.clone(),
                });
            }
        }
        KeyCode::Enter => app.show_detail = !app.show_detail,
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
    false
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search.clear();
            app.search_active = false;
        }
        KeyCode::Enter => app.search_active = false,
        KeyCode::Backspace => {
            app.search.pop();
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if !ch.is_control() {
                app.search.push(ch);
            }
        }
        _ => {}
    }
    app.refresh();
}

fn handle_delete_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') => {
            if let Some(confirm) = app.delete_confirm.take() {
                app.store.delete_task(&confirm.task_id);
                app.set_info("Task deleted");
                app.refresh();
            }
        }
        KeyCode::Esc | KeyCode::Char('n') => {
            app.delete_confirm = None;
        }
        _ => {}
    }
}

fn handle_editor_key(app: &mut AppState, key: KeyEvent) {
    let Some(editor) = app.editor.as_mut() else {
        return;
    };
    match editor.handle_key(key) {
        EditorAction::None => {}
        EditorAction::Cancel => app.editor = None,
        EditorAction::Submit => submit_editor(app),
    }
}

fn toggle_selected(app: &mut AppState) {
    let Some(id) = app.selected_task().map(|task| task.id.clone()) else {
        return;
    };
    match app.store.toggle_complete(&id) {
        Some(task) if task.completed => app.set_info("Task completed"),
        Some(_) => app.set_info("Task reopened"),
        None => app.set_error(format!("task disappeared: {id}")),
    }
    app.refresh();
}

fn submit_editor(app: &mut AppState) {
    let Some(mut editor) = app.editor.take() else {
        return;
    };
    let submit = match editor.build_submit() {
        Ok(submit) => submit,
        Err(message) => {
            editor.set_error(message);
            app.editor = Some(editor);
            return;
        }
    };

    let default_priority = app.store.config().default_priority;
    match editor.kind() {
        EditorKind::NewTask => {
            app.store.add_task(TaskDraft {
                title: submit.title,
                description: submit.description,
                priority: submit.priority.unwrap_or(default_priority),
                category: submit.category,
                due_date: submit.due_date,
                completed: false,
            });
            app.set_info("Task created");
        }
        EditorKind::EditTask => {
            let Some(id) = editor.task_id().map(str::to_string) else {
                return;
            };
            let completed = app.store.get(&id).map(|task| task.completed).unwrap_or(false);
            let updated = app.store.update_task(
                &id,
                TaskDraft {
                    title: submit.title,
                    description: submit.description,
                    priority: submit.priority.unwrap_or(default_priority),
                    category: submit.category,
                    due_date: submit.due_date,
                    completed,
                },
            );
            if updated {
                app.set_info("Task updated");
            } else {
                app.set_error(format!("task disappeared: {id}"));
            }
        }
    }
    app.refresh();
}
