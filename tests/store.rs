use tm::config::TasksConfig;
use tm::seed::sample_tasks;
use tm::task::{Priority, TaskDraft, TaskStore};

fn draft(title: &str, category: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: None,
        priority: Priority::Medium,
        category: category.to_string(),
        due_date: None,
        completed: false,
    }
}

fn seeded() -> TaskStore {
    TaskStore::with_tasks(TasksConfig::default(), sample_tasks())
}

#[test]
fn updated_at_never_precedes_created_at() {
    let mut store = seeded();
    let added_id = store.add_task(draft("fresh", "Work")).id.clone();

    store.toggle_complete("task-1");
    store.update_task("task-3", draft("rewritten", "Work"));
    store.toggle_complete(&added_id);

    for task in store.tasks() {
        assert!(
            task.updated_at >= task.created_at,
            "task {} violates the timestamp invariant",
            task.id
        );
    }
}

#[test]
fn delete_makes_later_operations_noops() {
    let mut store = seeded();
    assert!(store.delete_task("task-2"));

    assert!(!store.delete_task("task-2"));
    assert!(!store.update_task("task-2", draft("ghost", "Work")));
    assert!(store.toggle_complete("task-2").is_none());
    assert!(store.get("task-2").is_none());
    assert_eq!(store.len(), 3);
}

#[test]
fn add_prepends_most_recent_first() {
    let mut store = seeded();
    let id = store.add_task(draft("newest", "Work")).id.clone();
    assert_eq!(store.tasks()[0].id, id);
    assert_eq!(store.len(), 5);
    // Existing order is untouched behind the new head.
    assert_eq!(store.tasks()[1].id, "task-1");
    assert_eq!(store.tasks()[4].id, "task-4");
}

#[test]
fn add_then_toggle_completes_the_task() {
    let mut store = TaskStore::new(TasksConfig::default());
    let id = store.add_task(draft("X", "Work")).id.clone();

    let task = store.toggle_complete(&id).expect("task");
    assert!(task.completed);
    assert!(task.updated_at >= task.created_at);
}

#[test]
fn toggle_is_freely_reversible() {
    let mut store = seeded();
    // task-2 starts completed; any order of flips is legal.
    for _ in 0..3 {
        store.toggle_complete("task-2");
    }
    assert!(!store.get("task-2").expect("task").completed);
}

#[test]
fn update_keeps_position_in_list() {
    let mut store = seeded();
    store.update_task("task-3", draft("still third", "Work"));
    assert_eq!(store.tasks()[2].id, "task-3");
    assert_eq!(store.tasks()[2].title, "still third");
}
