use chrono::{DateTime, Utc};
use predicates::str::contains;
use serde_json::Value;

mod support;

use support::tm_cmd;

fn json_output(args: &[&str]) -> Value {
    let output = tm_cmd()
        .args(args)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("json envelope")
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|instant| instant.with_timezone(&Utc))
        .expect("rfc3339 timestamp")
}

#[test]
fn add_emits_the_created_task() {
    let value = json_output(&[
        "add",
        "Write report",
        "--category",
        "Work",
        "--priority",
        "high",
        "--due",
        "2024-09-01",
    ]);

    assert_eq!(value["schema_version"].as_str(), Some("tm.v1"));
    assert_eq!(value["command"].as_str(), Some("add"));
    assert_eq!(value["status"].as_str(), Some("success"));

    let task = &value["data"];
    assert!(task["id"].as_str().expect("id").starts_with("task-"));
    assert_eq!(task["title"].as_str(), Some("Write report"));
    assert_eq!(task["priority"].as_str(), Some("high"));
    assert_eq!(task["category"].as_str(), Some("Work"));
    assert_eq!(task["due_date"].as_str(), Some("2024-09-01"));
    assert_eq!(task["completed"].as_bool(), Some(false));
    assert_eq!(timestamp(&task["created_at"]), timestamp(&task["updated_at"]));
}

#[test]
fn add_rejects_blank_title_and_category() {
    tm_cmd()
        .args(["add", "   ", "--category", "Work"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("title cannot be empty"));

    tm_cmd()
        .args(["add", "Real title", "--category", "  "])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("category cannot be empty"));
}

#[test]
fn add_rejects_unknown_priority_and_bad_due() {
    tm_cmd()
        .args(["add", "T", "--category", "Work", "--priority", "urgent"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("priority must be low, medium, or high"));

    tm_cmd()
        .args(["add", "T", "--category", "Work", "--due", "tomorrow"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("due date must be YYYY-MM-DD"));
}

#[test]
fn done_toggles_in_both_directions() {
    // task-1 is seeded pending.
    let value = json_output(&["done", "task-1"]);
    assert_eq!(value["data"]["completed"].as_bool(), Some(true));
    let task = &value["data"];
    assert!(timestamp(&task["updated_at"]) > timestamp(&task["created_at"]));

    // task-2 is seeded completed; toggling reopens it.
    let value = json_output(&["done", "task-2"]);
    assert_eq!(value["data"]["completed"].as_bool(), Some(false));
}

#[test]
fn show_resolves_ids_and_unique_prefixes() {
    let value = json_output(&["show", "task-3"]);
    assert_eq!(value["data"]["title"].as_str(), Some("Prepare presentation"));

    let value = json_output(&["show", "3"]);
    assert_eq!(value["data"]["id"].as_str(), Some("task-3"));
}

#[test]
fn ambiguous_prefix_is_rejected() {
    tm_cmd()
        .args(["show", "task"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("ambiguous task id"));
}

#[test]
fn unknown_id_fails_with_hint() {
    tm_cmd()
        .args(["show", "task-zzzz"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Task not found"))
        .stderr(contains("hint: tm list"));
}

#[test]
fn edit_overrides_only_given_fields() {
    let value = json_output(&[
        "edit",
        "task-4",
        "--title",
        "Book dentist appointment",
        "--due",
        "2024-12-01",
    ]);

    let task = &value["data"];
    assert_eq!(task["title"].as_str(), Some("Book dentist appointment"));
    assert_eq!(task["due_date"].as_str(), Some("2024-12-01"));
    // Untouched fields keep their seeded values.
    assert_eq!(task["category"].as_str(), Some("Health"));
    assert_eq!(task["priority"].as_str(), Some("low"));
    assert_eq!(task["completed"].as_bool(), Some(false));
    assert!(timestamp(&task["updated_at"]) > timestamp(&task["created_at"]));
}

#[test]
fn edit_can_clear_optional_fields() {
    let value = json_output(&["edit", "task-1", "--clear-due", "--clear-description"]);
    let task = &value["data"];
    assert!(task["due_date"].is_null());
    assert!(task["description"].is_null());
}

#[test]
fn rm_deletes_by_prefix() {
    let value = json_output(&["rm", "1"]);
    assert_eq!(value["data"]["id"].as_str(), Some("task-1"));
}

#[test]
fn empty_session_starts_blank() {
    let value = json_output(&["--empty", "list"]);
    assert_eq!(value["data"]["total"].as_u64(), Some(0));

    let value = json_output(&["--empty", "add", "First", "--category", "Inbox"]);
    assert!(value["data"]["id"].as_str().expect("id").starts_with("task-"));
}

#[test]
fn list_applies_filters_and_limit() {
    let value = json_output(&["list"]);
    assert_eq!(value["data"]["total"].as_u64(), Some(4));

    let value = json_output(&["list", "--category", "Work", "--pending"]);
    assert_eq!(value["data"]["total"].as_u64(), Some(2));

    let value = json_output(&["list", "--search", "GROCERIES", "--completed"]);
    assert_eq!(value["data"]["total"].as_u64(), Some(1));
    assert_eq!(
        value["data"]["tasks"][0]["title"].as_str(),
        Some("Buy groceries")
    );

    let value = json_output(&["list", "--limit", "2"]);
    assert_eq!(value["data"]["total"].as_u64(), Some(2));
}

#[test]
fn list_conflicting_state_flags_fail() {
    tm_cmd()
        .args(["list", "--completed", "--pending"])
        .assert()
        .failure();
}
