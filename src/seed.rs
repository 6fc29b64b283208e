//! Sample session data.
//!
//! Task state is transient, so every session starts from this fixed list
//! (unless seeding is disabled). Ids use the default prefix so they resolve
//! like generated ones.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::task::{Priority, Task};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    date(y, m, d).and_time(NaiveTime::MIN).and_utc()
}

/// The fixed sample task list used to seed a session.
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task {
            id: "task-1".to_string(),
            title: "Design new landing page".to_string(),
            description: Some(
                "Create a modern, responsive landing page for the new product launch".to_string(),
            ),
            priority: Priority::High,
            category: "Work".to_string(),
            due_date: Some(date(2024, 7, 25)),
            completed: false,
            created_at: day(2024, 7, 15),
            updated_at: day(2024, 7, 15),
        },
        Task {
            id: "task-2".to_string(),
            title: "Buy groceries".to_string(),
            description: Some("Milk, bread, eggs, vegetables".to_string()),
            priority: Priority::Medium,
            category: "Shopping".to_string(),
            due_date: Some(date(2024, 7, 20)),
            completed: true,
            created_at: day(2024, 7, 18),
            updated_at: day(2024, 7, 19),
        },
        Task {
            id: "task-3".to_string(),
            title: "Prepare presentation".to_string(),
            description: Some("Quarterly review presentation for the team meeting".to_string()),
            priority: Priority::High,
            category: "Work".to_string(),
            due_date: Some(date(2024, 7, 22)),
            completed: false,
            created_at: day(2024, 7, 16),
            updated_at: day(2024, 7, 16),
        },
        Task {
            id: "task-4".to_string(),
            title: "Schedule doctor appointment".to_string(),
            description: None,
            priority: Priority::Low,
            category: "Health".to_string(),
            due_date: None,
            completed: false,
            created_at: day(2024, 7, 17),
            updated_at: day(2024, 7, 17),
        },
    ]
}
