//! tm stats and categories command implementations.

use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;

use crate::category::derive_categories;
use crate::cli::Context;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::stats::{aggregate, TaskStats};

#[derive(Serialize)]
struct StatsOutput {
    as_of: DateTime<Utc>,
    #[serde(flatten)]
    stats: TaskStats,
}

#[derive(Serialize)]
struct CategoriesOutput {
    total: usize,
    categories: Vec<String>,
}

pub fn run_stats(ctx: Context, as_of: Option<&str>, out: OutputOptions) -> Result<()> {
    let as_of = match as_of {
        Some(value) => parse_as_of(value)?,
        None => Utc::now(),
    };
    let stats = aggregate(ctx.store.tasks(), as_of);

    let mut human = HumanOutput::new("Task stats");
    human.push_summary("As of", as_of.to_rfc3339());
    human.push_summary("Total", stats.total.to_string());
    human.push_summary("Completed", stats.completed.to_string());
    human.push_summary("Pending", stats.pending.to_string());
    human.push_summary("Overdue", stats.overdue.to_string());

    emit_success(out, "stats", &StatsOutput { as_of, stats }, Some(&human))
}

pub fn run_categories(ctx: Context, out: OutputOptions) -> Result<()> {
    let categories = derive_categories(ctx.store.tasks(), &ctx.config.categories.defaults);

    let mut human = HumanOutput::new("Categories");
    human.push_summary("Total", categories.len().to_string());
    for category in &categories {
        human.push_detail(category.clone());
    }

    let output = CategoriesOutput {
        total: categories.len(),
        categories,
    };

    emit_success(out, "categories", &output, Some(&human))
}

/// Accepts an RFC 3339 timestamp or a plain date (interpreted as midnight
/// UTC).
pub(crate) fn parse_as_of(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(Error::InvalidArgument(format!(
        "as-of must be RFC 3339 or YYYY-MM-DD (got '{value}')"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_as_of_accepts_both_forms() {
        let from_date = parse_as_of("2024-07-25").expect("date");
        let from_rfc = parse_as_of("2024-07-25T00:00:00Z").expect("rfc3339");
        assert_eq!(from_date, from_rfc);
        assert!(parse_as_of("yesterday").is_err());
    }
}
