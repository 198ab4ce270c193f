//! Test data helpers for creating test objects
//!
//! Builders for templates, requests and dates used across the integration
//! tests.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use TaskBuddy::models::template::{CreateTemplateRequest, ScheduleTemplate};
use TaskBuddy::recurrence::RecurrenceRule;

/// Shorthand for building a calendar date in tests
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Build an ISO weekday set
pub fn weekdays(days: &[u32]) -> BTreeSet<u32> {
    days.iter().copied().collect()
}

/// A detached template record, not persisted anywhere
pub fn template_with_rule(rule: RecurrenceRule, requires_completion: bool) -> ScheduleTemplate {
    let now = Utc::now();
    ScheduleTemplate {
        id: Uuid::new_v4(),
        title: "Water the plants".to_string(),
        description: None,
        rule,
        requires_completion,
        is_active: true,
        group_id: None,
        created_by: 1,
        start_date: date(2024, 1, 1),
        last_completed_date: None,
        created_at: now,
        updated_at: now,
    }
}

/// A create request for a personal template starting at a fixed date
pub fn create_template_request(
    rule: RecurrenceRule,
    created_by: i64,
    group_id: Option<i64>,
) -> CreateTemplateRequest {
    CreateTemplateRequest {
        title: "Take out the recycling".to_string(),
        description: None,
        rule,
        requires_completion: false,
        group_id,
        created_by,
        start_date: Some(date(2024, 1, 1)),
    }
}
