//! Task instance model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recurrence::rule::RecurrenceRule;

/// One concrete, dated occurrence materialized from a schedule template.
///
/// Instances are keyed by `(template_id, scheduled_date)`: once an
/// instance exists for a date it is never regenerated, only marked
/// complete. The recurrence parameters are copied onto the instance so it
/// can be displayed without re-joining the template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInstance {
    pub id: Uuid,
    pub template_id: Uuid,
    pub group_id: Option<i64>,
    pub title: String,
    pub scheduled_date: NaiveDate,
    pub recurrence: RecurrenceRule,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskInstance {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub template_id: Uuid,
    pub group_id: Option<i64>,
    pub title: String,
    pub scheduled_date: NaiveDate,
    pub recurrence: RecurrenceRule,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
}
