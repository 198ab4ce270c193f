//! Schedule template model

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recurrence::rule::RecurrenceRule;

/// A reusable schedule owned by a user or a group.
///
/// Templates are never regenerated into the past: projection works from
/// the effective start, which advances with each recorded completion.
/// Retired templates keep their record but stop projecting
/// (`is_active = false`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleTemplate {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub rule: RecurrenceRule,
    /// Gate the next occurrence on completion of the current one. Only
    /// meaningful for interval rules; ignored elsewhere.
    pub requires_completion: bool,
    pub is_active: bool,
    pub group_id: Option<i64>,
    pub created_by: i64,
    pub start_date: NaiveDate,
    pub last_completed_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScheduleTemplate {
    /// The date instance generation is based on: the day after the last
    /// recorded completion, or the template's start date before any
    /// completion exists.
    pub fn effective_start(&self) -> NaiveDate {
        match self.last_completed_date {
            Some(completed) => completed + Days::new(1),
            None => self.start_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    pub title: String,
    pub description: Option<String>,
    pub rule: RecurrenceRule,
    pub requires_completion: bool,
    pub group_id: Option<i64>,
    pub created_by: i64,
    /// Defaults to the current date when omitted.
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTemplateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub rule: Option<RecurrenceRule>,
    pub requires_completion: Option<bool>,
    pub is_active: Option<bool>,
}
