//! Recurrence rule definition
//!
//! A schedule template carries exactly one recurrence rule. The rule is a
//! closed set of repeat-pattern variants; parameters only exist on the
//! variant they belong to, so invalid combinations (a weekday set on a
//! daily rule, say) cannot be represented at all.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::utils::errors::{Result, TaskBuddyError};

/// Highest day-of-month a monthly rule may target. Capping at 28 keeps the
/// target representable in every month of every year.
pub const MAX_MONTHLY_DAY: u32 = 28;

/// Repeat pattern of a schedule template.
///
/// Weekdays are ISO numbered: 1 = Monday .. 7 = Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecurrenceRule {
    /// Single occurrence, no repetition.
    None,
    /// Repeats every calendar day.
    Daily,
    /// Repeats on one or more ISO weekdays.
    Weekly { weekdays: BTreeSet<u32> },
    /// Repeats on a fixed day-of-month (1..=28). `None` means "use the
    /// base date's day-of-month", clamped to 28.
    Monthly { day: Option<u32> },
    /// Repeats on the last calendar day of each month.
    MonthlyLastDay,
    /// Repeats every `days` calendar days from the base date.
    Interval { days: i64 },
}

impl RecurrenceRule {
    /// Whether this rule produces more than one occurrence.
    pub fn is_repeating(&self) -> bool {
        !matches!(self, RecurrenceRule::None)
    }

    /// Validate rule parameters for template creation.
    ///
    /// Projection itself never fails on malformed parameters (it degrades
    /// to a next-day fallback); this check lets callers reject bad rules
    /// before they are stored.
    pub fn validate(&self) -> Result<()> {
        match self {
            RecurrenceRule::Weekly { weekdays } => {
                if weekdays.is_empty() {
                    return Err(TaskBuddyError::InvalidInput(
                        "weekly rule requires at least one weekday".to_string(),
                    ));
                }
                if let Some(day) = weekdays.iter().find(|d| !(1..=7).contains(*d)) {
                    return Err(TaskBuddyError::InvalidInput(format!(
                        "weekday {} is out of range 1..=7",
                        day
                    )));
                }
                Ok(())
            }
            RecurrenceRule::Monthly { day: Some(day) } => {
                if !(1..=MAX_MONTHLY_DAY).contains(day) {
                    return Err(TaskBuddyError::InvalidInput(format!(
                        "monthly day {} is out of range 1..=28",
                        day
                    )));
                }
                Ok(())
            }
            RecurrenceRule::Interval { days } => {
                if *days <= 0 {
                    return Err(TaskBuddyError::InvalidInput(format!(
                        "interval of {} days must be positive",
                        days
                    )));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
