//! Instance window generation
//!
//! Turns a schedule template into the ordered list of calendar dates for
//! which task instances must exist in the near-term horizon. Pure date
//! generation: the scheduler service one layer up diffs the result against
//! already-materialized instances and upserts the missing ones, keyed by
//! `(template_id, scheduled_date)`, so re-running generation is idempotent.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::models::template::ScheduleTemplate;
use crate::recurrence::projector::{last_day_of_month, month_after, next_date, next_day};
use crate::recurrence::rule::{RecurrenceRule, MAX_MONTHLY_DAY};

/// Hard cap on projected dates per template per run. The window end
/// already bounds generation; this guards against a rule that fails to
/// advance.
pub const MAX_PROJECTED_DATES: usize = 365;

/// End of the projection horizon: the last calendar day of the month
/// following `today`'s month. Dates equal to the window end are included.
pub fn window_end(today: NaiveDate) -> NaiveDate {
    let (year, month) = month_after(today.year(), today.month());
    last_day_of_month(year, month).unwrap_or(today)
}

/// Project the dates on which `template` needs a task instance, starting
/// at `today` (caller-supplied, never read from a clock).
///
/// One-shot templates (`RecurrenceRule::None`) and completion-gated
/// interval templates produce at most a single date: `today`, and only
/// while no instance exists at or after the template's effective start.
/// Everything else projects from the first occurrence on or after `today`
/// up to and including the window end.
///
/// The result is strictly ascending with no duplicates and never exceeds
/// [`MAX_PROJECTED_DATES`] entries.
pub fn project_instances(
    template: &ScheduleTemplate,
    today: NaiveDate,
    existing: &BTreeSet<NaiveDate>,
) -> Vec<NaiveDate> {
    if !template.is_active {
        return Vec::new();
    }

    if is_single_instance(template) {
        let effective_start = template.effective_start();
        let already_pending = existing.iter().any(|date| *date >= effective_start);
        return if already_pending { Vec::new() } else { vec![today] };
    }

    let end = window_end(today);
    let mut dates = Vec::new();
    let mut current = match first_occurrence(&template.rule, today) {
        Some(date) => date,
        None => return dates,
    };

    while current <= end && dates.len() < MAX_PROJECTED_DATES {
        dates.push(current);
        match next_date(&template.rule, current) {
            Some(next) => current = next,
            None => break,
        }
    }

    dates
}

/// Templates that only ever carry one open instance at a time: one-shots,
/// and interval templates gated on completion of the previous instance.
fn is_single_instance(template: &ScheduleTemplate) -> bool {
    match template.rule {
        RecurrenceRule::None => true,
        RecurrenceRule::Interval { .. } => template.requires_completion,
        _ => false,
    }
}

/// First occurrence of a repeating rule on or after `today`.
fn first_occurrence(rule: &RecurrenceRule, today: NaiveDate) -> Option<NaiveDate> {
    match rule {
        RecurrenceRule::None => None,
        RecurrenceRule::Daily | RecurrenceRule::Interval { .. } => Some(today),
        RecurrenceRule::Weekly { weekdays } => {
            if weekdays.contains(&today.weekday().number_from_monday()) {
                Some(today)
            } else {
                // Seed the projector one day back so today itself is a
                // candidate.
                next_date(rule, today - chrono::Days::new(1))
            }
        }
        RecurrenceRule::Monthly { day } => {
            let target = day.unwrap_or(today.day()).min(MAX_MONTHLY_DAY);
            let candidate = if target >= today.day() {
                NaiveDate::from_ymd_opt(today.year(), today.month(), target)
            } else {
                let (year, month) = month_after(today.year(), today.month());
                NaiveDate::from_ymd_opt(year, month, target)
            };
            Some(candidate.unwrap_or_else(|| next_day(today)))
        }
        RecurrenceRule::MonthlyLastDay => match last_day_of_month(today.year(), today.month()) {
            Some(last) if last >= today => Some(last),
            _ => {
                let (year, month) = month_after(today.year(), today.month());
                Some(last_day_of_month(year, month).unwrap_or_else(|| next_day(today)))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn template(rule: RecurrenceRule, requires_completion: bool) -> ScheduleTemplate {
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
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_window_end_is_last_day_of_following_month() {
        assert_eq!(window_end(date(2024, 1, 15)), date(2024, 2, 29));
        assert_eq!(window_end(date(2024, 12, 3)), date(2025, 1, 31));
        assert_eq!(window_end(date(2024, 11, 30)), date(2024, 12, 31));
    }

    #[test]
    fn test_inactive_template_projects_nothing() {
        let mut t = template(RecurrenceRule::Daily, false);
        t.is_active = false;
        assert!(project_instances(&t, date(2024, 5, 1), &BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_daily_fills_window_inclusive_of_end() {
        let t = template(RecurrenceRule::Daily, false);
        let today = date(2024, 5, 1);
        let dates = project_instances(&t, today, &BTreeSet::new());

        // May 1 through June 30, both inclusive
        assert_eq!(dates.first(), Some(&today));
        assert_eq!(dates.last(), Some(&date(2024, 6, 30)));
        assert_eq!(dates.len(), 61);
    }

    #[test]
    fn test_output_is_strictly_ascending_and_bounded() {
        let t = template(RecurrenceRule::Daily, false);
        let dates = project_instances(&t, date(2024, 5, 1), &BTreeSet::new());
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(dates.len() <= MAX_PROJECTED_DATES);
    }

    #[test]
    fn test_one_shot_projects_today_once() {
        let t = template(RecurrenceRule::None, false);
        let today = date(2024, 5, 1);
        assert_eq!(project_instances(&t, today, &BTreeSet::new()), vec![today]);

        // an instance at or after the start date suppresses regeneration
        let existing: BTreeSet<NaiveDate> = [date(2024, 4, 20)].into_iter().collect();
        assert!(project_instances(&t, today, &existing).is_empty());
    }

    #[test]
    fn test_gated_interval_projects_single_date() {
        let t = template(RecurrenceRule::Interval { days: 3 }, true);
        let today = date(2024, 5, 1);
        assert_eq!(project_instances(&t, today, &BTreeSet::new()), vec![today]);
    }

    #[test]
    fn test_gated_interval_waits_for_completion() {
        let mut t = template(RecurrenceRule::Interval { days: 3 }, true);
        let today = date(2024, 5, 2);
        let existing: BTreeSet<NaiveDate> = [date(2024, 5, 1)].into_iter().collect();

        // open instance from yesterday blocks a new one
        assert!(project_instances(&t, today, &existing).is_empty());

        // completion advances the effective start past the old instance
        t.last_completed_date = Some(date(2024, 5, 1));
        assert_eq!(project_instances(&t, today, &existing), vec![today]);
    }

    #[test]
    fn test_ungated_interval_fills_window() {
        let t = template(RecurrenceRule::Interval { days: 10 }, false);
        let dates = project_instances(&t, date(2024, 5, 1), &BTreeSet::new());
        assert_eq!(
            dates,
            vec![
                date(2024, 5, 1),
                date(2024, 5, 11),
                date(2024, 5, 21),
                date(2024, 5, 31),
                date(2024, 6, 10),
                date(2024, 6, 20),
                date(2024, 6, 30),
            ]
        );
    }

    #[test]
    fn test_weekly_starts_on_today_when_matching() {
        // 2024-05-06 is a Monday
        let weekdays: BTreeSet<u32> = [1].into_iter().collect();
        let t = template(RecurrenceRule::Weekly { weekdays }, false);
        let dates = project_instances(&t, date(2024, 5, 6), &BTreeSet::new());
        assert_eq!(dates.first(), Some(&date(2024, 5, 6)));
        assert!(dates.iter().all(|d| d.weekday().number_from_monday() == 1));
        assert!(dates.windows(2).all(|pair| pair[1] - pair[0] == chrono::Duration::days(7)));
    }

    #[test]
    fn test_weekly_seeks_first_match_after_today() {
        // 2024-05-08 is a Wednesday; every-Monday rule starts the 13th
        let weekdays: BTreeSet<u32> = [1].into_iter().collect();
        let t = template(RecurrenceRule::Weekly { weekdays }, false);
        let dates = project_instances(&t, date(2024, 5, 8), &BTreeSet::new());
        assert_eq!(dates.first(), Some(&date(2024, 5, 13)));
    }

    #[test]
    fn test_monthly_keeps_current_month_when_day_not_passed() {
        let t = template(RecurrenceRule::Monthly { day: Some(20) }, false);
        let dates = project_instances(&t, date(2024, 5, 10), &BTreeSet::new());
        assert_eq!(dates, vec![date(2024, 5, 20), date(2024, 6, 20)]);
    }

    #[test]
    fn test_monthly_skips_to_next_month_when_day_passed() {
        let t = template(RecurrenceRule::Monthly { day: Some(5) }, false);
        let dates = project_instances(&t, date(2024, 5, 10), &BTreeSet::new());
        assert_eq!(dates, vec![date(2024, 6, 5)]);
    }

    #[test]
    fn test_monthly_today_counts_as_not_passed() {
        let t = template(RecurrenceRule::Monthly { day: Some(10) }, false);
        let dates = project_instances(&t, date(2024, 5, 10), &BTreeSet::new());
        assert_eq!(dates.first(), Some(&date(2024, 5, 10)));
    }

    #[test]
    fn test_monthly_last_day_uses_this_month_until_it_passes() {
        let t = template(RecurrenceRule::MonthlyLastDay, false);
        let dates = project_instances(&t, date(2024, 1, 10), &BTreeSet::new());
        assert_eq!(dates, vec![date(2024, 1, 31), date(2024, 2, 29)]);

        // from the last day itself
        let dates = project_instances(&t, date(2024, 1, 31), &BTreeSet::new());
        assert_eq!(dates.first(), Some(&date(2024, 1, 31)));
    }
}
