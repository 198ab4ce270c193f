//! Next-occurrence projection
//!
//! Computes the single next occurrence date for a recurrence rule from a
//! base date. Projection works at day granularity only; time-of-day never
//! participates. Malformed rule parameters never fail projection, they
//! degrade to a next-day fallback (see `RecurrenceRule::validate` for
//! creation-time rejection).

use chrono::{Datelike, Days, NaiveDate};

use crate::recurrence::rule::{RecurrenceRule, MAX_MONTHLY_DAY};

/// Upper bound on the forward scan for a matching weekday. One full week
/// is sufficient for any non-empty weekday set; the doubled bound keeps a
/// buggy set from looping forever.
const WEEKDAY_SCAN_DAYS: u64 = 14;

/// Compute the next occurrence date for `rule` after `base`.
///
/// Returns `None` only for `RecurrenceRule::None`; every other variant
/// yields a date strictly after `base`.
pub fn next_date(rule: &RecurrenceRule, base: NaiveDate) -> Option<NaiveDate> {
    match rule {
        RecurrenceRule::None => None,
        RecurrenceRule::Daily => Some(next_day(base)),
        RecurrenceRule::Weekly { weekdays } => {
            let found = (1..=WEEKDAY_SCAN_DAYS)
                .map(|offset| base + Days::new(offset))
                .find(|candidate| weekdays.contains(&candidate.weekday().number_from_monday()));
            Some(found.unwrap_or_else(|| next_day(base)))
        }
        RecurrenceRule::Monthly { day } => {
            let target = day.unwrap_or(base.day()).min(MAX_MONTHLY_DAY);
            let (year, month) = month_after(base.year(), base.month());
            Some(NaiveDate::from_ymd_opt(year, month, target).unwrap_or_else(|| next_day(base)))
        }
        RecurrenceRule::MonthlyLastDay => {
            let (year, month) = month_after(base.year(), base.month());
            Some(last_day_of_month(year, month).unwrap_or_else(|| next_day(base)))
        }
        RecurrenceRule::Interval { days } => {
            if *days <= 0 {
                Some(next_day(base))
            } else {
                // an interval past the calendar's end degrades like other
                // malformed parameters instead of overflowing
                Some(
                    base.checked_add_days(Days::new(*days as u64))
                        .unwrap_or_else(|| next_day(base)),
                )
            }
        }
    }
}

/// The day after `date`.
pub(crate) fn next_day(date: NaiveDate) -> NaiveDate {
    date + Days::new(1)
}

/// The (year, month) pair following the given month, wrapping the year.
pub(crate) fn month_after(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Last calendar day of the given month: the day before the first of the
/// following month, so leap years fall out of the calendar arithmetic.
pub(crate) fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = month_after(year, month);
    NaiveDate::from_ymd_opt(next_year, next_month, 1).map(|first| first - Days::new(1))
}
