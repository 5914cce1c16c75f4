//! Upcoming birthday calculation.
//!
//! Given a reference date and the stored records, works out when each
//! birthday next falls and which of those occurrences land inside a window
//! of `horizon_days`. Everything here is a pure function of its inputs: the
//! caller supplies "today", nothing reads the clock.
//!
//! ## Rules
//!
//! - A birthday that falls on the reference date is 0 days away and is part
//!   of every window.
//! - A birthday that already passed this year rolls over to next year.
//! - February 29 falls back to February 28 in non-leap years. Each candidate
//!   year is checked on its own.
//! - Records whose month/day can never form a date (e.g. April 31) are left
//!   out of the results.

use chrono::{Datelike, NaiveDate};
use shared::{BirthdayRecord, UpcomingBirthday};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpcomingError {
    #[error("Horizon must be zero or more days, got {0}")]
    InvalidHorizon(i64),
}

/// Birthdays occurring within `horizon_days` of `today`, soonest first.
///
/// Records with the same distance keep the order they had in `records`.
pub fn compute_upcoming(
    today: NaiveDate,
    records: &[BirthdayRecord],
    horizon_days: i64,
) -> Result<Vec<UpcomingBirthday>, UpcomingError> {
    if horizon_days < 0 {
        return Err(UpcomingError::InvalidHorizon(horizon_days));
    }

    Ok(collect_sorted(today, records, |_, days_until| {
        days_until <= horizon_days
    }))
}

/// Occurrences of notification-enabled records that fall within each
/// record's own advance notice window, soonest first.
pub fn due_reminders(today: NaiveDate, records: &[BirthdayRecord]) -> Vec<UpcomingBirthday> {
    collect_sorted(today, records, |record, days_until| {
        record.notification_enabled && days_until <= i64::from(record.advance_notice_days)
    })
}

/// The nearest date on or after `today` that matches `month`/`day`.
///
/// Returns `None` when the pair cannot be turned into a date in either year.
pub fn next_occurrence(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    let this_year = date_in_year(today.year(), month, day)?;
    if this_year >= today {
        return Some(this_year);
    }

    date_in_year(today.year() + 1, month, day)
}

/// Render a distance in days the way the menu shows it.
pub fn days_until_label(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("{} days", n),
    }
}

fn collect_sorted<F>(today: NaiveDate, records: &[BirthdayRecord], keep: F) -> Vec<UpcomingBirthday>
where
    F: Fn(&BirthdayRecord, i64) -> bool,
{
    let mut upcoming: Vec<UpcomingBirthday> = records
        .iter()
        .filter_map(|record| {
            let occurrence = occurrence_for(today, record)?;
            keep(record, occurrence.days_until).then_some(occurrence)
        })
        .collect();

    // sort_by_key is stable, ties keep input order
    upcoming.sort_by_key(|occurrence| occurrence.days_until);
    upcoming
}

fn occurrence_for(today: NaiveDate, record: &BirthdayRecord) -> Option<UpcomingBirthday> {
    let Some(occurrence_date) = next_occurrence(today, record.month, record.day) else {
        warn!(
            "Skipping birthday for {}: {:02}-{:02} is not a calendar date",
            record.name, record.month, record.day
        );
        return None;
    };

    Some(UpcomingBirthday {
        name: record.name.clone(),
        month: record.month,
        day: record.day,
        days_until: (occurrence_date - today).num_days(),
        occurrence_date,
    })
}

fn date_in_year(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        if (month, day) == (2, 29) {
            NaiveDate::from_ymd_opt(year, 2, 28)
        } else {
            None
        }
    })
}
