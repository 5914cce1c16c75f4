//! Input validation for birthday records.
//!
//! These functions turn raw user input into the values a record stores. The
//! error messages are shown to the user as-is.

use shared::MonthDay;

/// Longest name a record may have, in characters
pub const MAX_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BirthdayValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name cannot exceed 100 characters")]
    NameTooLong,
    #[error("Birthday must be in mm-dd format")]
    BirthdayFormat,
    #[error("Month must be between 1 and 12")]
    MonthOutOfRange,
    #[error("Invalid day {day} for month {month}")]
    DayOutOfRange { month: u32, day: u32 },
    #[error("Please enter 'y' for yes or 'n' for no")]
    YesNoChoice,
    #[error("Advance days must be a whole number of zero or more")]
    AdvanceDays,
}

/// Trim a name and check it can be used as a record key.
pub fn validate_name(name: &str) -> Result<&str, BirthdayValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BirthdayValidationError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(BirthdayValidationError::NameTooLong);
    }
    Ok(name)
}

/// Parse a `mm-dd` birthday and check it names a day that exists in a leap
/// year, so `02-29` is accepted and `04-31` is not.
pub fn parse_birthday(input: &str) -> Result<MonthDay, BirthdayValidationError> {
    let month_day: MonthDay = input
        .trim()
        .parse()
        .map_err(|_| BirthdayValidationError::BirthdayFormat)?;

    validate_month_day(month_day)?;
    Ok(month_day)
}

/// Range checks for an already parsed month/day pair.
pub fn validate_month_day(month_day: MonthDay) -> Result<(), BirthdayValidationError> {
    let MonthDay { month, day } = month_day;
    if !(1..=12).contains(&month) {
        return Err(BirthdayValidationError::MonthOutOfRange);
    }
    if day < 1 || day > max_day_in_month(month) {
        return Err(BirthdayValidationError::DayOutOfRange { month, day });
    }
    Ok(())
}

/// Parse a yes/no answer: `y`, `yes`, `n` or `no` in any case.
pub fn parse_yes_no(input: &str) -> Result<bool, BirthdayValidationError> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(BirthdayValidationError::YesNoChoice),
    }
}

/// Whether the user wants birthday notifications.
pub fn parse_notification(input: &str) -> Result<bool, BirthdayValidationError> {
    parse_yes_no(input)
}

pub fn parse_advance_days(input: &str) -> Result<u32, BirthdayValidationError> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| BirthdayValidationError::AdvanceDays)
}

fn max_day_in_month(month: u32) -> u32 {
    match month {
        2 => 29,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
