use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stored birthday. The name is the only identity a record has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayRecord {
    pub name: String,
    /// Month of the birthday (1-12)
    pub month: u32,
    /// Day of the month (1-31)
    pub day: u32,
    /// Whether the person wants a reminder ahead of the birthday
    pub notification_enabled: bool,
    /// Lead time for the reminder, 0 when notifications are off
    pub advance_notice_days: u32,
}

impl BirthdayRecord {
    pub fn month_day(&self) -> MonthDay {
        MonthDay {
            month: self.month,
            day: self.day,
        }
    }

    /// Stored representation of the notification flag ("y" or "n")
    pub fn notification_flag(&self) -> &'static str {
        if self.notification_enabled {
            "y"
        } else {
            "n"
        }
    }
}

/// A birthday's next occurrence relative to some reference date.
///
/// Computed on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingBirthday {
    pub name: String,
    pub month: u32,
    pub day: u32,
    /// Whole days from the reference date, 0 when the birthday is today
    pub days_until: i64,
    /// The concrete date the birthday falls on (this year or next)
    pub occurrence_date: NaiveDate,
}

/// Month and day without a year, written as `mm-dd`.
///
/// Parsing only checks the shape of the text. Whether the pair names a real
/// calendar day is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = MonthDayParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (month, day) = s.split_once('-').ok_or(MonthDayParseError)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(month) || !two_digits(day) {
            return Err(MonthDayParseError);
        }

        Ok(Self {
            month: month.parse().map_err(|_| MonthDayParseError)?,
            day: day.parse().map_err(|_| MonthDayParseError)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthDayParseError;

impl fmt::Display for MonthDayParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expected a birthday in mm-dd format")
    }
}

impl std::error::Error for MonthDayParseError {}

/// Request to create a birthday record. The birthday is raw `mm-dd` input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBirthdayRequest {
    pub name: String,
    pub birthday: String,
    pub notification_enabled: bool,
    pub advance_notice_days: u32,
}

/// Request to update a birthday record; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBirthdayRequest {
    pub birthday: Option<String>,
    pub notification_enabled: Option<bool>,
    pub advance_notice_days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthdayListResponse {
    pub birthdays: Vec<BirthdayRecord>,
}

/// Birthdays falling inside a window starting at `reference_date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingBirthdaysResponse {
    pub reference_date: NaiveDate,
    pub horizon_days: i64,
    pub birthdays: Vec<UpcomingBirthday>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueRemindersResponse {
    pub reference_date: NaiveDate,
    pub reminders: Vec<UpcomingBirthday>,
}
