//! Plain-text rendering of records and upcoming birthdays.

use std::io::Write;

use anyhow::Result;
use shared::{BirthdayRecord, UpcomingBirthday};

use crate::backend::domain::days_until_label;

const RULE_WIDTH: usize = 60;

/// Write the "view all" table.
pub fn write_record_table<W: Write>(out: &mut W, records: &[BirthdayRecord]) -> Result<()> {
    if records.is_empty() {
        writeln!(out, "No birthday records found.")?;
        return Ok(());
    }

    let rule = "-".repeat(RULE_WIDTH);
    writeln!(out, "\nAll Birthday Records:")?;
    writeln!(out, "{}", rule)?;
    writeln!(
        out,
        "{:<20} {:<10} {:<15} {:<12}",
        "Name", "Birthday", "Notifications", "Advance Days"
    )?;
    writeln!(out, "{}", rule)?;
    for record in records {
        writeln!(
            out,
            "{:<20} {:<10} {:<15} {:<12}",
            record.name,
            record.month_day().to_string(),
            record.notification_flag(),
            record.advance_notice_days
        )?;
    }
    writeln!(out, "{}", rule)?;
    Ok(())
}

/// Write a single record the way a search shows it.
pub fn write_record_details<W: Write>(out: &mut W, record: &BirthdayRecord) -> Result<()> {
    writeln!(out, "\nRecord found:")?;
    writeln!(out, "Name: {}", record.name)?;
    writeln!(out, "Birthday: {}", record.month_day())?;
    writeln!(out, "Notifications: {}", record.notification_flag())?;
    writeln!(out, "Advance Days: {}", record.advance_notice_days)?;
    Ok(())
}

/// Write the upcoming list for a window of `horizon_days`.
pub fn write_upcoming<W: Write>(
    out: &mut W,
    upcoming: &[UpcomingBirthday],
    horizon_days: i64,
) -> Result<()> {
    if upcoming.is_empty() {
        writeln!(out, "No birthdays in the next {} days.", horizon_days)?;
        return Ok(());
    }

    writeln!(out, "\nUpcoming birthdays (next {} days):", horizon_days)?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for birthday in upcoming {
        writeln!(out, "{}", upcoming_line(birthday))?;
    }
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    Ok(())
}

/// Write due reminders, one line each.
pub fn write_reminders<W: Write>(out: &mut W, reminders: &[UpcomingBirthday]) -> Result<()> {
    if reminders.is_empty() {
        writeln!(out, "No reminders due.")?;
        return Ok(());
    }

    for reminder in reminders {
        let when = match reminder.days_until {
            0 | 1 => days_until_label(reminder.days_until),
            _ => format!("in {}", days_until_label(reminder.days_until)),
        };
        writeln!(
            out,
            "Reminder: {}'s birthday is {} ({})",
            reminder.name, when, reminder.occurrence_date
        )?;
    }
    Ok(())
}

fn upcoming_line(birthday: &UpcomingBirthday) -> String {
    format!(
        "{:<20} {:02}-{:02}  {}  {}",
        birthday.name,
        birthday.month,
        birthday.day,
        birthday.occurrence_date,
        days_until_label(birthday.days_until)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rendered<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut out = Vec::new();
        write(&mut out).expect("Rendering failed");
        String::from_utf8(out).expect("Output should be UTF-8")
    }

    fn upcoming(name: &str, days_until: i64, date: (i32, u32, u32)) -> UpcomingBirthday {
        UpcomingBirthday {
            name: name.to_string(),
            month: date.1,
            day: date.2,
            days_until,
            occurrence_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        }
    }

    #[test]
    fn test_record_table_empty() {
        let text = rendered(|out| write_record_table(out, &[]));
        assert_eq!(text, "No birthday records found.\n");
    }

    #[test]
    fn test_record_table_rows() {
        let records = vec![
            BirthdayRecord {
                name: "John Doe".to_string(),
                month: 1,
                day: 15,
                notification_enabled: true,
                advance_notice_days: 14,
            },
            BirthdayRecord {
                name: "Jane Smith".to_string(),
                month: 6,
                day: 30,
                notification_enabled: false,
                advance_notice_days: 0,
            },
        ];

        let text = rendered(|out| write_record_table(out, &records));

        assert!(text.contains("All Birthday Records:"));
        let john_row = format!("{:<20} {:<10} {:<15} {:<12}", "John Doe", "01-15", "y", 14);
        assert!(text.contains(&john_row));
        assert!(text.contains("Jane Smith"));
        assert!(text.contains("06-30"));
    }

    #[test]
    fn test_upcoming_labels() {
        let list = vec![
            upcoming("Alice", 0, (2024, 7, 15)),
            upcoming("Bob", 1, (2024, 7, 16)),
            upcoming("Charlie", 10, (2024, 7, 25)),
        ];

        let text = rendered(|out| write_upcoming(out, &list, 30));

        assert!(text.contains("Upcoming birthdays (next 30 days):"));
        assert!(text.contains("07-15  2024-07-15  today"));
        assert!(text.contains("07-16  2024-07-16  tomorrow"));
        assert!(text.contains("07-25  2024-07-25  10 days"));
    }

    #[test]
    fn test_upcoming_empty() {
        let text = rendered(|out| write_upcoming(out, &[], 7));
        assert_eq!(text, "No birthdays in the next 7 days.\n");
    }

    #[test]
    fn test_reminders() {
        let list = vec![upcoming("Alice", 0, (2024, 7, 15)), upcoming("Bob", 5, (2024, 7, 20))];

        let text = rendered(|out| write_reminders(out, &list));

        assert!(text.contains("Reminder: Alice's birthday is today (2024-07-15)"));
        assert!(text.contains("Reminder: Bob's birthday is in 5 days (2024-07-20)"));
    }
}
