//! Non-interactive subcommands: one query, printed as text or JSON.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use shared::{BirthdayListResponse, DueRemindersResponse, UpcomingBirthdaysResponse};
use tracing::info;

use crate::backend::domain::BirthdayService;
use crate::backend::io::render;

pub async fn list<W: Write>(service: &BirthdayService, json: bool, out: &mut W) -> Result<()> {
    let birthdays = service.list().await?;

    if json {
        write_json(out, &BirthdayListResponse { birthdays })
    } else {
        render::write_record_table(out, &birthdays)
    }
}

pub async fn upcoming<W: Write>(
    service: &BirthdayService,
    today: NaiveDate,
    horizon_days: i64,
    json: bool,
    out: &mut W,
) -> Result<()> {
    info!("Looking up birthdays within {} days of {}", horizon_days, today);
    let birthdays = service.upcoming(today, horizon_days).await?;

    if json {
        write_json(
            out,
            &UpcomingBirthdaysResponse {
                reference_date: today,
                horizon_days,
                birthdays,
            },
        )
    } else {
        render::write_upcoming(out, &birthdays, horizon_days)
    }
}

pub async fn reminders<W: Write>(
    service: &BirthdayService,
    today: NaiveDate,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let reminders = service.due_reminders(today).await?;
    info!("{} reminders due on {}", reminders.len(), today);

    if json {
        write_json(
            out,
            &DueRemindersResponse {
                reference_date: today,
                reminders,
            },
        )
    } else {
        render::write_reminders(out, &reminders)
    }
}

fn write_json<W: Write, T: serde::Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
