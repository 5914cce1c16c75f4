use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use shared::{BirthdayRecord, MonthDay};
use sqlx::{sqlite::SqliteRow, Row};
use tracing::warn;

use crate::backend::storage::connection::DbConnection;
use crate::backend::storage::traits::BirthdayStorage;

/// SQLite repository for birthday records
#[derive(Clone)]
pub struct BirthdayRepository {
    db: DbConnection,
}

impl BirthdayRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Convert a row into a record.
    ///
    /// Fails when the stored birthday is not `mm-dd` text. A well-formed but
    /// impossible date such as `04-31` is passed through.
    fn record_from_row(row: &SqliteRow) -> Result<BirthdayRecord> {
        let name: String = row.get("name");
        let birthday: String = row.get("birthday");
        let notification: String = row.get("notification");
        let adv_days: i64 = row.get("adv_days");

        let month_day = birthday
            .parse::<MonthDay>()
            .map_err(|_| anyhow!("Stored birthday for {} is unreadable: {:?}", name, birthday))?;

        let advance_notice_days = u32::try_from(adv_days).unwrap_or_else(|_| {
            warn!("Stored advance days for {} out of range ({}), using 0", name, adv_days);
            0
        });

        Ok(BirthdayRecord {
            name,
            month: month_day.month,
            day: month_day.day,
            notification_enabled: notification.eq_ignore_ascii_case("y"),
            advance_notice_days,
        })
    }
}

#[async_trait]
impl BirthdayStorage for BirthdayRepository {
    async fn list(&self) -> Result<Vec<BirthdayRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT name, birthday, notification, adv_days
            FROM cakeday
            ORDER BY name
            "#,
        )
        .fetch_all(self.db.pool())
        .await
        .context("Failed to list birthdays")?;

        let records = rows
            .iter()
            .filter_map(|row| match Self::record_from_row(row) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("Ignoring stored record: {}", err);
                    None
                }
            })
            .collect();

        Ok(records)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<BirthdayRecord>> {
        let row = sqlx::query(
            r#"
            SELECT name, birthday, notification, adv_days
            FROM cakeday
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(self.db.pool())
        .await
        .with_context(|| format!("Failed to look up birthday for {}", name))?;

        row.as_ref().map(Self::record_from_row).transpose()
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM cakeday WHERE name = ?")
            .bind(name)
            .fetch_optional(self.db.pool())
            .await
            .with_context(|| format!("Failed to look up birthday for {}", name))?;

        Ok(row.is_some())
    }

    async fn insert(&self, record: &BirthdayRecord) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO cakeday (name, birthday, notification, adv_days)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(name) DO NOTHING
            "#,
        )
        .bind(&record.name)
        .bind(record.month_day().to_string())
        .bind(record.notification_flag())
        .bind(i64::from(record.advance_notice_days))
        .execute(self.db.pool())
        .await
        .with_context(|| format!("Failed to store birthday for {}", record.name))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update(&self, record: &BirthdayRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE cakeday
            SET birthday = ?, notification = ?, adv_days = ?
            WHERE name = ?
            "#,
        )
        .bind(record.month_day().to_string())
        .bind(record.notification_flag())
        .bind(i64::from(record.advance_notice_days))
        .bind(&record.name)
        .execute(self.db.pool())
        .await
        .with_context(|| format!("Failed to update birthday for {}", record.name))?;

        if result.rows_affected() == 0 {
            return Err(anyhow::anyhow!("No record found for {}", record.name));
        }
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cakeday WHERE name = ?")
            .bind(name)
            .execute(self.db.pool())
            .await
            .with_context(|| format!("Failed to delete birthday for {}", name))?;
        Ok(result.rows_affected() > 0)
    }
}
