use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::backend::domain::upcoming;
use crate::backend::domain::validation::{parse_birthday, validate_name};
use crate::backend::storage::BirthdayStorage;
use shared::{BirthdayRecord, CreateBirthdayRequest, UpdateBirthdayRequest, UpcomingBirthday};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BirthdayServiceError {
    #[error("Record for {0} already exists. Use update to modify.")]
    AlreadyExists(String),
    #[error("No record found for {0}")]
    NotFound(String),
}

/// Service for managing birthday records and answering upcoming queries
#[derive(Clone)]
pub struct BirthdayService {
    storage: Arc<dyn BirthdayStorage>,
}

impl BirthdayService {
    pub fn new(storage: Arc<dyn BirthdayStorage>) -> Self {
        Self { storage }
    }

    /// Create a new birthday record
    pub async fn create(&self, request: CreateBirthdayRequest) -> Result<BirthdayRecord> {
        let name = validate_name(&request.name)?;
        let month_day = parse_birthday(&request.birthday)?;

        if self.storage.exists(name).await? {
            warn!("Refusing to create duplicate record for {}", name);
            return Err(BirthdayServiceError::AlreadyExists(name.to_string()).into());
        }

        let record = BirthdayRecord {
            name: name.to_string(),
            month: month_day.month,
            day: month_day.day,
            notification_enabled: request.notification_enabled,
            advance_notice_days: if request.notification_enabled {
                request.advance_notice_days
            } else {
                0
            },
        };

        if !self.storage.insert(&record).await? {
            // Stored by someone else between the check and the insert
            return Err(BirthdayServiceError::AlreadyExists(record.name).into());
        }
        info!("Created birthday for {} on {}", record.name, month_day);

        Ok(record)
    }

    /// List all records ordered by name
    pub async fn list(&self) -> Result<Vec<BirthdayRecord>> {
        let records = self.storage.list().await?;
        debug!("Found {} birthday records", records.len());
        Ok(records)
    }

    /// Look up a record by name
    pub async fn find(&self, name: &str) -> Result<Option<BirthdayRecord>> {
        let record = self.storage.find_by_name(name.trim()).await?;
        if record.is_none() {
            debug!("No birthday record for {}", name);
        }
        Ok(record)
    }

    /// Whether a record with this name is stored, readable or not
    pub async fn exists(&self, name: &str) -> Result<bool> {
        self.storage.exists(name.trim()).await
    }

    /// Update an existing record, keeping any field the request leaves out
    pub async fn update(
        &self,
        name: &str,
        request: UpdateBirthdayRequest,
    ) -> Result<BirthdayRecord> {
        let mut record = self.require(name).await?;

        if let Some(birthday) = request.birthday {
            let month_day = parse_birthday(&birthday)?;
            record.month = month_day.month;
            record.day = month_day.day;
        }
        if let Some(enabled) = request.notification_enabled {
            record.notification_enabled = enabled;
        }
        if let Some(days) = request.advance_notice_days {
            record.advance_notice_days = days;
        }
        if !record.notification_enabled {
            record.advance_notice_days = 0;
        }

        self.storage.update(&record).await?;
        info!("Updated birthday for {}", record.name);

        Ok(record)
    }

    /// Delete the record stored under `name`
    ///
    /// Works on the key alone, so a row whose contents can no longer be read
    /// can still be removed.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let name = validate_name(name)?;

        if !self.storage.delete(name).await? {
            warn!("Birthday record not found: {}", name);
            return Err(BirthdayServiceError::NotFound(name.to_string()).into());
        }
        info!("Deleted birthday for {}", name);

        Ok(())
    }

    /// Birthdays within `horizon_days` of `today`, soonest first
    pub async fn upcoming(
        &self,
        today: NaiveDate,
        horizon_days: i64,
    ) -> Result<Vec<UpcomingBirthday>> {
        let records = self.storage.list().await?;
        let upcoming = upcoming::compute_upcoming(today, &records, horizon_days)?;
        debug!(
            "{} of {} birthdays fall within {} days of {}",
            upcoming.len(),
            records.len(),
            horizon_days,
            today
        );
        Ok(upcoming)
    }

    /// Birthdays whose reminder window has opened as of `today`
    pub async fn due_reminders(&self, today: NaiveDate) -> Result<Vec<UpcomingBirthday>> {
        let records = self.storage.list().await?;
        Ok(upcoming::due_reminders(today, &records))
    }

    async fn require(&self, name: &str) -> Result<BirthdayRecord> {
        let name = validate_name(name)?;
        match self.storage.find_by_name(name).await? {
            Some(record) => Ok(record),
            None => {
                warn!("Birthday record not found: {}", name);
                Err(BirthdayServiceError::NotFound(name.to_string()).into())
            }
        }
    }
}
