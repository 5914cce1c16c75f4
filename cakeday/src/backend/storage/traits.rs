//! # Storage Traits
//!
//! The storage abstraction the domain layer works against, so record
//! management never depends on a concrete persistence technology.

use anyhow::Result;
use async_trait::async_trait;
use shared::BirthdayRecord;

/// Trait defining the interface for birthday record storage
///
/// Records are keyed by name; the backend enforces uniqueness.
#[async_trait]
pub trait BirthdayStorage: Send + Sync {
    /// List every record, ordered by name
    async fn list(&self) -> Result<Vec<BirthdayRecord>>;

    /// Retrieve a record by its exact name
    ///
    /// A stored row that cannot be read back as a record is an error, not `None`.
    async fn find_by_name(&self, name: &str) -> Result<Option<BirthdayRecord>>;

    /// Check whether a record with this exact name is stored, whatever its contents
    async fn exists(&self, name: &str) -> Result<bool>;

    /// Store a new record
    /// Returns false without writing anything if the name is already taken
    async fn insert(&self, record: &BirthdayRecord) -> Result<bool>;

    /// Overwrite the stored fields of the record with the same name
    async fn update(&self, record: &BirthdayRecord) -> Result<()>;

    /// Delete a record by name
    /// Returns true if the record was found and deleted, false otherwise
    async fn delete(&self, name: &str) -> Result<bool>;
}
