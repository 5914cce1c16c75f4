//! # Storage Module
//!
//! Handles persistence of birthday records.
//!
//! The domain layer only sees the [`BirthdayStorage`] trait. The SQLite
//! implementation lives in [`repositories`] and gets its pool from
//! [`connection::DbConnection`].
//!
//! ## Schema
//!
//! A single `cakeday` table keyed by name. Birthdays are stored as `mm-dd`
//! text, the notification flag as `y`/`n`, and the advance notice as an
//! integer number of days.

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use repositories::BirthdayRepository;
pub use traits::BirthdayStorage;
