//! # Domain Module
//!
//! Business logic for the birthday tracker, independent of how records are
//! stored or how the user talks to the program.
//!
//! ## Module Organization
//!
//! - **upcoming**: next-occurrence calculation, upcoming windows and due reminders
//! - **validation**: turning raw input into record fields
//! - **birthday_service**: record CRUD on top of a
//!   [`BirthdayStorage`](crate::backend::storage::BirthdayStorage)
//!
//! ## Business Rules
//!
//! - Names are unique and are the only identity a record has
//! - Birthdays are a month and day; February 29 is a valid birthday
//! - February 29 birthdays are observed on February 28 in common years
//! - Advance notice only applies when notifications are enabled
//! - "Today" is always passed in by the caller

pub mod birthday_service;
pub mod upcoming;
pub mod validation;

pub use birthday_service::*;
pub use upcoming::*;
pub use validation::*;
