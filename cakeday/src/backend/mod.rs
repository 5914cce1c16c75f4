//! # Backend Module
//!
//! Contains all non-UI logic for the birthday tracker.
//!
//! - **Domain**: upcoming-birthday calculation, validation and record management
//! - **Storage**: SQLite persistence behind the `BirthdayStorage` trait
//! - **IO**: the interactive menu and the one-shot CLI commands
//!
//! ```text
//! IO Layer (menu, commands)
//!     ↓
//! Domain Layer (BirthdayService, upcoming)
//!     ↓
//! Storage Layer (BirthdayRepository, SQLite)
//! ```

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::backend::domain::BirthdayService;
use crate::backend::storage::{BirthdayRepository, DbConnection};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub birthday_service: BirthdayService,
}

/// Initialize the backend against the database at `database_url`
pub async fn initialize_backend(database_url: &str) -> Result<AppState> {
    info!("Setting up database");
    let db_conn = DbConnection::new(database_url).await?;

    info!("Setting up domain model");
    let repository = BirthdayRepository::new(db_conn);
    let birthday_service = BirthdayService::new(Arc::new(repository));

    Ok(AppState { birthday_service })
}
