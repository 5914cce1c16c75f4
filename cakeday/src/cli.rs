use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::backend::storage::connection::DEFAULT_DATABASE_URL;

/// Birthday tracker with upcoming-birthday lookups.
#[derive(Debug, Parser)]
#[command(name = "cakeday", version, about = "Keep track of birthdays")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// SQLite database holding the birthday records.
    #[arg(long, global = true, env = "CAKEDAY_DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Size of the upcoming window in days.
    #[arg(
        long,
        global = true,
        env = "CAKEDAY_HORIZON_DAYS",
        default_value_t = 30,
        allow_negative_numbers = true
    )]
    pub horizon_days: i64,

    /// Reference date (YYYY-MM-DD) used instead of the local date.
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Subcommand to run; the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive menu for managing records.
    Menu,
    /// Print every stored record.
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Print birthdays falling within the upcoming window.
    Upcoming {
        /// Override the window size for this query.
        #[arg(long, allow_negative_numbers = true)]
        days: Option<i64>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print reminders whose advance notice period has started.
    Reminders {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}
