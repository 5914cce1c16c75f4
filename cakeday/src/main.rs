use std::io;
use std::process;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::debug;

use cakeday::backend::io::{commands, Menu};
use cakeday::cli::{Cli, Command};
use cakeday::{initialize_backend, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let app_state = initialize_backend(&cli.database_url).await?;
    let service = &app_state.birthday_service;
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    debug!("Reference date {}", today);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let stdin = io::stdin();
            Menu::new(service.clone(), stdin.lock(), &mut out)
                .with_horizon(cli.horizon_days)
                .with_today(cli.today)
                .run()
                .await
        }
        Command::List { json } => commands::list(service, json, &mut out).await,
        Command::Upcoming { days, json } => {
            let horizon_days = days.unwrap_or(cli.horizon_days);
            commands::upcoming(service, today, horizon_days, json, &mut out).await
        }
        Command::Reminders { json } => commands::reminders(service, today, json, &mut out).await,
    }
}
