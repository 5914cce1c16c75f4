//! Interactive text menu.
//!
//! Reads answers line by line from any [`BufRead`] and writes prompts and
//! results to any [`Write`], so a whole session can be replayed in tests.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::backend::domain::{
    parse_advance_days, parse_birthday, parse_notification, parse_yes_no, validate_name,
    BirthdayService, BirthdayValidationError,
};
use crate::backend::io::render;
use shared::{BirthdayRecord, CreateBirthdayRequest, UpdateBirthdayRequest};

const MENU_LINES: [&str; 9] = [
    "\n=== Birthday Manager ===",
    "1. Create new birthday record",
    "2. View all birthdays",
    "3. Search for specific birthday",
    "4. Update existing birthday",
    "5. Delete birthday record",
    "6. View upcoming birthdays",
    "7. Exit",
    "========================",
];

/// Raised when the input stream ends in the middle of a prompt
#[derive(Debug, thiserror::Error)]
#[error("input closed")]
struct InputClosed;

pub struct Menu<R, W> {
    service: BirthdayService,
    input: R,
    output: W,
    horizon_days: i64,
    today: Option<NaiveDate>,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(service: BirthdayService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
            horizon_days: 30,
            today: None,
        }
    }

    /// Window used by "View upcoming birthdays"
    pub fn with_horizon(mut self, horizon_days: i64) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    /// Pin the reference date instead of reading the local clock
    pub fn with_today(mut self, today: Option<NaiveDate>) -> Self {
        self.today = today;
        self
    }

    /// Main loop: show the menu and dispatch choices until exit or end of input
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.display_menu()?;

            let choice = match self.prompt("\nEnter your choice (1-7): ") {
                Ok(Some(choice)) => choice,
                Ok(None) => {
                    writeln!(self.output, "\n\nGoodbye!")?;
                    break;
                }
                Err(err) if is_unreadable_line(&err) => {
                    writeln!(self.output, "An error occurred: {}", err)?;
                    continue;
                }
                Err(err) => return Err(err),
            };

            let outcome = match choice.as_str() {
                "1" => self.create().await,
                "2" => self.view_all().await,
                "3" => self.search().await,
                "4" => self.update().await,
                "5" => self.delete().await,
                "6" => self.view_upcoming().await,
                "7" => {
                    writeln!(self.output, "Goodbye, and thanks for all the fish!")?;
                    break;
                }
                _ => {
                    writeln!(
                        self.output,
                        "Invalid choice. Please enter a number between 1 and 7."
                    )?;
                    continue;
                }
            };

            if let Err(err) = outcome {
                if err.is::<InputClosed>() {
                    writeln!(self.output, "\n\nGoodbye!")?;
                    break;
                }
                debug!("Menu action failed: {:#}", err);
                writeln!(self.output, "An error occurred: {}", err)?;
            }
        }

        self.output.flush()?;
        Ok(())
    }

    fn display_menu(&mut self) -> Result<()> {
        for line in MENU_LINES {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    async fn create(&mut self) -> Result<()> {
        let Some(name) = self.ask_name("Please type in the full name of person: ")? else {
            return Ok(());
        };

        if self.service.exists(&name).await? {
            writeln!(self.output, "Record for {} already exists. Use update to modify.", name)?;
            return Ok(());
        }

        let birthday = self.ask_birthday(&format!("Please record {}'s birthday (mm-dd): ", name))?;
        let notification_enabled =
            self.ask_notification("Would you like birthday notifications? (y/n): ")?;
        let advance_notice_days = if notification_enabled {
            self.ask_advance_days("How many days in advance would you like to be notified? ")?
        } else {
            0
        };

        let record = self
            .service
            .create(CreateBirthdayRequest {
                name,
                birthday,
                notification_enabled,
                advance_notice_days,
            })
            .await?;

        writeln!(self.output, "Successfully added birthday for {}", record.name)?;
        Ok(())
    }

    async fn view_all(&mut self) -> Result<()> {
        let records = self.service.list().await?;
        render::write_record_table(&mut self.output, &records)
    }

    async fn search(&mut self) -> Result<()> {
        let Some(record) = self.lookup("Enter name to search for: ").await? else {
            return Ok(());
        };
        render::write_record_details(&mut self.output, &record)
    }

    async fn update(&mut self) -> Result<()> {
        let prompt = "Please type in the full name of person to update: ";
        let Some(record) = self.lookup(prompt).await? else {
            return Ok(());
        };

        writeln!(
            self.output,
            "Updating record for {}. Press Enter to keep the current value.",
            record.name
        )?;

        let mut request = UpdateBirthdayRequest::default();

        let prompt = format!("Birthday (mm-dd) [{}]: ", record.month_day());
        request.birthday =
            self.ask_optional(&prompt, |input| parse_birthday(input).map(|_| input.to_string()))?;

        let prompt = format!("Notifications (y/n) [{}]: ", record.notification_flag());
        request.notification_enabled = self.ask_optional(&prompt, parse_notification)?;

        if request.notification_enabled.unwrap_or(record.notification_enabled) {
            let prompt = format!("Advance days [{}]: ", record.advance_notice_days);
            request.advance_notice_days = self.ask_optional(&prompt, parse_advance_days)?;
        }

        let updated = self.service.update(&record.name, request).await?;
        writeln!(self.output, "Successfully updated birthday for {}", updated.name)?;
        Ok(())
    }

    async fn delete(&mut self) -> Result<()> {
        let Some(name) = self.ask_name("Please type in the full name of person to delete: ")? else {
            return Ok(());
        };

        // Checked by key so unreadable rows can still be removed
        if !self.service.exists(&name).await? {
            writeln!(self.output, "No record found for {}", name)?;
            return Ok(());
        }

        let prompt = format!("Are you sure you want to delete the record for {}? (y/n): ", name);
        let answer = self.read_required(&prompt)?;
        if parse_yes_no(&answer) != Ok(true) {
            writeln!(self.output, "Delete cancelled")?;
            return Ok(());
        }

        self.service.delete(&name).await?;
        writeln!(self.output, "Successfully deleted birthday for {}", name)?;
        Ok(())
    }

    async fn view_upcoming(&mut self) -> Result<()> {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let upcoming = self.service.upcoming(today, self.horizon_days).await?;
        render::write_upcoming(&mut self.output, &upcoming, self.horizon_days)
    }

    /// Ask for a name and fetch its record, reporting empty input or a miss
    async fn lookup(&mut self, prompt: &str) -> Result<Option<BirthdayRecord>> {
        let Some(name) = self.ask_name(prompt)? else {
            return Ok(None);
        };

        let record = self.service.find(&name).await?;
        if record.is_none() {
            writeln!(self.output, "No record found for {}", name)?;
        }
        Ok(record)
    }

    fn ask_name(&mut self, prompt: &str) -> Result<Option<String>> {
        let input = self.read_required(prompt)?;
        match validate_name(&input) {
            Ok(name) => Ok(Some(name.to_string())),
            Err(err) => {
                writeln!(self.output, "{}", err)?;
                Ok(None)
            }
        }
    }

    fn ask_birthday(&mut self, prompt: &str) -> Result<String> {
        let mut input = self.read_required(prompt)?;
        loop {
            match parse_birthday(&input) {
                Ok(_) => return Ok(input),
                Err(BirthdayValidationError::BirthdayFormat) => {
                    input =
                        self.read_required("Invalid input; please try again in format mm-dd: ")?;
                }
                Err(err) => {
                    input = self.read_required(&format!("{}; please try again: ", err))?;
                }
            }
        }
    }

    fn ask_notification(&mut self, prompt: &str) -> Result<bool> {
        let mut input = self.read_required(prompt)?;
        loop {
            match parse_notification(&input) {
                Ok(enabled) => return Ok(enabled),
                Err(err) => {
                    writeln!(self.output, "{}", err)?;
                    input = self.read_required(prompt)?;
                }
            }
        }
    }

    fn ask_advance_days(&mut self, prompt: &str) -> Result<u32> {
        let mut input = self.read_required(prompt)?;
        loop {
            match parse_advance_days(&input) {
                Ok(days) => return Ok(days),
                Err(err) => {
                    writeln!(self.output, "{}", err)?;
                    input = self.read_required(prompt)?;
                }
            }
        }
    }

    /// Ask until the answer is blank (keep the current value) or parses
    fn ask_optional<T, F>(&mut self, prompt: &str, parse: F) -> Result<Option<T>>
    where
        F: Fn(&str) -> Result<T, BirthdayValidationError>,
    {
        loop {
            let input = self.read_required(prompt)?;
            if input.is_empty() {
                return Ok(None);
            }
            match parse(&input) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }
    }

    fn read_required(&mut self, prompt: &str) -> Result<String> {
        self.prompt(prompt)?.ok_or_else(|| anyhow::Error::new(InputClosed))
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// A line that arrived but could not be decoded; the bytes are already consumed
fn is_unreadable_line(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|err| err.kind() == io::ErrorKind::InvalidData)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::{BirthdayRepository, DbConnection};
    use std::sync::Arc;

    async fn setup_service() -> BirthdayService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        BirthdayService::new(Arc::new(BirthdayRepository::new(db)))
    }

    async fn seed(
        service: &BirthdayService,
        name: &str,
        birthday: &str,
        notify: bool,
        adv_days: u32,
    ) {
        service
            .create(CreateBirthdayRequest {
                name: name.to_string(),
                birthday: birthday.to_string(),
                notification_enabled: notify,
                advance_notice_days: adv_days,
            })
            .await
            .expect("Failed to seed record");
    }

    /// Run a menu session over `input` and return everything it printed
    async fn run_session(service: &BirthdayService, input: &str) -> String {
        let mut output = Vec::new();
        let today = NaiveDate::from_ymd_opt(2024, 7, 15);
        Menu::new(service.clone(), input.as_bytes(), &mut output)
            .with_today(today)
            .run()
            .await
            .expect("Menu session failed");
        String::from_utf8(output).expect("Output should be UTF-8")
    }

    #[tokio::test]
    async fn test_menu_display_and_exit() {
        let service = setup_service().await;
        let output = run_session(&service, "7\n").await;

        for line in MENU_LINES {
            assert!(output.contains(line.trim_start()), "missing {line:?}");
        }
        assert!(output.contains("Goodbye, and thanks for all the fish!"));
    }

    #[tokio::test]
    async fn test_invalid_choice() {
        let service = setup_service().await;
        let output = run_session(&service, "9\n7\n").await;

        assert!(output.contains("Invalid choice. Please enter a number between 1 and 7."));
        assert!(output.contains("Goodbye, and thanks for all the fish!"));
    }

    #[tokio::test]
    async fn test_end_of_input_says_goodbye() {
        let service = setup_service().await;
        let output = run_session(&service, "").await;

        assert!(output.contains("Goodbye!"));
        assert!(!output.contains("thanks for all the fish"));
    }

    #[tokio::test]
    async fn test_end_of_input_inside_action() {
        let service = setup_service().await;
        let output = run_session(&service, "1\nJohn Doe\n").await;

        assert!(output.ends_with("\n\nGoodbye!\n"));
        assert!(service.find("John Doe").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_success() {
        let service = setup_service().await;
        let output = run_session(&service, "1\nJohn Doe\n01-15\ny\n14\n7\n").await;

        assert!(output.contains("Successfully added birthday for John Doe"));
        let record = service.find("John Doe").await.unwrap().expect("Record should exist");
        assert_eq!((record.month, record.day), (1, 15));
        assert!(record.notification_enabled);
        assert_eq!(record.advance_notice_days, 14);
    }

    #[tokio::test]
    async fn test_create_reprompts_until_valid() {
        let service = setup_service().await;
        let input = "1\nJohn Doe\n1-15\n04-31\n01-15\nmaybe\ny\nsoon\n14\n7\n";
        let output = run_session(&service, input).await;

        assert!(output.contains("Invalid input; please try again in format mm-dd:"));
        assert!(output.contains("Invalid day 31 for month 4; please try again:"));
        assert!(output.contains("Please enter 'y' for yes or 'n' for no"));
        assert!(output.contains("Advance days must be a whole number of zero or more"));
        assert!(output.contains("Successfully added birthday for John Doe"));

        let record = service.find("John Doe").await.unwrap().expect("Record should exist");
        assert_eq!(record.advance_notice_days, 14);
    }

    #[tokio::test]
    async fn test_create_without_notification_skips_days() {
        let service = setup_service().await;
        let output = run_session(&service, "1\nJohn Doe\n01-15\nn\n7\n").await;

        assert!(!output.contains("How many days in advance"));
        let record = service.find("John Doe").await.unwrap().expect("Record should exist");
        assert!(!record.notification_enabled);
        assert_eq!(record.advance_notice_days, 0);
    }

    #[tokio::test]
    async fn test_create_empty_name() {
        let service = setup_service().await;
        let output = run_session(&service, "1\n\n7\n").await;

        assert!(output.contains("Name cannot be empty"));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_existing_name() {
        let service = setup_service().await;
        seed(&service, "John Doe", "01-15", true, 14).await;

        let output = run_session(&service, "1\nJohn Doe\n7\n").await;

        assert!(output.contains("Record for John Doe already exists. Use update to modify."));
    }

    #[tokio::test]
    async fn test_view_all() {
        let service = setup_service().await;
        let output = run_session(&service, "2\n7\n").await;
        assert!(output.contains("No birthday records found."));

        seed(&service, "John Doe", "01-15", true, 14).await;
        seed(&service, "Jane Smith", "06-30", false, 0).await;

        let output = run_session(&service, "2\n7\n").await;
        assert!(output.contains("All Birthday Records:"));
        let jane = output.find("Jane Smith").expect("Jane listed");
        let john = output.find("John Doe").expect("John listed");
        assert!(jane < john, "records are listed by name");
    }

    #[tokio::test]
    async fn test_search() {
        let service = setup_service().await;
        seed(&service, "John Doe", "01-15", true, 14).await;

        let output = run_session(&service, "3\n\n3\nNobody\n3\nJohn Doe\n7\n").await;

        assert!(output.contains("Name cannot be empty"));
        assert!(output.contains("No record found for Nobody"));
        assert!(output.contains("Record found:"));
        assert!(output.contains("Name: John Doe"));
        assert!(output.contains("Birthday: 01-15"));
        assert!(output.contains("Notifications: y"));
        assert!(output.contains("Advance Days: 14"));
    }

    #[tokio::test]
    async fn test_update_changes_values() {
        let service = setup_service().await;
        seed(&service, "John Doe", "01-15", true, 14).await;

        let output = run_session(&service, "4\nJohn Doe\n02-20\nn\n7\n").await;

        assert!(output.contains("Successfully updated birthday for John Doe"));
        assert!(!output.contains("Advance days ["));
        let record = service.find("John Doe").await.unwrap().unwrap();
        assert_eq!((record.month, record.day), (2, 20));
        assert!(!record.notification_enabled);
        assert_eq!(record.advance_notice_days, 0);
    }

    #[tokio::test]
    async fn test_update_keeps_existing_values() {
        let service = setup_service().await;
        seed(&service, "John Doe", "01-15", true, 14).await;

        let output = run_session(&service, "4\nJohn Doe\n\n\n\n7\n").await;

        assert!(output.contains("Birthday (mm-dd) [01-15]: "));
        assert!(output.contains("Notifications (y/n) [y]: "));
        assert!(output.contains("Advance days [14]: "));
        assert!(output.contains("Successfully updated birthday for John Doe"));

        let record = service.find("John Doe").await.unwrap().unwrap();
        assert_eq!((record.month, record.day), (1, 15));
        assert!(record.notification_enabled);
        assert_eq!(record.advance_notice_days, 14);
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let service = setup_service().await;
        let output = run_session(&service, "4\nNonexistent\n7\n").await;

        assert!(output.contains("No record found for Nonexistent"));
    }

    #[tokio::test]
    async fn test_delete_cancelled() {
        let service = setup_service().await;
        seed(&service, "John Doe", "01-15", true, 14).await;

        let output = run_session(&service, "5\nJohn Doe\nn\n7\n").await;

        assert!(output.contains("Delete cancelled"));
        assert!(service.find("John Doe").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_confirmed() {
        let service = setup_service().await;
        seed(&service, "John Doe", "01-15", true, 14).await;

        let output = run_session(&service, "5\nJohn Doe\ny\n7\n").await;

        assert!(output.contains("Successfully deleted birthday for John Doe"));
        assert!(service.find("John Doe").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let service = setup_service().await;
        let output = run_session(&service, "5\nNonexistent\n7\n").await;

        assert!(output.contains("No record found for Nonexistent"));
    }

    #[tokio::test]
    async fn test_view_upcoming() {
        let service = setup_service().await;
        seed(&service, "Alice", "07-15", true, 14).await;
        seed(&service, "Bob", "07-16", true, 7).await;
        seed(&service, "Dave", "08-15", true, 14).await;

        let output = run_session(&service, "6\n7\n").await;

        assert!(output.contains("Upcoming birthdays (next 30 days):"));
        assert!(output.contains("today"));
        assert!(output.contains("tomorrow"));
        assert!(!output.contains("Dave"));
    }

    #[tokio::test]
    async fn test_action_error_is_reported() {
        let service = setup_service().await;
        let mut output = Vec::new();
        let today = NaiveDate::from_ymd_opt(2024, 7, 15);

        Menu::new(service, "6\n7\n".as_bytes(), &mut output)
            .with_today(today)
            .with_horizon(-1)
            .run()
            .await
            .expect("Menu session failed");

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("An error occurred: Horizon must be zero or more days, got -1"));
        assert!(output.contains("Goodbye, and thanks for all the fish!"));
    }

    #[tokio::test]
    async fn test_unreadable_choice_keeps_session_open() {
        let service = setup_service().await;
        let mut output = Vec::new();

        Menu::new(service, &b"\xff\xfe\n7\n"[..], &mut output)
            .run()
            .await
            .expect("Menu session failed");

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("An error occurred: "));
        assert!(output.contains("Goodbye, and thanks for all the fish!"));
    }

    #[tokio::test]
    async fn test_unreadable_record_can_be_deleted() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        sqlx::query("INSERT INTO cakeday VALUES ('Ada', '1-5', 'y', 3)")
            .execute(db.pool())
            .await
            .expect("Failed to insert raw row");
        let service = BirthdayService::new(Arc::new(BirthdayRepository::new(db)));

        let output = run_session(&service, "1\nAda\n5\nAda\ny\n7\n").await;

        assert!(output.contains("Record for Ada already exists. Use update to modify."));
        assert!(output.contains("Successfully deleted birthday for Ada"));
        assert!(!service.exists("Ada").await.unwrap());
    }
}
