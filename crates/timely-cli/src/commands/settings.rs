//! Notification settings commands.
//!
//! The settings record is rewritten as a whole on any single toggle.
//! Switching a category off also cancels its outstanding reminders.

use clap::Subcommand;
use std::time::Duration;
use timely_core::goal::NotificationSettings;
use timely_core::message::{MessageCategory, MessageProvider};
use timely_core::reminder::ReminderScheduler;
use timely_core::storage::{Config, GoalDb};

use crate::notifier::ConsoleNotifier;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show notification settings
    Show,
    /// Toggle a reminder category: task-reminders, daily-focus, or goal-deadlines
    Set {
        /// Category key
        key: String,
        /// true or false
        value: bool,
    },
    /// Set the account email
    Email {
        /// Email address
        address: String,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = GoalDb::open()?;

    match action {
        SettingsAction::Show => {
            let settings = db.notification_settings();
            println!("{}", serde_json::to_string_pretty(&settings)?);
            if let Some(email) = db.user_email()? {
                println!("email: {email}");
            }
        }
        SettingsAction::Set { key, value } => {
            let mut settings = db.notification_settings();
            let category = match key.as_str() {
                "task-reminders" => {
                    settings.task_reminders = value;
                    MessageCategory::TaskReminder
                }
                "daily-focus" => {
                    settings.daily_focus = value;
                    MessageCategory::DailyFocus
                }
                "goal-deadlines" => {
                    settings.goal_deadlines = value;
                    MessageCategory::GoalDeadline
                }
                other => return Err(format!("unknown settings key: {other}").into()),
            };
            db.set_notification_settings(&settings)?;
            println!("{}", serde_json::to_string_pretty(&settings)?);

            if !value {
                cancel_outstanding(&db, settings, category)?;
            }
        }
        SettingsAction::Email { address } => {
            db.set_user_email(&address)?;
            println!("Email saved: {address}");
        }
    }
    Ok(())
}

fn cancel_outstanding(
    db: &GoalDb,
    settings: NotificationSettings,
    category: MessageCategory,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let notifier = ConsoleNotifier;
    let provider = MessageProvider::with_timeout(
        config.messages.endpoint.clone(),
        Duration::from_secs(config.messages.timeout_secs),
    );
    let scheduler = ReminderScheduler::new(&notifier, &provider, settings);
    let projects = db.list_projects()?;
    scheduler.cancel_category(category, &projects);
    Ok(())
}
