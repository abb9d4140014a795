//! Reminder scheduling commands.
//!
//! Scheduling is idempotent: running `remind sync` twice replaces rather
//! than duplicates, because notification ids derive from entity ids.

use chrono::Local;
use clap::Subcommand;
use std::time::Duration;
use timely_core::message::MessageProvider;
use timely_core::reminder::{Notifier, ReminderScheduler};
use timely_core::storage::{Config, GoalDb};

use crate::notifier::ConsoleNotifier;

#[derive(Subcommand)]
pub enum RemindAction {
    /// Re-derive reminders for every project and incomplete task
    Sync,
    /// Schedule the repeating daily focus reminder
    Daily,
    /// Cancel a task's reminder
    CancelTask {
        /// Task ID
        id: String,
    },
    /// Cancel a project's deadline reminder
    CancelProject {
        /// Project ID
        id: String,
    },
    /// Cancel the daily focus reminder
    CancelDaily,
}

pub fn run(action: RemindAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = GoalDb::open()?;
    let config = Config::load()?;
    let settings = db.notification_settings();

    let notifier = ConsoleNotifier;
    let provider = MessageProvider::with_timeout(
        config.messages.endpoint.clone(),
        Duration::from_secs(config.messages.timeout_secs),
    );
    let scheduler = ReminderScheduler::new(&notifier, &provider, settings);

    match action {
        RemindAction::Sync => {
            if !notifier.request_permission()? {
                println!("Notification permission denied.");
                return Ok(());
            }
            let projects = db.list_projects()?;
            let runtime = tokio::runtime::Runtime::new()?;
            let summary = runtime.block_on(async {
                let summary = scheduler
                    .sync_projects(&projects, Local::now().naive_local())
                    .await;
                scheduler.schedule_daily_focus().await;
                summary
            });
            println!(
                "Reminders synced: {} scheduled, {} skipped",
                summary.scheduled, summary.skipped
            );
        }
        RemindAction::Daily => {
            let scheduled =
                tokio::runtime::Runtime::new()?.block_on(scheduler.schedule_daily_focus());
            if !scheduled {
                println!("Daily focus reminders are disabled.");
            }
        }
        RemindAction::CancelTask { id } => {
            scheduler.cancel_task_reminder(&id);
        }
        RemindAction::CancelProject { id } => {
            scheduler.cancel_deadline_reminder(&id);
        }
        RemindAction::CancelDaily => {
            scheduler.cancel_daily_focus();
        }
    }
    Ok(())
}
