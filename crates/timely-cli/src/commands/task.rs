//! Task commands: completion toggles and calendar placement.

use clap::Subcommand;
use timely_core::storage::GoalDb;

use super::{parse_date, parse_time};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Mark a task completed
    Complete {
        /// Task ID
        id: String,
    },
    /// Mark a task not completed
    Uncomplete {
        /// Task ID
        id: String,
    },
    /// Assign a task to a calendar slot
    Assign {
        /// Task ID
        id: String,
        /// Date (YYYY-MM-DD)
        date: String,
        /// Time of day (HH:MM)
        time: String,
    },
    /// Remove a task from the calendar
    Unassign {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = GoalDb::open()?;

    match action {
        TaskAction::Complete { id } => {
            let progress = db.set_task_completed(&id, true)?;
            println!("Task completed: {id} (project progress {progress}%)");
        }
        TaskAction::Uncomplete { id } => {
            let progress = db.set_task_completed(&id, false)?;
            println!("Task reopened: {id} (project progress {progress}%)");
        }
        TaskAction::Assign { id, date, time } => {
            db.assign_task(&id, parse_date(&date)?, parse_time(&time)?)?;
            println!("Task scheduled: {id} on {date} at {time}");
        }
        TaskAction::Unassign { id } => {
            db.unassign_task(&id)?;
            println!("Task unscheduled: {id}");
        }
        TaskAction::Delete { id } => {
            let progress = db.delete_task(&id)?;
            println!("Task deleted: {id} (project progress {progress}%)");
        }
    }
    Ok(())
}
