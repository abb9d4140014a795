//! Journaling goal commands.

use chrono::Utc;
use clap::Subcommand;
use std::collections::HashMap;
use timely_core::goal::Goal;
use timely_core::message::{MotivationCatalog, MotivationCategory};
use timely_core::storage::{data_dir, GoalDb};
use timely_core::streak::apply_journal_entry;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a new journaling goal
    Create {
        /// Goal name
        name: String,
        /// Goal description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List goals
    List,
    /// Get goal details
    Get {
        /// Goal ID
        id: String,
    },
    /// Delete a goal
    Delete {
        /// Goal ID
        id: String,
    },
    /// Append a journal entry and update streak/achievements
    Journal {
        /// Goal ID
        id: String,
        /// Reflection text
        text: String,
        /// Reference to a recorded audio clip
        #[arg(long)]
        audio: Option<String>,
    },
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = GoalDb::open()?;

    match action {
        GoalAction::Create { name, description } => {
            let goal = Goal {
                id: Uuid::new_v4().to_string(),
                name,
                description,
                progress: 0,
                streak: 0,
                achievements: Vec::new(),
                journal_notes: Vec::new(),
                created_at: Utc::now(),
            };
            db.create_goal(&goal)?;
            println!("Goal created: {}", goal.id);
            println!("{}", serde_json::to_string_pretty(&goal)?);
        }
        GoalAction::List => {
            let goals = db.list_goals()?;
            println!("{}", serde_json::to_string_pretty(&goals)?);
        }
        GoalAction::Get { id } => match db.get_goal(&id)? {
            Some(goal) => println!("{}", serde_json::to_string_pretty(&goal)?),
            None => println!("Goal not found: {id}"),
        },
        GoalAction::Delete { id } => {
            db.delete_goal(&id)?;
            println!("Goal deleted: {id}");
        }
        GoalAction::Journal { id, text, audio } => {
            let mut goal = db.get_goal(&id)?.ok_or(format!("Goal not found: {id}"))?;
            let outcome = apply_journal_entry(&mut goal, &text, audio, Utc::now());
            db.update_goal(&goal)?;

            println!("Journal entry saved. Streak: {}", outcome.streak_after);
            for label in &outcome.unlocked {
                println!("Achievement unlocked: {label}");
            }

            let catalog = MotivationCatalog::load(&data_dir()?.join("motivation_messages.json"));
            let vars = HashMap::from([("goal".to_string(), goal.name.clone())]);
            println!("{}", catalog.pick(MotivationCategory::PostSession, &vars));
        }
    }
    Ok(())
}
