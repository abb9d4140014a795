//! Project management commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use timely_core::goal::{GoalType, Project, Task};
use timely_core::storage::GoalDb;
use uuid::Uuid;

use super::{parse_date, parse_time};

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a new project
    Create {
        /// Project title
        title: String,
        /// Project description
        #[arg(long, default_value = "")]
        description: String,
        /// Deadline date (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
        /// Deadline time of day (HH:MM)
        #[arg(long)]
        deadline_time: Option<String>,
        /// Goal type: one-time, daily, or recurring (default: one-time)
        #[arg(long, default_value = "one-time")]
        goal_type: String,
        /// Time of day for daily goals (HH:MM)
        #[arg(long)]
        daily_time: Option<String>,
    },
    /// List projects with their tasks
    List,
    /// Get project details
    Get {
        /// Project ID
        id: String,
    },
    /// Update a project
    Update {
        /// Project ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New deadline date (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
        /// New deadline time (HH:MM)
        #[arg(long)]
        deadline_time: Option<String>,
    },
    /// Delete a project and all of its tasks
    Delete {
        /// Project ID
        id: String,
    },
    /// Add a task under a project
    AddTask {
        /// Owning project ID
        project_id: String,
        /// Task title
        title: String,
        /// Task description
        #[arg(long, default_value = "")]
        description: String,
        /// Estimated minutes (default: 30)
        #[arg(long, default_value = "30")]
        estimated_minutes: u32,
    },
}

fn parse_goal_type(s: &str) -> GoalType {
    match s {
        "daily" => GoalType::Daily,
        "recurring" => GoalType::Recurring,
        _ => GoalType::OneTime,
    }
}

pub fn run(action: ProjectAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = GoalDb::open()?;

    match action {
        ProjectAction::Create {
            title,
            description,
            deadline,
            deadline_time,
            goal_type,
            daily_time,
        } => {
            let project = Project {
                id: Uuid::new_v4().to_string(),
                title,
                description,
                deadline: deadline.as_deref().map(parse_date).transpose()?,
                deadline_time: deadline_time.as_deref().map(parse_time).transpose()?,
                goal_type: parse_goal_type(&goal_type),
                daily_time: daily_time.as_deref().map(parse_time).transpose()?,
                progress: 0,
                tasks: Vec::new(),
                created_at: Utc::now(),
            };
            db.create_project(&project)?;
            println!("Project created: {}", project.id);
            println!("{}", serde_json::to_string_pretty(&project)?);
        }
        ProjectAction::List => {
            let projects = db.list_projects()?;
            println!("{}", serde_json::to_string_pretty(&projects)?);
        }
        ProjectAction::Get { id } => match db.get_project(&id)? {
            Some(project) => println!("{}", serde_json::to_string_pretty(&project)?),
            None => println!("Project not found: {id}"),
        },
        ProjectAction::Update {
            id,
            title,
            description,
            deadline,
            deadline_time,
        } => {
            let mut project = db
                .get_project(&id)?
                .ok_or(format!("Project not found: {id}"))?;

            if let Some(t) = title {
                project.title = t;
            }
            if let Some(d) = description {
                project.description = d;
            }
            if let Some(d) = deadline {
                project.deadline = Some(parse_date(&d)?);
            }
            if let Some(t) = deadline_time {
                project.deadline_time = Some(parse_time(&t)?);
            }

            db.update_project(&project)?;
            println!("Project updated:");
            println!("{}", serde_json::to_string_pretty(&project)?);
        }
        ProjectAction::Delete { id } => {
            db.delete_project(&id)?;
            println!("Project deleted: {id}");
        }
        ProjectAction::AddTask {
            project_id,
            title,
            description,
            estimated_minutes,
        } => {
            let task = Task {
                id: Uuid::new_v4().to_string(),
                project_id,
                title,
                description,
                estimated_minutes,
                completed: false,
                assigned_date: None,
                assigned_time: None,
                created_at: Utc::now(),
            };
            let progress = db.add_task(&task)?;
            println!("Task added: {} (project progress {progress}%)", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
    }
    Ok(())
}
