//! The daily focus view: today's tasks, the current slot, and greetings.

use chrono::{Local, Timelike};
use std::time::Duration;
use timely_core::message::{greeting, MessageProvider};
use timely_core::planner::{current_task_at, todays_tasks};
use timely_core::storage::{Config, GoalDb};

use super::parse_time;

pub fn run(time: Option<String>, encourage: bool) -> Result<(), Box<dyn std::error::Error>> {
    let db = GoalDb::open()?;
    let config = Config::load()?;
    let projects = db.list_projects()?;

    let now = Local::now();
    let g = greeting(config.user_name.as_deref(), now.hour());
    println!("{}", g.title);

    let view = todays_tasks(&projects, now.date_naive());
    println!("{}", serde_json::to_string_pretty(&view)?);

    let at = match time {
        Some(s) => parse_time(&s)?,
        None => now.time(),
    };
    match current_task_at(&view, at) {
        Some(current) => println!("Now: {} [{}]", current.task.title, current.project_title),
        None => println!("No task in the current slot."),
    }

    if encourage {
        let provider = MessageProvider::with_timeout(
            config.messages.endpoint.clone(),
            Duration::from_secs(config.messages.timeout_secs),
        );
        let name = config.user_name.as_deref().unwrap_or("friend").to_string();
        let line = tokio::runtime::Runtime::new()?
            .block_on(provider.daily_encouragement(&name, &projects));
        println!("{line}");
    }
    Ok(())
}
