//! Integration tests for the goal/task flow.
//!
//! These tests drive the store, planner, and streak engine together the way
//! the application does: mutate entities, then re-derive progress and the
//! daily view rather than trusting any cached state.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

use timely_core::goal::{Goal, GoalType, Project, Task};
use timely_core::planner::{current_task_at, todays_tasks};
use timely_core::storage::GoalDb;
use timely_core::streak::{apply_journal_entry, FIRST_SESSION, SEVEN_DAY_STREAK};

fn project(id: &str, title: &str) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        deadline: None,
        deadline_time: None,
        goal_type: GoalType::OneTime,
        daily_time: None,
        progress: 0,
        tasks: Vec::new(),
        created_at: Utc::now(),
    }
}

fn task(id: &str, project_id: &str, completed: bool) -> Task {
    Task {
        id: id.to_string(),
        project_id: project_id.to_string(),
        title: format!("task {id}"),
        description: String::new(),
        estimated_minutes: 30,
        completed,
        assigned_date: None,
        assigned_time: None,
        created_at: Utc::now(),
    }
}

#[test]
fn progress_tracks_task_mutations_end_to_end() {
    let db = GoalDb::open_in_memory().unwrap();
    db.create_project(&project("p1", "Thesis")).unwrap();

    // Four tasks, one already completed.
    db.add_task(&task("t1", "p1", true)).unwrap();
    db.add_task(&task("t2", "p1", false)).unwrap();
    db.add_task(&task("t3", "p1", false)).unwrap();
    let progress = db.add_task(&task("t4", "p1", false)).unwrap();
    assert_eq!(progress, 25);

    // Complete one more.
    let progress = db.set_task_completed("t2", true).unwrap();
    assert_eq!(progress, 50);

    // Delete the two incomplete tasks: 2 of 2 remaining are complete.
    db.delete_task("t3").unwrap();
    let progress = db.delete_task("t4").unwrap();
    assert_eq!(progress, 100);

    let stored = db.get_project("p1").unwrap().unwrap();
    assert_eq!(stored.progress, 100);
    assert_eq!(stored.tasks.len(), 2);
}

#[test]
fn daily_view_is_rederived_from_the_store() {
    let db = GoalDb::open_in_memory().unwrap();
    db.create_project(&project("p1", "Thesis")).unwrap();
    db.create_project(&project("p2", "Fitness")).unwrap();
    db.add_task(&task("write", "p1", false)).unwrap();
    db.add_task(&task("run", "p2", false)).unwrap();
    db.add_task(&task("someday", "p2", false)).unwrap();

    let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    db.assign_task("write", today, NaiveTime::from_hms_opt(14, 0, 0).unwrap())
        .unwrap();
    db.assign_task("run", today, NaiveTime::from_hms_opt(7, 0, 0).unwrap())
        .unwrap();

    let projects = db.list_projects().unwrap();
    let view = todays_tasks(&projects, today);
    let ids: Vec<&str> = view.iter().map(|t| t.task.id.as_str()).collect();
    assert_eq!(ids, vec!["run", "write"]);
    assert_eq!(view[0].project_title, "Fitness");

    let current = current_task_at(&view, NaiveTime::from_hms_opt(14, 20, 0).unwrap()).unwrap();
    assert_eq!(current.task.id, "write");
    assert!(current_task_at(&view, NaiveTime::from_hms_opt(20, 0, 0).unwrap()).is_none());
}

#[test]
fn journal_flow_persists_streak_and_achievements() {
    let db = GoalDb::open_in_memory().unwrap();
    let mut goal = Goal {
        id: "g1".to_string(),
        name: "Meditation".to_string(),
        description: String::new(),
        progress: 0,
        streak: 0,
        achievements: Vec::new(),
        journal_notes: Vec::new(),
        created_at: Utc::now(),
    };
    db.create_goal(&goal).unwrap();

    for day in 1..=7 {
        let now = Utc.with_ymd_and_hms(2025, 6, day, 20, 0, 0).unwrap();
        apply_journal_entry(&mut goal, "session", None, now);
        db.update_goal(&goal).unwrap();
    }

    let stored = db.get_goal("g1").unwrap().unwrap();
    assert_eq!(stored.streak, 7);
    assert_eq!(stored.journal_notes.len(), 7);
    assert!(stored.achievements.iter().any(|a| a == FIRST_SESSION));
    assert!(stored.achievements.iter().any(|a| a == SEVEN_DAY_STREAK));
}
