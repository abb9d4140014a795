//! Day planning over projects: the "today" view and slot assignment.

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

use crate::goal::{Project, Task};

/// A task surfaced on the daily view, tagged with its project's title.
#[derive(Debug, Clone, Serialize)]
pub struct TodayTask {
    #[serde(flatten)]
    pub task: Task,
    pub project_title: String,
}

/// Flatten every task assigned to `today` out of all projects, ascending by
/// assigned time.
///
/// The sort is stable and treats a missing `assigned_time` as equal to
/// anything, so unscheduled tasks keep their encounter order.
pub fn todays_tasks(projects: &[Project], today: NaiveDate) -> Vec<TodayTask> {
    let mut tasks: Vec<TodayTask> = projects
        .iter()
        .flat_map(|project| {
            project
                .tasks
                .iter()
                .filter(|task| task.assigned_date == Some(today))
                .map(|task| TodayTask {
                    task: task.clone(),
                    project_title: project.title.clone(),
                })
        })
        .collect();

    tasks.sort_by(|a, b| match (a.task.assigned_time, b.task.assigned_time) {
        (Some(ta), Some(tb)) => ta.cmp(&tb),
        _ => std::cmp::Ordering::Equal,
    });
    tasks
}

/// Find the task whose time window contains `now`, at minute granularity.
///
/// A task is current when `assigned_time <= now <= assigned_time +
/// estimated_minutes`. Overlapping windows are allowed; the first match in
/// list order wins. A window that would cross midnight matches nothing.
pub fn current_task_at<'a>(tasks: &'a [TodayTask], now: NaiveTime) -> Option<&'a TodayTask> {
    let now = now.with_second(0).and_then(|t| t.with_nanosecond(0))?;

    tasks.iter().find(|entry| {
        let Some(start) = entry.task.assigned_time else {
            return false;
        };
        let (end, wrapped) =
            start.overflowing_add_signed(Duration::minutes(i64::from(entry.task.estimated_minutes)));
        if wrapped != 0 {
            return false;
        }
        start <= now && now <= end
    })
}

/// Assign a task to a calendar slot. Date and time are written as an atomic
/// pair; no conflict detection against other tasks.
pub fn assign_to_slot(task: &mut Task, date: NaiveDate, time: NaiveTime) {
    task.assigned_date = Some(date);
    task.assigned_time = Some(time);
}

/// Remove a task from the calendar. Clears both fields of the pair.
pub fn clear_slot(task: &mut Task) {
    task.assigned_date = None;
    task.assigned_time = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn task(id: &str, assigned_date: Option<NaiveDate>, assigned_time: Option<NaiveTime>) -> Task {
        Task {
            id: id.to_string(),
            project_id: "p".to_string(),
            title: id.to_string(),
            description: String::new(),
            estimated_minutes: 30,
            completed: false,
            assigned_date,
            assigned_time,
            created_at: Utc::now(),
        }
    }

    fn project(title: &str, tasks: Vec<Task>) -> Project {
        Project {
            id: title.to_string(),
            title: title.to_string(),
            description: String::new(),
            deadline: None,
            deadline_time: None,
            goal_type: Default::default(),
            daily_time: None,
            progress: 0,
            tasks,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn merges_projects_and_sorts_by_time() {
        let projects = vec![
            project(
                "Alpha",
                vec![
                    task("a-late", Some(date(2)), Some(time(16, 0))),
                    task("a-early", Some(date(2)), Some(time(8, 0))),
                ],
            ),
            project(
                "Beta",
                vec![
                    task("b-noon", Some(date(2)), Some(time(12, 0))),
                    task("b-other-day", Some(date(3)), Some(time(9, 0))),
                ],
            ),
        ];

        let today = todays_tasks(&projects, date(2));
        let ids: Vec<&str> = today.iter().map(|t| t.task.id.as_str()).collect();
        assert_eq!(ids, vec!["a-early", "b-noon", "a-late"]);
        assert_eq!(today[0].project_title, "Alpha");
        assert_eq!(today[1].project_title, "Beta");
    }

    #[test]
    fn missing_time_does_not_panic_and_keeps_order() {
        let projects = vec![project(
            "Alpha",
            vec![
                task("untimed-1", Some(date(2)), None),
                task("untimed-2", Some(date(2)), None),
            ],
        )];

        let today = todays_tasks(&projects, date(2));
        let ids: Vec<&str> = today.iter().map(|t| t.task.id.as_str()).collect();
        assert_eq!(ids, vec!["untimed-1", "untimed-2"]);
    }

    #[test]
    fn unassigned_tasks_are_excluded() {
        let projects = vec![project(
            "Alpha",
            vec![
                task("scheduled", Some(date(2)), Some(time(9, 0))),
                task("backlog", None, None),
            ],
        )];

        let today = todays_tasks(&projects, date(2));
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].task.id, "scheduled");
    }

    #[test]
    fn current_task_window_is_inclusive() {
        let projects = vec![project(
            "Alpha",
            vec![task("t", Some(date(2)), Some(time(9, 0)))],
        )];
        let today = todays_tasks(&projects, date(2));

        // 30-minute estimate: window is 09:00..=09:30.
        assert!(current_task_at(&today, time(9, 0)).is_some());
        assert!(current_task_at(&today, time(9, 30)).is_some());
        assert!(current_task_at(&today, time(8, 59)).is_none());
        assert!(current_task_at(&today, time(9, 31)).is_none());
    }

    #[test]
    fn seconds_are_ignored() {
        let projects = vec![project(
            "Alpha",
            vec![task("t", Some(date(2)), Some(time(9, 0)))],
        )];
        let today = todays_tasks(&projects, date(2));

        let now = NaiveTime::from_hms_opt(9, 30, 59).unwrap();
        assert!(current_task_at(&today, now).is_some());
    }

    #[test]
    fn first_of_overlapping_windows_wins() {
        let projects = vec![project(
            "Alpha",
            vec![
                task("first", Some(date(2)), Some(time(9, 0))),
                task("second", Some(date(2)), Some(time(9, 15))),
            ],
        )];
        let today = todays_tasks(&projects, date(2));

        let current = current_task_at(&today, time(9, 20)).unwrap();
        assert_eq!(current.task.id, "first");
    }

    #[test]
    fn window_crossing_midnight_matches_nothing() {
        let mut t = task("late", Some(date(2)), Some(time(23, 50)));
        t.estimated_minutes = 30;
        let projects = vec![project("Alpha", vec![t])];
        let today = todays_tasks(&projects, date(2));

        assert!(current_task_at(&today, time(23, 55)).is_none());
        assert!(current_task_at(&today, time(0, 5)).is_none());
    }

    #[test]
    fn slot_assignment_is_atomic() {
        let mut t = task("t", None, None);
        assign_to_slot(&mut t, date(4), time(10, 0));
        assert!(t.is_scheduled());
        assert_eq!(t.assigned_date, Some(date(4)));
        assert_eq!(t.assigned_time, Some(time(10, 0)));

        // Reassignment overwrites both fields.
        assign_to_slot(&mut t, date(5), time(11, 30));
        assert_eq!(t.assigned_date, Some(date(5)));
        assert_eq!(t.assigned_time, Some(time(11, 30)));

        clear_slot(&mut t);
        assert!(!t.is_scheduled());
    }
}
