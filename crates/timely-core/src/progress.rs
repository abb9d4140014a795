//! Derived project progress.
//!
//! Progress is never stored independently of task state; callers recompute
//! it after every task insert, delete, or completion toggle and persist the
//! result.

use crate::goal::Task;

/// Compute a project's completion percentage from its tasks.
///
/// Returns 0 for an empty task list, otherwise
/// `round(100 * completed / total)` with round-half-up.
pub fn compute_progress(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let completed = tasks.iter().filter(|t| t.completed).count();
    let pct = (completed as f64 / tasks.len() as f64) * 100.0;
    pct.round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn task(completed: bool) -> Task {
        Task {
            id: "t".to_string(),
            project_id: "p".to_string(),
            title: "task".to_string(),
            description: String::new(),
            estimated_minutes: 30,
            completed,
            assigned_date: None,
            assigned_time: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(compute_progress(&[]), 0);
    }

    #[test]
    fn single_completed_is_full() {
        assert_eq!(compute_progress(&[task(true)]), 100);
    }

    #[test]
    fn one_of_three_rounds_down() {
        let tasks = vec![task(true), task(false), task(false)];
        assert_eq!(compute_progress(&tasks), 33);
    }

    #[test]
    fn two_of_three_rounds_up() {
        let tasks = vec![task(true), task(true), task(false)];
        assert_eq!(compute_progress(&tasks), 67);
    }

    #[test]
    fn quarter_steps() {
        let mut tasks = vec![task(true), task(false), task(false), task(false)];
        assert_eq!(compute_progress(&tasks), 25);
        tasks[1].completed = true;
        assert_eq!(compute_progress(&tasks), 50);
    }

    proptest! {
        #[test]
        fn always_within_bounds(flags in prop::collection::vec(any::<bool>(), 0..64)) {
            let tasks: Vec<Task> = flags.iter().map(|&c| task(c)).collect();
            let progress = compute_progress(&tasks);
            prop_assert!(progress <= 100);
            if tasks.is_empty() {
                prop_assert_eq!(progress, 0);
            }
            if !tasks.is_empty() && flags.iter().all(|&c| c) {
                prop_assert_eq!(progress, 100);
            }
            if flags.iter().all(|&c| !c) {
                prop_assert_eq!(progress, 0);
            }
        }
    }
}
