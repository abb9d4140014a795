//! Domain types for goals, projects, tasks, and journal entries.
//!
//! A `Project` is a user goal decomposed into owned `Task`s and tracked to a
//! deadline or as a daily/recurring habit. A `Goal` is the simpler
//! journaling-tracked entity with streak/achievement state. The two are
//! deliberately distinct records with distinct lifecycles.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// How a project is tracked over time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// Finish-once goal with an optional deadline.
    OneTime,
    /// Daily habit; carries a fixed time of day.
    Daily,
    /// Recurring goal without a fixed cadence.
    Recurring,
}

impl Default for GoalType {
    fn default() -> Self {
        GoalType::OneTime
    }
}

/// A project that groups related tasks and tracks derived progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub deadline: Option<NaiveDate>,
    pub deadline_time: Option<NaiveTime>,
    #[serde(default)]
    pub goal_type: GoalType,
    pub daily_time: Option<NaiveTime>,
    /// Derived from task completion; see [`crate::progress::compute_progress`].
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Check the record's own invariants (non-empty title, daily goals
    /// carry a time of day).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "title".into(),
                message: "must not be empty".into(),
            });
        }
        if self.goal_type == GoalType::Daily && self.daily_time.is_none() {
            return Err(ValidationError::MissingDailyTime);
        }
        Ok(())
    }

    pub fn completed_task_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

/// A schedulable unit of work under a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    /// Back-reference to the owning project (not ownership).
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Estimated duration in minutes; always positive.
    pub estimated_minutes: u32,
    #[serde(default)]
    pub completed: bool,
    pub assigned_date: Option<NaiveDate>,
    pub assigned_time: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// A task is scheduled when both calendar fields are set; the pair is
    /// only ever written atomically.
    pub fn is_scheduled(&self) -> bool {
        self.assigned_date.is_some() && self.assigned_time.is_some()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "title".into(),
                message: "must not be empty".into(),
            });
        }
        if self.estimated_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "estimated_minutes".into(),
                message: "must be positive".into(),
            });
        }
        if self.assigned_date.is_some() != self.assigned_time.is_some() {
            return Err(ValidationError::PartialSchedule);
        }
        Ok(())
    }
}

/// A single journal reflection attached to a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalNote {
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Reference to a recorded audio clip, when one was captured.
    pub audio: Option<String>,
}

/// A habit-tracked entity with streak/achievement state, distinct from
/// [`Project`]. Progress here is user-set, not derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub progress: u8,
    /// Consecutive qualifying days of journal activity.
    #[serde(default)]
    pub streak: u32,
    /// Unlocked achievement labels; entries are only ever added.
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub journal_notes: Vec<JournalNote>,
    pub created_at: DateTime<Utc>,
}

/// Per-category reminder toggles, persisted as one record and rewritten
/// as a whole on any single change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub task_reminders: bool,
    #[serde(default = "default_true")]
    pub daily_focus: bool,
    #[serde(default = "default_true")]
    pub goal_deadlines: bool,
}

fn default_true() -> bool {
    true
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            task_reminders: true,
            daily_focus: true,
            goal_deadlines: true,
        }
    }
}

/// Cadence of a starter template.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Daily,
    Weekly,
}

/// A starter template offered during project creation.
#[derive(Debug, Clone, Serialize)]
pub struct GoalTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub duration_months: u32,
    pub cadence: Cadence,
    pub time_slots: &'static [&'static str],
}

/// Built-in starter templates.
pub fn builtin_templates() -> &'static [GoalTemplate] {
    const TEMPLATES: &[GoalTemplate] = &[
        GoalTemplate {
            name: "Read a Book",
            description: "Finish reading a book by dedicating time each day.",
            duration_months: 1,
            cadence: Cadence::Daily,
            time_slots: &["20:00"],
        },
        GoalTemplate {
            name: "Exercise",
            description: "Stay fit by exercising regularly.",
            duration_months: 3,
            cadence: Cadence::Daily,
            time_slots: &["07:00"],
        },
        GoalTemplate {
            name: "Weekly Project Review",
            description: "Reflect on your project progress every week.",
            duration_months: 2,
            cadence: Cadence::Weekly,
            time_slots: &["18:00"],
        },
        GoalTemplate {
            name: "Meditation",
            description: "Practice mindfulness and meditation.",
            duration_months: 2,
            cadence: Cadence::Daily,
            time_slots: &["06:30"],
        },
    ];
    TEMPLATES
}
