//! Reminder scheduling against a platform notification collaborator.
//!
//! Trigger instants are computed in local wall-clock terms (`NaiveDateTime`)
//! and handed to a [`Notifier`]. Notification identifiers are derived
//! deterministically from entity identifiers, so rescheduling overwrites
//! instead of duplicating and idempotence needs no coordination. A trigger
//! that is not strictly in the future is skipped silently. Collaborator
//! failures are logged and swallowed; nothing here is fatal.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde_json::json;

use crate::goal::{NotificationSettings, Project, Task};
use crate::message::{MessageCategory, MessageContext, MessageProvider};

/// Minutes before a task's start at which its reminder fires.
pub const TASK_REMINDER_LEAD_MINUTES: i64 = 15;
/// Hours before a deadline at which its reminder fires.
pub const DEADLINE_REMINDER_LEAD_HOURS: i64 = 24;
/// Fixed identifier of the system-wide daily focus reminder.
pub const DAILY_FOCUS_ID: i64 = 999_999;
/// Offset separating deadline reminder ids from task reminder ids.
pub const DEADLINE_ID_OFFSET: i64 = 1_000_000;
/// Local time at which the daily focus reminder repeats.
pub const DAILY_FOCUS_HOUR: u32 = 9;

/// Derive the stable numeric notification id for an entity id.
///
/// UUID-shaped ids use their first eight hex digits (dashes stripped);
/// anything else folds to a stable hash. Same entity, same id.
pub fn notification_id(entity_id: &str) -> i64 {
    let prefix: String = entity_id.chars().filter(|c| *c != '-').take(8).collect();
    if prefix.len() == 8 {
        if let Ok(value) = u32::from_str_radix(&prefix, 16) {
            return i64::from(value);
        }
    }
    let folded = entity_id
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
    i64::from(folded)
}

/// Notification id for a project's deadline reminder.
pub fn deadline_notification_id(project_id: &str) -> i64 {
    notification_id(project_id) + DEADLINE_ID_OFFSET
}

/// When a notification should fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireTime {
    /// Fire once at a local instant.
    Once(NaiveDateTime),
    /// Fire every day at a local time of day.
    DailyAt(NaiveTime),
}

/// A scheduling request handed to the platform collaborator.
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub fire_at: FireTime,
    pub repeats: bool,
    /// Settings-flag category this notification belongs to.
    pub tag: &'static str,
    pub extra: serde_json::Value,
}

/// Platform notification collaborator.
///
/// Scheduling with an id that is already scheduled replaces the earlier
/// request; cancelling an unknown id is a no-op.
pub trait Notifier {
    fn schedule(&self, request: NotificationRequest) -> Result<(), Box<dyn std::error::Error>>;

    fn cancel(&self, id: i64) -> Result<(), Box<dyn std::error::Error>>;

    fn request_permission(&self) -> Result<bool, Box<dyn std::error::Error>> {
        Ok(true) // default: permission assumed granted
    }
}

/// Counts from a bulk scheduling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub scheduled: usize,
    pub skipped: usize,
}

/// Computes reminder trigger instants and drives the [`Notifier`].
pub struct ReminderScheduler<'a, N: Notifier> {
    notifier: &'a N,
    messages: &'a MessageProvider,
    settings: NotificationSettings,
}

impl<'a, N: Notifier> ReminderScheduler<'a, N> {
    pub fn new(notifier: &'a N, messages: &'a MessageProvider, settings: NotificationSettings) -> Self {
        Self {
            notifier,
            messages,
            settings,
        }
    }

    /// Schedule the reminder for a scheduled task: fires fifteen minutes
    /// before its slot. Returns whether a notification was scheduled;
    /// unscheduled tasks, past triggers, and a disabled category all skip
    /// silently.
    pub async fn schedule_task_reminder(
        &self,
        task: &Task,
        project: &Project,
        now: NaiveDateTime,
    ) -> bool {
        if !self.settings.task_reminders {
            return false;
        }
        let (Some(date), Some(time)) = (task.assigned_date, task.assigned_time) else {
            return false;
        };
        let trigger = date.and_time(time) - Duration::minutes(TASK_REMINDER_LEAD_MINUTES);
        if trigger <= now {
            tracing::debug!(task = %task.id, "task reminder trigger in the past, skipping");
            return false;
        }

        let body = self
            .messages
            .notification_message(
                MessageCategory::TaskReminder,
                &MessageContext::for_task(&task.title, &project.title),
            )
            .await;

        self.submit(NotificationRequest {
            id: notification_id(&task.id),
            title: "⏰ Task Reminder".to_string(),
            body,
            fire_at: FireTime::Once(trigger),
            repeats: false,
            tag: MessageCategory::TaskReminder.as_str(),
            extra: json!({
                "taskId": task.id,
                "projectId": project.id,
                "type": MessageCategory::TaskReminder.as_str(),
            }),
        })
    }

    /// Schedule a project's deadline reminder: fires twenty-four hours
    /// before the deadline date (midnight). Same skip rules as task
    /// reminders.
    pub async fn schedule_deadline_reminder(&self, project: &Project, now: NaiveDateTime) -> bool {
        if !self.settings.goal_deadlines {
            return false;
        }
        let Some(deadline) = project.deadline else {
            return false;
        };
        let trigger =
            deadline.and_time(NaiveTime::MIN) - Duration::hours(DEADLINE_REMINDER_LEAD_HOURS);
        if trigger <= now {
            tracing::debug!(project = %project.id, "deadline reminder trigger in the past, skipping");
            return false;
        }

        let body = self
            .messages
            .notification_message(
                MessageCategory::GoalDeadline,
                &MessageContext::for_project(&project.title),
            )
            .await;

        self.submit(NotificationRequest {
            id: deadline_notification_id(&project.id),
            title: "⚠️ Goal Deadline Approaching".to_string(),
            body,
            fire_at: FireTime::Once(trigger),
            repeats: false,
            tag: MessageCategory::GoalDeadline.as_str(),
            extra: json!({
                "projectId": project.id,
                "type": MessageCategory::GoalDeadline.as_str(),
            }),
        })
    }

    /// Schedule the singleton daily focus reminder at 09:00. The fixed id
    /// makes rescheduling a replacement, never a duplicate.
    pub async fn schedule_daily_focus(&self) -> bool {
        if !self.settings.daily_focus {
            return false;
        }

        let body = self
            .messages
            .notification_message(MessageCategory::DailyFocus, &MessageContext::default())
            .await;

        let fire_time = NaiveTime::from_hms_opt(DAILY_FOCUS_HOUR, 0, 0)
            .unwrap_or(NaiveTime::MIN);
        self.submit(NotificationRequest {
            id: DAILY_FOCUS_ID,
            title: "🎯 Daily Focus Time".to_string(),
            body,
            fire_at: FireTime::DailyAt(fire_time),
            repeats: true,
            tag: MessageCategory::DailyFocus.as_str(),
            extra: json!({ "type": MessageCategory::DailyFocus.as_str() }),
        })
    }

    /// Re-derive reminders for every project: one deadline reminder per
    /// project, one task reminder per incomplete task. Completed tasks get
    /// no reminder.
    pub async fn sync_projects(&self, projects: &[Project], now: NaiveDateTime) -> SyncSummary {
        let mut summary = SyncSummary::default();
        for project in projects {
            if self.schedule_deadline_reminder(project, now).await {
                summary.scheduled += 1;
            } else {
                summary.skipped += 1;
            }
            for task in &project.tasks {
                if task.completed {
                    continue;
                }
                if self.schedule_task_reminder(task, project, now).await {
                    summary.scheduled += 1;
                } else {
                    summary.skipped += 1;
                }
            }
        }
        summary
    }

    /// Cancel a task's reminder. Unknown ids are a no-op.
    pub fn cancel_task_reminder(&self, task_id: &str) {
        self.cancel_id(notification_id(task_id));
    }

    /// Cancel a project's deadline reminder. Unknown ids are a no-op.
    pub fn cancel_deadline_reminder(&self, project_id: &str) {
        self.cancel_id(deadline_notification_id(project_id));
    }

    /// Cancel the daily focus reminder.
    pub fn cancel_daily_focus(&self) {
        self.cancel_id(DAILY_FOCUS_ID);
    }

    /// Cancel every outstanding reminder of one category across the
    /// supplied projects. Used when a settings flag is switched off.
    pub fn cancel_category(&self, category: MessageCategory, projects: &[Project]) {
        match category {
            MessageCategory::TaskReminder => {
                for project in projects {
                    for task in &project.tasks {
                        self.cancel_task_reminder(&task.id);
                    }
                }
            }
            MessageCategory::GoalDeadline => {
                for project in projects {
                    self.cancel_deadline_reminder(&project.id);
                }
            }
            MessageCategory::DailyFocus => self.cancel_daily_focus(),
        }
    }

    fn submit(&self, request: NotificationRequest) -> bool {
        match self.notifier.schedule(request) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "notifier rejected schedule request");
                false
            }
        }
    }

    fn cancel_id(&self, id: i64) {
        if let Err(e) = self.notifier.cancel(id) {
            tracing::warn!(id, error = %e, "notifier rejected cancel request");
        }
    }
}
