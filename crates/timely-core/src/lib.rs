//! # Timely Core Library
//!
//! This library provides the core logic for Timely, a personal goal and
//! task tracker. It implements a CLI-first philosophy where all operations
//! are available via a standalone CLI binary, with any GUI shell expected
//! to be a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Storage**: SQLite-based entity storage (projects with owned tasks,
//!   journaling goals, single-record settings) and TOML-based configuration
//! - **Progress**: derived completion percentages, recomputed on every task
//!   mutation rather than cached incrementally
//! - **Streaks**: journal streak and achievement bookkeeping
//! - **Planner**: the "today" view and calendar slot assignment
//! - **Reminders**: trigger-time math over a platform notification
//!   collaborator, idempotent via deterministic notification ids
//! - **Messages**: remote text generation with deterministic fallbacks,
//!   plus the local motivational catalog
//!
//! ## Key Components
//!
//! - [`GoalDb`]: entity persistence
//! - [`ReminderScheduler`]: reminder computation and dispatch
//! - [`MessageProvider`]: generated text with fallback behavior
//! - [`Notifier`]: trait for the platform notification collaborator

pub mod error;
pub mod goal;
pub mod message;
pub mod planner;
pub mod progress;
pub mod reminder;
pub mod storage;
pub mod streak;

pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use goal::{
    builtin_templates, Goal, GoalTemplate, GoalType, JournalNote, NotificationSettings, Project,
    Task,
};
pub use message::{MessageCategory, MessageContext, MessageProvider, MotivationCatalog};
pub use planner::{assign_to_slot, clear_slot, current_task_at, todays_tasks, TodayTask};
pub use progress::compute_progress;
pub use reminder::{NotificationRequest, Notifier, ReminderScheduler};
pub use storage::{BackupDocument, Config, GoalDb};
pub use streak::{apply_journal_entry, JournalOutcome};
