//! SQLite-based storage for projects, tasks, and journaling goals.
//!
//! Projects own their tasks: deleting a project cascades to its tasks, and
//! every task mutation recomputes the owning project's derived progress in
//! the same call so the stored percentage can never drift from task state.
//! A `kv` table holds single-record state (notification settings, user
//! email); a malformed record falls back to its default instead of failing.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::data_dir;
use crate::error::{Result, StorageError};
use crate::goal::{Goal, GoalType, JournalNote, NotificationSettings, Project, Task};
use crate::progress::compute_progress;

const SETTINGS_KEY: &str = "notification_settings";
const USER_EMAIL_KEY: &str = "user_email";

// === Helper functions ===

fn parse_goal_type(goal_type_str: &str) -> GoalType {
    match goal_type_str {
        "daily" => GoalType::Daily,
        "recurring" => GoalType::Recurring,
        _ => GoalType::OneTime,
    }
}

fn format_goal_type(goal_type: GoalType) -> &'static str {
    match goal_type {
        GoalType::OneTime => "one_time",
        GoalType::Daily => "daily",
        GoalType::Recurring => "recurring",
    }
}

fn parse_date(date_str: Option<String>) -> Option<NaiveDate> {
    date_str.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
}

fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

fn parse_time(time_str: Option<String>) -> Option<NaiveTime> {
    time_str.and_then(|s| NaiveTime::parse_from_str(&s, "%H:%M").ok())
}

fn format_time(time: Option<NaiveTime>) -> Option<String> {
    time.map(|t| t.format("%H:%M").to_string())
}

/// Parse datetime from RFC3339 string with fallback to current time.
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    let created_at_str: String = row.get(8)?;
    Ok(Task {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        estimated_minutes: row.get(4)?,
        completed: row.get(5)?,
        assigned_date: parse_date(row.get(6)?),
        assigned_time: parse_time(row.get(7)?),
        created_at: parse_datetime_fallback(&created_at_str),
    })
}

fn row_to_project(row: &rusqlite::Row) -> rusqlite::Result<Project> {
    let goal_type_str: String = row.get(5)?;
    let created_at_str: String = row.get(8)?;
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        deadline: parse_date(row.get(3)?),
        deadline_time: parse_time(row.get(4)?),
        goal_type: parse_goal_type(&goal_type_str),
        daily_time: parse_time(row.get(6)?),
        progress: row.get(7)?,
        tasks: Vec::new(),
        created_at: parse_datetime_fallback(&created_at_str),
    })
}

fn row_to_goal(row: &rusqlite::Row) -> rusqlite::Result<Goal> {
    let achievements_json: String = row.get(5)?;
    let notes_json: String = row.get(6)?;
    let created_at_str: String = row.get(7)?;

    // Stored as JSON columns; a corrupt blob degrades to empty rather
    // than failing the whole read.
    let achievements: Vec<String> = serde_json::from_str(&achievements_json).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "corrupt achievements blob, treating as empty");
        Vec::new()
    });
    let journal_notes: Vec<JournalNote> = serde_json::from_str(&notes_json).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "corrupt journal blob, treating as empty");
        Vec::new()
    });

    Ok(Goal {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        progress: row.get(3)?,
        streak: row.get(4)?,
        achievements,
        journal_notes,
        created_at: parse_datetime_fallback(&created_at_str),
    })
}

/// SQLite database for goal/task storage.
pub struct GoalDb {
    conn: Connection,
}

impl GoalDb {
    /// Open the database at `~/.config/timely/timely.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("timely.db");
        let conn = Connection::open(&path).map_err(|source| StorageError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (tests and ephemeral use).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "PRAGMA foreign_keys = ON;

                CREATE TABLE IF NOT EXISTS projects (
                    id            TEXT PRIMARY KEY,
                    title         TEXT NOT NULL,
                    description   TEXT NOT NULL DEFAULT '',
                    deadline      TEXT,
                    deadline_time TEXT,
                    goal_type     TEXT NOT NULL DEFAULT 'one_time',
                    daily_time    TEXT,
                    progress      INTEGER NOT NULL DEFAULT 0,
                    created_at    TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS tasks (
                    id                TEXT PRIMARY KEY,
                    project_id        TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                    title             TEXT NOT NULL,
                    description       TEXT NOT NULL DEFAULT '',
                    estimated_minutes INTEGER NOT NULL,
                    completed         INTEGER NOT NULL DEFAULT 0,
                    assigned_date     TEXT,
                    assigned_time     TEXT,
                    created_at        TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS goals (
                    id            TEXT PRIMARY KEY,
                    name          TEXT NOT NULL,
                    description   TEXT NOT NULL DEFAULT '',
                    progress      INTEGER NOT NULL DEFAULT 0,
                    streak        INTEGER NOT NULL DEFAULT 0,
                    achievements  TEXT NOT NULL DEFAULT '[]',
                    journal_notes TEXT NOT NULL DEFAULT '[]',
                    created_at    TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_tasks_project_id ON tasks(project_id);
                CREATE INDEX IF NOT EXISTS idx_tasks_assigned_date ON tasks(assigned_date);",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    // === Projects ===

    /// Insert a project together with any tasks it already owns.
    pub fn create_project(&self, project: &Project) -> Result<()> {
        project.validate()?;
        self.conn.execute(
            "INSERT INTO projects (id, title, description, deadline, deadline_time, goal_type, daily_time, progress, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                project.id,
                project.title,
                project.description,
                format_date(project.deadline),
                format_time(project.deadline_time),
                format_goal_type(project.goal_type),
                format_time(project.daily_time),
                project.progress,
                project.created_at.to_rfc3339(),
            ],
        ).map_err(StorageError::from)?;

        for task in &project.tasks {
            self.insert_task_row(task)?;
        }
        if !project.tasks.is_empty() {
            self.recompute_progress(&project.id)?;
        }
        Ok(())
    }

    pub fn get_project(&self, id: &str) -> Result<Option<Project>> {
        let project = self
            .conn
            .query_row(
                "SELECT id, title, description, deadline, deadline_time, goal_type, daily_time, progress, created_at
                 FROM projects WHERE id = ?1",
                params![id],
                row_to_project,
            )
            .optional()
            .map_err(StorageError::from)?;

        match project {
            Some(mut project) => {
                project.tasks = self.tasks_for_project(&project.id)?;
                Ok(Some(project))
            }
            None => Ok(None),
        }
    }

    /// All projects with their tasks embedded, newest first.
    pub fn list_projects(&self) -> Result<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, title, description, deadline, deadline_time, goal_type, daily_time, progress, created_at
                 FROM projects ORDER BY created_at DESC",
            )
            .map_err(StorageError::from)?;

        let rows = stmt
            .query_map([], row_to_project)
            .map_err(StorageError::from)?;

        let mut projects = Vec::new();
        for row in rows {
            let mut project = row.map_err(StorageError::from)?;
            project.tasks = self.tasks_for_project(&project.id)?;
            projects.push(project);
        }
        Ok(projects)
    }

    /// Update a project's own fields. Tasks are managed through the task
    /// operations, progress through [`GoalDb::recompute_progress`].
    pub fn update_project(&self, project: &Project) -> Result<()> {
        project.validate()?;
        let changed = self.conn.execute(
            "UPDATE projects SET title = ?2, description = ?3, deadline = ?4, deadline_time = ?5,
                    goal_type = ?6, daily_time = ?7
             WHERE id = ?1",
            params![
                project.id,
                project.title,
                project.description,
                format_date(project.deadline),
                format_time(project.deadline_time),
                format_goal_type(project.goal_type),
                format_time(project.daily_time),
            ],
        ).map_err(StorageError::from)?;

        if changed == 0 {
            return Err(StorageError::NotFound {
                kind: "project",
                id: project.id.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Delete a project and, via cascade, all tasks it owns.
    pub fn delete_project(&self, id: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM projects WHERE id = ?1", params![id])
            .map_err(StorageError::from)?;
        Ok(())
    }

    // === Tasks ===

    fn tasks_for_project(&self, project_id: &str) -> Result<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, project_id, title, description, estimated_minutes, completed, assigned_date, assigned_time, created_at
                 FROM tasks WHERE project_id = ?1 ORDER BY created_at",
            )
            .map_err(StorageError::from)?;

        let rows = stmt
            .query_map(params![project_id], row_to_task)
            .map_err(StorageError::from)?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row.map_err(StorageError::from)?);
        }
        Ok(tasks)
    }

    fn insert_task_row(&self, task: &Task) -> Result<()> {
        task.validate()?;
        self.conn.execute(
            "INSERT INTO tasks (id, project_id, title, description, estimated_minutes, completed, assigned_date, assigned_time, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                task.id,
                task.project_id,
                task.title,
                task.description,
                task.estimated_minutes,
                task.completed,
                format_date(task.assigned_date),
                format_time(task.assigned_time),
                task.created_at.to_rfc3339(),
            ],
        ).map_err(StorageError::from)?;
        Ok(())
    }

    pub fn get_task(&self, id: &str) -> Result<Option<Task>> {
        let task = self
            .conn
            .query_row(
                "SELECT id, project_id, title, description, estimated_minutes, completed, assigned_date, assigned_time, created_at
                 FROM tasks WHERE id = ?1",
                params![id],
                row_to_task,
            )
            .optional()
            .map_err(StorageError::from)?;
        Ok(task)
    }

    /// Add a task under its project and recompute the project's progress.
    ///
    /// Returns the project's new progress.
    pub fn add_task(&self, task: &Task) -> Result<u8> {
        self.insert_task_row(task)?;
        self.recompute_progress(&task.project_id)
    }

    /// Toggle completion and recompute the owning project's progress.
    ///
    /// Returns the project's new progress.
    pub fn set_task_completed(&self, task_id: &str, completed: bool) -> Result<u8> {
        let task = self.require_task(task_id)?;
        self.conn
            .execute(
                "UPDATE tasks SET completed = ?2 WHERE id = ?1",
                params![task_id, completed],
            )
            .map_err(StorageError::from)?;
        self.recompute_progress(&task.project_id)
    }

    /// Place a task on the calendar. Both fields are written together;
    /// there is no conflict detection against other tasks.
    pub fn assign_task(&self, task_id: &str, date: NaiveDate, time: NaiveTime) -> Result<()> {
        self.require_task(task_id)?;
        self.conn
            .execute(
                "UPDATE tasks SET assigned_date = ?2, assigned_time = ?3 WHERE id = ?1",
                params![
                    task_id,
                    format_date(Some(date)),
                    format_time(Some(time))
                ],
            )
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Take a task off the calendar. Clears both fields of the pair.
    pub fn unassign_task(&self, task_id: &str) -> Result<()> {
        self.require_task(task_id)?;
        self.conn
            .execute(
                "UPDATE tasks SET assigned_date = NULL, assigned_time = NULL WHERE id = ?1",
                params![task_id],
            )
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Delete a task and recompute the owning project's progress.
    ///
    /// Returns the project's new progress.
    pub fn delete_task(&self, task_id: &str) -> Result<u8> {
        let task = self.require_task(task_id)?;
        self.conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![task_id])
            .map_err(StorageError::from)?;
        self.recompute_progress(&task.project_id)
    }

    fn require_task(&self, task_id: &str) -> Result<Task> {
        self.get_task(task_id)?.ok_or_else(|| {
            StorageError::NotFound {
                kind: "task",
                id: task_id.to_string(),
            }
            .into()
        })
    }

    /// Re-derive a project's progress from its tasks and persist it.
    pub fn recompute_progress(&self, project_id: &str) -> Result<u8> {
        let tasks = self.tasks_for_project(project_id)?;
        let progress = compute_progress(&tasks);
        self.conn
            .execute(
                "UPDATE projects SET progress = ?2 WHERE id = ?1",
                params![project_id, progress],
            )
            .map_err(StorageError::from)?;
        Ok(progress)
    }

    // === Goals (journaling) ===

    pub fn create_goal(&self, goal: &Goal) -> Result<()> {
        self.conn.execute(
            "INSERT INTO goals (id, name, description, progress, streak, achievements, journal_notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                goal.id,
                goal.name,
                goal.description,
                goal.progress,
                goal.streak,
                serde_json::to_string(&goal.achievements)?,
                serde_json::to_string(&goal.journal_notes)?,
                goal.created_at.to_rfc3339(),
            ],
        ).map_err(StorageError::from)?;
        Ok(())
    }

    pub fn get_goal(&self, id: &str) -> Result<Option<Goal>> {
        let goal = self
            .conn
            .query_row(
                "SELECT id, name, description, progress, streak, achievements, journal_notes, created_at
                 FROM goals WHERE id = ?1",
                params![id],
                row_to_goal,
            )
            .optional()
            .map_err(StorageError::from)?;
        Ok(goal)
    }

    pub fn list_goals(&self) -> Result<Vec<Goal>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, description, progress, streak, achievements, journal_notes, created_at
                 FROM goals ORDER BY created_at DESC",
            )
            .map_err(StorageError::from)?;

        let rows = stmt.query_map([], row_to_goal).map_err(StorageError::from)?;

        let mut goals = Vec::new();
        for row in rows {
            goals.push(row.map_err(StorageError::from)?);
        }
        Ok(goals)
    }

    /// Persist the whole goal record, including streak, achievements and
    /// journal notes (the journal flow rewrites these together).
    pub fn update_goal(&self, goal: &Goal) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE goals SET name = ?2, description = ?3, progress = ?4, streak = ?5, achievements = ?6, journal_notes = ?7
             WHERE id = ?1",
            params![
                goal.id,
                goal.name,
                goal.description,
                goal.progress,
                goal.streak,
                serde_json::to_string(&goal.achievements)?,
                serde_json::to_string(&goal.journal_notes)?,
            ],
        ).map_err(StorageError::from)?;

        if changed == 0 {
            return Err(StorageError::NotFound {
                kind: "goal",
                id: goal.id.clone(),
            }
            .into());
        }
        Ok(())
    }

    pub fn delete_goal(&self, id: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM goals WHERE id = ?1", params![id])
            .map_err(StorageError::from)?;
        Ok(())
    }

    // === Settings and single-record state ===

    /// Read the notification settings record. A missing or unparsable
    /// record yields the defaults (all categories on), never an error.
    pub fn notification_settings(&self) -> NotificationSettings {
        match self.kv_get(SETTINGS_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "corrupt notification settings, using defaults");
                NotificationSettings::default()
            }),
            Ok(None) => NotificationSettings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read notification settings, using defaults");
                NotificationSettings::default()
            }
        }
    }

    /// Rewrite the notification settings record as a whole.
    pub fn set_notification_settings(&self, settings: &NotificationSettings) -> Result<()> {
        self.kv_set(SETTINGS_KEY, &serde_json::to_string(settings)?)
    }

    pub fn user_email(&self) -> Result<Option<String>> {
        self.kv_get(USER_EMAIL_KEY)
    }

    pub fn set_user_email(&self, email: &str) -> Result<()> {
        self.kv_set(USER_EMAIL_KEY, email)
    }

    fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .map_err(StorageError::from)?;
        Ok(value)
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(StorageError::from)?;
        Ok(())
    }
}
