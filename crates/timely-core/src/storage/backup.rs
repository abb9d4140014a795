//! JSON backup export/import.
//!
//! The document carries projects (with tasks), the notification settings
//! record, and the user email. It round-trips losslessly for those fields;
//! there is no schema versioning. Journaling goals are not part of the
//! backup surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::goal_db::GoalDb;
use crate::error::Result;
use crate::goal::{NotificationSettings, Project};

/// The exported backup document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDocument {
    pub projects: Vec<Project>,
    pub settings: NotificationSettings,
    #[serde(rename = "userEmail", default)]
    pub user_email: String,
    #[serde(rename = "exportDate")]
    pub export_date: DateTime<Utc>,
}

/// Snapshot the store into a backup document.
pub fn export(db: &GoalDb, now: DateTime<Utc>) -> Result<BackupDocument> {
    Ok(BackupDocument {
        projects: db.list_projects()?,
        settings: db.notification_settings(),
        user_email: db.user_email()?.unwrap_or_default(),
        export_date: now,
    })
}

/// Write a pretty-printed backup document to `path`.
pub fn export_to_file(db: &GoalDb, path: &Path, now: DateTime<Utc>) -> Result<BackupDocument> {
    let document = export(db, now)?;
    std::fs::write(path, serde_json::to_string_pretty(&document)?)?;
    Ok(document)
}

/// Replace the store's projects, settings, and email with the document's
/// contents.
pub fn import(db: &GoalDb, document: &BackupDocument) -> Result<()> {
    for project in db.list_projects()? {
        db.delete_project(&project.id)?;
    }
    for project in &document.projects {
        db.create_project(project)?;
    }
    db.set_notification_settings(&document.settings)?;
    if !document.user_email.is_empty() {
        db.set_user_email(&document.user_email)?;
    }
    Ok(())
}

/// Read a backup document from `path` and import it.
pub fn import_from_file(db: &GoalDb, path: &Path) -> Result<BackupDocument> {
    let content = std::fs::read_to_string(path)?;
    let document: BackupDocument = serde_json::from_str(&content)?;
    import(db, &document)?;
    Ok(document)
}
