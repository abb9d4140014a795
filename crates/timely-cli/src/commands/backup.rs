//! Backup export/import commands.

use chrono::Utc;
use clap::Subcommand;
use std::path::PathBuf;
use timely_core::storage::{backup, GoalDb};

#[derive(Subcommand)]
pub enum BackupAction {
    /// Export projects, settings, and email to a JSON file
    Export {
        /// Output path (default: timely-backup-YYYY-MM-DD.json)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Import a backup file, replacing current projects and settings
    Import {
        /// Backup file path
        path: PathBuf,
    },
}

pub fn run(action: BackupAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = GoalDb::open()?;

    match action {
        BackupAction::Export { path } => {
            let now = Utc::now();
            let path = path.unwrap_or_else(|| {
                PathBuf::from(format!("timely-backup-{}.json", now.format("%Y-%m-%d")))
            });
            let document = backup::export_to_file(&db, &path, now)?;
            println!(
                "Exported {} projects to {}",
                document.projects.len(),
                path.display()
            );
        }
        BackupAction::Import { path } => {
            let document = backup::import_from_file(&db, &path)?;
            println!(
                "Imported {} projects (backup dated {})",
                document.projects.len(),
                document.export_date.format("%Y-%m-%d")
            );
        }
    }
    Ok(())
}
