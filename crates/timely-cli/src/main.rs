use clap::{Parser, Subcommand};

mod commands;
mod notifier;

#[derive(Parser)]
#[command(name = "timely", version, about = "Timely CLI -- goal and task tracking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project management
    Project {
        #[command(subcommand)]
        action: commands::project::ProjectAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Today's schedule
    Today {
        /// Clock time to evaluate the current task at (HH:MM, default now)
        #[arg(long)]
        time: Option<String>,
        /// Also fetch the daily encouragement line
        #[arg(long)]
        encourage: bool,
    },
    /// Journaling goal management
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Reminder scheduling
    Remind {
        #[command(subcommand)]
        action: commands::remind::RemindAction,
    },
    /// Notification settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Backup export/import
    Backup {
        #[command(subcommand)]
        action: commands::backup::BackupAction,
    },
    /// Starter templates
    Template {
        #[command(subcommand)]
        action: commands::template::TemplateAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Project { action } => commands::project::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Today { time, encourage } => commands::today::run(time, encourage),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Remind { action } => commands::remind::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Backup { action } => commands::backup::run(action),
        Commands::Template { action } => commands::template::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
