//! Starter template commands.

use clap::Subcommand;
use timely_core::goal::builtin_templates;

#[derive(Subcommand)]
pub enum TemplateAction {
    /// List the built-in starter templates
    List,
}

pub fn run(action: TemplateAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TemplateAction::List => {
            println!("{}", serde_json::to_string_pretty(builtin_templates())?);
        }
    }
    Ok(())
}
