//! Command line interface for prebuilt framework rules.

mod args;
pub mod commands;

pub use args::{Args, Command, ProjectArgs, RuleArgs};

use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(args).await
}

/// Executes already parsed arguments.
pub async fn execute(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let project = crate::config::load_project(args.config())?;

    match args.command {
        Command::Slice(rule) => commands::print_slice(&project, &rule)?,
        Command::Link {
            rule,
            link_mode,
            force_whole,
        } => commands::print_link_input(&project, &rule, link_mode, force_whole)?,
        Command::Preprocessor(rule) => commands::print_preprocessor_input(&project, &rule)?,
        Command::Stage {
            target, dry_run, ..
        } => commands::stage(&project, target.as_deref(), dry_run).await?,
    }

    Ok(0)
}
