//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{requested_command, Cli, Commands};
use crate::error::{Result, TrellisError};
use crate::project::{find_project_root, TrellisProject};
use crate::requirements::SystemProbe;
use crate::shell::SystemRunner;
use crate::ui::UserInterface;

use super::check::{CheckCommand, CHECK_HELP};
use super::completions::CompletionsCommand;
use super::deploy::{DeployCommand, DEPLOY_HELP};
use super::rollback::{RollbackCommand, ROLLBACK_HELP};

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - Sink for everything the user sees
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    /// Failures the user can fix are reported through `ui` and returned as
    /// a failed result; `Err` is reserved for problems outside the command's
    /// control, such as an unreadable project.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Result for a finished subprocess.
    ///
    /// The exit code is forwarded as-is; a process killed by a signal has
    /// none and maps to 1.
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => Self::success(),
            Some(code) => Self::failure(code),
            None => Self::failure(1),
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    start_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a dispatcher that looks for the project from `start_dir`.
    pub fn new(start_dir: PathBuf) -> Self {
        Self { start_dir }
    }

    /// Dispatch and execute a command.
    ///
    /// The project is only loaded for commands that target an environment.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Check(args) => {
                let probe = SystemProbe::new();
                let cmd = CheckCommand::new(args.clone(), &probe);
                cmd.execute(ui)
            }
            Commands::Rollback(args) => {
                let project = TrellisProject::discover(&self.start_dir)?;
                let cmd = RollbackCommand::new(args.clone(), &project, &SystemRunner);
                cmd.execute(ui)
            }
            Commands::Deploy(args) => {
                let project = TrellisProject::discover(&self.start_dir)?;
                let cmd = DeployCommand::new(args.clone(), &project, &SystemRunner);
                cmd.execute(ui)
            }
            Commands::Completions(args) => {
                let cmd = CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }

    /// Report arguments clap rejected, as exit code 1.
    ///
    /// Environment-targeting commands look for the project first, so outside
    /// a project the missing project is what gets reported. Otherwise clap's
    /// message is followed by the command's help text.
    pub fn report_parse_error(
        &self,
        err: &clap::Error,
        raw_args: &[String],
        ui: &mut dyn UserInterface,
    ) -> CommandResult {
        let command = requested_command(raw_args);
        tracing::debug!("Argument error for {:?}: {:?}", command, err.kind());

        if matches!(command, Some("rollback" | "deploy"))
            && find_project_root(&self.start_dir).is_none()
        {
            ui.error(&format!("Error: {}", TrellisError::NoProject));
            return CommandResult::failure(1);
        }

        let rendered = err.render().to_string();
        match command.and_then(help_for) {
            Some(help) => {
                let first = rendered.lines().next().unwrap_or_default();
                let message = first.strip_prefix("error: ").unwrap_or(first);
                ui.error(&format!("Error: {}", message));
                ui.output(help);
            }
            None => ui.error(rendered.trim_end()),
        }

        CommandResult::failure(1)
    }
}

fn help_for(command: &str) -> Option<&'static str> {
    match command {
        "check" => Some(CHECK_HELP),
        "rollback" => Some(ROLLBACK_HELP),
        "deploy" => Some(DEPLOY_HELP),
        _ => None,
    }
}
