//! Rollback command implementation.
//!
//! The `trellis rollback` command runs `rollback.yml`, which points the
//! `current` symlink of a site back at an earlier release.

use crate::cli::args::RollbackArgs;
use crate::error::Result;
use crate::playbook::Playbook;
use crate::project::Project;
use crate::shell::ProcessRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::pipeline::run_playbook;

/// Usage text shown when `rollback` is called with the wrong arguments.
pub const ROLLBACK_HELP: &str = "\
Usage: trellis rollback [options] ENVIRONMENT [SITE]

Performs a rollback (revert) of the last deploy for the site specified.

Rollback to the previous release:

  $ trellis rollback production example.com

Rollback to a specific release:

  $ trellis rollback --release=12345678901234 production example.com

SITE can be omitted when ENVIRONMENT has a single site.

Arguments:
  ENVIRONMENT  Name of environment (ie: production)
  SITE         Name of the site (ie: example.com)

Options:
      --release  Name of release to rollback instead of the previous one
  -h, --help     Show this help
";

/// The rollback command implementation.
pub struct RollbackCommand<'a> {
    args: RollbackArgs,
    project: &'a dyn Project,
    runner: &'a dyn ProcessRunner,
}

impl<'a> RollbackCommand<'a> {
    /// Create a new rollback command.
    pub fn new(args: RollbackArgs, project: &'a dyn Project, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            args,
            project,
            runner,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RollbackArgs {
        &self.args
    }
}

impl Command for RollbackCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        run_playbook(
            ui,
            self.project,
            self.runner,
            &self.args.args,
            ROLLBACK_HELP,
            |target| {
                let playbook = Playbook::new("rollback.yml", &target.environment)
                    .with_extra_var("site", &target.site);
                match &self.args.release {
                    Some(release) => playbook.with_extra_var("release", release),
                    None => playbook,
                }
            },
        )
    }
}
