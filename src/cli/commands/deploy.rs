//! Deploy command implementation.
//!
//! The `trellis deploy` command runs `deploy.yml` for one site.

use crate::cli::args::DeployArgs;
use crate::error::Result;
use crate::playbook::Playbook;
use crate::project::Project;
use crate::shell::ProcessRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::pipeline::run_playbook;

/// Usage text shown when `deploy` is called with the wrong arguments.
pub const DEPLOY_HELP: &str = "\
Usage: trellis deploy [options] ENVIRONMENT [SITE]

Deploys a site to the specified environment.

Deploy the default branch:

  $ trellis deploy production example.com

Deploy a different branch:

  $ trellis deploy --branch=feature-123 production example.com

SITE can be omitted when ENVIRONMENT has a single site.

Arguments:
  ENVIRONMENT  Name of environment (ie: production)
  SITE         Name of the site (ie: example.com)

Options:
      --branch  Branch name to deploy instead of the configured one
  -h, --help    Show this help
";

/// The deploy command implementation.
pub struct DeployCommand<'a> {
    args: DeployArgs,
    project: &'a dyn Project,
    runner: &'a dyn ProcessRunner,
}

impl<'a> DeployCommand<'a> {
    /// Create a new deploy command.
    pub fn new(args: DeployArgs, project: &'a dyn Project, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            args,
            project,
            runner,
        }
    }
}

impl Command for DeployCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        run_playbook(
            ui,
            self.project,
            self.runner,
            &self.args.args,
            DEPLOY_HELP,
            |target| {
                let playbook = Playbook::new("deploy.yml", &target.environment)
                    .with_extra_var("site", &target.site);
                match &self.args.branch {
                    Some(branch) => playbook.with_extra_var("branch", branch),
                    None => playbook,
                }
            },
        )
    }
}
