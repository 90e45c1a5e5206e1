//! Shared flow for commands that run a playbook against an environment.
//!
//! Resolution runs an ordered list of steps over an [`Invocation`]. Each
//! step either fills in part of the target or stops the whole run with an
//! error:
//!
//! 1. a project must be detected
//! 2. positional arity must fit the command's [`ArgumentPolicy`]
//! 3. the environment must be declared by the project
//! 4. the site must be declared for that environment, or be the only one
//!
//! Arguments beyond the policy's maximum are rejected in step 2, before the
//! environment is looked at.

use crate::cli::validator::ArgumentPolicy;
use crate::error::{Result, TrellisError};
use crate::playbook::{Playbook, ANSIBLE_PLAYBOOK};
use crate::project::Project;
use crate::shell::{CommandOptions, ProcessRunner};
use crate::ui::UserInterface;

use super::dispatcher::CommandResult;

/// Positional policy of every environment-targeting command: ENVIRONMENT [SITE].
pub const ENVIRONMENT_POLICY: ArgumentPolicy = ArgumentPolicy::new(1, 1);

/// Environment and site a command was resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub environment: String,
    pub site: String,
}

/// State shared by the resolution steps.
pub struct Invocation<'a> {
    project: &'a dyn Project,
    policy: ArgumentPolicy,
    args: &'a [String],
    environment: Option<String>,
    site: Option<String>,
}

type Step = fn(&mut Invocation<'_>) -> Result<()>;

const STEPS: &[Step] = &[
    require_project,
    check_arity,
    validate_environment,
    resolve_site,
];

impl<'a> Invocation<'a> {
    pub fn new(project: &'a dyn Project, policy: ArgumentPolicy, args: &'a [String]) -> Self {
        Self {
            project,
            policy,
            args,
            environment: None,
            site: None,
        }
    }

    /// Run every step in order, stopping at the first failure.
    pub fn resolve(mut self) -> Result<Target> {
        for step in STEPS {
            step(&mut self)?;
        }

        match (self.environment, self.site) {
            (Some(environment), Some(site)) => Ok(Target { environment, site }),
            _ => Err(anyhow::anyhow!("invocation resolved without a target").into()),
        }
    }
}

fn require_project(inv: &mut Invocation<'_>) -> Result<()> {
    if inv.project.detected() {
        Ok(())
    } else {
        Err(TrellisError::NoProject)
    }
}

fn check_arity(inv: &mut Invocation<'_>) -> Result<()> {
    inv.policy.validate(inv.args)
}

fn validate_environment(inv: &mut Invocation<'_>) -> Result<()> {
    let name = &inv.args[0];
    let valid = inv.project.environments();

    if !valid.contains(name) {
        return Err(TrellisError::InvalidEnvironment {
            name: name.clone(),
            valid,
        });
    }

    inv.environment = Some(name.clone());
    Ok(())
}

fn resolve_site(inv: &mut Invocation<'_>) -> Result<()> {
    let environment = &inv.args[0];
    let mut sites = inv.project.sites_for(environment)?;

    let site = match inv.args.get(1) {
        Some(name) if sites.contains(name) => name.clone(),
        Some(name) => {
            return Err(TrellisError::InvalidSite {
                name: name.clone(),
                valid: sites,
            })
        }
        None if sites.len() == 1 => {
            let site = sites.remove(0);
            tracing::debug!("Defaulting to the only site in {}: {}", environment, site);
            site
        }
        None if sites.is_empty() => {
            return Err(TrellisError::NoSites {
                environment: environment.clone(),
            })
        }
        None => {
            return Err(TrellisError::AmbiguousSite {
                environment: environment.clone(),
                sites,
            })
        }
    };

    inv.site = Some(site);
    Ok(())
}

/// Print a failure and turn it into exit code 1.
///
/// Usage errors are followed by the command's help text.
pub fn report_failure(ui: &mut dyn UserInterface, err: &TrellisError, help: &str) -> CommandResult {
    ui.error(&format!("Error: {}", err));
    if err.is_usage() {
        ui.output(help);
    }
    CommandResult::failure(1)
}

/// Resolve the target, build the playbook and run it from the project root.
///
/// `build` receives the resolved target and returns the playbook with every
/// command-specific variable applied.
pub fn run_playbook<F>(
    ui: &mut dyn UserInterface,
    project: &dyn Project,
    runner: &dyn ProcessRunner,
    args: &[String],
    help: &str,
    build: F,
) -> Result<CommandResult>
where
    F: FnOnce(&Target) -> Playbook,
{
    let target = match Invocation::new(project, ENVIRONMENT_POLICY, args).resolve() {
        Ok(target) => target,
        Err(e) => return Ok(report_failure(ui, &e, help)),
    };

    let playbook = build(&target);
    ui.info(&format!("Running command => {}", playbook.command_line()));

    let mut options = CommandOptions::default();
    if let Some(root) = project.root() {
        options = options.in_dir(root);
    }

    match runner.run(ANSIBLE_PLAYBOOK, &playbook.args(), &options) {
        Ok(output) => {
            tracing::debug!("{} exited with {:?}", ANSIBLE_PLAYBOOK, output.exit_code);
            Ok(CommandResult::from_exit_code(output.exit_code))
        }
        Err(e) => Ok(report_failure(ui, &e, help)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::StaticProject;
    use crate::shell::RecordingRunner;
    use crate::ui::MockUI;
    use std::io;
    use std::path::Path;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn project() -> StaticProject {
        StaticProject::new("/srv/trellis")
            .with_site("development", "example.com")
            .with_site("production", "a.com")
            .with_site("production", "b.com")
            .with_environment("staging")
    }

    fn resolve(project: &StaticProject, list: &[&str]) -> Result<Target> {
        let args = args(list);
        Invocation::new(project, ENVIRONMENT_POLICY, &args).resolve()
    }

    #[test]
    fn missing_project_wins_over_everything() {
        let project = StaticProject::undetected();
        assert!(matches!(resolve(&project, &[]), Err(TrellisError::NoProject)));
        assert!(matches!(
            resolve(&project, &["foo", "bar", "baz"]),
            Err(TrellisError::NoProject)
        ));
    }

    #[test]
    fn arity_is_checked_before_environment() {
        let project = project();
        assert!(matches!(
            resolve(&project, &[]),
            Err(TrellisError::MissingArguments { expected: 1, got: 0 })
        ));
        assert!(matches!(
            resolve(&project, &["foo", "bar", "baz"]),
            Err(TrellisError::TooManyArguments { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn unknown_environment() {
        let err = resolve(&project(), &["foo"]).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("foo is not a valid environment"));
    }

    #[test]
    fn unknown_site() {
        let err = resolve(&project(), &["development", "nosite"]).unwrap_err();
        assert!(err.to_string().starts_with("nosite is not a valid site"));
    }

    #[test]
    fn explicit_site() {
        let target = resolve(&project(), &["production", "b.com"]).unwrap();
        assert_eq!(
            target,
            Target {
                environment: "production".to_string(),
                site: "b.com".to_string()
            }
        );
    }

    #[test]
    fn single_site_is_the_default() {
        let target = resolve(&project(), &["development"]).unwrap();
        assert_eq!(target.site, "example.com");
    }

    #[test]
    fn several_sites_need_an_explicit_choice() {
        assert!(matches!(
            resolve(&project(), &["production"]),
            Err(TrellisError::AmbiguousSite { .. })
        ));
    }

    #[test]
    fn environment_without_sites() {
        assert!(matches!(
            resolve(&project(), &["staging"]),
            Err(TrellisError::NoSites { .. })
        ));
    }

    #[test]
    fn usage_failures_print_help() {
        let mut ui = MockUI::new();
        let err = TrellisError::MissingArguments { expected: 1, got: 0 };
        let result = report_failure(&mut ui, &err, "Usage: trellis thing");

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Error: missing arguments"));
        assert!(ui.has_output("Usage: trellis thing"));
    }

    #[test]
    fn validation_failures_do_not_print_help() {
        let mut ui = MockUI::new();
        report_failure(&mut ui, &TrellisError::NoProject, "Usage: trellis thing");

        assert!(ui.has_error("Error: No Trellis project detected"));
        assert!(ui.outputs().is_empty());
    }

    #[test]
    fn runs_from_project_root_and_forwards_exit_code() {
        let project = project();
        let runner = RecordingRunner::new().with_exit_code(3);
        let mut ui = MockUI::new();

        let result = run_playbook(
            &mut ui,
            &project,
            &runner,
            &args(&["development"]),
            "",
            |t| Playbook::new("server.yml", &t.environment).with_extra_var("site", &t.site),
        )
        .unwrap();

        assert_eq!(result.exit_code, 3);
        let recorded = runner.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].program, "ansible-playbook");
        assert_eq!(
            recorded[0].cwd.as_deref(),
            Some(Path::new("/srv/trellis"))
        );
        assert!(ui.has_info(
            "Running command => ansible-playbook server.yml -e env=development site=example.com"
        ));
    }

    #[test]
    fn nothing_runs_when_validation_fails() {
        let project = project();
        let runner = RecordingRunner::new();
        let mut ui = MockUI::new();

        let result = run_playbook(&mut ui, &project, &runner, &args(&["foo"]), "", |t| {
            Playbook::new("server.yml", &t.environment)
        })
        .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(runner.recorded().is_empty());
    }

    #[test]
    fn spawn_failure_reports_the_cause() {
        let project = project();
        let runner = RecordingRunner::new().with_spawn_error(
            "ansible-playbook",
            io::ErrorKind::NotFound,
            "No such file or directory",
        );
        let mut ui = MockUI::new();

        let result = run_playbook(
            &mut ui,
            &project,
            &runner,
            &args(&["development"]),
            "Usage: trellis thing",
            |t| Playbook::new("server.yml", &t.environment).with_extra_var("site", &t.site),
        )
        .unwrap();

        assert_eq!(result, CommandResult::failure(1));
        assert_eq!(
            ui.errors(),
            vec!["Error: Failed to run ansible-playbook server.yml -e env=development site=example.com: No such file or directory"]
        );
        assert!(ui.outputs().is_empty());
    }
}
