//! Check command implementation.
//!
//! The `trellis check` command reports whether the tools Trellis depends on
//! are installed and recent enough. Required tools are listed first and
//! decide the exit code; optional tools follow and are informational.

use crate::cli::args::CheckArgs;
use crate::cli::validator::ArgumentPolicy;
use crate::error::Result;
use crate::requirements::{
    CheckEntry, CheckReport, Requirement, RequirementChecker, ToolProbe, REQUIREMENTS,
    REQUIREMENTS_DOCS_URL,
};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::pipeline::report_failure;

/// Usage text shown when `check` is called with arguments.
pub const CHECK_HELP: &str = "\
Usage: trellis check

Checks if Trellis requirements are met.

Exits with code 1 when a required tool is missing or outdated.
Optional tools are listed but never change the result.

Options:
  -h, --help  Show this help
";

const POLICY: ArgumentPolicy = ArgumentPolicy::new(0, 0);

/// The check command implementation.
pub struct CheckCommand<'a> {
    args: CheckArgs,
    probe: &'a dyn ToolProbe,
    requirements: &'a [Requirement],
}

impl<'a> CheckCommand<'a> {
    /// Create a check command over the standard requirement table.
    pub fn new(args: CheckArgs, probe: &'a dyn ToolProbe) -> Self {
        Self {
            args,
            probe,
            requirements: REQUIREMENTS,
        }
    }

    /// Check a different set of requirements.
    pub fn with_requirements(mut self, requirements: &'a [Requirement]) -> Self {
        self.requirements = requirements;
        self
    }

    fn check_group(
        &self,
        ui: &mut dyn UserInterface,
        report: &mut CheckReport,
        checker: &RequirementChecker<'_>,
        optional: bool,
    ) {
        for req in self.requirements.iter().filter(|r| r.optional == optional) {
            show(ui, report.record(req, checker.check(req)));
        }
    }
}

fn show(ui: &mut dyn UserInterface, entry: &CheckEntry) {
    match &entry.outcome {
        Ok(result) => ui.info(&result.message),
        Err(e) => ui.error(&e.to_string()),
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if let Err(e) = POLICY.validate(&self.args.args) {
            return Ok(report_failure(ui, &e, CHECK_HELP));
        }

        let checker = RequirementChecker::new(self.probe);
        let mut report = CheckReport::new();

        ui.info("Checking Trellis requirements...");
        ui.info("");
        ui.info("Required:");
        self.check_group(ui, &mut report, &checker, false);

        ui.info("");
        ui.info("Optional:");
        self.check_group(ui, &mut report, &checker, true);

        ui.info("");
        ui.info("See requirements documentation for more information:");
        ui.info(REQUIREMENTS_DOCS_URL);

        if report.passed() {
            Ok(CommandResult::success())
        } else {
            tracing::debug!("Required tools missing or outdated");
            Ok(CommandResult::failure(1))
        }
    }
}
