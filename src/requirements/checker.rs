//! Requirement checking.
//!
//! The [`RequirementChecker`] decides, one [`Requirement`] at a time, whether
//! a tool is installed and recent enough. A [`CheckReport`] accumulates the
//! outcomes of a run and decides the overall result: only required tools can
//! fail it, and a tool whose version could not be determined counts as
//! unsatisfied without stopping the run.

use crate::error::{Result, TrellisError};
use crate::requirements::probe::ToolProbe;
use crate::requirements::registry::Requirement;
use crate::requirements::version::{Version, VersionConstraint};

/// Outcome of checking a single requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementResult {
    /// Installed and matching the constraint.
    pub satisfied: bool,
    /// Found on PATH.
    pub installed: bool,
    /// Version reported by the tool, when it could be read.
    pub version: Option<String>,
    /// Formatted status line.
    pub message: String,
}

impl RequirementResult {
    fn satisfied(req: &Requirement, version: &str) -> Self {
        Self {
            satisfied: true,
            installed: true,
            version: Some(version.to_string()),
            message: format!(
                "✓ {} {} (required: {})",
                req.name, version, req.version_constraint
            ),
        }
    }

    fn outdated(req: &Requirement, version: &str) -> Self {
        Self {
            satisfied: false,
            installed: true,
            version: Some(version.to_string()),
            message: format!(
                "✗ {} {} does not satisfy {}, upgrade: {}",
                req.name, version, req.version_constraint, req.url
            ),
        }
    }

    fn missing(req: &Requirement) -> Self {
        Self {
            satisfied: false,
            installed: false,
            version: None,
            message: format!("✗ {} not installed, install: {}", req.name, req.url),
        }
    }
}

/// Checks requirements against the tools a [`ToolProbe`] can see.
pub struct RequirementChecker<'a> {
    probe: &'a dyn ToolProbe,
}

impl<'a> RequirementChecker<'a> {
    /// Create a checker backed by `probe`.
    pub fn new(probe: &'a dyn ToolProbe) -> Self {
        Self { probe }
    }

    /// Check a single requirement.
    ///
    /// A missing tool is not an error: it yields an unsatisfied result.
    /// Errors mean the tool was found but its version could not be read,
    /// parsed, or compared.
    pub fn check(&self, req: &Requirement) -> Result<RequirementResult> {
        let Some(binary) = self.probe.locate(req.command) else {
            tracing::debug!("{} ({}) not found on PATH", req.name, req.command);
            return Ok(RequirementResult::missing(req));
        };

        let failed = |e: TrellisError| TrellisError::RequirementCheckFailed {
            requirement: req.name.to_string(),
            message: e.to_string(),
        };

        let raw = self
            .probe
            .version_output(&binary, req.version_args)
            .map_err(failed)?;
        let reported = req.extract(&raw);
        tracing::debug!("{} reported version {:?}", req.name, reported);

        let version = Version::parse(&reported).map_err(failed)?;
        let constraint = VersionConstraint::parse(req.version_constraint).map_err(failed)?;

        if constraint.matches(&version) {
            Ok(RequirementResult::satisfied(req, &reported))
        } else {
            Ok(RequirementResult::outdated(req, &reported))
        }
    }
}

/// Outcome of one requirement within a run.
#[derive(Debug)]
pub struct CheckEntry {
    /// Name of the requirement.
    pub name: String,
    /// Whether the requirement decides the overall result.
    pub optional: bool,
    /// Result, or why it could not be produced.
    pub outcome: Result<RequirementResult>,
}

impl CheckEntry {
    /// Whether the tool was found and matched its constraint.
    pub fn is_satisfied(&self) -> bool {
        matches!(&self.outcome, Ok(result) if result.satisfied)
    }
}

/// Accumulated outcomes of a check run, in the order they were recorded.
#[derive(Debug, Default)]
pub struct CheckReport {
    entries: Vec<CheckEntry>,
}

impl CheckReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for `req` and return the stored entry.
    pub fn record(&mut self, req: &Requirement, outcome: Result<RequirementResult>) -> &CheckEntry {
        self.entries.push(CheckEntry {
            name: req.name.to_string(),
            optional: req.optional,
            outcome,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// All entries, in order.
    pub fn entries(&self) -> &[CheckEntry] {
        &self.entries
    }

    /// True when every required entry is satisfied.
    ///
    /// Optional entries never affect the result.
    pub fn passed(&self) -> bool {
        self.entries
            .iter()
            .filter(|entry| !entry.optional)
            .all(CheckEntry::is_satisfied)
    }
}
