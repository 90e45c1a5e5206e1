//! Error types for Trellis operations.
//!
//! This module defines [`TrellisError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Usage errors (bad arity) are reported together with the command's help text
//! - Validation errors (unknown environment or site) are reported on their own
//! - Requirement check errors are isolated per tool and never abort a check run
//! - Use `anyhow::Error` (via `TrellisError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Trellis operations.
#[derive(Debug, Error)]
pub enum TrellisError {
    /// No Trellis project was found from the working directory upwards.
    #[error("No Trellis project detected in the current directory or any of its parents")]
    NoProject,

    /// Fewer positional arguments than the command requires.
    #[error("missing arguments (expected {expected}, got {got})")]
    MissingArguments { expected: usize, got: usize },

    /// More positional arguments than the command accepts.
    #[error("too many arguments (expected {expected}, got {got})")]
    TooManyArguments { expected: usize, got: usize },

    /// Environment name is not declared by the project.
    #[error("{name} is not a valid environment, valid options are {}", valid.join(", "))]
    InvalidEnvironment { name: String, valid: Vec<String> },

    /// Site name is not declared for the environment.
    #[error("{name} is not a valid site, valid options are {}", valid.join(", "))]
    InvalidSite { name: String, valid: Vec<String> },

    /// Site omitted and the environment declares no sites.
    #[error("no sites found in {environment} environment")]
    NoSites { environment: String },

    /// Site omitted and the environment declares more than one site.
    #[error("multiple sites found in {environment} environment, please specify one of: {}", sites.join(", "))]
    AmbiguousSite {
        environment: String,
        sites: Vec<String>,
    },

    /// Version string could not be parsed.
    #[error("invalid version '{input}': {message}")]
    VersionParse { input: String, message: String },

    /// Version constraint could not be parsed.
    #[error("invalid version constraint '{input}': {message}")]
    ConstraintParse { input: String, message: String },

    /// A requirement could not be evaluated.
    #[error("Error checking {requirement} requirement: {message}")]
    RequirementCheckFailed {
        requirement: String,
        message: String,
    },

    /// External command could not be started.
    #[error("Failed to run {command}: {source}")]
    SpawnFailed {
        command: String,
        source: std::io::Error,
    },

    /// External command ran but did not succeed.
    #[error("{command} exited with {}", exit_status(*code))]
    CommandFailed { command: String, code: Option<i32> },

    /// Failed to parse a project configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrellisError {
    /// Whether the user must correct the invocation itself.
    ///
    /// Commands print their help text after reporting a usage error.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            TrellisError::MissingArguments { .. } | TrellisError::TooManyArguments { .. }
        )
    }
}

fn exit_status(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "no exit code (terminated by a signal)".to_string(),
    }
}

/// Result type alias for Trellis operations.
pub type Result<T> = std::result::Result<T, TrellisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_project_mentions_detection() {
        let err = TrellisError::NoProject;
        assert!(err.to_string().contains("No Trellis project detected"));
    }

    #[test]
    fn arity_errors_are_usage_errors() {
        let missing = TrellisError::MissingArguments {
            expected: 1,
            got: 0,
        };
        let too_many = TrellisError::TooManyArguments {
            expected: 2,
            got: 3,
        };
        assert!(missing.is_usage());
        assert!(too_many.is_usage());
        assert_eq!(
            too_many.to_string(),
            "too many arguments (expected 2, got 3)"
        );
    }

    #[test]
    fn invalid_environment_lists_options() {
        let err = TrellisError::InvalidEnvironment {
            name: "foo".into(),
            valid: vec!["development".into(), "production".into()],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("foo is not a valid environment"));
        assert!(msg.contains("development, production"));
        assert!(!err.is_usage());
    }

    #[test]
    fn invalid_site_lists_options() {
        let err = TrellisError::InvalidSite {
            name: "nosite".into(),
            valid: vec!["example.com".into()],
        };
        assert!(err.to_string().starts_with("nosite is not a valid site"));
        assert!(!err.is_usage());
    }

    #[test]
    fn ambiguous_site_names_environment() {
        let err = TrellisError::AmbiguousSite {
            environment: "production".into(),
            sites: vec!["a.com".into(), "b.com".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("production"));
        assert!(msg.contains("a.com, b.com"));
    }

    #[test]
    fn requirement_check_failed_displays_requirement_and_message() {
        let err = TrellisError::RequirementCheckFailed {
            requirement: "Python".into(),
            message: "invalid version 'abc'".into(),
        };
        assert_eq!(
            err.to_string(),
            "Error checking Python requirement: invalid version 'abc'"
        );
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = TrellisError::CommandFailed {
            command: "python3 --version".into(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "python3 --version exited with code 2");

        let killed = TrellisError::CommandFailed {
            command: "python3 --version".into(),
            code: None,
        };
        assert!(!killed.to_string().contains("None"));
        assert!(killed.to_string().contains("signal"));
    }

    #[test]
    fn spawn_failed_keeps_io_cause() {
        let err = TrellisError::SpawnFailed {
            command: "ansible-playbook rollback.yml".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to run ansible-playbook rollback.yml: permission denied"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: TrellisError = io_err.into();
        assert!(matches!(err, TrellisError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(TrellisError::NoProject)
        }
        assert!(returns_error().is_err());
    }
}
