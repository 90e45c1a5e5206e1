//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.
//!
//! Flags are parsed by clap. Positional arguments are collected as-is and
//! validated by each command, so arity mistakes are reported with the
//! command's own usage text.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Subcommand names, as typed on the command line.
const COMMAND_NAMES: &[&str] = &["check", "rollback", "deploy", "completions"];

/// Trellis - Check requirements and run playbooks for a Trellis project.
#[derive(Debug, Parser)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory to search for the project from (overrides current directory)
    #[arg(short, long, global = true, env = "TRELLIS_PROJECT")]
    pub project: Option<PathBuf>,

    /// Only show command output and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that required and optional dependencies are installed
    Check(CheckArgs),

    /// Roll back the last deploy of a site
    Rollback(RollbackArgs),

    /// Deploy a site to an environment
    Deploy(DeployArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Unexpected positional arguments (none are accepted)
    #[arg(hide = true)]
    pub args: Vec<String>,
}

/// Arguments for the `rollback` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RollbackArgs {
    /// Name of release to roll back to instead of the previous one
    #[arg(long, value_name = "RELEASE")]
    pub release: Option<String>,

    /// ENVIRONMENT [SITE]
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Arguments for the `deploy` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DeployArgs {
    /// Branch to deploy instead of the site's configured branch
    #[arg(long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// ENVIRONMENT [SITE]
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// First subcommand name among raw arguments.
///
/// Used when clap rejects the arguments and no [`Cli`] exists.
pub fn requested_command(raw_args: &[String]) -> Option<&str> {
    raw_args
        .iter()
        .skip(1)
        .map(String::as_str)
        .find(|arg| COMMAND_NAMES.contains(arg))
}

/// `--project` value from raw arguments, falling back to `TRELLIS_PROJECT`.
///
/// Used when clap rejects the arguments and no [`Cli`] exists.
pub fn requested_project(raw_args: &[String]) -> Option<PathBuf> {
    let mut args = raw_args.iter().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--project" || arg == "-p" {
            return args.next().map(PathBuf::from);
        }
        if let Some(value) = arg.strip_prefix("--project=") {
            return Some(PathBuf::from(value));
        }
    }

    std::env::var_os("TRELLIS_PROJECT").map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rollback_release_flag_precedes_positionals() {
        let cli = Cli::parse_from([
            "trellis",
            "rollback",
            "--release=123",
            "development",
            "example.com",
        ]);
        let Commands::Rollback(args) = cli.command else {
            panic!("Expected Rollback command");
        };
        assert_eq!(args.release.as_deref(), Some("123"));
        assert_eq!(args.args, vec!["development", "example.com"]);
    }

    #[test]
    fn rollback_accepts_any_number_of_positionals() {
        let cli = Cli::parse_from(["trellis", "rollback", "development", "site", "foo"]);
        let Commands::Rollback(args) = cli.command else {
            panic!("Expected Rollback command");
        };
        assert_eq!(args.args.len(), 3);
        assert!(args.release.is_none());
    }

    #[test]
    fn rollback_accepts_no_positionals() {
        let cli = Cli::parse_from(["trellis", "rollback"]);
        let Commands::Rollback(args) = cli.command else {
            panic!("Expected Rollback command");
        };
        assert!(args.args.is_empty());
    }

    #[test]
    fn deploy_branch_flag() {
        let cli = Cli::parse_from(["trellis", "deploy", "production", "--branch", "main"]);
        let Commands::Deploy(args) = cli.command else {
            panic!("Expected Deploy command");
        };
        assert_eq!(args.branch.as_deref(), Some("main"));
        assert_eq!(args.args, vec!["production"]);
    }

    #[test]
    fn check_collects_unexpected_args() {
        let cli = Cli::parse_from(["trellis", "check", "extra"]);
        let Commands::Check(args) = cli.command else {
            panic!("Expected Check command");
        };
        assert_eq!(args.args, vec!["extra"]);
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::parse_from(["trellis", "check", "--quiet", "--debug"]);
        assert!(cli.quiet);
        assert!(cli.debug);
    }

    fn raw(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn requested_command_skips_flags() {
        assert_eq!(
            requested_command(&raw(&["trellis", "--quiet", "rollback", "--bogus"])),
            Some("rollback")
        );
        assert_eq!(requested_command(&raw(&["trellis", "--bogus"])), None);
    }

    #[test]
    fn requested_project_reads_both_spellings() {
        assert_eq!(
            requested_project(&raw(&["trellis", "--project", "/srv/a", "rollback"])),
            Some(PathBuf::from("/srv/a"))
        );
        assert_eq!(
            requested_project(&raw(&["trellis", "rollback", "--project=/srv/b"])),
            Some(PathBuf::from("/srv/b"))
        );
        assert_eq!(
            requested_project(&raw(&["trellis", "-p", "/srv/c"])),
            Some(PathBuf::from("/srv/c"))
        );
    }
}
