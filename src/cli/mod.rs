//! Command-line interface for Trellis.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations
//! - [`validator`] - Positional argument arity

pub mod args;
pub mod commands;
pub mod validator;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, DeployArgs, RollbackArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
pub use validator::ArgumentPolicy;
