//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that run a playbook share
//! the validation flow in [`pipeline`], so `rollback` and `deploy` differ only
//! in their playbook and the variables their flags add.

pub mod check;
pub mod completions;
pub mod deploy;
pub mod dispatcher;
pub mod pipeline;
pub mod rollback;

pub use check::CheckCommand;
pub use deploy::DeployCommand;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use pipeline::{Invocation, Target, ENVIRONMENT_POLICY};
pub use rollback::RollbackCommand;
