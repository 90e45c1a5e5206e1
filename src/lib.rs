//! Trellis - command-line companion for Trellis WordPress server projects.
//!
//! Checks that the tools a Trellis project needs are installed, and runs the
//! project's Ansible playbooks against a validated environment and site.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface, argument parsing and commands
//! - [`error`] - Error types and result aliases
//! - [`playbook`] - `ansible-playbook` argument construction
//! - [`project`] - Project discovery and its environments and sites
//! - [`requirements`] - Tool requirements and version checking
//! - [`shell`] - External process execution
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use trellis::cli::{Command, RollbackArgs};
//! use trellis::cli::commands::RollbackCommand;
//! use trellis::project::StaticProject;
//! use trellis::shell::RecordingRunner;
//! use trellis::ui::MockUI;
//!
//! let project = StaticProject::new("/srv/example/trellis")
//!     .with_site("development", "example.com");
//! let runner = RecordingRunner::new();
//! let mut ui = MockUI::new();
//!
//! let args = RollbackArgs {
//!     release: None,
//!     args: vec!["development".to_string()],
//! };
//! let result = RollbackCommand::new(args, &project, &runner)
//!     .execute(&mut ui)
//!     .unwrap();
//!
//! assert!(result.success);
//! assert_eq!(
//!     runner.command_lines(),
//!     vec!["ansible-playbook rollback.yml -e env=development site=example.com"]
//! );
//! ```

pub mod cli;
pub mod error;
pub mod playbook;
pub mod project;
pub mod requirements;
pub mod shell;
pub mod ui;

pub use error::{Result, TrellisError};
