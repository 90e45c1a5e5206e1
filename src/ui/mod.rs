//! User-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait, the append-only sink every command writes to
//! - [`TerminalUI`] for real terminals and pipes
//! - [`MockUI`] capturing everything for assertions
//!
//! # Example
//!
//! ```
//! use trellis::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.info("Checking Trellis requirements...");
//! ui.error("Error: foo is not a valid environment");
//! assert!(ui.combined().contains("foo is not a valid environment"));
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::{MockUI, Severity};
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, TrellisTheme};

/// Output sink with three severities.
///
/// Implementations must preserve the order in which messages arrive.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Informational progress and status lines.
    fn info(&mut self, msg: &str);

    /// Primary command output, such as help text.
    fn output(&mut self, msg: &str);

    /// Failures.
    fn error(&mut self, msg: &str);
}
