//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! messages, in order, for later assertion.
//!
//! # Example
//!
//! ```
//! use trellis::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.info("Required:");
//! ui.error("Error: too many arguments");
//!
//! assert!(ui.has_info("Required:"));
//! assert!(ui.has_error("too many arguments"));
//! assert_eq!(ui.combined(), "Required:\nError: too many arguments");
//! ```

use super::{OutputMode, UserInterface};

/// Severity a message was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Written via `info`.
    Info,
    /// Written via `output`.
    Output,
    /// Written via `error`.
    Error,
}

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    entries: Vec<(Severity, String)>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Every captured message with its severity, in order.
    pub fn entries(&self) -> &[(Severity, String)] {
        &self.entries
    }

    /// Captured messages of one severity, in order.
    pub fn of(&self, severity: Severity) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, msg)| msg.as_str())
            .collect()
    }

    /// Get all captured info messages.
    pub fn infos(&self) -> Vec<&str> {
        self.of(Severity::Info)
    }

    /// Get all captured output messages.
    pub fn outputs(&self) -> Vec<&str> {
        self.of(Severity::Output)
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> Vec<&str> {
        self.of(Severity::Error)
    }

    /// Check if an info message containing `msg` was shown.
    pub fn has_info(&self, msg: &str) -> bool {
        self.infos().iter().any(|m| m.contains(msg))
    }

    /// Check if an output message containing `msg` was shown.
    pub fn has_output(&self, msg: &str) -> bool {
        self.outputs().iter().any(|m| m.contains(msg))
    }

    /// Check if an error message containing `msg` was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors().iter().any(|m| m.contains(msg))
    }

    /// Everything captured, one message per line, in arrival order.
    pub fn combined(&self) -> String {
        self.entries
            .iter()
            .map(|(_, msg)| msg.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Clear all captured messages.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn info(&mut self, msg: &str) {
        self.entries.push((Severity::Info, msg.to_string()));
    }

    fn output(&mut self, msg: &str) {
        self.entries.push((Severity::Output, msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.entries.push((Severity::Error, msg.to_string()));
    }
}
