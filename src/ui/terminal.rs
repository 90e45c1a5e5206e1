//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, OutputMode, TrellisTheme, UserInterface};

/// Writes info and output to stdout and errors to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: TrellisTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            TrellisTheme::new()
        } else {
            TrellisTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn info(&mut self, msg: &str) {
        if self.mode.shows_info() {
            writeln!(self.out, "{}", self.theme.format_info(msg)).ok();
        }
    }

    fn output(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }
}

/// Create the UI for this process.
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode))
}
