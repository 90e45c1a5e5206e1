//! Visual theme and styling.

use console::Style;

/// Trellis's visual theme.
#[derive(Debug, Clone)]
pub struct TrellisTheme {
    /// Style for passing status lines (green).
    pub success: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for section headings (bold).
    pub heading: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
}

impl Default for TrellisTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl TrellisTheme {
    /// Create the default Trellis theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            error: Style::new().red().bold(),
            heading: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            error: Style::new(),
            heading: Style::new(),
            dim: Style::new(),
        }
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(msg))
    }

    /// Format an informational line.
    ///
    /// Requirement status lines are colored by their leading mark, headings
    /// (lines ending in `:`) are emphasized and bare links are dimmed.
    pub fn format_info(&self, msg: &str) -> String {
        let trimmed = msg.trim();
        if trimmed.starts_with('✓') {
            format!("{}", self.success.apply_to(msg))
        } else if trimmed.starts_with('✗') {
            format!("{}", self.error.apply_to(msg))
        } else if trimmed.ends_with(':') {
            format!("{}", self.heading.apply_to(msg))
        } else if trimmed.starts_with("https://") {
            format!("{}", self.dim.apply_to(msg))
        } else {
            msg.to_string()
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
