//! `ansible-playbook` argument construction.
//!
//! A [`Playbook`] renders to a deterministic argument vector: the playbook
//! file, then a single `-e` whose value holds `env=` first and every extra
//! variable after it in insertion order.
//!
//! # Example
//!
//! ```
//! use trellis::playbook::Playbook;
//!
//! let playbook = Playbook::new("rollback.yml", "development")
//!     .with_extra_var("site", "example.com")
//!     .with_extra_var("release", "123");
//!
//! assert_eq!(
//!     playbook.command_line(),
//!     "ansible-playbook rollback.yml -e env=development site=example.com release=123"
//! );
//! ```

use crate::shell::command_line;

/// Program every playbook runs through.
pub const ANSIBLE_PLAYBOOK: &str = "ansible-playbook";

/// A playbook invocation against one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playbook {
    name: String,
    environment: String,
    extra_vars: Vec<(String, String)>,
}

impl Playbook {
    /// A playbook file run against `environment`.
    pub fn new(name: &str, environment: &str) -> Self {
        Self {
            name: name.to_string(),
            environment: environment.to_string(),
            extra_vars: Vec::new(),
        }
    }

    /// Append an extra variable.
    ///
    /// Setting a key twice replaces its value in place.
    pub fn with_extra_var(mut self, key: &str, value: &str) -> Self {
        match self.extra_vars.iter().position(|(k, _)| k == key) {
            Some(index) => self.extra_vars[index].1 = value.to_string(),
            None => self
                .extra_vars
                .push((key.to_string(), value.to_string())),
        }
        self
    }

    /// Playbook file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target environment.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Arguments passed to `ansible-playbook`.
    pub fn args(&self) -> Vec<String> {
        let vars = std::iter::once(format!("env={}", self.environment))
            .chain(self.extra_vars.iter().map(|(k, v)| format!("{}={}", k, v)))
            .collect::<Vec<_>>()
            .join(" ");

        vec![self.name.clone(), "-e".to_string(), vars]
    }

    /// The full command as shown to the user.
    pub fn command_line(&self) -> String {
        command_line(ANSIBLE_PLAYBOOK, &self.args())
    }
}
