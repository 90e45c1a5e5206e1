//! Trellis project discovery.
//!
//! Commands only need three facts about a project: whether one was found,
//! which environments it declares, and which sites each environment hosts.
//! The [`Project`] trait exposes exactly those.
//!
//! - [`loader`] - Reads them from a Trellis checkout on disk
//! - [`StaticProject`] - Holds them in memory, for tests and embedding

pub mod loader;

pub use loader::{find_project_root, TrellisProject};

use std::path::{Path, PathBuf};

use crate::error::Result;

/// What commands need to know about a Trellis project.
pub trait Project {
    /// Whether a project was found.
    fn detected(&self) -> bool;

    /// Directory playbooks run from, when detected.
    fn root(&self) -> Option<&Path>;

    /// Declared environment names, sorted.
    fn environments(&self) -> Vec<String>;

    /// Site names declared for `environment`, in declaration order.
    ///
    /// Unknown environments have no sites. Fails when the environment's site
    /// list exists but cannot be read.
    fn sites_for(&self, environment: &str) -> Result<Vec<String>>;
}

/// A project defined in memory.
///
/// # Example
///
/// ```
/// use trellis::project::{Project, StaticProject};
///
/// let project = StaticProject::new("/srv/site/trellis")
///     .with_site("development", "example.com")
///     .with_site("production", "example.com");
///
/// assert!(project.detected());
/// assert_eq!(project.environments(), vec!["development", "production"]);
/// assert_eq!(project.sites_for("development").unwrap(), vec!["example.com"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticProject {
    root: Option<PathBuf>,
    environments: Vec<(String, Vec<String>)>,
}

impl StaticProject {
    /// A detected project rooted at `root`, with no environments yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            environments: Vec::new(),
        }
    }

    /// No project at all.
    pub fn undetected() -> Self {
        Self::default()
    }

    /// Declare an environment with no sites.
    pub fn with_environment(mut self, environment: &str) -> Self {
        self.entry(environment);
        self
    }

    /// Declare `site` in `environment`, declaring the environment if needed.
    pub fn with_site(mut self, environment: &str, site: &str) -> Self {
        let sites = self.entry(environment);
        if !sites.iter().any(|s| s == site) {
            sites.push(site.to_string());
        }
        self
    }

    fn entry(&mut self, environment: &str) -> &mut Vec<String> {
        let index = match self
            .environments
            .iter()
            .position(|(name, _)| name == environment)
        {
            Some(index) => index,
            None => {
                self.environments
                    .push((environment.to_string(), Vec::new()));
                self.environments.len() - 1
            }
        };
        &mut self.environments[index].1
    }
}

impl Project for StaticProject {
    fn detected(&self) -> bool {
        self.root.is_some()
    }

    fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn environments(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .environments
            .iter()
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    fn sites_for(&self, environment: &str) -> Result<Vec<String>> {
        Ok(self
            .environments
            .iter()
            .find(|(name, _)| name == environment)
            .map(|(_, sites)| sites.clone())
            .unwrap_or_default())
    }
}
