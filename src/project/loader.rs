//! Reading a Trellis project from disk.
//!
//! Only environment and site names are extracted:
//!
//! - Environments are the directories under `group_vars/`, except `all`
//! - Sites are the keys of the `wordpress_sites` mapping in
//!   `group_vars/<environment>/wordpress_sites.yml`
//!
//! Site files are read on demand, so a broken file only affects commands
//! that target its environment.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, TrellisError};

use super::Project;

/// Subset of `wordpress_sites.yml` that names the sites.
#[derive(Debug, Default, Deserialize)]
struct WordpressSitesFile {
    #[serde(default)]
    wordpress_sites: serde_yaml::Mapping,
}

/// Find the Trellis root by walking up from `start`.
///
/// At each level, looks for:
/// 1. `trellis/ansible.cfg` (project root with a `trellis` subdirectory)
/// 2. `ansible.cfg` next to `group_vars/` (already inside the Trellis directory)
///
/// # Returns
///
/// The directory playbooks run from, or None if not found.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let nested = current.join("trellis");
        if nested.join("ansible.cfg").is_file() {
            return Some(nested);
        }

        if current.join("ansible.cfg").is_file() && current.join("group_vars").is_dir() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// A Trellis project loaded from the filesystem.
#[derive(Debug, Clone, Default)]
pub struct TrellisProject {
    root: Option<PathBuf>,
    /// Environment name to its `wordpress_sites.yml` path.
    environments: BTreeMap<String, PathBuf>,
}

impl TrellisProject {
    /// Discover and load the project containing `start`.
    ///
    /// Finding no project is not an error; the result reports
    /// `detected() == false`.
    pub fn discover(start: &Path) -> Result<Self> {
        match find_project_root(start) {
            Some(root) => Self::load(&root),
            None => {
                tracing::debug!("No Trellis project found from {}", start.display());
                Ok(Self::default())
            }
        }
    }

    /// Load the project rooted at `root`.
    pub fn load(root: &Path) -> Result<Self> {
        let group_vars = root.join("group_vars");
        let mut environments = BTreeMap::new();

        if group_vars.is_dir() {
            for entry in fs::read_dir(&group_vars)? {
                let entry = entry?;
                if !entry.file_type()?.is_dir() {
                    continue;
                }

                let name = entry.file_name().to_string_lossy().to_string();
                if name == "all" {
                    continue;
                }

                environments.insert(name, entry.path().join("wordpress_sites.yml"));
            }
        }

        tracing::debug!(
            "Loaded Trellis project at {} with environments {:?}",
            root.display(),
            environments.keys().collect::<Vec<_>>()
        );

        Ok(Self {
            root: Some(root.to_path_buf()),
            environments,
        })
    }
}

/// Read site names from a `wordpress_sites.yml` file, in file order.
///
/// A missing or empty file declares no sites.
fn load_site_names(path: &Path) -> Result<Vec<String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(TrellisError::Io(e)),
    };

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let file: WordpressSitesFile =
        serde_yaml::from_str(&content).map_err(|e| TrellisError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(file
        .wordpress_sites
        .keys()
        .filter_map(|key| key.as_str().map(String::from))
        .collect())
}

impl Project for TrellisProject {
    fn detected(&self) -> bool {
        self.root.is_some()
    }

    fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn environments(&self) -> Vec<String> {
        self.environments.keys().cloned().collect()
    }

    fn sites_for(&self, environment: &str) -> Result<Vec<String>> {
        match self.environments.get(environment) {
            Some(path) => load_site_names(path),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        let trellis = temp.path().join("trellis");
        write(&trellis.join("ansible.cfg"), "[defaults]\n");
        write(&trellis.join("group_vars/all/main.yml"), "---\n");
        write(
            &trellis.join("group_vars/development/wordpress_sites.yml"),
            "wordpress_sites:\n  example.com:\n    site_hosts:\n      - canonical: example.test\n",
        );
        write(
            &trellis.join("group_vars/production/wordpress_sites.yml"),
            "wordpress_sites:\n  zeta.com:\n    local_path: ../zeta\n  alpha.com:\n    local_path: ../alpha\n",
        );
        fs::create_dir_all(trellis.join("group_vars/staging")).unwrap();
        temp
    }

    #[test]
    fn finds_nested_trellis_directory() {
        let temp = fixture();
        let site = temp.path().join("site/web");
        fs::create_dir_all(&site).unwrap();

        assert_eq!(find_project_root(&site), Some(temp.path().join("trellis")));
    }

    #[test]
    fn finds_root_from_inside_trellis() {
        let temp = fixture();
        let inside = temp.path().join("trellis/group_vars/development");

        assert_eq!(
            find_project_root(&inside),
            Some(temp.path().join("trellis"))
        );
    }

    #[test]
    fn no_root_without_ansible_cfg() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("group_vars")).unwrap();
        assert!(find_project_root(temp.path()).is_none());
    }

    #[test]
    fn discover_without_project_is_undetected() {
        let temp = TempDir::new().unwrap();
        let project = TrellisProject::discover(temp.path()).unwrap();
        assert!(!project.detected());
        assert!(project.environments().is_empty());
    }

    #[test]
    fn environments_exclude_all_and_are_sorted() {
        let temp = fixture();
        let project = TrellisProject::discover(temp.path()).unwrap();

        assert!(project.detected());
        assert_eq!(
            project.environments(),
            vec!["development", "production", "staging"]
        );
    }

    #[test]
    fn sites_follow_file_order() {
        let temp = fixture();
        let project = TrellisProject::discover(temp.path()).unwrap();

        assert_eq!(project.sites_for("development").unwrap(), vec!["example.com"]);
        assert_eq!(
            project.sites_for("production").unwrap(),
            vec!["zeta.com", "alpha.com"]
        );
    }

    #[test]
    fn environment_without_sites_file_has_no_sites() {
        let temp = fixture();
        let project = TrellisProject::discover(temp.path()).unwrap();
        assert!(project.sites_for("staging").unwrap().is_empty());
        assert!(project.sites_for("nowhere").unwrap().is_empty());
    }

    #[test]
    fn empty_sites_file_has_no_sites() {
        let temp = fixture();
        write(
            &temp
                .path()
                .join("trellis/group_vars/staging/wordpress_sites.yml"),
            "",
        );
        let project = TrellisProject::discover(temp.path()).unwrap();
        assert!(project.sites_for("staging").unwrap().is_empty());
    }

    #[test]
    fn malformed_sites_file_is_parse_error() {
        let temp = fixture();
        write(
            &temp
                .path()
                .join("trellis/group_vars/staging/wordpress_sites.yml"),
            "wordpress_sites: [unclosed",
        );
        let project = TrellisProject::discover(temp.path()).unwrap();
        assert!(matches!(
            project.sites_for("staging"),
            Err(TrellisError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn malformed_sites_file_leaves_other_environments_readable() {
        let temp = fixture();
        write(
            &temp
                .path()
                .join("trellis/group_vars/staging/wordpress_sites.yml"),
            "wordpress_sites: [unclosed",
        );
        let project = TrellisProject::discover(temp.path()).unwrap();

        assert_eq!(
            project.environments(),
            vec!["development", "production", "staging"]
        );
        assert_eq!(project.sites_for("development").unwrap(), vec!["example.com"]);
    }

    #[test]
    fn root_is_the_trellis_directory() {
        let temp = fixture();
        let project = TrellisProject::discover(temp.path()).unwrap();
        assert_eq!(project.root(), Some(temp.path().join("trellis").as_path()));
    }
}
