//! Requirement definitions.
//!
//! Each external tool Trellis depends on is a [`Requirement`] record in the
//! static [`REQUIREMENTS`] table. Declaration order is display order. Tools
//! whose `--version` output carries more than a bare version provide an
//! extractor that cleans it up before parsing.

use std::sync::LazyLock;

use regex::Regex;

/// Documentation page listing Trellis requirements.
pub const REQUIREMENTS_DOCS_URL: &str =
    "https://docs.roots.io/trellis/master/installation/#install-requirements";

/// Arguments used to ask most tools for their version.
pub const DEFAULT_VERSION_ARGS: &[&str] = &["--version"];

/// Strips VirtualBox's `r<revision>` build suffix.
static VBOX_REVISION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"r\d+$").expect("VBOX_REVISION_REGEX must compile"));

/// An external tool dependency.
#[derive(Debug, Clone, Copy)]
pub struct Requirement {
    /// Display name (e.g., "Python").
    pub name: &'static str,
    /// Binary looked up on PATH.
    pub command: &'static str,
    /// Arguments that make the binary print its version.
    pub version_args: &'static [&'static str],
    /// Optional tools never fail the overall check.
    pub optional: bool,
    /// Install documentation, shown when the tool is missing or outdated.
    pub url: &'static str,
    /// Comparator and version, e.g. `>= 3.8.0`.
    pub version_constraint: &'static str,
    /// Turns raw version output into a bare version string.
    pub extract_version: Option<fn(&str) -> String>,
}

impl Requirement {
    /// Apply the extractor, or use the raw output verbatim.
    ///
    /// The result is always trimmed of surrounding whitespace.
    pub fn extract(&self, output: &str) -> String {
        match self.extract_version {
            Some(extract) => extract(output.trim()).trim().to_string(),
            None => output.trim().to_string(),
        }
    }
}

/// Every requirement, in display order.
pub const REQUIREMENTS: &[Requirement] = &[
    Requirement {
        name: "Python",
        command: "python3",
        version_args: DEFAULT_VERSION_ARGS,
        optional: false,
        url: "https://www.python.org/",
        version_constraint: ">= 3.8.0",
        extract_version: Some(extract_python_version),
    },
    Requirement {
        name: "Vagrant",
        command: "vagrant",
        version_args: DEFAULT_VERSION_ARGS,
        optional: true,
        url: "https://www.vagrantup.com/downloads.html",
        version_constraint: ">= 2.1.0",
        extract_version: Some(extract_vagrant_version),
    },
    Requirement {
        name: "VirtualBox",
        command: "VBoxManage",
        version_args: DEFAULT_VERSION_ARGS,
        optional: true,
        url: "https://www.virtualbox.org/wiki/Downloads",
        version_constraint: ">= 4.3.10",
        extract_version: Some(extract_virtualbox_version),
    },
];

/// Requirements that decide the overall result, in declaration order.
pub fn required() -> impl Iterator<Item = &'static Requirement> {
    REQUIREMENTS.iter().filter(|req| !req.optional)
}

/// Requirements shown for information only, in declaration order.
pub fn optional() -> impl Iterator<Item = &'static Requirement> {
    REQUIREMENTS.iter().filter(|req| req.optional)
}

fn extract_python_version(output: &str) -> String {
    output.replacen("Python ", "", 1)
}

fn extract_vagrant_version(output: &str) -> String {
    output.replacen("Vagrant ", "", 1)
}

fn extract_virtualbox_version(output: &str) -> String {
    VBOX_REVISION_REGEX.replace(output, "").into_owned()
}
