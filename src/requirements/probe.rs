//! Locating tools and asking them for their version.
//!
//! The [`ToolProbe`] trait is the checker's only window onto the system. The
//! real [`SystemProbe`] walks PATH itself and runs the tool through a
//! [`ProcessRunner`]; tests substitute a fake that answers from a table.
//!
//! # Example
//!
//! ```no_run
//! use trellis::requirements::probe::{SystemProbe, ToolProbe};
//!
//! let probe = SystemProbe::new();
//! if let Some(path) = probe.locate("python3") {
//!     let output = probe.version_output(&path, &["--version"]).unwrap();
//!     println!("{} reports {}", path.display(), output);
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::error::{Result, TrellisError};
use crate::shell::{command_line, CommandOptions, ProcessRunner, SystemRunner};

/// Finds tools and captures their version output.
pub trait ToolProbe {
    /// Resolve a command name to the binary that would run.
    fn locate(&self, command: &str) -> Option<PathBuf>;

    /// Run `binary` with `args` and return what it printed.
    fn version_output(&self, binary: &Path, args: &[&str]) -> Result<String>;
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command, whose behavior varies across systems.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let names: Vec<String> = if cfg!(windows) {
        vec![tool.to_string(), format!("{}.exe", tool)]
    } else {
        vec![tool.to_string()]
    };

    for dir in path_entries {
        for name in &names {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Pick the stream a tool printed its version on.
///
/// Most tools use stdout; some older ones (Python 2 among them) use stderr.
pub fn version_text(stdout: &str, stderr: &str) -> String {
    if stdout.trim().is_empty() {
        stderr.trim().to_string()
    } else {
        stdout.trim().to_string()
    }
}

/// Probe backed by the real PATH and real processes.
#[derive(Debug, Clone)]
pub struct SystemProbe<R = SystemRunner> {
    path_entries: Vec<PathBuf>,
    runner: R,
}

impl SystemProbe {
    /// Probe using the current PATH.
    pub fn new() -> Self {
        Self::with_runner(parse_system_path(), SystemRunner)
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProcessRunner> SystemProbe<R> {
    /// Probe with explicit PATH entries and process runner.
    pub fn with_runner(path_entries: Vec<PathBuf>, runner: R) -> Self {
        Self {
            path_entries,
            runner,
        }
    }

    /// The PATH entries searched, in order.
    pub fn path_entries(&self) -> &[PathBuf] {
        &self.path_entries
    }
}

impl<R: ProcessRunner> ToolProbe for SystemProbe<R> {
    fn locate(&self, command: &str) -> Option<PathBuf> {
        let found = resolve_tool_path(command, &self.path_entries);
        tracing::debug!("Located {} at {:?}", command, found);
        found
    }

    fn version_output(&self, binary: &Path, args: &[&str]) -> Result<String> {
        let program = binary.to_string_lossy();
        let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();

        let output = self
            .runner
            .run(&program, &args, &CommandOptions::captured())?;

        if !output.success() {
            tracing::debug!(
                "{} {:?} failed: {}",
                program,
                args,
                output.combined().trim()
            );
            return Err(TrellisError::CommandFailed {
                command: command_line(&program, &args),
                code: output.exit_code,
            });
        }

        Ok(version_text(&output.stdout, &output.stderr))
    }
}
