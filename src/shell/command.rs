//! External process execution.
//!
//! Commands never spawn processes directly. They hand an argument vector to a
//! [`ProcessRunner`], which lets the whole validation pipeline run in tests
//! without touching the system.

use crate::error::{Result, TrellisError};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Result of running an external program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,
}

impl ProcessOutput {
    /// Create a result with the given exit code and no output.
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            ..Default::default()
        }
    }

    /// Whether the program exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stdout followed by stderr.
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// Options for running an external program.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Capture stdout and stderr (if false, both are inherited from the parent).
    pub capture_output: bool,
}

impl CommandOptions {
    /// Options that capture output.
    pub fn captured() -> Self {
        Self {
            capture_output: true,
            ..Default::default()
        }
    }

    /// Set the working directory.
    pub fn in_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Runs external programs.
pub trait ProcessRunner {
    /// Run `program` with `args` to completion.
    ///
    /// A non-zero exit is not an error; it is reported through
    /// [`ProcessOutput::exit_code`]. Errors mean the program could not be run.
    fn run(&self, program: &str, args: &[String], options: &CommandOptions)
        -> Result<ProcessOutput>;
}

/// Runs programs as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<ProcessOutput> {
        tracing::debug!("Running {}", command_line(program, args));

        let mut cmd = Command::new(program);
        cmd.args(args);

        if let Some(cwd) = &options.cwd {
            cmd.current_dir(cwd);
        }

        let failed = |source: std::io::Error| TrellisError::SpawnFailed {
            command: command_line(program, args),
            source,
        };

        if options.capture_output {
            let output = cmd
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .map_err(failed)?;

            Ok(ProcessOutput {
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        } else {
            let status = cmd
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(failed)?;

            Ok(ProcessOutput {
                exit_code: status.code(),
                ..Default::default()
            })
        }
    }
}

/// Render a program and its arguments as a single line for display.
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
