//! Recording process runner for testing.
//!
//! `RecordingRunner` implements [`ProcessRunner`] without spawning anything.
//! It records every invocation and answers with pre-configured results.
//!
//! # Example
//!
//! ```
//! use trellis::shell::{CommandOptions, ProcessRunner, RecordingRunner};
//!
//! let runner = RecordingRunner::new().with_exit_code(0);
//! let args = vec!["rollback.yml".to_string()];
//! let output = runner.run("ansible-playbook", &args, &CommandOptions::default()).unwrap();
//!
//! assert!(output.success());
//! assert_eq!(runner.command_lines(), vec!["ansible-playbook rollback.yml"]);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use crate::error::{Result, TrellisError};

use super::command::{command_line, CommandOptions, ProcessOutput, ProcessRunner};

/// A single recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    /// Program name.
    pub program: String,
    /// Arguments in order.
    pub args: Vec<String>,
    /// Working directory, if one was set.
    pub cwd: Option<PathBuf>,
}

/// Process runner that records invocations instead of running them.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    exit_code: i32,
    outputs: HashMap<String, ProcessOutput>,
    unstartable: HashMap<String, (io::ErrorKind, String)>,
    recorded: RefCell<Vec<RecordedCommand>>,
}

impl RecordingRunner {
    /// Create a runner whose programs all exit with code 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit code returned for programs without a configured output.
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Configure the output returned for a specific program.
    pub fn with_output(mut self, program: &str, output: ProcessOutput) -> Self {
        self.outputs.insert(program.to_string(), output);
        self
    }

    /// Make `program` fail to start with the given I/O error.
    pub fn with_spawn_error(mut self, program: &str, kind: io::ErrorKind, message: &str) -> Self {
        self.unstartable
            .insert(program.to_string(), (kind, message.to_string()));
        self
    }

    /// All recorded invocations, in order.
    pub fn recorded(&self) -> Vec<RecordedCommand> {
        self.recorded.borrow().clone()
    }

    /// Recorded invocations rendered as command lines.
    pub fn command_lines(&self) -> Vec<String> {
        self.recorded
            .borrow()
            .iter()
            .map(|cmd| command_line(&cmd.program, &cmd.args))
            .collect()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<ProcessOutput> {
        self.recorded.borrow_mut().push(RecordedCommand {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: options.cwd.clone(),
        });

        let spawn_error = if program.is_empty() {
            Some(io::Error::new(io::ErrorKind::InvalidInput, "empty program name"))
        } else {
            self.unstartable
                .get(program)
                .map(|(kind, message)| io::Error::new(*kind, message.clone()))
        };

        if let Some(source) = spawn_error {
            return Err(TrellisError::SpawnFailed {
                command: command_line(program, args),
                source,
            });
        }

        Ok(self
            .outputs
            .get(program)
            .cloned()
            .unwrap_or_else(|| ProcessOutput::exited(self.exit_code)))
    }
}
