//! External process execution.

pub mod command;
pub mod mock;

pub use command::{command_line, CommandOptions, ProcessOutput, ProcessRunner, SystemRunner};
pub use mock::{RecordedCommand, RecordingRunner};
