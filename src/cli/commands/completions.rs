//! Shell completions for the `trellis` binary.
//!
//! Scripts cover the subcommands (`check`, `rollback`, `deploy`,
//! `completions`), the global flags and the `--release`/`--branch` options.
//! Environment and site names are project data and are not completed.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Write the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, out);
}

/// `trellis completions <SHELL>`.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        tracing::debug!("Writing {} completions", self.args.shell);
        write_completions(self.args.shell, &mut std::io::stdout().lock());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        write_completions(shell, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn every_shell_knows_the_playbook_commands() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
            let output = script(shell);
            for name in ["check", "rollback", "deploy", "completions"] {
                assert!(output.contains(name), "{shell} script lacks {name}");
            }
        }
    }

    #[test]
    fn playbook_flags_are_completed() {
        let output = script(Shell::Bash);
        assert!(output.contains("--release"));
        assert!(output.contains("--branch"));
        assert!(output.contains("--project"));
    }

    #[test]
    fn bash_script_registers_the_binary() {
        let output = script(Shell::Bash);
        assert!(output.contains("complete"));
        assert!(output.contains("_trellis"));
    }
}
