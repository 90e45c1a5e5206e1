//! Trellis CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use trellis::cli::args::requested_project;
use trellis::cli::{Cli, CommandDispatcher, CommandResult};
use trellis::ui::{create_ui, OutputMode};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("trellis=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trellis=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let raw_args: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let cli = match Cli::try_parse_from(&raw_args) {
        Ok(cli) => cli,
        Err(err) => return parse_failure(err, &raw_args),
    };
    init_tracing(cli.debug);

    tracing::debug!("Trellis starting with args: {:?}", cli);

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let start_dir = cli.project.clone().unwrap_or_else(current_dir);

    let mut ui = create_ui(output_mode);
    let dispatcher = CommandDispatcher::new(start_dir);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => exit_code(result),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}

/// Handle arguments clap rejected.
///
/// Help and version requests keep clap's own output and exit status. Every
/// other parse error exits with 1.
fn parse_failure(err: clap::Error, raw_args: &[String]) -> ExitCode {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        err.exit();
    }
    init_tracing(false);

    let start_dir = requested_project(raw_args).unwrap_or_else(current_dir);
    let mut ui = create_ui(OutputMode::Normal);
    let dispatcher = CommandDispatcher::new(start_dir);

    exit_code(dispatcher.report_parse_error(&err, raw_args, ui.as_mut()))
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_default()
}

fn exit_code(result: CommandResult) -> ExitCode {
    ExitCode::from(u8::try_from(result.exit_code).unwrap_or(1))
}
