//! schedcast command line entry point.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod commands;
mod logging;
mod plan;
mod report;

use crate::cli::{EXIT_OK, exit_code_for, render_error};
use crate::commands::Command;
use crate::logging::{TracingConfig, init_tracing};

fn main() {
    // Tracing may be unusable during a panic.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    std::process::exit(run());
}

fn run() -> i32 {
    let cli = cli::parse();

    let tracing_config = TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
        filter: cli.log_filter.clone(),
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("{e:?}");
    }

    let command: Command = cli.command.into();
    match commands::execute(command) {
        Ok(output) => {
            println!("{}", output.trim_end());
            EXIT_OK
        }
        Err(err) => {
            render_error(&err);
            exit_code_for(&err)
        }
    }
}
