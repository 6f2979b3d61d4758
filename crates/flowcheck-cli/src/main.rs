use std::process;

use clap::Parser;

mod cli;
mod cmd;
mod error;
mod format;
mod io;

pub use cli::{OutputFormat, PathOrStdin};

use cli::{Cli, Command};
use error::CliError;

fn main() {
    // FLOWCHECK_LOG controls engine-internal logging (notably the
    // analyzer-mismatch consistency warning). Warnings only by default.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("FLOWCHECK_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{}", e.message());
        process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Check { file } => {
            let content = io::read_input(file, cli.max_file_size)?;
            cmd::check::run(&content, &cli.format, cli.quiet, cli.verbose, cli.no_color)
        }
        Command::Selftest => cmd::selftest::run(&cli.format, cli.no_color),
        Command::Version => {
            println!("{}", flowcheck_core::version());
            Ok(())
        }
    }
}
