#![allow(clippy::multiple_crate_versions)]

mod app;
mod catalog;
mod cli;
mod export;
mod favourites;
mod filter;
mod headless;
mod icons;
mod launch;
mod model;
mod selection;
mod source;
mod state;
mod theme;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::cli::CliError;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("iconscope=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let options = match cli::parse_env() {
        Ok(options) => options,
        Err(CliError::HelpRequested) => {
            print!("{}", cli::usage());
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n\n{}", cli::usage());
            return ExitCode::from(2);
        }
    };

    init_tracing();

    if let Some(path) = options.state_file.clone()
        && let Err(path) = state::set_state_file_override(path)
    {
        tracing::warn!(path = %path.display(), "state file override already set");
    }

    if let Some(command) = &options.command {
        return match headless::run(&options, command) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("iconscope: {err:#}");
                ExitCode::FAILURE
            }
        };
    }

    match app::run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("iconscope: {err}");
            ExitCode::FAILURE
        }
    }
}
