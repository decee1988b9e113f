#![deny(missing_docs)]

//! # Actorgen CLI
//!
//! Command Line Interface for the OpenAPI-to-actor generator.
//!
//! Supported Commands:
//! - `generate`: OpenAPI -> generation model -> render plan JSON files.
//! - `inspect`: Prints the type placement decided for a document.

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod error;
mod generate;
mod inspect;
mod logging;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI to actor interface generator")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the render plan for every actor package and the shared package.
    Generate(generate::GenerateArgs),
    /// Show actors, methods and type placement.
    Inspect(inspect::InspectArgs),
}

fn run(cli: &Cli) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Generate(args) => {
            generate::execute(args, &mut out)?;
        }
        Commands::Inspect(args) => {
            inspect::execute(args, &mut out)?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    if !logging::setup_tracing() {
        eprintln!("Warning: logging was already initialized; keeping the existing subscriber");
    }
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["actorgen", "generate", "openapi.yaml", "out"]).unwrap();
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.openapi.to_str(), Some("openapi.yaml"));
                assert_eq!(args.package_suffix, "actor");
                assert!(!args.no_title_fallback);
            }
            _ => panic!("expected generate"),
        }
    }
}
