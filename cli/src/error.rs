#![deny(missing_docs)]

//! # CLI Errors
//!
//! Failures surfaced by the `actorgen` commands.

use actorgen_core::AppError;
use derive_more::{Display, From};

/// Error returned by a command.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// Writing the command report failed.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Failure reported by the generator core.
    #[display("{}", _0)]
    App(AppError),

    /// Output encoding failure.
    #[display("Serialization Error: {}", _0)]
    Json(serde_json::Error),

    /// Any other failure.
    #[display("Operation failed: {}", _0)]
    General(String),
}

impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
