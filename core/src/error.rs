//! # Errors
//!
//! Hard failures of a generation run. Degraded conditions (untyped fields,
//! fallback actor, skipped operations) are logged instead.

use crate::contract::ContractError;
use derive_more::{Display, From};

/// Every failure the core reports.
///
/// A bare `String` converts to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Reading the document or writing the render plan failed.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The input document could not be parsed or is not a supported OpenAPI version.
    #[from(ignore)]
    #[display("Document Error: {_0}")]
    Document(String),

    /// An actor operation whose path does not carry a `/method/<name>` segment.
    #[from(ignore)]
    #[display(
        "Convention Error: failed to extract method name from {method} '{path}': path must follow pattern '/{{actorId}}/method/{{methodName}}'"
    )]
    Convention {
        /// HTTP verb of the offending operation.
        method: String,
        /// The offending path template.
        path: String,
    },

    /// Neither tags nor the title fallback produced a usable actor.
    #[from(ignore)]
    #[display("no actor types found in OpenAPI specification")]
    NoActorTypes,

    /// An implementation does not satisfy a generated actor contract.
    #[display("Contract Error: {_0}")]
    Contract(ContractError),

    /// Render plan serialization failure.
    #[display("Serialization Error: {_0}")]
    Serialization(serde_json::Error),

    /// Anything else, e.g. a package name collision.
    #[display("General Error: {_0}")]
    General(String),
}

impl std::error::Error for AppError {}

/// Result of a core operation.
pub type AppResult<T> = Result<T, AppError>;
