#![deny(missing_docs)]

//! # OpenAPI Reading Module
//!
//! - **document**: Loading and version validation.
//! - **shims**: Deserialization layer for the parts of the document the generator reads.
//! - **refs**: `$ref` pointer helpers.

pub mod document;
pub(crate) mod refs;
pub mod shims;

pub use document::{load_document, load_document_from_path};
pub use shims::{
    ShimComponents, ShimInfo, ShimMediaType, ShimOpenApi, ShimOperation, ShimParameter,
    ShimPathItem, ShimRequestBody, ShimResponse, ShimSchema,
};
