#![deny(missing_docs)]

//! # Extraction
//!
//! Turns a loaded document into type definitions and actors.
//! The two extractors are independent of each other.

/// Actor and method extraction.
pub mod actors;

/// Name derivation helpers.
pub mod naming;

/// Struct and alias extraction.
pub mod types;

pub use actors::{
    actor_tag, discover_actor_types, extract_actors, ACTOR_TYPE_TAG_PREFIX,
    DEFAULT_METHOD_COMMENT,
};
pub use naming::{capitalize_first, fallback_actor_name, method_name_from_path, package_name};
pub use types::extract_types;
