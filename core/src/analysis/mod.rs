#![deny(missing_docs)]

//! # Analysis
//!
//! Cross-actor usage analysis and the placement decision built on it.

/// Shared vs private placement.
pub mod placement;

/// Usage sets and dependency propagation.
pub mod usage;

pub use placement::{categorize, placement_of, PlacementPlan};
pub use usage::{analyze_usage, DependencyGraph, UsageMap};
