#![deny(missing_docs)]

//! # Actorgen Core
//!
//! Core library of the OpenAPI-to-actor generator.
//!
//! Reads an OpenAPI 3.x document, extracts types and actor interfaces, decides
//! for every type whether it is private to one actor or shared, and projects the
//! result into a render plan.

/// Shared error types.
pub mod error;

/// OpenAPI (OAS) reading utilities.
pub mod oas;

/// Intermediate generation model.
pub mod model;

/// Type mapping logic (schema -> TypeRef).
pub mod type_mapping;

/// Type and actor extraction.
pub mod extract;

/// Usage analysis and placement.
pub mod analysis;

/// Pipeline entry points.
pub mod parser;

/// Render plan projection and output.
pub mod render;

/// Actor implementation contract checks.
pub mod contract;

pub use analysis::{analyze_usage, categorize, DependencyGraph, PlacementPlan, UsageMap};
pub use contract::{validate_against_model, validate_contract, ActorContractSubject, ContractError};
pub use error::{AppError, AppResult};
pub use extract::{extract_actors, extract_types};
pub use model::{
    Actor, AliasType, Field, GenerationModel, HttpVerb, Method, ParamLocation, Parameter,
    Placement, PrimitiveKind, SerializationTag, StructType, TypeCollection, TypeDef, TypeRef,
};
pub use oas::{load_document, load_document_from_path, ShimOpenApi};
pub use parser::{
    assemble, parse_generation_model, parse_generation_model_from_path, OpenApiParser,
    ParserOptions,
};
pub use render::{ActorPackagePlan, ActorTypeConstant, RenderConfig, RenderPlan, SharedPackagePlan};
