#![deny(missing_docs)]

//! # Actorgen Demo
//!
//! Two actors implemented against the interfaces generated from `openapi.yaml`:
//!
//! - [`counter::CounterActor`] stores its value directly.
//! - [`bank_account::BankAccountActor`] stores an event log and replays it.
//!
//! Both run over the [`state::StateStore`] seam instead of an actor runtime.

use actorgen_core::{parse_generation_model, validate_against_model, AppResult, GenerationModel};

/// Event-sourced bank account.
pub mod bank_account;

/// State-based counter.
pub mod counter;

/// Demo error types.
pub mod error;

/// Request and response payloads.
pub mod model;

/// State store seam.
pub mod state;

pub use bank_account::BankAccountActor;
pub use counter::CounterActor;
pub use error::{DemoError, DemoResult};
pub use state::{MemoryStateStore, StateStore};

/// The OpenAPI document the demo actors implement.
pub const OPENAPI: &str = include_str!("../openapi.yaml");

/// Builds the generation model of [`OPENAPI`].
pub fn generation_model() -> AppResult<GenerationModel> {
    parse_generation_model(OPENAPI)
}

/// Checks both demo actors against the generation model of [`OPENAPI`].
pub fn verify_contracts() -> AppResult<()> {
    let model = generation_model()?;
    validate_against_model(&model, &CounterActor::new("contract", MemoryStateStore::new()))?;
    validate_against_model(
        &model,
        &BankAccountActor::new("contract", MemoryStateStore::new()),
    )?;
    Ok(())
}
