#![deny(missing_docs)]

//! # Logging
//!
//! Installs the `tracing` subscriber. Verbosity comes from `RUST_LOG`
//! (e.g. `RUST_LOG=actorgen_core=debug`) and defaults to warnings only, so
//! degraded-mode notices such as the title fallback are always visible.
//! Output goes to stderr; stdout carries command results.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "warn";

/// Initializes logging.
///
/// Returns `false` when a global subscriber is already installed; that
/// subscriber stays in place.
pub fn setup_tracing() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .is_ok()
}
