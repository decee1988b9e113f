#![deny(missing_docs)]

//! # Demo Errors
//!
//! Failures reported by the demo actors.

use derive_more::{Display, From};

/// Error enum for actor invocations.
#[derive(Debug, Display, From)]
pub enum DemoError {
    /// State could not be encoded or decoded.
    #[display("State Error: {_0}")]
    State(serde_json::Error),

    /// The request was rejected by business rules.
    #[from(ignore)]
    #[display("Invalid request: {_0}")]
    Invalid(String),

    /// The bank account has not been created yet.
    #[from(ignore)]
    #[display("account does not exist - create account first")]
    AccountNotFound,

    /// `CreateAccount` was invoked on an existing account.
    #[from(ignore)]
    #[display("account already exists")]
    AccountExists,

    /// A withdrawal exceeds the balance.
    #[from(ignore)]
    #[display("insufficient funds: balance {balance:.2}, requested {requested:.2}")]
    InsufficientFunds {
        /// Current balance.
        balance: f64,
        /// Requested amount.
        requested: f64,
    },

    /// The actor does not expose the invoked method.
    #[from(ignore)]
    #[display("method {_0} not found")]
    UnknownMethod(String),
}

impl std::error::Error for DemoError {}

/// Result type alias.
pub type DemoResult<T> = Result<T, DemoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_funds_message() {
        let err = DemoError::InsufficientFunds {
            balance: 10.0,
            requested: 12.5,
        };
        assert_eq!(
            err.to_string(),
            "insufficient funds: balance 10.00, requested 12.50"
        );
    }

    #[test]
    fn test_json_conversion() {
        let json_err = serde_json::from_str::<u8>("nope").unwrap_err();
        let err: DemoError = json_err.into();
        assert!(matches!(err, DemoError::State(_)));
    }
}
