#![deny(missing_docs)]

//! # Wire Types
//!
//! Request and response payloads of the demo actors, serialized in camelCase
//! to match `openapi.yaml`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Counter state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    /// Current value.
    pub value: i64,
}

/// Body of `Set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetValueRequest {
    /// New value.
    pub value: i64,
}

/// Body of `CreateAccount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// Account owner.
    pub owner_name: String,
    /// Opening balance.
    #[serde(default)]
    pub initial_deposit: f64,
}

/// Body of `Deposit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    /// Amount, must be positive.
    pub amount: f64,
    /// Free-form note.
    #[serde(default)]
    pub description: String,
}

/// Body of `Withdraw`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    /// Amount, must be positive.
    pub amount: f64,
    /// Free-form note.
    #[serde(default)]
    pub description: String,
}

/// Account state computed by replaying the event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountState {
    /// Actor id of the account.
    pub account_id: String,
    /// Account owner.
    pub owner_name: String,
    /// Current balance.
    pub balance: f64,
    /// Whether the account is open.
    pub is_active: bool,
    /// Creation time, RFC 3339.
    pub created_at: String,
}

/// One event of the account history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountEvent {
    /// Event id.
    pub event_id: String,
    /// `AccountCreated`, `MoneyDeposited` or `MoneyWithdrawn`.
    pub event_type: String,
    /// Time the event was recorded, RFC 3339.
    pub timestamp: String,
    /// Event payload.
    pub data: Value,
}

/// Full account history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHistory {
    /// Actor id of the account.
    pub account_id: String,
    /// Events, oldest first.
    pub events: Vec<AccountEvent>,
}
