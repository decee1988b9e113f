#![deny(missing_docs)]

//! # Bank Account Actor
//!
//! Event-sourced actor: every change is appended to an event log and the
//! account state is recomputed by replaying the log from the start.
//! The log is the only thing stored.

use crate::error::{DemoError, DemoResult};
use crate::model::{
    AccountEvent, BankAccountState, CreateAccountRequest, DepositRequest, TransactionHistory,
    WithdrawRequest,
};
use crate::state::{load_state, save_state, StateStore};
use actorgen_core::ActorContractSubject;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Actor type the bank account registers as.
pub const ACTOR_TYPE_BANK_ACCOUNT: &str = "BankAccountActor";

const EVENTS_KEY: &str = "events";

/// Exported methods, as declared by the bank account interface.
pub const BANK_ACCOUNT_METHODS: [&str; 5] = [
    "CreateAccount",
    "Deposit",
    "GetBalance",
    "GetHistory",
    "Withdraw",
];

/// Payload of `AccountCreated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreated {
    /// Account owner.
    pub owner_name: String,
    /// Opening balance.
    pub initial_deposit: f64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Payload of `MoneyDeposited` and `MoneyWithdrawn`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyMoved {
    /// Amount moved.
    pub amount: f64,
    /// Free-form note.
    pub description: String,
    /// Time of the movement.
    pub timestamp: DateTime<Utc>,
}

/// Events of the account log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "eventType", content = "data")]
pub enum AccountEventKind {
    /// The account was opened.
    AccountCreated(AccountCreated),
    /// Money was paid in.
    MoneyDeposited(MoneyMoved),
    /// Money was paid out.
    MoneyWithdrawn(MoneyMoved),
}

impl AccountEventKind {
    /// Event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            AccountEventKind::AccountCreated(_) => "AccountCreated",
            AccountEventKind::MoneyDeposited(_) => "MoneyDeposited",
            AccountEventKind::MoneyWithdrawn(_) => "MoneyWithdrawn",
        }
    }

    fn data(&self) -> DemoResult<Value> {
        let value = match self {
            AccountEventKind::AccountCreated(data) => serde_json::to_value(data)?,
            AccountEventKind::MoneyDeposited(data) | AccountEventKind::MoneyWithdrawn(data) => {
                serde_json::to_value(data)?
            }
        };
        Ok(value)
    }
}

/// An event as persisted in the state store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEvent {
    /// Unique event id.
    pub event_id: Uuid,
    /// Time the event was appended.
    pub timestamp: DateTime<Utc>,
    /// Type and payload.
    pub event: AccountEventKind,
}

/// Rebuilds account state from the event log. `None` when the log is empty.
pub fn replay(account_id: &str, events: &[StoredEvent]) -> Option<BankAccountState> {
    if events.is_empty() {
        return None;
    }

    let initial = BankAccountState {
        account_id: account_id.to_string(),
        owner_name: String::new(),
        balance: 0.0,
        is_active: true,
        created_at: String::new(),
    };

    Some(events.iter().fold(initial, |mut state, stored| {
        match &stored.event {
            AccountEventKind::AccountCreated(data) => {
                state.owner_name = data.owner_name.clone();
                state.balance = data.initial_deposit;
                state.created_at = rfc3339(&data.created_at);
            }
            AccountEventKind::MoneyDeposited(data) => state.balance += data.amount,
            AccountEventKind::MoneyWithdrawn(data) => state.balance -= data.amount,
        }
        state
    }))
}

fn rfc3339(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A bank account bound to one actor id; the id doubles as the account id.
#[derive(Debug)]
pub struct BankAccountActor<S> {
    account_id: String,
    store: S,
}

impl<S: StateStore> BankAccountActor<S> {
    /// Binds an account to `account_id` over `store`.
    pub fn new(account_id: impl Into<String>, store: S) -> Self {
        Self {
            account_id: account_id.into(),
            store,
        }
    }

    /// Opens the account.
    pub fn create_account(&mut self, request: CreateAccountRequest) -> DemoResult<BankAccountState> {
        if !self.events()?.is_empty() {
            return Err(DemoError::AccountExists);
        }
        if request.owner_name.trim().is_empty() {
            return Err(DemoError::Invalid("owner name is required".into()));
        }
        if request.initial_deposit < 0.0 {
            return Err(DemoError::Invalid("initial deposit cannot be negative".into()));
        }

        self.append(AccountEventKind::AccountCreated(AccountCreated {
            owner_name: request.owner_name,
            initial_deposit: request.initial_deposit,
            created_at: Utc::now(),
        }))
    }

    /// Pays money in.
    pub fn deposit(&mut self, request: DepositRequest) -> DemoResult<BankAccountState> {
        if request.amount <= 0.0 {
            return Err(DemoError::Invalid("deposit amount must be positive".into()));
        }
        self.get_balance()?;

        self.append(AccountEventKind::MoneyDeposited(MoneyMoved {
            amount: request.amount,
            description: request.description,
            timestamp: Utc::now(),
        }))
    }

    /// Pays money out; the balance may not go negative.
    pub fn withdraw(&mut self, request: WithdrawRequest) -> DemoResult<BankAccountState> {
        if request.amount <= 0.0 {
            return Err(DemoError::Invalid("withdrawal amount must be positive".into()));
        }
        let current = self.get_balance()?;
        if current.balance < request.amount {
            return Err(DemoError::InsufficientFunds {
                balance: current.balance,
                requested: request.amount,
            });
        }

        self.append(AccountEventKind::MoneyWithdrawn(MoneyMoved {
            amount: request.amount,
            description: request.description,
            timestamp: Utc::now(),
        }))
    }

    /// Current state.
    pub fn get_balance(&self) -> DemoResult<BankAccountState> {
        replay(&self.account_id, &self.events()?).ok_or(DemoError::AccountNotFound)
    }

    /// Every event, oldest first.
    pub fn get_history(&self) -> DemoResult<TransactionHistory> {
        let events = self.events()?;
        if events.is_empty() {
            return Err(DemoError::AccountNotFound);
        }

        let events = events
            .iter()
            .map(|stored| {
                Ok(AccountEvent {
                    event_id: stored.event_id.to_string(),
                    event_type: stored.event.event_type().to_string(),
                    timestamp: rfc3339(&stored.timestamp),
                    data: stored.event.data()?,
                })
            })
            .collect::<DemoResult<Vec<_>>>()?;

        Ok(TransactionHistory {
            account_id: self.account_id.clone(),
            events,
        })
    }

    /// Dispatches a method by its exported name with a JSON body.
    pub fn invoke(&mut self, method: &str, request: Option<Value>) -> DemoResult<Value> {
        let body = || {
            request
                .clone()
                .ok_or_else(|| DemoError::Invalid(format!("{} requires a body", method)))
        };
        let response = match method {
            "CreateAccount" => serde_json::to_value(self.create_account(serde_json::from_value(body()?)?)?)?,
            "Deposit" => serde_json::to_value(self.deposit(serde_json::from_value(body()?)?)?)?,
            "Withdraw" => serde_json::to_value(self.withdraw(serde_json::from_value(body()?)?)?)?,
            "GetBalance" => serde_json::to_value(self.get_balance()?)?,
            "GetHistory" => serde_json::to_value(self.get_history()?)?,
            other => return Err(DemoError::UnknownMethod(other.to_string())),
        };
        Ok(response)
    }

    fn events(&self) -> DemoResult<Vec<StoredEvent>> {
        Ok(load_state(&self.store, EVENTS_KEY)?.unwrap_or_default())
    }

    fn append(&mut self, event: AccountEventKind) -> DemoResult<BankAccountState> {
        let mut events = self.events()?;
        tracing::debug!(
            account_id = %self.account_id,
            event_type = event.event_type(),
            "appending event"
        );
        events.push(StoredEvent {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        });
        save_state(&mut self.store, EVENTS_KEY, &events)?;
        replay(&self.account_id, &events).ok_or(DemoError::AccountNotFound)
    }
}

impl<S> ActorContractSubject for BankAccountActor<S> {
    fn actor_type(&self) -> &str {
        ACTOR_TYPE_BANK_ACCOUNT
    }

    fn method_names(&self) -> Vec<String> {
        BANK_ACCOUNT_METHODS.iter().map(|m| m.to_string()).collect()
    }
}
