#![deny(missing_docs)]

//! # Counter Actor
//!
//! State-based actor: the current value is stored directly under one key.
//! A missing value reads as zero.

use crate::error::{DemoError, DemoResult};
use crate::model::{CounterState, SetValueRequest};
use crate::state::{load_state, save_state, StateStore};
use actorgen_core::ActorContractSubject;
use serde_json::Value;

/// Actor type the counter registers as.
pub const ACTOR_TYPE_COUNTER: &str = "CounterActor";

const STATE_KEY: &str = "counter";

/// Exported methods, as declared by the counter interface.
pub const COUNTER_METHODS: [&str; 4] = ["Decrement", "Get", "Increment", "Set"];

/// A counter bound to one actor id.
#[derive(Debug)]
pub struct CounterActor<S> {
    id: String,
    store: S,
}

impl<S: StateStore> CounterActor<S> {
    /// Binds a counter to `id` over `store`.
    pub fn new(id: impl Into<String>, store: S) -> Self {
        Self {
            id: id.into(),
            store,
        }
    }

    /// Actor id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current state.
    pub fn get(&self) -> DemoResult<CounterState> {
        Ok(load_state(&self.store, STATE_KEY)?.unwrap_or_default())
    }

    /// Overwrites the value.
    pub fn set(&mut self, request: SetValueRequest) -> DemoResult<CounterState> {
        let state = CounterState {
            value: request.value,
        };
        save_state(&mut self.store, STATE_KEY, &state)?;
        Ok(state)
    }

    /// Adds one.
    pub fn increment(&mut self) -> DemoResult<CounterState> {
        self.apply(1)
    }

    /// Subtracts one.
    pub fn decrement(&mut self) -> DemoResult<CounterState> {
        self.apply(-1)
    }

    fn apply(&mut self, delta: i64) -> DemoResult<CounterState> {
        let current = self.get()?;
        let value = current
            .value
            .checked_add(delta)
            .ok_or_else(|| DemoError::Invalid(format!("counter overflow at {}", current.value)))?;
        let state = CounterState { value };
        save_state(&mut self.store, STATE_KEY, &state)?;
        tracing::debug!(actor_id = %self.id, value, "counter updated");
        Ok(state)
    }

    /// Dispatches a method by its exported name with a JSON body.
    pub fn invoke(&mut self, method: &str, request: Option<Value>) -> DemoResult<Value> {
        let state = match method {
            "Get" => self.get()?,
            "Set" => {
                let body = request.ok_or_else(|| DemoError::Invalid("Set requires a body".into()))?;
                self.set(serde_json::from_value(body)?)?
            }
            "Increment" => self.increment()?,
            "Decrement" => self.decrement()?,
            other => return Err(DemoError::UnknownMethod(other.to_string())),
        };
        Ok(serde_json::to_value(state)?)
    }
}

impl<S> ActorContractSubject for CounterActor<S> {
    fn actor_type(&self) -> &str {
        ACTOR_TYPE_COUNTER
    }

    fn method_names(&self) -> Vec<String> {
        COUNTER_METHODS.iter().map(|m| m.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStateStore;
    use serde_json::json;

    fn counter() -> CounterActor<MemoryStateStore> {
        CounterActor::new("counter-1", MemoryStateStore::new())
    }

    #[test]
    fn test_missing_state_reads_zero() {
        assert_eq!(counter().get().unwrap(), CounterState { value: 0 });
    }

    #[test]
    fn test_increment_decrement_set() {
        let mut c = counter();
        c.increment().unwrap();
        c.increment().unwrap();
        assert_eq!(c.decrement().unwrap().value, 1);
        assert_eq!(c.set(SetValueRequest { value: 42 }).unwrap().value, 42);
        assert_eq!(c.get().unwrap().value, 42);
        assert_eq!(c.decrement().unwrap().value, 41);
    }

    #[test]
    fn test_overflow_is_rejected() {
        let mut c = counter();
        c.set(SetValueRequest { value: i64::MAX }).unwrap();
        assert!(matches!(c.increment(), Err(DemoError::Invalid(_))));
        assert_eq!(c.get().unwrap().value, i64::MAX);
    }

    #[test]
    fn test_invoke_dispatches_every_method() {
        let mut c = counter();
        for method in COUNTER_METHODS {
            let body = (method == "Set").then(|| json!({ "value": 7 }));
            assert!(c.invoke(method, body).is_ok(), "{}", method);
        }
        assert_eq!(c.invoke("Get", None).unwrap(), json!({ "value": 7 }));
        assert!(matches!(
            c.invoke("reset", None),
            Err(DemoError::UnknownMethod(_))
        ));
    }
}
