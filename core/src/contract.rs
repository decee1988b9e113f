#![deny(missing_docs)]

//! # Contract Validation
//!
//! Checks that an actor implementation exposes exactly the methods of a
//! generated actor interface.

use crate::error::{AppError, AppResult};
use crate::model::{Actor, GenerationModel};
use derive_more::Display;
use std::collections::BTreeSet;

/// An implementation that can be checked against a generated actor interface.
pub trait ActorContractSubject {
    /// The actor type the implementation registers as.
    fn actor_type(&self) -> &str;

    /// Exported method names the implementation provides.
    fn method_names(&self) -> Vec<String>;
}

/// A mismatch between an implementation and its generated interface.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ContractError {
    /// The implementation registers under a different actor type.
    #[display("implementation registers as '{actual}' but the interface is for '{expected}'")]
    ActorTypeMismatch {
        /// Actor type of the interface.
        expected: String,
        /// Actor type of the implementation.
        actual: String,
    },
    /// Interface methods the implementation lacks.
    #[display("{actor} does not implement: {}", methods.join(", "))]
    MissingMethods {
        /// Actor type.
        actor: String,
        /// Missing method names, sorted.
        methods: Vec<String>,
    },
    /// Implementation methods the interface does not declare.
    #[display("{actor} implements methods not in its interface: {}", methods.join(", "))]
    UnexpectedMethods {
        /// Actor type.
        actor: String,
        /// Extra method names, sorted.
        methods: Vec<String>,
    },
}

impl std::error::Error for ContractError {}

/// Validates `subject` against the generated `actor` interface.
///
/// Missing methods are reported before unexpected ones.
pub fn validate_contract(
    actor: &Actor,
    subject: &dyn ActorContractSubject,
) -> Result<(), ContractError> {
    if subject.actor_type() != actor.actor_type {
        return Err(ContractError::ActorTypeMismatch {
            expected: actor.actor_type.clone(),
            actual: subject.actor_type().to_string(),
        });
    }

    let declared: BTreeSet<&str> = actor.methods.iter().map(|m| m.name.as_str()).collect();
    let provided_names = subject.method_names();
    let provided: BTreeSet<&str> = provided_names.iter().map(String::as_str).collect();

    let missing: Vec<String> = declared
        .difference(&provided)
        .map(|s| s.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ContractError::MissingMethods {
            actor: actor.actor_type.clone(),
            methods: missing,
        });
    }

    let unexpected: Vec<String> = provided
        .difference(&declared)
        .map(|s| s.to_string())
        .collect();
    if !unexpected.is_empty() {
        return Err(ContractError::UnexpectedMethods {
            actor: actor.actor_type.clone(),
            methods: unexpected,
        });
    }

    Ok(())
}

/// Validates `subject` against the actor of the same type in `model`.
///
/// # Errors
///
/// * [`AppError::General`] when the model has no actor of that type.
/// * [`AppError::Contract`] when the implementation does not conform.
pub fn validate_against_model(
    model: &GenerationModel,
    subject: &dyn ActorContractSubject,
) -> AppResult<()> {
    let actor = model.actor(subject.actor_type()).ok_or_else(|| {
        AppError::General(format!(
            "no actor '{}' in the generation model",
            subject.actor_type()
        ))
    })?;
    validate_contract(actor, subject)?;
    tracing::debug!(actor = %actor.actor_type, "implementation satisfies its contract");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HttpVerb, Method, TypeRef};

    struct Fake {
        actor_type: &'static str,
        methods: &'static [&'static str],
    }

    impl ActorContractSubject for Fake {
        fn actor_type(&self) -> &str {
            self.actor_type
        }

        fn method_names(&self) -> Vec<String> {
            self.methods.iter().map(|m| m.to_string()).collect()
        }
    }

    fn counter() -> Actor {
        let method = |name: &str| Method {
            name: name.into(),
            comment: String::new(),
            http_verb: HttpVerb::Post,
            path: format!("/{{actorId}}/method/{}", name.to_lowercase()),
            request: None,
            return_type: TypeRef::any(),
            parameters: Vec::new(),
        };
        Actor::new("CounterActor", vec![method("Get"), method("Increment")])
    }

    #[test]
    fn test_conforming_subject() {
        let subject = Fake {
            actor_type: "CounterActor",
            methods: &["Increment", "Get"],
        };
        assert_eq!(validate_contract(&counter(), &subject), Ok(()));
    }

    #[test]
    fn test_missing_method() {
        let subject = Fake {
            actor_type: "CounterActor",
            methods: &["Get"],
        };
        let err = validate_contract(&counter(), &subject).unwrap_err();
        assert_eq!(
            err,
            ContractError::MissingMethods {
                actor: "CounterActor".into(),
                methods: vec!["Increment".into()],
            }
        );
        assert_eq!(err.to_string(), "CounterActor does not implement: Increment");
    }

    #[test]
    fn test_validate_against_model() {
        let model = GenerationModel {
            title: None,
            actors: vec![counter()],
            shared_types: Default::default(),
        };
        let good = Fake {
            actor_type: "CounterActor",
            methods: &["Get", "Increment"],
        };
        assert!(validate_against_model(&model, &good).is_ok());

        let lacking = Fake {
            actor_type: "CounterActor",
            methods: &["Get"],
        };
        let err = validate_against_model(&model, &lacking).unwrap_err();
        assert!(matches!(
            err,
            AppError::Contract(ContractError::MissingMethods { .. })
        ));
        assert_eq!(
            err.to_string(),
            "Contract Error: CounterActor does not implement: Increment"
        );

        let unknown = Fake {
            actor_type: "LedgerActor",
            methods: &[],
        };
        assert!(matches!(
            validate_against_model(&model, &unknown),
            Err(AppError::General(_))
        ));
    }

    #[test]
    fn test_unexpected_method_and_type_mismatch() {
        let extra = Fake {
            actor_type: "CounterActor",
            methods: &["Get", "Increment", "Reset"],
        };
        let err = validate_contract(&counter(), &extra).unwrap_err();
        assert_eq!(
            err.to_string(),
            "CounterActor implements methods not in its interface: Reset"
        );

        let wrong = Fake {
            actor_type: "BankAccountActor",
            methods: &["Get", "Increment"],
        };
        assert_eq!(
            validate_contract(&counter(), &wrong).unwrap_err().to_string(),
            "implementation registers as 'BankAccountActor' but the interface is for 'CounterActor'"
        );
    }
}
