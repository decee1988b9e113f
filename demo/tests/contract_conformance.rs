use actorgen_core::{validate_against_model, validate_contract, AppError, ContractError, Placement, TypeRef};
use actorgen_demo::{
    generation_model, verify_contracts, BankAccountActor, CounterActor, MemoryStateStore,
};
use pretty_assertions::assert_eq;

#[test]
fn test_demo_model_shape() {
    let model = generation_model().unwrap();

    let actors: Vec<&str> = model.actors.iter().map(|a| a.actor_type.as_str()).collect();
    assert_eq!(actors, vec!["BankAccountActor", "CounterActor"]);

    // The actorId parameter is used by both actors, Error by neither.
    assert_eq!(model.placements_of("ActorId"), vec![Placement::Shared]);
    assert_eq!(model.placements_of("Error"), vec![Placement::Shared]);
    assert_eq!(
        model.placements_of("AccountEvent"),
        vec![Placement::Private("BankAccountActor".into())]
    );
    assert_eq!(
        model.placements_of("CounterState"),
        vec![Placement::Private("CounterActor".into())]
    );

    let set = model.actor("CounterActor").unwrap().method("Set").unwrap();
    assert_eq!(set.request, Some(TypeRef::reference("SetValueRequest")));
}

#[test]
fn test_counter_satisfies_contract() {
    let model = generation_model().unwrap();
    let counter = CounterActor::new("counter-1", MemoryStateStore::new());
    assert_eq!(
        validate_contract(model.actor("CounterActor").unwrap(), &counter),
        Ok(())
    );
}

#[test]
fn test_bank_account_satisfies_contract() {
    let model = generation_model().unwrap();
    let account = BankAccountActor::new("account-1", MemoryStateStore::new());
    assert_eq!(
        validate_contract(model.actor("BankAccountActor").unwrap(), &account),
        Ok(())
    );
}

#[test]
fn test_counter_is_not_a_bank_account() {
    let model = generation_model().unwrap();
    let counter = CounterActor::new("counter-1", MemoryStateStore::new());
    let err = validate_contract(model.actor("BankAccountActor").unwrap(), &counter).unwrap_err();
    assert_eq!(
        err,
        ContractError::ActorTypeMismatch {
            expected: "BankAccountActor".into(),
            actual: "CounterActor".into(),
        }
    );
}

#[test]
fn test_verify_contracts() {
    assert!(verify_contracts().is_ok());
}

#[test]
fn test_counter_against_model_without_counter() {
    let mut model = generation_model().unwrap();
    model.actors.retain(|a| a.actor_type != "CounterActor");
    let counter = CounterActor::new("counter-1", MemoryStateStore::new());
    assert!(matches!(
        validate_against_model(&model, &counter),
        Err(AppError::General(_))
    ));

    let mut trimmed = generation_model().unwrap();
    let bank = trimmed
        .actors
        .iter_mut()
        .find(|a| a.actor_type == "BankAccountActor")
        .unwrap();
    bank.methods.retain(|m| m.name != "GetHistory");
    let account = BankAccountActor::new("account-1", MemoryStateStore::new());
    match validate_against_model(&trimmed, &account) {
        Err(AppError::Contract(ContractError::UnexpectedMethods { methods, .. })) => {
            assert_eq!(methods, vec!["GetHistory".to_string()]);
        }
        other => panic!("expected unexpected-method error, got {:?}", other),
    }
}
