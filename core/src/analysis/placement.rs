#![deny(missing_docs)]

//! # Placement
//!
//! Assigns every type to exactly one collection by the size of its usage set:
//!
//! | Usage | Placement |
//! |-------|-----------|
//! | more than one actor | shared |
//! | exactly one actor | that actor's private collection |
//! | no actor | shared |

use crate::analysis::usage::UsageMap;
use crate::model::{Placement, TypeCollection, TypeDef};
use std::collections::BTreeMap;

/// The result of categorization, before it is merged into the actors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementPlan {
    /// Types visible to every actor.
    pub shared: TypeCollection,
    /// Private collections keyed by actor type.
    pub private: BTreeMap<String, TypeCollection>,
}

impl PlacementPlan {
    /// Takes the private collection of `actor_type`, empty if it has none.
    pub fn take_private(&mut self, actor_type: &str) -> TypeCollection {
        self.private.remove(actor_type).unwrap_or_default()
    }
}

/// Decides the placement of the type `name`.
pub fn placement_of(name: &str, usage: &UsageMap) -> Placement {
    match usage.actors_using(name) {
        Some(actors) if actors.len() == 1 => match actors.iter().next() {
            Some(actor) => Placement::Private(actor.clone()),
            None => Placement::Shared,
        },
        Some(actors) if actors.len() > 1 => Placement::Shared,
        _ => {
            tracing::info!("Type '{}' is not used by any actor; placing it in shared", name);
            Placement::Shared
        }
    }
}

/// Splits the types into shared and private collections, preserving their order.
pub fn categorize(types: Vec<TypeDef>, usage: &UsageMap) -> PlacementPlan {
    let mut plan = PlacementPlan::default();
    for ty in types {
        match placement_of(ty.name(), usage) {
            Placement::Shared => plan.shared.push(ty),
            Placement::Private(actor) => plan.private.entry(actor).or_default().push(ty),
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::usage::analyze_usage;
    use crate::model::{Actor, AliasType, HttpVerb, Method, PrimitiveKind, TypeRef};

    fn alias(name: &str) -> TypeDef {
        TypeDef::Alias(AliasType {
            name: name.into(),
            target: TypeRef::Primitive(PrimitiveKind::String),
            original_name: name.into(),
            description: None,
        })
    }

    fn actor_with_request(actor: &str, request: &str) -> Actor {
        Actor::new(
            actor,
            vec![Method {
                name: "Do".into(),
                comment: String::new(),
                http_verb: HttpVerb::Post,
                path: "/{actorId}/method/do".into(),
                request: Some(TypeRef::reference(request)),
                return_type: TypeRef::any(),
                parameters: Vec::new(),
            }],
        )
    }

    #[test]
    fn test_usage_cardinality_rule() {
        let types = vec![alias("Both"), alias("OnlyX"), alias("Nobody")];
        let actors = [
            actor_with_request("X", "Both"),
            actor_with_request("Y", "Both"),
            actor_with_request("X", "OnlyX"),
        ];
        let usage = analyze_usage(&types, &actors);
        let mut plan = categorize(types, &usage);

        let shared: Vec<&str> = plan.shared.names().collect();
        assert_eq!(shared, vec!["Both", "Nobody"]);
        let private_x: Vec<String> = plan.take_private("X").names().map(String::from).collect();
        assert_eq!(private_x, vec!["OnlyX"]);
        assert!(plan.take_private("Y").is_empty());
    }

    #[test]
    fn test_placement_of_unknown_is_shared() {
        assert_eq!(placement_of("Ghost", &UsageMap::default()), Placement::Shared);
    }
}
