#![deny(missing_docs)]

//! # Usage Analysis
//!
//! Determines which actors use each extracted type.
//!
//! 1. Seed: request, return and parameter types of every method mark the
//!    referenced type as used by the method's actor.
//! 2. Propagate: if type A is used by actor X and A references B, then B is
//!    also used by X. Propagation runs to a fixed point over a worklist, so
//!    chains of any length are covered and cycles terminate.

use crate::model::{Actor, TypeDef};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Edges from each type to the known types it references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Builds the graph. References to names outside `types` are not edges.
    pub fn build(types: &[TypeDef]) -> Self {
        let known: BTreeSet<&str> = types.iter().map(TypeDef::name).collect();
        let mut edges = BTreeMap::new();

        for ty in types {
            let mut deps: Vec<String> = Vec::new();
            for name in ty.referenced_names() {
                if !known.contains(name) {
                    tracing::debug!(
                        "Type '{}' references unknown type '{}'; no dependency recorded",
                        ty.name(),
                        name
                    );
                    continue;
                }
                if !deps.iter().any(|d| d == name) {
                    deps.push(name.to_string());
                }
            }
            edges.insert(ty.name().to_string(), deps);
        }

        Self { edges }
    }

    /// Known types directly referenced by `name`.
    pub fn dependencies_of(&self, name: &str) -> &[String] {
        self.edges.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when `name` is a node of the graph.
    pub fn contains(&self, name: &str) -> bool {
        self.edges.contains_key(name)
    }
}

/// The usage set (actor types) of every known type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageMap {
    usage: BTreeMap<String, BTreeSet<String>>,
}

impl UsageMap {
    /// Actor types using `name`, or `None` for unknown types.
    pub fn actors_using(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.usage.get(name)
    }

    /// Number of actors using `name`.
    pub fn usage_count(&self, name: &str) -> usize {
        self.usage.get(name).map_or(0, BTreeSet::len)
    }

    /// Records that `actor` uses `name`; returns true if this is new information.
    fn mark(&mut self, name: &str, actor: &str) -> bool {
        match self.usage.get_mut(name) {
            Some(actors) => actors.insert(actor.to_string()),
            None => false,
        }
    }
}

/// Computes the usage set of every type.
pub fn analyze_usage(types: &[TypeDef], actors: &[Actor]) -> UsageMap {
    let graph = DependencyGraph::build(types);
    let mut usage = UsageMap {
        usage: types
            .iter()
            .map(|t| (t.name().to_string(), BTreeSet::new()))
            .collect(),
    };

    let mut worklist: VecDeque<(String, String)> = VecDeque::new();

    for actor in actors {
        for method in &actor.methods {
            for name in method.type_refs().filter_map(|t| t.referenced_name()) {
                if !graph.contains(name) {
                    tracing::debug!(
                        "Method '{}' of '{}' references unknown type '{}'",
                        method.name,
                        actor.actor_type,
                        name
                    );
                    continue;
                }
                if usage.mark(name, &actor.actor_type) {
                    worklist.push_back((name.to_string(), actor.actor_type.clone()));
                }
            }
        }
    }

    while let Some((name, actor)) = worklist.pop_front() {
        for dep in graph.dependencies_of(&name) {
            if usage.mark(dep, &actor) {
                worklist.push_back((dep.clone(), actor.clone()));
            }
        }
    }

    usage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AliasType, Field, HttpVerb, Method, SerializationTag, StructType, TypeRef,
    };

    fn struct_with_refs(name: &str, refs: &[&str]) -> TypeDef {
        TypeDef::Struct(StructType {
            name: name.into(),
            description: None,
            fields: refs
                .iter()
                .map(|r| Field {
                    name: r.to_string(),
                    ty: TypeRef::sequence(TypeRef::reference(*r)),
                    tag: SerializationTag {
                        name: r.to_lowercase(),
                        omit_if_empty: true,
                    },
                    comment: None,
                })
                .collect(),
        })
    }

    fn actor_returning(actor: &str, ty: &str) -> Actor {
        Actor::new(
            actor,
            vec![Method {
                name: "Get".into(),
                comment: String::new(),
                http_verb: HttpVerb::Get,
                path: "/{actorId}/method/get".into(),
                request: None,
                return_type: TypeRef::reference(ty),
                parameters: Vec::new(),
            }],
        )
    }

    #[test]
    fn test_multi_hop_propagation() {
        let types = vec![
            struct_with_refs("A", &["B"]),
            struct_with_refs("B", &["C"]),
            struct_with_refs("C", &[]),
        ];
        let usage = analyze_usage(&types, &[actor_returning("X", "A")]);
        for name in ["A", "B", "C"] {
            let actors: Vec<&String> = usage.actors_using(name).unwrap().iter().collect();
            assert_eq!(actors, vec!["X"], "usage of {}", name);
        }
    }

    #[test]
    fn test_cycle_terminates() {
        let types = vec![struct_with_refs("A", &["B"]), struct_with_refs("B", &["A"])];
        let actors = [actor_returning("X", "A"), actor_returning("Y", "B")];
        let usage = analyze_usage(&types, &actors);
        assert_eq!(usage.usage_count("A"), 2);
        assert_eq!(usage.usage_count("B"), 2);
    }

    #[test]
    fn test_alias_target_is_an_edge() {
        let types = vec![
            TypeDef::Alias(AliasType {
                name: "History".into(),
                target: TypeRef::sequence(TypeRef::reference("Entry")),
                original_name: "History".into(),
                description: None,
            }),
            struct_with_refs("Entry", &[]),
        ];
        let graph = DependencyGraph::build(&types);
        assert_eq!(graph.dependencies_of("History"), ["Entry".to_string()]);

        let usage = analyze_usage(&types, &[actor_returning("X", "History")]);
        assert_eq!(usage.usage_count("Entry"), 1);
    }

    #[test]
    fn test_unknown_references_are_ignored() {
        let types = vec![struct_with_refs("A", &["Missing"])];
        let graph = DependencyGraph::build(&types);
        assert!(graph.dependencies_of("A").is_empty());

        let usage = analyze_usage(&types, &[actor_returning("X", "Nowhere")]);
        assert_eq!(usage.usage_count("A"), 0);
        assert!(usage.actors_using("Nowhere").is_none());
    }
}
