#![deny(missing_docs)]

//! # Type Extraction
//!
//! Walks `components/schemas` and string-typed parameters, producing struct and
//! alias definitions.
//!
//! - Object schemas with at least one property become structs.
//! - Every other schema becomes an alias of its mapped type.
//! - String parameters (path-item, operation and reusable components) become
//!   aliases named after the capitalized parameter name.

use crate::extract::naming::capitalize_first;
use crate::model::{AliasType, Field, SerializationTag, StructType, TypeDef, TypeRef};
use crate::oas::refs::extract_ref_name;
use crate::oas::shims::{ShimOpenApi, ShimParameter, ShimSchema};
use crate::type_mapping::{map_inline_schema, map_schema};
use std::collections::BTreeMap;
use utoipa::openapi::RefOr;

/// Extracts all type definitions from the document.
///
/// Order: schema types sorted by schema key, then parameter aliases sorted by
/// alias name.
pub fn extract_types(doc: &ShimOpenApi) -> Vec<TypeDef> {
    let mut types: Vec<TypeDef> = doc
        .schemas()
        .map(|(name, schema)| schema_type(name, schema))
        .collect();

    for (alias_name, alias) in parameter_aliases(doc) {
        if doc.has_schema(&alias_name) {
            tracing::debug!(
                "Parameter alias '{}' collides with a schema of the same name; keeping the schema",
                alias_name
            );
            continue;
        }
        types.push(TypeDef::Alias(alias));
    }

    types
}

/// Converts one schema entry into a struct or alias.
fn schema_type(name: &str, schema: &RefOr<ShimSchema>) -> TypeDef {
    match schema {
        RefOr::Ref(r) => TypeDef::Alias(AliasType {
            name: name.to_string(),
            target: TypeRef::Reference(extract_ref_name(&r.ref_location)),
            original_name: name.to_string(),
            description: None,
        }),
        RefOr::T(inline) if inline.is_struct() => TypeDef::Struct(struct_type(name, inline)),
        RefOr::T(inline) => TypeDef::Alias(AliasType {
            name: name.to_string(),
            target: map_inline_schema(inline),
            original_name: name.to_string(),
            description: inline.description.clone(),
        }),
    }
}

fn struct_type(name: &str, schema: &ShimSchema) -> StructType {
    let fields = schema
        .properties
        .iter()
        .map(|(prop_name, prop)| {
            let comment = match prop {
                RefOr::T(inline) => inline.description.clone(),
                RefOr::Ref(_) => None,
            };
            Field {
                name: capitalize_first(prop_name),
                ty: map_schema(prop),
                tag: SerializationTag {
                    name: prop_name.clone(),
                    omit_if_empty: !schema.required.iter().any(|r| r == prop_name),
                },
                comment,
            }
        })
        .collect();

    StructType {
        name: name.to_string(),
        description: schema.description.clone(),
        fields,
    }
}

/// Collects string-parameter aliases keyed (and therefore sorted) by alias name.
///
/// Scan order decides which occurrence wins: paths in sorted order (path-item
/// parameters, then operations in verb order), then reusable components.
fn parameter_aliases(doc: &ShimOpenApi) -> BTreeMap<String, AliasType> {
    let mut aliases = BTreeMap::new();

    let path_params = doc.paths.iter().flat_map(|(_, item)| {
        item.parameters().iter().chain(
            item.operations()
                .into_iter()
                .flat_map(|(_, op)| op.parameters().iter()),
        )
    });

    for param in path_params.chain(doc.parameter_components().map(|(_, p)| p)) {
        let Some(resolved) = doc.resolve_parameter(param) else {
            if let RefOr::Ref(r) = param {
                tracing::warn!("Skipping unresolvable parameter reference '{}'", r.ref_location);
            }
            continue;
        };
        if let Some(alias) = parameter_alias(resolved) {
            aliases.entry(alias.name.clone()).or_insert(alias);
        }
    }

    aliases
}

/// The alias emitted for a parameter with an inline string schema.
pub(crate) fn parameter_alias(param: &ShimParameter) -> Option<AliasType> {
    if param.name.is_empty() || !param.inline_schema()?.is_string() {
        return None;
    }
    let name = capitalize_first(&param.name);
    Some(AliasType {
        description: Some(format!("defines model for {}", param.name)),
        target: TypeRef::Primitive(crate::model::PrimitiveKind::String),
        original_name: param.name.clone(),
        name,
    })
}

/// The type a method parameter carries: its alias for inline strings, the
/// mapped schema otherwise, untyped when no schema is declared.
///
/// An alias shadowed by a schema of the same name is never emitted, so such a
/// parameter keeps its plain mapped type.
pub(crate) fn parameter_type(doc: &ShimOpenApi, param: &ShimParameter) -> TypeRef {
    match parameter_alias(param) {
        Some(alias) if !doc.has_schema(&alias.name) => TypeRef::Reference(alias.name),
        _ => param.schema.as_ref().map(map_schema).unwrap_or_else(TypeRef::any),
    }
}
