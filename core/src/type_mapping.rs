#![deny(missing_docs)]

//! # Type Mapping
//!
//! Converts schema shims into [`TypeRef`] values.
//! Handles primitives, arrays, string-keyed maps and `$ref` pointers.

use crate::model::{PrimitiveKind, TypeRef};
use crate::oas::refs::extract_ref_name;
use crate::oas::shims::{ShimAdditionalProperties, ShimSchema};
use utoipa::openapi::RefOr;

/// Maps a schema (inline or `$ref`) to a [`TypeRef`].
///
/// A `$ref` is never inlined; it maps to a [`TypeRef::Reference`] by name.
pub fn map_schema(schema: &RefOr<ShimSchema>) -> TypeRef {
    match schema {
        RefOr::Ref(r) => TypeRef::Reference(extract_ref_name(&r.ref_location)),
        RefOr::T(inline) => map_inline_schema(inline),
    }
}

/// Maps an inline schema by its declared type and format.
pub fn map_inline_schema(schema: &ShimSchema) -> TypeRef {
    let format = schema.format.as_deref();
    match schema.primary_type() {
        Some("string") => TypeRef::Primitive(PrimitiveKind::String),
        Some("integer") => TypeRef::Primitive(match format {
            Some("int32") => PrimitiveKind::Int32,
            Some("int64") => PrimitiveKind::Int64,
            _ => PrimitiveKind::Int,
        }),
        Some("number") => TypeRef::Primitive(match format {
            Some("float") => PrimitiveKind::Float32,
            _ => PrimitiveKind::Float64,
        }),
        Some("boolean") => TypeRef::Primitive(PrimitiveKind::Bool),
        Some("array") => match schema.items.as_deref() {
            Some(items) => TypeRef::Sequence(Box::new(map_schema(items))),
            None => TypeRef::Sequence(Box::new(TypeRef::any())),
        },
        Some("object") => match &schema.additional_properties {
            Some(ShimAdditionalProperties::Schema(value)) => {
                TypeRef::Map(Box::new(map_schema(value)))
            }
            Some(ShimAdditionalProperties::Flag(true)) => TypeRef::Map(Box::new(TypeRef::any())),
            _ => TypeRef::any(),
        },
        _ => TypeRef::any(),
    }
}

/// Maps a body or response payload schema the way the actor extractor reads them:
/// a `$ref` or an array of `$ref` items keeps its name, everything else is untyped.
pub fn map_payload_schema(schema: &RefOr<ShimSchema>) -> TypeRef {
    match schema {
        RefOr::Ref(r) => TypeRef::Reference(extract_ref_name(&r.ref_location)),
        RefOr::T(inline) if inline.primary_type() == Some("array") => {
            match inline.items.as_deref() {
                Some(RefOr::Ref(r)) => {
                    TypeRef::Sequence(Box::new(TypeRef::Reference(extract_ref_name(
                        &r.ref_location,
                    ))))
                }
                _ => TypeRef::any(),
            }
        }
        RefOr::T(_) => TypeRef::any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> RefOr<ShimSchema> {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_primitive_mapping() {
        let cases = [
            ("type: string", TypeRef::Primitive(PrimitiveKind::String)),
            ("type: integer", TypeRef::Primitive(PrimitiveKind::Int)),
            (
                "{ type: integer, format: int32 }",
                TypeRef::Primitive(PrimitiveKind::Int32),
            ),
            (
                "{ type: integer, format: int64 }",
                TypeRef::Primitive(PrimitiveKind::Int64),
            ),
            ("type: number", TypeRef::Primitive(PrimitiveKind::Float64)),
            (
                "{ type: number, format: float }",
                TypeRef::Primitive(PrimitiveKind::Float32),
            ),
            ("type: boolean", TypeRef::Primitive(PrimitiveKind::Bool)),
            ("{ description: anything }", TypeRef::any()),
        ];
        for (yaml, expected) in cases {
            assert_eq!(map_schema(&parse(yaml)), expected, "mapping {}", yaml);
        }
    }

    #[test]
    fn test_ref_is_not_inlined() {
        let ty = map_schema(&parse("$ref: '#/components/schemas/LogMetadata'"));
        assert_eq!(ty, TypeRef::reference("LogMetadata"));
    }

    #[test]
    fn test_array_and_map() {
        let array = map_schema(&parse(
            "{ type: array, items: { $ref: '#/components/schemas/OperationLog' } }",
        ));
        assert_eq!(array, TypeRef::sequence(TypeRef::reference("OperationLog")));

        let map = map_schema(&parse(
            "{ type: object, additionalProperties: { type: integer, format: int64 } }",
        ));
        assert_eq!(
            map,
            TypeRef::Map(Box::new(TypeRef::Primitive(PrimitiveKind::Int64)))
        );

        let free_form = map_schema(&parse("{ type: object, additionalProperties: true }"));
        assert_eq!(free_form, TypeRef::Map(Box::new(TypeRef::any())));
        assert_eq!(map_schema(&parse("type: object")), TypeRef::any());
    }

    #[test]
    fn test_nullable_type_list() {
        let ty = map_schema(&parse("type: [string, 'null']"));
        assert_eq!(ty, TypeRef::Primitive(PrimitiveKind::String));
    }

    #[test]
    fn test_payload_mapping() {
        assert_eq!(
            map_payload_schema(&parse("$ref: '#/components/schemas/CounterState'")),
            TypeRef::reference("CounterState")
        );
        assert_eq!(
            map_payload_schema(&parse(
                "{ type: array, items: { $ref: '#/components/schemas/Txn' } }"
            )),
            TypeRef::sequence(TypeRef::reference("Txn"))
        );
        assert!(map_payload_schema(&parse("{ type: array, items: { type: string } }")).is_any());
        assert!(map_payload_schema(&parse("type: string")).is_any());
    }
}
