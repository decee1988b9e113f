#![deny(missing_docs)]

//! # Generation Model
//!
//! Intermediate Representation (IR) handed from the analysis pipeline to the
//! rendering step. It is independent of the input schema format: nothing here
//! refers to OpenAPI objects.
//!
//! Type names are carried by [`TypeRef`], a closed set of variants, so a
//! primitive can never be mistaken for a custom type that happens to share its
//! spelling.

use serde::Serialize;
use std::fmt;

/// Built-in scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// UTF-8 string.
    String,
    /// Platform-width signed integer (no `format`).
    Int,
    /// `format: int32`.
    Int32,
    /// `format: int64`.
    Int64,
    /// `format: float`.
    Float32,
    /// `format: double` or no format.
    Float64,
    /// Boolean.
    Bool,
    /// Untyped value; used whenever a schema cannot be resolved.
    Any,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Float32 => "float32",
            PrimitiveKind::Float64 => "float64",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Any => "any",
        };
        f.write_str(name)
    }
}

/// The semantic type of a field, alias target, parameter, request or return value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "camelCase")]
pub enum TypeRef {
    /// A built-in scalar.
    Primitive(PrimitiveKind),
    /// A named schema. Whether it is a known custom type is decided against the
    /// extracted types, never by the spelling of the name.
    Reference(String),
    /// An ordered sequence of the inner type.
    Sequence(Box<TypeRef>),
    /// A string-keyed map with values of the inner type.
    Map(Box<TypeRef>),
}

impl TypeRef {
    /// The untyped marker.
    pub fn any() -> Self {
        TypeRef::Primitive(PrimitiveKind::Any)
    }

    /// Shorthand for a reference to a named type.
    pub fn reference(name: impl Into<String>) -> Self {
        TypeRef::Reference(name.into())
    }

    /// Shorthand for a sequence of `inner`.
    pub fn sequence(inner: TypeRef) -> Self {
        TypeRef::Sequence(Box::new(inner))
    }

    /// True for the untyped marker (not for containers of it).
    pub fn is_any(&self) -> bool {
        matches!(self, TypeRef::Primitive(PrimitiveKind::Any))
    }

    /// The referenced type name after stripping any sequence/map wrapping.
    ///
    /// `[]OperationLog` -> `Some("OperationLog")`, `map[string]int` -> `None`.
    pub fn referenced_name(&self) -> Option<&str> {
        match self {
            TypeRef::Reference(name) => Some(name.as_str()),
            TypeRef::Sequence(inner) | TypeRef::Map(inner) => inner.referenced_name(),
            TypeRef::Primitive(_) => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(kind) => write!(f, "{}", kind),
            TypeRef::Reference(name) => write!(f, "{}", name),
            TypeRef::Sequence(inner) => write!(f, "[]{}", inner),
            TypeRef::Map(inner) => write!(f, "map[string]{}", inner),
        }
    }
}

/// Serialization tag of a struct field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializationTag {
    /// The wire name (the schema property key).
    pub name: String,
    /// Omit when empty; true unless the property is listed in `required`.
    pub omit_if_empty: bool,
}

impl fmt::Display for SerializationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.omit_if_empty {
            write!(f, "{},omitempty", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// A struct field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Exported field name (property key with its first letter capitalized).
    pub name: String,
    /// Semantic type.
    pub ty: TypeRef,
    /// Serialization tag.
    pub tag: SerializationTag,
    /// Doc comment from the property description.
    pub comment: Option<String>,
}

/// A struct type extracted from an object schema with properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructType {
    /// Type name (schema key).
    pub name: String,
    /// Schema description.
    pub description: Option<String>,
    /// Fields, sorted by property key.
    pub fields: Vec<Field>,
}

/// An alias type: a name bound to a single target type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasType {
    /// Alias name.
    pub name: String,
    /// Target type.
    pub target: TypeRef,
    /// The name the alias was derived from (schema key or parameter name).
    pub original_name: String,
    /// Description.
    pub description: Option<String>,
}

/// A named data shape: exactly one of struct or alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "camelCase")]
pub enum TypeDef {
    /// Object schema with properties.
    Struct(StructType),
    /// Anything else.
    Alias(AliasType),
}

impl TypeDef {
    /// Type name.
    pub fn name(&self) -> &str {
        match self {
            TypeDef::Struct(s) => &s.name,
            TypeDef::Alias(a) => &a.name,
        }
    }

    /// Names referenced by this type's fields or alias target, in field order,
    /// without de-duplication. Primitives are excluded.
    pub fn referenced_names(&self) -> Vec<&str> {
        match self {
            TypeDef::Struct(s) => s
                .fields
                .iter()
                .filter_map(|f| f.ty.referenced_name())
                .collect(),
            TypeDef::Alias(a) => a.target.referenced_name().into_iter().collect(),
        }
    }
}

/// Structs and aliases placed in one package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCollection {
    /// Struct types, in extraction order.
    pub structs: Vec<StructType>,
    /// Alias types, in extraction order.
    pub aliases: Vec<AliasType>,
}

impl TypeCollection {
    /// Adds a type to the matching list.
    pub fn push(&mut self, ty: TypeDef) {
        match ty {
            TypeDef::Struct(s) => self.structs.push(s),
            TypeDef::Alias(a) => self.aliases.push(a),
        }
    }

    /// True when the collection holds no types.
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty() && self.aliases.is_empty()
    }

    /// Number of types held.
    pub fn len(&self) -> usize {
        self.structs.len() + self.aliases.len()
    }

    /// Names of all held types, structs first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.structs
            .iter()
            .map(|s| s.name.as_str())
            .chain(self.aliases.iter().map(|a| a.name.as_str()))
    }

    /// True when a type named `name` is held.
    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    /// Names referenced by the held types (fields and alias targets).
    pub fn referenced_names(&self) -> impl Iterator<Item = &str> {
        self.structs
            .iter()
            .flat_map(|s| s.fields.iter().filter_map(|f| f.ty.referenced_name()))
            .chain(self.aliases.iter().filter_map(|a| a.target.referenced_name()))
    }
}

/// HTTP verbs the actor extractor reads, in their fixed extraction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
}

impl HttpVerb {
    /// Extraction order.
    pub const ORDER: [HttpVerb; 5] = [
        HttpVerb::Get,
        HttpVerb::Post,
        HttpVerb::Put,
        HttpVerb::Delete,
        HttpVerb::Patch,
    ];

    /// Upper-case verb name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a method parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamLocation {
    /// URL path segment.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
}

impl ParamLocation {
    /// Parses the OpenAPI `in` value.
    pub fn from_openapi(value: &str) -> Option<Self> {
        match value {
            "path" => Some(ParamLocation::Path),
            "query" => Some(ParamLocation::Query),
            "header" => Some(ParamLocation::Header),
            "cookie" => Some(ParamLocation::Cookie),
            _ => None,
        }
    }
}

/// A parameter of an actor method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Original parameter name.
    pub name: String,
    /// Location.
    pub location: ParamLocation,
    /// Whether the parameter is required.
    pub required: bool,
    /// Semantic type; string parameters reference their alias type.
    pub ty: TypeRef,
}

/// An actor method derived from one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    /// Method name (capitalized segment after `method` in the path).
    pub name: String,
    /// Doc comment.
    pub comment: String,
    /// HTTP verb of the source operation.
    pub http_verb: HttpVerb,
    /// Path template of the source operation.
    pub path: String,
    /// Request body type; `None` when the operation declares no body.
    pub request: Option<TypeRef>,
    /// Return type; the untyped marker when unresolvable.
    pub return_type: TypeRef,
    /// Declared parameters (operation-level first, then inherited path-level).
    pub parameters: Vec<Parameter>,
}

impl Method {
    /// True when the operation declares a request body.
    pub fn has_request(&self) -> bool {
        self.request.is_some()
    }

    /// Every type this method mentions directly: request, return and parameter types.
    pub fn type_refs(&self) -> impl Iterator<Item = &TypeRef> {
        self.request
            .iter()
            .chain(std::iter::once(&self.return_type))
            .chain(self.parameters.iter().map(|p| &p.ty))
    }
}

/// An actor interface with its private types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// Actor type name (e.g. `CounterActor`).
    pub actor_type: String,
    /// Interface name (`<ActorType>API`).
    pub interface_name: String,
    /// Interface description.
    pub description: String,
    /// Methods, in extraction order. Never empty in an assembled model.
    pub methods: Vec<Method>,
    /// Types used by this actor only.
    pub types: TypeCollection,
}

impl Actor {
    /// Creates an actor with the derived interface name and description and no private types.
    pub fn new(actor_type: impl Into<String>, methods: Vec<Method>) -> Self {
        let actor_type = actor_type.into();
        Self {
            interface_name: format!("{}API", actor_type),
            description: format!(
                "defines the interface that must be implemented to satisfy the OpenAPI schema for {}",
                actor_type
            ),
            actor_type,
            methods,
            types: TypeCollection::default(),
        }
    }

    /// Finds a method by name.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Where a type was placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// In the shared collection.
    Shared,
    /// In the private collection of the named actor.
    Private(String),
}

/// The complete intermediate model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationModel {
    /// Document title, if declared.
    pub title: Option<String>,
    /// Actors, in extraction order.
    pub actors: Vec<Actor>,
    /// Types visible to every actor.
    pub shared_types: TypeCollection,
}

impl GenerationModel {
    /// Finds an actor by type name.
    pub fn actor(&self, actor_type: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.actor_type == actor_type)
    }

    /// Every place a type named `name` was put. A well-formed model yields at most one.
    pub fn placements_of(&self, name: &str) -> Vec<Placement> {
        let mut found = Vec::new();
        if self.shared_types.contains(name) {
            found.push(Placement::Shared);
        }
        for actor in &self.actors {
            if actor.types.contains(name) {
                found.push(Placement::Private(actor.actor_type.clone()));
            }
        }
        found
    }

    /// Names of every placed type, shared first then per actor.
    pub fn type_names(&self) -> Vec<&str> {
        self.shared_types
            .names()
            .chain(self.actors.iter().flat_map(|a| a.types.names()))
            .collect()
    }
}
