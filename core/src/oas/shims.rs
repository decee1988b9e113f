#![deny(missing_docs)]

//! # Document Shims
//!
//! Generic structures acting as an Intermediate Deserialization Layer.
//! These structs map directly to the subset of OpenAPI 3.x objects the actor
//! generator reads: info, paths, operations, parameters, bodies and schemas.
//!
//! Every map is a `BTreeMap` so iteration order is sorted by key, independent of
//! the order in the source document. Keywords not listed here are ignored.

use crate::model::HttpVerb;
use crate::oas::refs::extract_component_name;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::openapi::RefOr;

/// Schema for the root document.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ShimOpenApi {
    /// OpenAPI version (e.g. "3.0.3").
    pub openapi: Option<String>,

    /// Metadata about the API.
    pub info: Option<ShimInfo>,

    /// Path items keyed by path template.
    #[serde(default)]
    pub paths: ShimPaths,

    /// Components section used for reference resolution.
    #[serde(default)]
    pub components: Option<ShimComponents>,
}

impl ShimOpenApi {
    /// Returns the document title, if one is declared and non-blank.
    pub fn title(&self) -> Option<&str> {
        self.info
            .as_ref()
            .map(|info| info.title.trim())
            .filter(|title| !title.is_empty())
    }

    /// Iterates the component schemas in sorted key order.
    pub fn schemas(&self) -> impl Iterator<Item = (&String, &RefOr<ShimSchema>)> {
        self.components
            .iter()
            .flat_map(|components| components.schemas.iter())
    }

    /// True when `components/schemas` declares `name`.
    pub fn has_schema(&self, name: &str) -> bool {
        self.components
            .as_ref()
            .is_some_and(|components| components.schemas.contains_key(name))
    }

    /// Iterates the reusable parameter components in sorted key order.
    pub fn parameter_components(&self) -> impl Iterator<Item = (&String, &RefOr<ShimParameter>)> {
        self.components
            .iter()
            .flat_map(|components| components.parameters.iter())
    }

    /// Resolves a parameter, following a `#/components/parameters/...` pointer.
    ///
    /// Only resolves one level deep.
    pub fn resolve_parameter<'a>(
        &'a self,
        param: &'a RefOr<ShimParameter>,
    ) -> Option<&'a ShimParameter> {
        match param {
            RefOr::T(p) => Some(p),
            RefOr::Ref(r) => {
                let name = extract_component_name(&r.ref_location, "parameters")?;
                match self.components.as_ref()?.parameters.get(&name)? {
                    RefOr::T(p) => Some(p),
                    RefOr::Ref(_) => None,
                }
            }
        }
    }

    /// Resolves a request body, following a `#/components/requestBodies/...` pointer.
    pub fn resolve_request_body<'a>(
        &'a self,
        body: &'a RefOr<ShimRequestBody>,
    ) -> Option<&'a ShimRequestBody> {
        match body {
            RefOr::T(b) => Some(b),
            RefOr::Ref(r) => {
                let name = extract_component_name(&r.ref_location, "requestBodies")?;
                match self.components.as_ref()?.request_bodies.get(&name)? {
                    RefOr::T(b) => Some(b),
                    RefOr::Ref(_) => None,
                }
            }
        }
    }

    /// Resolves a response, following a `#/components/responses/...` pointer.
    pub fn resolve_response<'a>(
        &'a self,
        response: &'a RefOr<ShimResponse>,
    ) -> Option<&'a ShimResponse> {
        match response {
            RefOr::T(r) => Some(r),
            RefOr::Ref(r) => {
                let name = extract_component_name(&r.ref_location, "responses")?;
                match self.components.as_ref()?.responses.get(&name)? {
                    RefOr::T(resp) => Some(resp),
                    RefOr::Ref(_) => None,
                }
            }
        }
    }
}

/// Represents the Paths Object, skipping specification extensions.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct ShimPaths {
    /// Parsed path items keyed by path template.
    pub items: BTreeMap<String, ShimPathItem>,
}

impl ShimPaths {
    /// Returns true when no concrete path items are present.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates path items in sorted path order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ShimPathItem)> {
        self.items.iter()
    }
}

impl<'de> Deserialize<'de> for ShimPaths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut items = BTreeMap::new();

        for (key, value) in raw {
            if key.starts_with("x-") {
                continue;
            }
            let path_item = serde_json::from_value::<ShimPathItem>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse path item '{}': {}", key, e))
            })?;
            items.insert(key, path_item);
        }

        Ok(Self { items })
    }
}

/// Components object holding reusable definitions.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimComponents {
    /// Reusable schemas.
    #[serde(default)]
    pub schemas: BTreeMap<String, RefOr<ShimSchema>>,
    /// Reusable parameters.
    #[serde(default)]
    pub parameters: BTreeMap<String, RefOr<ShimParameter>>,
    /// Reusable request bodies.
    #[serde(rename = "requestBodies", default)]
    pub request_bodies: BTreeMap<String, RefOr<ShimRequestBody>>,
    /// Reusable responses.
    #[serde(default)]
    pub responses: BTreeMap<String, RefOr<ShimResponse>>,
}

/// Metadata about the API (Info Object).
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimInfo {
    /// The title of the API.
    #[serde(default)]
    pub title: String,
}

/// A Path Item containing operations for a specific URL.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimPathItem {
    /// Parameters common to all operations in this path.
    #[serde(default)]
    pub parameters: Option<Vec<RefOr<ShimParameter>>>,
    /// GET operation.
    pub get: Option<ShimOperation>,
    /// POST operation.
    pub post: Option<ShimOperation>,
    /// PUT operation.
    pub put: Option<ShimOperation>,
    /// DELETE operation.
    pub delete: Option<ShimOperation>,
    /// PATCH operation.
    pub patch: Option<ShimOperation>,
}

impl ShimPathItem {
    /// Returns the declared operations in the fixed verb order
    /// GET, POST, PUT, DELETE, PATCH.
    pub fn operations(&self) -> Vec<(HttpVerb, &ShimOperation)> {
        HttpVerb::ORDER
            .iter()
            .filter_map(|verb| self.operation(*verb).map(|op| (*verb, op)))
            .collect()
    }

    /// Returns the operation bound to `verb`, if declared.
    pub fn operation(&self, verb: HttpVerb) -> Option<&ShimOperation> {
        match verb {
            HttpVerb::Get => self.get.as_ref(),
            HttpVerb::Post => self.post.as_ref(),
            HttpVerb::Put => self.put.as_ref(),
            HttpVerb::Delete => self.delete.as_ref(),
            HttpVerb::Patch => self.patch.as_ref(),
        }
    }

    /// Parameters declared at the path level.
    pub fn parameters(&self) -> &[RefOr<ShimParameter>] {
        self.parameters.as_deref().unwrap_or(&[])
    }
}

/// A single HTTP Operation definition.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimOperation {
    /// A short summary of what the operation does.
    pub summary: Option<String>,
    /// A verbose explanation of the operation behavior.
    pub description: Option<String>,
    /// A list of tags for API documentation control.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Operation-specific parameters.
    #[serde(default)]
    pub parameters: Option<Vec<RefOr<ShimParameter>>>,
    /// Request Body.
    #[serde(rename = "requestBody")]
    pub request_body: Option<RefOr<ShimRequestBody>>,
    /// Responses keyed by status code.
    #[serde(default)]
    pub responses: BTreeMap<String, RefOr<ShimResponse>>,
}

impl ShimOperation {
    /// Operation tags, empty when none are declared.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// Operation-level parameters.
    pub fn parameters(&self) -> &[RefOr<ShimParameter>] {
        self.parameters.as_deref().unwrap_or(&[])
    }
}

/// Parameter Object.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimParameter {
    /// Name of the parameter.
    pub name: String,
    /// Location of the parameter (path, query, header, cookie).
    #[serde(rename = "in")]
    pub parameter_in: String,
    /// Whether the parameter is required.
    #[serde(default)]
    pub required: bool,
    /// Schema definition.
    pub schema: Option<RefOr<ShimSchema>>,
}

impl ShimParameter {
    /// Returns the inline schema when it is not a `$ref`.
    pub fn inline_schema(&self) -> Option<&ShimSchema> {
        match self.schema.as_ref()? {
            RefOr::T(s) => Some(s),
            RefOr::Ref(_) => None,
        }
    }
}

/// Request Body Object.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimRequestBody {
    /// Content keyed by media type.
    #[serde(default)]
    pub content: BTreeMap<String, ShimMediaType>,
}

/// Response Object.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimResponse {
    /// Content keyed by media type.
    #[serde(default)]
    pub content: BTreeMap<String, ShimMediaType>,
}

/// Media Type Object.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimMediaType {
    /// Schema of the payload.
    pub schema: Option<RefOr<ShimSchema>>,
}

/// The `type` keyword: a single name (3.0) or a list of names (3.1).
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum ShimSchemaType {
    /// `type: string`
    Single(String),
    /// `type: [string, "null"]`
    Multiple(Vec<String>),
}

impl ShimSchemaType {
    /// The first declared type that is not `null`.
    pub fn primary(&self) -> Option<&str> {
        match self {
            ShimSchemaType::Single(t) => Some(t.as_str()),
            ShimSchemaType::Multiple(types) => types
                .iter()
                .map(String::as_str)
                .find(|t| *t != "null"),
        }
    }
}

/// The `additionalProperties` keyword.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(untagged)]
pub enum ShimAdditionalProperties {
    /// `additionalProperties: true|false`
    Flag(bool),
    /// `additionalProperties: { schema }`
    Schema(Box<RefOr<ShimSchema>>),
}

/// Schema Object, reduced to the keywords that drive type extraction.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimSchema {
    /// Declared type.
    #[serde(rename = "type")]
    pub schema_type: Option<ShimSchemaType>,
    /// Format modifier (int32, int64, float, double, ...).
    pub format: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Object properties.
    #[serde(default)]
    pub properties: BTreeMap<String, RefOr<ShimSchema>>,
    /// Required property names.
    #[serde(default)]
    pub required: Vec<String>,
    /// Array item schema.
    pub items: Option<Box<RefOr<ShimSchema>>>,
    /// Map value schema.
    #[serde(rename = "additionalProperties")]
    pub additional_properties: Option<ShimAdditionalProperties>,
}

impl ShimSchema {
    /// The primary (non-null) declared type, if any.
    pub fn primary_type(&self) -> Option<&str> {
        self.schema_type.as_ref().and_then(ShimSchemaType::primary)
    }

    /// True when the schema declares `type: object` and at least one property.
    pub fn is_struct(&self) -> bool {
        self.primary_type() == Some("object") && !self.properties.is_empty()
    }

    /// True when the schema declares `type: string`.
    pub fn is_string(&self) -> bool {
        self.primary_type() == Some("string")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_item_operation_order() {
        let yaml = r#"
patch: { responses: {} }
get: { responses: {} }
delete: { responses: {} }
post: { responses: {} }
"#;
        let item: ShimPathItem = serde_yaml::from_str(yaml).unwrap();
        let verbs: Vec<HttpVerb> = item.operations().into_iter().map(|(v, _)| v).collect();
        assert_eq!(
            verbs,
            vec![
                HttpVerb::Get,
                HttpVerb::Post,
                HttpVerb::Delete,
                HttpVerb::Patch
            ]
        );
    }

    #[test]
    fn test_paths_skip_extensions() {
        let yaml = r#"
x-internal: true
/b: { get: { responses: {} } }
/a: { get: { responses: {} } }
"#;
        let paths: ShimPaths = serde_yaml::from_str(yaml).unwrap();
        let keys: Vec<&String> = paths.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["/a", "/b"]);
    }

    #[test]
    fn test_schema_type_multiple_skips_null() {
        let yaml = "type: [\"null\", integer]\nformat: int64";
        let schema: ShimSchema = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(schema.primary_type(), Some("integer"));
        assert_eq!(schema.format.as_deref(), Some("int64"));
    }

    #[test]
    fn test_schema_is_struct_requires_properties() {
        let with_props: ShimSchema =
            serde_yaml::from_str("type: object\nproperties: { a: { type: string } }").unwrap();
        let without_props: ShimSchema = serde_yaml::from_str("type: object").unwrap();
        assert!(with_props.is_struct());
        assert!(!without_props.is_struct());
    }

    #[test]
    fn test_resolve_parameter_ref() {
        let yaml = r#"
openapi: 3.0.3
info: { title: T, version: "1" }
paths: {}
components:
  parameters:
    actorId:
      name: actorId
      in: path
      required: true
      schema: { type: string }
"#;
        let doc: ShimOpenApi = serde_yaml::from_str(yaml).unwrap();
        let param: RefOr<ShimParameter> =
            serde_yaml::from_str("$ref: '#/components/parameters/actorId'").unwrap();
        let resolved = doc.resolve_parameter(&param).expect("parameter resolves");
        assert_eq!(resolved.name, "actorId");
        assert!(resolved.required);
        assert!(resolved.inline_schema().unwrap().is_string());
    }

    #[test]
    fn test_document_debug_output() {
        let yaml = r#"
openapi: 3.0.3
info: { title: Counter API, version: "1" }
paths:
  /{actorId}/method/get:
    get:
      responses:
        "200": { $ref: '#/components/responses/State' }
"#;
        let doc: ShimOpenApi = serde_yaml::from_str(yaml).unwrap();
        let debug = format!("{:?}", doc);
        assert!(debug.contains("Counter API"));
        assert!(debug.contains("#/components/responses/State"));

        let failed = crate::oas::document::load_document("openapi: '2.0'\npaths: {}\n");
        assert!(failed.unwrap_err().to_string().contains("2.0"));
    }

    #[test]
    fn test_resolve_response_ref() {
        let yaml = r#"
openapi: 3.0.3
info: { title: T, version: "1" }
paths: {}
components:
  responses:
    StateResponse:
      description: OK
      content:
        application/json:
          schema: { $ref: '#/components/schemas/CounterState' }
"#;
        let doc: ShimOpenApi = serde_yaml::from_str(yaml).unwrap();
        let response: RefOr<ShimResponse> =
            serde_yaml::from_str("$ref: '#/components/responses/StateResponse'").unwrap();
        let resolved = doc.resolve_response(&response).expect("response resolves");
        assert!(resolved.content.contains_key("application/json"));

        let missing: RefOr<ShimResponse> =
            serde_yaml::from_str("$ref: '#/components/responses/Nope'").unwrap();
        assert!(doc.resolve_response(&missing).is_none());
    }
}
