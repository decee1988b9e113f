#![deny(missing_docs)]

//! # Actor Extraction
//!
//! Groups path operations into actors by their `ActorType:<Name>` tag and
//! derives one method per operation from the `.../method/<name>` path convention.
//!
//! When no operation carries an actor tag, a single actor named after the
//! document title receives every operation.

use crate::error::{AppError, AppResult};
use crate::extract::naming::{fallback_actor_name, method_name_from_path};
use crate::extract::types::parameter_type;
use crate::model::{Actor, HttpVerb, Method, ParamLocation, Parameter, TypeRef};
use crate::oas::shims::{ShimOpenApi, ShimOperation, ShimParameter, ShimPathItem};
use crate::parser::ParserOptions;
use crate::type_mapping::map_payload_schema;
use indexmap::IndexMap;
use utoipa::openapi::RefOr;

/// Tag prefix marking the actor an operation belongs to.
pub const ACTOR_TYPE_TAG_PREFIX: &str = "ActorType:";

/// Comment used when an operation has neither summary nor description.
pub const DEFAULT_METHOD_COMMENT: &str = "Generated method from OpenAPI operation";

/// Media type read for request and response payloads.
const JSON_MEDIA_TYPE: &str = "application/json";

/// Status code whose payload becomes the method's return type.
const SUCCESS_STATUS: &str = "200";

/// Returns the actor type named by the operation's first `ActorType:` tag.
///
/// Only the first such tag counts: when it names no actor, the operation has none.
pub fn actor_tag(op: &ShimOperation) -> Option<&str> {
    op.tags()
        .iter()
        .find_map(|tag| tag.strip_prefix(ACTOR_TYPE_TAG_PREFIX))
        .filter(|name| !name.is_empty())
}

/// Lists every actor type named by any tag, in order of first appearance.
///
/// Paths are scanned in sorted order, operations in the fixed verb order.
pub fn discover_actor_types(doc: &ShimOpenApi) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for (_, item) in doc.paths.iter() {
        for (_, op) in item.operations() {
            for tag in op.tags() {
                if let Some(name) = tag.strip_prefix(ACTOR_TYPE_TAG_PREFIX) {
                    if !name.is_empty() && !found.iter().any(|f| f == name) {
                        found.push(name.to_string());
                    }
                }
            }
        }
    }
    found
}

/// Extracts the actors and their methods.
///
/// # Errors
///
/// * [`AppError::Convention`] when an attributed operation's path lacks a method name.
/// * [`AppError::NoActorTypes`] when no actor is found, or every actor ends up without methods.
pub fn extract_actors(doc: &ShimOpenApi, options: &ParserOptions) -> AppResult<Vec<Actor>> {
    let discovered = discover_actor_types(doc);

    let fallback = if discovered.is_empty() {
        if !options.title_fallback {
            return Err(AppError::NoActorTypes);
        }
        let name = fallback_actor_name(doc.title());
        tracing::warn!(
            "No '{}' tags found; attributing every operation to fallback actor '{}'",
            ACTOR_TYPE_TAG_PREFIX,
            name
        );
        Some(name)
    } else {
        None
    };

    let mut grouped: IndexMap<String, Vec<Method>> = match &fallback {
        Some(name) => IndexMap::from([(name.clone(), Vec::new())]),
        None => discovered.into_iter().map(|name| (name, Vec::new())).collect(),
    };

    for (path, item) in doc.paths.iter() {
        for (verb, op) in item.operations() {
            let actor_type = match (&fallback, actor_tag(op)) {
                (Some(name), _) => name.as_str(),
                (None, Some(tagged)) => tagged,
                (None, None) => {
                    tracing::info!(
                        "Skipping {} {}: no actor named by its first '{}' tag",
                        verb,
                        path,
                        ACTOR_TYPE_TAG_PREFIX
                    );
                    continue;
                }
            };

            let method = extract_method(doc, item, op, verb, path)?;
            let methods = grouped.entry(actor_type.to_string()).or_default();
            if methods.iter().any(|m| m.name == method.name) {
                tracing::warn!(
                    "Skipping {} {}: actor '{}' already has a method named '{}'",
                    verb,
                    path,
                    actor_type,
                    method.name
                );
                continue;
            }
            methods.push(method);
        }
    }

    let actors: Vec<Actor> = grouped
        .into_iter()
        .filter_map(|(actor_type, methods)| {
            if methods.is_empty() {
                tracing::info!("Dropping actor '{}': no methods", actor_type);
                None
            } else {
                Some(Actor::new(actor_type, methods))
            }
        })
        .collect();

    if actors.is_empty() {
        return Err(AppError::NoActorTypes);
    }
    Ok(actors)
}

/// Builds a method from one operation.
fn extract_method(
    doc: &ShimOpenApi,
    item: &ShimPathItem,
    op: &ShimOperation,
    verb: HttpVerb,
    path: &str,
) -> AppResult<Method> {
    let name = method_name_from_path(path).ok_or_else(|| AppError::Convention {
        method: verb.to_string(),
        path: path.to_string(),
    })?;

    Ok(Method {
        name,
        comment: operation_comment(op),
        http_verb: verb,
        path: path.to_string(),
        request: request_type(doc, op),
        return_type: return_type(doc, op),
        parameters: method_parameters(doc, item, op),
    })
}

/// Summary, else the first line of the description, else the default comment.
fn operation_comment(op: &ShimOperation) -> String {
    if let Some(summary) = op.summary.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        return summary.to_string();
    }
    op.description
        .as_deref()
        .and_then(|d| d.trim().lines().next())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .unwrap_or(DEFAULT_METHOD_COMMENT)
        .to_string()
}

/// `None` when no body (or a body without content) is declared.
fn request_type(doc: &ShimOpenApi, op: &ShimOperation) -> Option<TypeRef> {
    let body_ref = op.request_body.as_ref()?;
    let Some(body) = doc.resolve_request_body(body_ref) else {
        tracing::debug!("Unresolvable request body; treating it as untyped");
        return Some(TypeRef::any());
    };
    if body.content.is_empty() {
        return None;
    }
    Some(
        body.content
            .get(JSON_MEDIA_TYPE)
            .and_then(|media| media.schema.as_ref())
            .map(map_payload_schema)
            .unwrap_or_else(TypeRef::any),
    )
}

fn return_type(doc: &ShimOpenApi, op: &ShimOperation) -> TypeRef {
    op.responses
        .get(SUCCESS_STATUS)
        .and_then(|response| doc.resolve_response(response))
        .and_then(|response| response.content.get(JSON_MEDIA_TYPE))
        .and_then(|media| media.schema.as_ref())
        .map(map_payload_schema)
        .unwrap_or_else(TypeRef::any)
}

/// Operation-level parameters first, then path-level ones the operation does not override.
fn method_parameters(doc: &ShimOpenApi, item: &ShimPathItem, op: &ShimOperation) -> Vec<Parameter> {
    let own: Vec<&ShimParameter> = resolve_all(doc, op.parameters());
    let inherited: Vec<&ShimParameter> = resolve_all(doc, item.parameters())
        .into_iter()
        .filter(|p| {
            !own.iter()
                .any(|o| o.name == p.name && o.parameter_in == p.parameter_in)
        })
        .collect();

    own.into_iter()
        .chain(inherited)
        .filter_map(|p| {
            let Some(location) = ParamLocation::from_openapi(&p.parameter_in) else {
                tracing::warn!(
                    "Skipping parameter '{}' with unknown location '{}'",
                    p.name,
                    p.parameter_in
                );
                return None;
            };
            Some(Parameter {
                name: p.name.clone(),
                location,
                required: p.required,
                ty: parameter_type(doc, p),
            })
        })
        .collect()
}

fn resolve_all<'a>(doc: &'a ShimOpenApi, params: &'a [RefOr<ShimParameter>]) -> Vec<&'a ShimParameter> {
    params
        .iter()
        .filter_map(|p| {
            let resolved = doc.resolve_parameter(p);
            if resolved.is_none() {
                tracing::debug!("Skipping unresolvable parameter reference");
            }
            resolved
        })
        .collect()
}
