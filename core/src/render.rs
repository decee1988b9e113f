#![deny(missing_docs)]

//! # Render Plan
//!
//! Projects a [`GenerationModel`] into per-package template data for an
//! external renderer, and writes that data as JSON files:
//!
//! - `<package>/<types_file>.json` for each actor's private types,
//! - `<package>/<interface_file>.json` for each actor interface,
//! - `<shared_package>/<types_file>.json` when shared types exist.

use crate::error::{AppError, AppResult};
use crate::extract::naming::package_name;
use crate::model::{Actor, GenerationModel, Method, TypeCollection};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Package naming and file layout of the rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Package holding shared types.
    pub shared_package: String,
    /// Suffix appended to actor package names when absent.
    pub package_suffix: String,
    /// File stem of type definitions.
    pub types_file: String,
    /// File stem of interface definitions.
    pub interface_file: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shared_package: "types".to_string(),
            package_suffix: "actor".to_string(),
            types_file: "types".to_string(),
            interface_file: "api".to_string(),
        }
    }
}

impl RenderConfig {
    /// Package name of an actor.
    pub fn package_name(&self, actor_type: &str) -> String {
        package_name(actor_type, &self.package_suffix)
    }
}

/// The constant identifying an actor type at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorTypeConstant {
    /// Identifier, e.g. `ActorTypeCounterActor`.
    pub ident: String,
    /// Value, the actor type name.
    pub value: String,
}

impl ActorTypeConstant {
    /// Builds the constant for `actor_type`.
    pub fn for_actor(actor_type: &str) -> Self {
        Self {
            ident: format!("ActorType{}", actor_type),
            value: actor_type.to_string(),
        }
    }
}

/// Everything needed to render one actor package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorPackagePlan {
    /// Package name.
    pub package_name: String,
    /// Actor type constant.
    pub actor_type_constant: ActorTypeConstant,
    /// The actor, including its private types.
    pub actor: Actor,
    /// Shared type names referenced by the actor's methods or private types, sorted.
    pub shared_imports: Vec<String>,
}

/// The shared types package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedPackagePlan {
    /// Package name.
    pub package_name: String,
    /// Shared structs and aliases.
    pub types: TypeCollection,
}

/// Data of an actor's types file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypesTemplateData<'a> {
    /// Package name.
    pub package_name: &'a str,
    /// Shared package to import, present only when a shared type is referenced.
    pub shared_package: Option<&'a str>,
    /// Shared type names referenced.
    pub shared_imports: &'a [String],
    /// Private types.
    pub types: &'a TypeCollection,
}

/// Data of an actor's interface file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceTemplateData<'a> {
    /// Package name.
    pub package_name: &'a str,
    /// Shared package to import, present only when a shared type is referenced.
    pub shared_package: Option<&'a str>,
    /// Shared type names referenced.
    pub shared_imports: &'a [String],
    /// Actor type constant.
    pub actor_type_constant: &'a ActorTypeConstant,
    /// Actor type.
    pub actor_type: &'a str,
    /// Interface name.
    pub interface_name: &'a str,
    /// Interface description.
    pub description: &'a str,
    /// Methods in declaration order.
    pub methods: &'a [Method],
}

/// The complete plan handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    /// Configuration the plan was built with.
    pub config: RenderConfig,
    /// One plan per actor, in model order.
    pub actors: Vec<ActorPackagePlan>,
    /// Present only when the shared collection is non-empty.
    pub shared: Option<SharedPackagePlan>,
}

impl RenderPlan {
    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::General`] when two actors map to the same package, or an
    /// actor package collides with the shared package.
    pub fn new(model: &GenerationModel, config: &RenderConfig) -> AppResult<Self> {
        let mut packages: BTreeSet<String> = BTreeSet::new();
        if !model.shared_types.is_empty() {
            packages.insert(config.shared_package.clone());
        }

        let mut actors = Vec::with_capacity(model.actors.len());
        for actor in &model.actors {
            let pkg = config.package_name(&actor.actor_type);
            if !packages.insert(pkg.clone()) {
                return Err(AppError::General(format!(
                    "Package name '{}' for actor '{}' is already in use",
                    pkg, actor.actor_type
                )));
            }
            actors.push(ActorPackagePlan {
                actor_type_constant: ActorTypeConstant::for_actor(&actor.actor_type),
                shared_imports: shared_imports(actor, &model.shared_types),
                package_name: pkg,
                actor: actor.clone(),
            });
        }

        let shared = if model.shared_types.is_empty() {
            None
        } else {
            Some(SharedPackagePlan {
                package_name: config.shared_package.clone(),
                types: model.shared_types.clone(),
            })
        };

        Ok(Self {
            config: config.clone(),
            actors,
            shared,
        })
    }

    /// Writes every plan file below `output_dir` and returns the written paths.
    pub fn write_json(&self, output_dir: &Path) -> AppResult<Vec<PathBuf>> {
        let mut written = Vec::new();

        for plan in &self.actors {
            let dir = output_dir.join(&plan.package_name);
            fs::create_dir_all(&dir)?;

            let shared_package = (!plan.shared_imports.is_empty())
                .then_some(self.config.shared_package.as_str());

            let types = TypesTemplateData {
                package_name: &plan.package_name,
                shared_package,
                shared_imports: &plan.shared_imports,
                types: &plan.actor.types,
            };
            written.push(write_file(&dir, &self.config.types_file, &types)?);

            let interface = InterfaceTemplateData {
                package_name: &plan.package_name,
                shared_package,
                shared_imports: &plan.shared_imports,
                actor_type_constant: &plan.actor_type_constant,
                actor_type: &plan.actor.actor_type,
                interface_name: &plan.actor.interface_name,
                description: &plan.actor.description,
                methods: &plan.actor.methods,
            };
            written.push(write_file(&dir, &self.config.interface_file, &interface)?);
        }

        if let Some(shared) = &self.shared {
            let dir = output_dir.join(&shared.package_name);
            fs::create_dir_all(&dir)?;
            written.push(write_file(&dir, &self.config.types_file, shared)?);
        }

        Ok(written)
    }
}

/// Shared type names an actor references, directly or from its private types.
fn shared_imports(actor: &Actor, shared: &TypeCollection) -> Vec<String> {
    let referenced: BTreeSet<&str> = actor
        .methods
        .iter()
        .flat_map(|m| m.type_refs())
        .filter_map(|t| t.referenced_name())
        .chain(actor.types.referenced_names())
        .filter(|name| shared.contains(name))
        .collect();
    referenced.into_iter().map(String::from).collect()
}

fn write_file<T: Serialize>(dir: &Path, stem: &str, data: &T) -> AppResult<PathBuf> {
    let path = dir.join(format!("{}.json", stem));
    let mut json = serde_json::to_string_pretty(data)?;
    json.push('\n');
    fs::write(&path, json)?;
    tracing::debug!("Wrote {}", path.display());
    Ok(path)
}
