#![deny(missing_docs)]

//! # Parser Module
//!
//! Runs the whole pipeline over a loaded document:
//! type extraction and actor extraction, usage analysis, placement, and
//! assembly of the immutable [`GenerationModel`].
//!
//! Any hard error aborts the run; no partial model is returned.

use crate::analysis::{analyze_usage, categorize};
use crate::error::AppResult;
use crate::extract::{extract_actors, extract_types};
use crate::model::{Actor, GenerationModel, TypeDef};
use crate::oas::{load_document, load_document_from_path, ShimOpenApi};
use std::path::Path;

/// Options controlling model construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Derive a single actor from the document title when no operation is tagged.
    pub title_fallback: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            title_fallback: true,
        }
    }
}

/// Builds a [`GenerationModel`] from one document.
pub struct OpenApiParser<'a> {
    doc: &'a ShimOpenApi,
    options: ParserOptions,
}

impl<'a> OpenApiParser<'a> {
    /// Creates a parser with default options.
    pub fn new(doc: &'a ShimOpenApi) -> Self {
        Self::with_options(doc, ParserOptions::default())
    }

    /// Creates a parser with explicit options.
    pub fn with_options(doc: &'a ShimOpenApi, options: ParserOptions) -> Self {
        Self { doc, options }
    }

    /// Runs extraction, analysis and placement.
    pub fn parse(&self) -> AppResult<GenerationModel> {
        let types = extract_types(self.doc);
        let actors = extract_actors(self.doc, &self.options)?;
        tracing::debug!(
            "Extracted {} types and {} actors",
            types.len(),
            actors.len()
        );
        Ok(assemble(self.doc.title().map(String::from), types, actors))
    }
}

/// Places `types` by their usage among `actors` and builds the final model.
///
/// Actor order and type order are preserved.
pub fn assemble(title: Option<String>, types: Vec<TypeDef>, actors: Vec<Actor>) -> GenerationModel {
    let usage = analyze_usage(&types, &actors);
    let mut plan = categorize(types, &usage);

    let actors = actors
        .into_iter()
        .map(|mut actor| {
            actor.types = plan.take_private(&actor.actor_type);
            actor
        })
        .collect();

    GenerationModel {
        title,
        actors,
        shared_types: plan.shared,
    }
}

/// Loads a document from a string and builds its model with default options.
pub fn parse_generation_model(content: &str) -> AppResult<GenerationModel> {
    let doc = load_document(content)?;
    OpenApiParser::new(&doc).parse()
}

/// Loads a document from disk and builds its model.
pub fn parse_generation_model_from_path(
    path: &Path,
    options: ParserOptions,
) -> AppResult<GenerationModel> {
    let doc = load_document_from_path(path)?;
    OpenApiParser::with_options(&doc, options).parse()
}
