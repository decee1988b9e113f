#![deny(missing_docs)]

//! # Inspect Command
//!
//! Prints where every type was placed, or the whole model as JSON.

use std::io::Write;
use std::path::PathBuf;

use actorgen_core::{parse_generation_model_from_path, GenerationModel, ParserOptions, TypeCollection};

use crate::error::CliResult;

/// Arguments for the inspect command.
#[derive(clap::Args, Debug, Clone)]
pub struct InspectArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    pub openapi: PathBuf,

    /// Print the full generation model as JSON.
    #[clap(long)]
    pub json: bool,
}

/// Executes the inspection, writing the report to `out`.
pub fn execute(args: &InspectArgs, out: &mut impl Write) -> CliResult<()> {
    let model = parse_generation_model_from_path(&args.openapi, ParserOptions::default())?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &model)?;
        writeln!(out)?;
    } else {
        write_summary(&model, out)?;
    }
    Ok(())
}

fn write_summary(model: &GenerationModel, out: &mut impl Write) -> CliResult<()> {
    if let Some(title) = &model.title {
        writeln!(out, "{}", title)?;
    }
    for actor in &model.actors {
        writeln!(
            out,
            "{} ({}, {} methods)",
            actor.actor_type,
            actor.interface_name,
            actor.methods.len()
        )?;
        for method in &actor.methods {
            let request = method
                .request
                .as_ref()
                .map(|r| r.to_string())
                .unwrap_or_default();
            writeln!(
                out,
                "  {} {} {}({}) -> {}",
                method.http_verb, method.path, method.name, request, method.return_type
            )?;
        }
        writeln!(out, "  private: {}", type_list(&actor.types))?;
    }
    writeln!(out, "shared: {}", type_list(&model.shared_types))?;
    Ok(())
}

fn type_list(types: &TypeCollection) -> String {
    if types.is_empty() {
        "-".to_string()
    } else {
        types.names().collect::<Vec<_>>().join(", ")
    }
}
