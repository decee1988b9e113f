#![deny(missing_docs)]

//! # Generate Command
//!
//! Builds the generation model from an OpenAPI document and writes the render
//! plan JSON files consumed by the template renderer.

use std::io::Write;
use std::path::PathBuf;

use actorgen_core::{parse_generation_model_from_path, ParserOptions, RenderConfig, RenderPlan};

use crate::error::CliResult;

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    pub openapi: PathBuf,

    /// Directory receiving one sub-directory per package.
    pub output_dir: PathBuf,

    /// Package name for types shared by several actors.
    #[clap(long, env = "ACTORGEN_SHARED_PACKAGE", default_value = "types")]
    pub shared_package: String,

    /// Suffix appended to actor package names that lack it.
    #[clap(long, env = "ACTORGEN_PACKAGE_SUFFIX", default_value = "actor")]
    pub package_suffix: String,

    /// Fail instead of deriving an actor from the title when no operation is tagged.
    #[clap(long)]
    pub no_title_fallback: bool,
}

impl GenerateArgs {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            shared_package: self.shared_package.clone(),
            package_suffix: self.package_suffix.clone(),
            ..RenderConfig::default()
        }
    }
}

/// Executes the generation, reporting each written file on `out`.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `out` - Destination of the progress report (stdout in the binary).
pub fn execute(args: &GenerateArgs, out: &mut impl Write) -> CliResult<Vec<PathBuf>> {
    let options = ParserOptions {
        title_fallback: !args.no_title_fallback,
    };

    let model = parse_generation_model_from_path(&args.openapi, options)?;
    let plan = RenderPlan::new(&model, &args.render_config())?;
    let written = plan.write_json(&args.output_dir)?;

    tracing::info!(
        actors = model.actors.len(),
        shared = model.shared_types.len(),
        "generation model written"
    );

    for path in &written {
        writeln!(out, "Generated {}", path.display())?;
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use actorgen_core::AppError;
    use std::fs;
    use tempfile::tempdir;

    const DOCUMENT: &str = r#"
openapi: 3.0.3
info: { title: Counter API, version: "1.0" }
paths:
  /{actorId}/method/get:
    get:
      tags: ["ActorType:CounterActor"]
      responses:
        "200":
          description: OK
          content:
            application/json:
              schema: { $ref: '#/components/schemas/CounterState' }
components:
  schemas:
    CounterState:
      type: object
      properties: { value: { type: integer } }
"#;

    fn args(openapi: PathBuf, output_dir: PathBuf) -> GenerateArgs {
        GenerateArgs {
            openapi,
            output_dir,
            shared_package: "types".into(),
            package_suffix: "actor".into(),
            no_title_fallback: false,
        }
    }

    #[test]
    fn test_generate_writes_plan() {
        let dir = tempdir().unwrap();
        let doc_path = dir.path().join("openapi.yaml");
        fs::write(&doc_path, DOCUMENT).unwrap();
        let out_dir = dir.path().join("out");

        let mut report = Vec::new();
        let written = execute(&args(doc_path, out_dir.clone()), &mut report).unwrap();

        assert_eq!(written.len(), 2);
        assert!(out_dir.join("counteractor/types.json").exists());
        assert!(out_dir.join("counteractor/api.json").exists());
        // No shared types, so no shared package.
        assert!(!out_dir.join("types").exists());

        let report = String::from_utf8(report).unwrap();
        assert_eq!(report.lines().count(), 2);
        assert!(report.contains("api.json"));
    }

    #[test]
    fn test_generate_missing_input() {
        let dir = tempdir().unwrap();
        let result = execute(
            &args(dir.path().join("missing.yaml"), dir.path().join("out")),
            &mut Vec::new(),
        );
        assert!(matches!(result, Err(CliError::App(AppError::Io(_)))));
    }

    #[test]
    fn test_generate_without_fallback() {
        let dir = tempdir().unwrap();
        let doc_path = dir.path().join("openapi.yaml");
        fs::write(
            &doc_path,
            "openapi: 3.0.3\ninfo: { title: Widget Service, version: '1' }\npaths:\n  /{actorId}/method/spin:\n    post: { responses: {} }\n",
        )
        .unwrap();

        let mut strict = args(doc_path, dir.path().join("out"));
        strict.no_title_fallback = true;
        let result = execute(&strict, &mut Vec::new());
        assert!(matches!(result, Err(CliError::App(AppError::NoActorTypes))));
    }
}
