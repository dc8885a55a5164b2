//! Minimal CLI: load → compile → (definitions | api)
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::config::GenConfig;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// compile a swagger-style schema document into a structural model of types, fields and form controls
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// compile and print the named-definitions model with its export table
    Definitions(DefinitionsOut),
    /// compile and print the per-operation model (params, URLs, responses, forms)
    Api(ApiOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// path to the schema document (JSON)
    #[arg(long, short)]
    input: PathBuf,

    /// leave version and timestamp info out of the document header
    #[arg(long, default_value_t = false)]
    omit_version: bool,
}

#[derive(Parser, Debug)]
struct DefinitionsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(Parser, Debug)]
struct ApiOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// skip form-scaffold (store) model generation
    #[arg(long, default_value_t = false)]
    no_store: bool,

    /// mark single-parameter methods for an additional unwrapped overload
    #[arg(long, default_value_t = false)]
    unwrap_single_param: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> Result<crate::schema::SwaggerDoc> {
        let source = std::fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read schema document {}", self.input.display()))?;
        crate::path_de::load_document(&source).map_err(|err| {
            anyhow!("failed to parse schema document ({}): {err}", self.input.display())
        })
    }

    fn config(&self) -> GenConfig {
        GenConfig {
            omit_version: self.omit_version,
            ..GenConfig::default()
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Definitions(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let doc = target.input_settings.load()?;
                let cfg = target.input_settings.config();
                let compiled = crate::definitions::compile_definitions(&doc.definitions, &cfg);
                let payload = serde_json::json!({
                    "header": crate::header::process_header(&doc, &cfg),
                    "definitions": compiled.index.values().collect::<Vec<_>>(),
                    "exports": compiled.exports,
                });
                write_output(&payload, target.out.as_deref())
            }
            Command::Api(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let doc = target.input_settings.load()?;
                let mut cfg = target.input_settings.config();
                cfg.generate_store = !target.no_store;
                cfg.unwrap_single_param_methods = target.unwrap_single_param;
                let compiled = crate::compile(&doc, &cfg)?;
                write_output(&serde_json::to_value(&compiled)?, target.out.as_deref())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(value: &serde_json::Value, out: Option<&Path>) -> Result<()> {
    let src = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(path, &src)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{}", format!("{} generated", path.display()).green());
        }
        None => println!("{src}"),
    }
    Ok(())
}
