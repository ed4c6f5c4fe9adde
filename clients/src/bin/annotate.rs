//! `recipe-annotate`: annotates recipe classes with ordered task restrictions.
//!
//! Reads an OWL recipe ontology, extracts the cooking actions of each recipe's
//! instructions, and writes them as `owl:Restriction` sequences to
//! `<stem>_modified.<ext>` next to the input.
//!
//! **Usage:**
//! ```text
//! recipe-annotate [--file-path <path>] [-r] [--config <toml>] [--taxonomy <json>]
//!                 [--actions <json>] [--format <owl|ttl|nt>] [-v]
//! ```
//!
//! With `-r`, restrictions from earlier runs are removed and the action
//! taxonomy is rebuilt first; the input file is overwritten with the cleaned
//! document. Two runs against the same file at once are last-writer-wins.
//!
//! Unknown recipe ids and unmapped action labels are reported as warnings
//! and never fail the run.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use recipe_annotator::{run, AnnotatorConfig, RunOptions};
use recipe_ontology::Format;
use tracing_subscriber::EnvFilter;

const DEFAULT_ONTOLOGY: &str = "data/recipe-ingredientset.owl";

/// Annotate recipe classes with the tasks found in their instructions.
#[derive(Parser)]
#[command(
    name = "recipe-annotate",
    about = "Extract cooking actions from recipe instructions into OWL restrictions"
)]
struct Args {
    /// Ontology file to process.
    #[arg(long = "file-path", default_value = DEFAULT_ONTOLOGY)]
    file_path: PathBuf,

    /// Remove previously added task restrictions (and rebuild the action taxonomy) first.
    #[arg(short, long)]
    remove: bool,

    /// Annotator configuration (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Action taxonomy (JSON object of category -> verbs), used with --remove.
    #[arg(long)]
    taxonomy: Option<PathBuf>,

    /// Precomputed actions (JSON array of {"id", "verbs"}) instead of the built-in extractor.
    #[arg(long)]
    actions: Option<PathBuf>,

    /// Document format; inferred from the file extension by default.
    #[arg(long)]
    format: Option<String>,

    /// Log per-recipe detail.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => AnnotatorConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AnnotatorConfig::default(),
    };
    let format = args
        .format
        .as_deref()
        .map(|name| Format::from_name(name).ok_or_else(|| anyhow!("unknown format '{name}'")))
        .transpose()?;

    let options = RunOptions {
        input: args.file_path,
        remove: args.remove,
        format,
        taxonomy: args.taxonomy,
        actions: args.actions,
        config,
    };
    let outcome = run(&options)?;
    let report = &outcome.report;

    println!("Recipe Annotation Report");
    println!("========================");
    println!();
    for finding in &report.findings {
        println!("{finding}");
    }
    println!();
    println!("{}", report.summary());
    println!("Output: {}", outcome.output.display());

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
