//! Recipe task annotator.
//!
//! This crate drives the restriction graph engine of `recipe-ontology`: it
//! reads a recipe ontology, optionally removes the task restrictions of an
//! earlier run and rebuilds the action taxonomy, extracts ordered action
//! labels from each recipe's instructions, and writes them back as
//! `owl:Restriction` sequences.
//!
//! # Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Cleanup (`--remove`) | [`cleanup`], `recipe_ontology::collector`, `recipe_ontology::taxonomy` |
//! | Recipe enumeration | [`extract::recipes`] |
//! | Label extraction | [`extract::ActionExtractor`] |
//! | Restriction synthesis | [`sequence::build_sequence`] |
//! | Output | `<stem>_modified.<ext>` next to the input |
//!
//! # Entry Point
//!
//! ```no_run
//! use recipe_annotator::{run, AnnotatorConfig, RunOptions};
//! use std::path::PathBuf;
//!
//! let options = RunOptions::new(PathBuf::from("data/recipe-ingredientset.owl"), AnnotatorConfig::default());
//! let outcome = run(&options).expect("annotation run failed");
//! println!("{}", outcome.report.summary());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod config;
pub mod error;
pub mod extract;
pub mod morphology;
pub mod report;
pub mod sequence;

use std::path::PathBuf;

use anyhow::Context;
use recipe_ontology::{
    parser, resolver, serializer, taxonomy, Collector, Document, Format, Node, TaskCatalog,
};

pub use config::{ActionTaxonomy, AnnotatorConfig};
pub use error::ConfigError;
pub use extract::{ActionExtractor, LexiconExtractor, PrecomputedActions, Recipe};
pub use report::{EditReport, Finding, Severity, Stage};

/// Inputs of one annotation run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Ontology document to annotate.
    pub input: PathBuf,
    /// Remove earlier restrictions and rebuild the taxonomy first, rewriting `input`.
    pub remove: bool,
    /// Document format; inferred from the extension when `None`.
    pub format: Option<Format>,
    /// Action-taxonomy file; overrides `config.taxonomy.file`.
    pub taxonomy: Option<PathBuf>,
    /// Precomputed actions file; overrides `config.extraction.actions`.
    pub actions: Option<PathBuf>,
    /// Loaded configuration.
    pub config: AnnotatorConfig,
}

impl RunOptions {
    /// Options for a plain annotation run of `input`.
    #[must_use]
    pub fn new(input: PathBuf, config: AnnotatorConfig) -> Self {
        Self {
            input,
            remove: false,
            format: None,
            taxonomy: None,
            actions: None,
            config,
        }
    }
}

/// Result of [`run`].
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Findings and counters.
    pub report: EditReport,
    /// Where the annotated document was written.
    pub output: PathBuf,
}

/// Runs the whole pipeline on `options.input`.
///
/// Order:
/// 1. Load the document
/// 2. With `remove`: [`cleanup`], then overwrite the input with the result
/// 3. Build the task catalog and enumerate recipes
/// 4. Extract labels and [`annotate`]
/// 5. Write `<stem>_modified.<ext>`
///
/// Unknown recipe ids and unmapped labels become warnings in the report.
///
/// # Errors
///
/// Returns an error if a file cannot be read, parsed, or written.
pub fn run(options: &RunOptions) -> anyhow::Result<RunOutcome> {
    let config = &options.config;
    let input = &options.input;
    let format = match options.format {
        Some(format) => format,
        None => Format::detect(input)?,
    };

    let mut doc = parser::load(input, Some(format))
        .with_context(|| format!("loading {}", input.display()))?;
    let mut report = EditReport::new();

    if options.remove {
        let taxonomy_file = options.taxonomy.as_ref().or(config.taxonomy.file.as_ref());
        let action_taxonomy = taxonomy_file
            .map(|path| config::load_taxonomy(path))
            .transpose()
            .context("loading the action taxonomy")?;
        report.extend(cleanup(&mut doc, config, action_taxonomy.as_ref()));
        serializer::write_file(&doc, format, input)
            .with_context(|| format!("rewriting {}", input.display()))?;
        report.push(Finding::info(
            Stage::Write,
            format!("cleaned document written back to {}", input.display()),
        ));
    }

    let catalog = config.task_catalog(&doc);
    let recipes = extract::recipes(&doc, &config.vocabulary, &mut report);
    report.push(Finding::info(
        Stage::Extract,
        format!("{} recipes, {} known task labels", recipes.len(), catalog.len()),
    ));

    let actions_file = options.actions.as_ref().or(config.extraction.actions.as_ref());
    let extractor: Box<dyn ActionExtractor> = match actions_file {
        Some(path) => Box::new(PrecomputedActions::from_file(path)?),
        None => Box::new(
            LexiconExtractor::new(catalog.labels())
                .context("compiling the word pattern")?
                .with_prefix_stripping(config.extraction.strip_prefixes),
        ),
    };

    report.extend(annotate(&mut doc, &recipes, extractor.as_ref(), &catalog, config)?);

    let output = config.output_path(input);
    serializer::write_file(&doc, format, &output)
        .with_context(|| format!("writing {}", output.display()))?;
    report.push(Finding::info(
        Stage::Write,
        format!("modified ontology saved to {}", output.display()),
    ));

    Ok(RunOutcome { report, output })
}

/// Removes every task restriction below the top recipe class and, when a
/// taxonomy is given, rebuilds the action taxonomy from it.
pub fn cleanup(
    doc: &mut Document,
    config: &AnnotatorConfig,
    action_taxonomy: Option<&ActionTaxonomy>,
) -> EditReport {
    let vocab = &config.vocabulary;
    let mut report = EditReport::new();

    let collector = Collector::new(&[vocab.has_prior_task.as_str(), vocab.includes_task.as_str()]);
    report.collected = collector.collect_closure(doc, &Node::named(&vocab.recipe));
    report.push(Finding::info(
        Stage::Cleanup,
        format!(
            "removed {} restrictions and {} expressions below {}",
            report.collected.restrictions, report.collected.expressions, vocab.recipe
        ),
    ));

    match action_taxonomy {
        Some(categories) => {
            let stats = taxonomy::rebuild(
                doc,
                categories.iter().map(|(k, v)| (k.as_str(), v.as_slice())),
                &config.taxonomy_options(),
                morphology::to_participle,
            );
            report.push(Finding::info(
                Stage::Cleanup,
                format!(
                    "action taxonomy rebuilt: {} old classes removed, {} categories, {} members",
                    stats.removed, stats.categories, stats.members
                ),
            ));
            if stats.self_edges_suppressed > 0 {
                report.push(Finding::info(
                    Stage::Cleanup,
                    format!("{} self-referential taxonomy edges skipped", stats.self_edges_suppressed),
                ));
            }
        }
        None => report.push(Finding::warn(
            Stage::Cleanup,
            "no action taxonomy configured; taxonomy left unchanged",
        )),
    }
    report
}

/// Attaches the label sequence of every recipe to its class.
///
/// # Errors
///
/// Returns an error only if the restriction builder fails.
pub fn annotate(
    doc: &mut Document,
    recipes: &[Recipe],
    extractor: &dyn ActionExtractor,
    catalog: &TaskCatalog,
    config: &AnnotatorConfig,
) -> anyhow::Result<EditReport> {
    let vocab = &config.vocabulary;
    let mut report = EditReport::new();

    for recipe in recipes {
        report.recipes_seen += 1;
        let Some(class) = resolver::find_by_external_id(doc, &vocab.id, &recipe.id) else {
            report.recipes_skipped += 1;
            report.push(Finding::warn(
                Stage::Annotate,
                format!("no class carries id {}; skipping", recipe.id),
            ));
            continue;
        };

        let labels = extractor.extract(recipe);
        let outcome = sequence::build_sequence(doc, &class, &labels, catalog, vocab)
            .with_context(|| format!("annotating recipe {}", recipe.id))?;
        for skip in &outcome.skipped {
            report.push(Finding::warn(
                Stage::Annotate,
                format!("recipe {}: {}", recipe.id, skip.describe()),
            ));
        }
        if outcome.wrote_anything() {
            report.recipes_annotated += 1;
        }
        report.singles += outcome.singles;
        report.intersections += outcome.intersections;
        tracing::debug!(
            recipe = %recipe.id,
            labels = labels.len(),
            singles = outcome.singles,
            intersections = outcome.intersections,
            "annotated recipe"
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests_unit {
    use super::*;
    use recipe_ontology::fixtures;
    use recipe_ontology::model::iris;

    fn recipes_doc() -> Document {
        parser::parse_str(fixtures::RECIPES, Format::Turtle).unwrap()
    }

    #[test]
    fn annotate_then_cleanup_restores_document() {
        let mut doc = recipes_doc();
        let before = doc.clone();
        let config = AnnotatorConfig::default();
        let catalog = config.task_catalog(&doc);
        let mut report = EditReport::new();
        let recipes = extract::recipes(&doc, &config.vocabulary, &mut report);
        let extractor = LexiconExtractor::new(catalog.labels()).unwrap();

        let annotated = annotate(&mut doc, &recipes, &extractor, &catalog, &config).unwrap();
        assert_eq!(annotated.recipes_annotated, 2);
        assert_eq!(annotated.singles, 2);
        assert_eq!(annotated.intersections, 2);
        assert_ne!(doc, before);

        let cleaned = cleanup(&mut doc, &config, None);
        assert_eq!(cleaned.collected.restrictions, 6);
        assert_eq!(doc, before);
        assert_eq!(cleaned.warnings().count(), 1);
    }

    #[test]
    fn unknown_recipe_is_a_warning() {
        let mut doc = recipes_doc();
        let config = AnnotatorConfig::default();
        let catalog = config.task_catalog(&doc);
        let recipes = vec![Recipe {
            id: "999".to_owned(),
            instructions: "Cut.".to_owned(),
        }];
        let extractor = LexiconExtractor::new(catalog.labels()).unwrap();
        let report = annotate(&mut doc, &recipes, &extractor, &catalog, &config).unwrap();
        assert_eq!(report.recipes_skipped, 1);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn unknown_verb_breaks_the_pairing_around_it() {
        let mut doc = recipes_doc();
        let config = AnnotatorConfig::default();
        let catalog = config.task_catalog(&doc);
        let recipes = vec![Recipe {
            id: "42".to_owned(),
            instructions: "Cut the onions. Heat the pan. Mix the batter.".to_owned(),
        }];
        let extractor = LexiconExtractor::new(catalog.labels()).unwrap();
        let report = annotate(&mut doc, &recipes, &extractor, &catalog, &config).unwrap();

        assert_eq!(report.singles, 1);
        assert_eq!(report.intersections, 0);
        let warnings: Vec<&str> = report.warnings().map(|f| f.message.as_str()).collect();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("'Heating' (step 1)"));
        assert!(warnings[1].contains("'Heating' before 'Mixing'"));
    }

    #[test]
    fn cleanup_rebuilds_taxonomy() {
        let mut doc = recipes_doc();
        let config = AnnotatorConfig::default();
        let mut taxonomy = ActionTaxonomy::new();
        taxonomy.insert("FoodMixing".to_owned(), vec!["mix".to_owned(), "blend".to_owned()]);

        let report = cleanup(&mut doc, &config, Some(&taxonomy));
        assert_eq!(report.warning_count(), 0);

        let ns = |name: &str| Node::named(&format!("{}{name}", iris::NS_RECIPE_INSTRUCTIONS));
        assert!(doc.outgoing(&ns("FoodCutting")).is_empty());
        assert!(doc.contains(&ns("Blending"), iris::RDFS_SUBCLASS_OF, &ns("FoodMixing")));
        assert!(doc.contains(&ns("FoodMixing"), iris::RDFS_SUBCLASS_OF, &Node::named(iris::DUL_TASK)));
    }
}
