//! Annotator configuration (`annotator.toml`) and the action-taxonomy file.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock RecipeOn / SOMA vocabulary.
//!
//! ```toml
//! [vocabulary]
//! recipe = "http://purl.org/ProductKG/RecipeOn#Recipe"
//!
//! [catalog]
//! source = "both"
//!
//! [catalog.tasks]
//! Whisking = "http://purl.org/ProductKG/recipe-instructions#Whisking"
//!
//! [taxonomy]
//! file = "data/actions_map.json"
//! suppress_self_edges = true
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use recipe_ontology::model::iris;
use recipe_ontology::{Document, TaskCatalog, TaxonomyOptions};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Category label to member verb labels, as read from the taxonomy file.
pub type ActionTaxonomy = BTreeMap<String, Vec<String>>;

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotatorConfig {
    /// IRIs of the predicates and classes the annotator reads and writes.
    pub vocabulary: VocabularyConfig,
    /// How action labels are resolved to task IRIs.
    pub catalog: CatalogConfig,
    /// Action-taxonomy rebuild options.
    pub taxonomy: TaxonomyConfig,
    /// Verb extraction options.
    pub extraction: ExtractionConfig,
    /// Output file naming.
    pub output: OutputConfig,
}

impl AnnotatorConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, does not parse, or
    /// fails validation.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), "loaded annotator config");
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the content does not parse or fails validation.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AnnotatorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every IRI is non-empty and the output suffix is usable.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<()> {
        let v = &self.vocabulary;
        let required = [
            ("vocabulary.id", &v.id),
            ("vocabulary.instructions", &v.instructions),
            ("vocabulary.recipe", &v.recipe),
            ("vocabulary.has_prior_task", &v.has_prior_task),
            ("vocabulary.includes_task", &v.includes_task),
            ("vocabulary.task_root", &v.task_root),
            ("vocabulary.taxonomy_namespace", &v.taxonomy_namespace),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(field.to_owned()));
            }
        }

        if let Some((label, _)) = self.catalog.tasks.iter().find(|(_, iri)| iri.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "catalog.tasks.{label} has an empty IRI"
            )));
        }

        let suffix = &self.output.suffix;
        if suffix.is_empty() || suffix.contains(|c| c == '/' || c == '\\') {
            return Err(ConfigError::Invalid(format!(
                "output.suffix must be a non-empty file name fragment, got {suffix:?}"
            )));
        }
        Ok(())
    }

    /// Builds the label catalog for `doc` according to `catalog.source`.
    #[must_use]
    pub fn task_catalog(&self, doc: &Document) -> TaskCatalog {
        let mut catalog = if self.catalog.include_defaults {
            TaskCatalog::with_defaults()
        } else {
            TaskCatalog::new()
        };
        if matches!(self.catalog.source, CatalogSource::Taxonomy | CatalogSource::Both) {
            let scanned = TaskCatalog::from_taxonomy(doc, &self.vocabulary.task_root);
            if self.catalog.source == CatalogSource::Taxonomy {
                catalog = scanned;
            } else {
                catalog.merge(scanned);
            }
        }
        catalog.merge(
            self.catalog
                .tasks
                .iter()
                .map(|(label, iri)| (label.clone(), iri.clone()))
                .collect(),
        );
        catalog
    }

    /// Taxonomy rebuild options derived from the vocabulary and taxonomy sections.
    #[must_use]
    pub fn taxonomy_options(&self) -> TaxonomyOptions {
        TaxonomyOptions {
            namespace: self.vocabulary.taxonomy_namespace.clone(),
            task_root: self.vocabulary.task_root.clone(),
            suppress_self_edges: self.taxonomy.suppress_self_edges,
        }
    }

    /// Path of the modified document written next to `input`.
    ///
    /// `data/recipes.owl` becomes `data/recipes_modified.owl`.
    #[must_use]
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = match input.extension() {
            Some(ext) => format!("{stem}{}.{}", self.output.suffix, ext.to_string_lossy()),
            None => format!("{stem}{}", self.output.suffix),
        };
        input.with_file_name(name)
    }
}

/// Vocabulary IRIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VocabularyConfig {
    /// Predicate carrying a recipe's external id.
    pub id: String,
    /// Predicate carrying a recipe's instruction text.
    pub instructions: String,
    /// Top recipe class; cleanup covers its subclass closure.
    pub recipe: String,
    /// Property linking a step to the step before it.
    pub has_prior_task: String,
    /// Property linking a recipe to a step it includes.
    pub includes_task: String,
    /// Abstract task class the action taxonomy hangs from.
    pub task_root: String,
    /// Namespace for rebuilt taxonomy classes.
    pub taxonomy_namespace: String,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            id: iris::RECIPE_ID.to_owned(),
            instructions: iris::RECIPE_INSTRUCTIONS.to_owned(),
            recipe: iris::RECIPE.to_owned(),
            has_prior_task: iris::HAS_PRIOR_TASK.to_owned(),
            includes_task: iris::INCLUDES_TASK.to_owned(),
            task_root: iris::DUL_TASK.to_owned(),
            taxonomy_namespace: iris::NS_RECIPE_INSTRUCTIONS.to_owned(),
        }
    }
}

/// Where action labels are resolved from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// The built-in table (plus `catalog.tasks`).
    #[default]
    Table,
    /// Only the classes found below the task root in the document.
    Taxonomy,
    /// The table, overridden by classes found in the document.
    Both,
}

/// Task catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Where labels come from.
    pub source: CatalogSource,
    /// Seed the catalog with the built-in cooking-task table.
    pub include_defaults: bool,
    /// Extra `label = "iri"` entries; they win over every other source.
    pub tasks: BTreeMap<String, String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: CatalogSource::Table,
            include_defaults: true,
            tasks: BTreeMap::new(),
        }
    }
}

/// Action-taxonomy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaxonomyConfig {
    /// JSON file mapping category labels to member verbs.
    pub file: Option<PathBuf>,
    /// Skip a member whose class name equals its category.
    pub suppress_self_edges: bool,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            file: None,
            suppress_self_edges: true,
        }
    }
}

/// Verb extraction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractionConfig {
    /// JSON file of precomputed `{"id", "verbs"}` records; replaces the lexicon extractor.
    pub actions: Option<PathBuf>,
    /// Retry unmatched tokens with common prefixes (`re`, `pre`, ...) removed.
    pub strip_prefixes: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            actions: None,
            strip_prefixes: true,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Appended to the input's file stem.
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: "_modified".to_owned(),
        }
    }
}

/// Reads an action-taxonomy file: a JSON object of `category -> [verb]`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or is not such an object.
pub fn load_taxonomy(path: &Path) -> Result<ActionTaxonomy> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AnnotatorConfig::from_toml("").unwrap();
        assert_eq!(config, AnnotatorConfig::default());
        assert_eq!(config.vocabulary.id, iris::RECIPE_ID);
        assert!(config.taxonomy.suppress_self_edges);
        assert_eq!(config.output.suffix, "_modified");
    }

    #[test]
    fn overrides_are_applied() {
        let config = AnnotatorConfig::from_toml(
            r#"
            [vocabulary]
            recipe = "http://example.org/Dish"

            [catalog]
            source = "both"
            include_defaults = false

            [catalog.tasks]
            Whisking = "http://example.org/Whisking"

            [taxonomy]
            suppress_self_edges = false
            "#,
        )
        .unwrap();
        assert_eq!(config.vocabulary.recipe, "http://example.org/Dish");
        assert_eq!(config.vocabulary.id, iris::RECIPE_ID);
        assert_eq!(config.catalog.source, CatalogSource::Both);
        assert!(!config.taxonomy_options().suppress_self_edges);

        let catalog = config.task_catalog(&Document::new());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.resolve("Whisking"), Some("http://example.org/Whisking"));
    }

    #[test]
    fn empty_iri_is_rejected() {
        let err = AnnotatorConfig::from_toml("[vocabulary]\nid = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(field) if field == "vocabulary.id"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = AnnotatorConfig::from_toml("[output]\nprefix = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_suffix_is_rejected() {
        let err = AnnotatorConfig::from_toml("[output]\nsuffix = \"a/b\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn output_path_keeps_extension() {
        let config = AnnotatorConfig::default();
        assert_eq!(
            config.output_path(Path::new("data/recipes.owl")),
            PathBuf::from("data/recipes_modified.owl")
        );
        assert_eq!(
            config.output_path(Path::new("recipes")),
            PathBuf::from("recipes_modified")
        );
    }

    #[test]
    fn taxonomy_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actions_map.json");
        std::fs::write(&path, r#"{"FoodCutting": ["cut", "slice"], "Mixing": ["mix"]}"#).unwrap();
        let taxonomy = load_taxonomy(&path).unwrap();
        assert_eq!(taxonomy.len(), 2);
        assert_eq!(taxonomy["FoodCutting"], vec!["cut", "slice"]);
    }

    #[test]
    fn malformed_taxonomy_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actions_map.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(load_taxonomy(&path), Err(ConfigError::Json { .. })));
    }
}
