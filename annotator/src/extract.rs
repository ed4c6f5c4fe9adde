//! Recipe enumeration and action-label extraction.
//!
//! [`recipes`] lists the recipes a document describes. An [`ActionExtractor`]
//! turns a recipe's instruction text into an ordered list of action labels;
//! two implementations ship with the crate:
//!
//! - [`LexiconExtractor`]: matches instruction words against known gerund labels
//! - [`PrecomputedActions`]: replays labels produced by an external tool

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use recipe_ontology::{resolver, Document};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::VocabularyConfig;
use crate::error::{ConfigError, Result};
use crate::morphology::{candidate_lemmas, strip_prefixes, to_participle};
use crate::report::{EditReport, Finding, Stage};

/// A recipe found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// External identifier (the lexical form of the id literal).
    pub id: String,
    /// Free-text instructions.
    pub instructions: String,
}

/// Lists every subject carrying an instructions literal, in document order.
///
/// Subjects without an id literal are skipped with a warning.
pub fn recipes(doc: &Document, vocab: &VocabularyConfig, report: &mut EditReport) -> Vec<Recipe> {
    let mut out = Vec::new();
    for triple in doc.with_predicate(&vocab.instructions) {
        let Some(instructions) = triple.object.lexical() else {
            continue;
        };
        match resolver::external_id(doc, &vocab.id, &triple.subject) {
            Some(id) => out.push(Recipe {
                id,
                instructions: instructions.to_owned(),
            }),
            None => report.push(Finding::warn(
                Stage::Extract,
                format!("{} has instructions but no id; skipping", triple.subject),
            )),
        }
    }
    out
}

/// Produces the ordered action labels of a recipe.
pub trait ActionExtractor {
    /// Returns the labels for `recipe`, in instruction order.
    fn extract(&self, recipe: &Recipe) -> Vec<String>;
}

/// Picks the action verbs out of instruction text.
///
/// Instructions are split into sentences on `.` and clauses on `,` and `;`.
/// Each lowercase word is reduced to candidate lemmas, each lemma is turned
/// into its gerund with [`to_participle`], and the first gerund present in
/// the lexicon is kept. The word opening an imperative clause (`Heat the pan`)
/// is a verb even when the lexicon does not know it; its gerund is emitted as
/// is and left for the catalog to reject. A clause opening with a preposition
/// (`In a bowl`) has no such word. A label appears at most once per sentence.
#[derive(Debug, Clone)]
pub struct LexiconExtractor {
    lexicon: BTreeSet<String>,
    strip_prefixes: bool,
    word: Regex,
}

impl LexiconExtractor {
    /// Creates an extractor recognizing `labels`.
    ///
    /// # Errors
    ///
    /// Returns an error if the word pattern fails to compile.
    pub fn new<I, S>(labels: I) -> std::result::Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            lexicon: labels.into_iter().map(Into::into).collect(),
            strip_prefixes: false,
            word: Regex::new(r"[a-z]+")?,
        })
    }

    /// Also tries each word with a common prefix removed (`reheat` → `heat`).
    #[must_use]
    pub fn with_prefix_stripping(mut self, enabled: bool) -> Self {
        self.strip_prefixes = enabled;
        self
    }

    fn label_for(&self, word: &str) -> Option<String> {
        let direct = self.match_word(word);
        if direct.is_some() || !self.strip_prefixes {
            return direct;
        }
        strip_prefixes(word)
            .into_iter()
            .find_map(|rest| self.match_word(rest))
    }

    fn match_word(&self, word: &str) -> Option<String> {
        candidate_lemmas(word)
            .iter()
            .map(|lemma| to_participle(lemma))
            .find(|label| self.lexicon.contains(label))
    }
}

impl ActionExtractor for LexiconExtractor {
    fn extract(&self, recipe: &Recipe) -> Vec<String> {
        let text = recipe.instructions.to_lowercase();
        let mut labels = Vec::new();
        for sentence in text.split('.') {
            let mut found: Vec<String> = Vec::new();
            for clause in sentence.split(|c: char| c == ',' || c == ';') {
                let words: Vec<&str> = self.word.find_iter(clause).map(|m| m.as_str()).collect();
                let opener = imperative_opener(&words);
                for (index, word) in words.iter().enumerate() {
                    let label = match self.label_for(word) {
                        Some(label) => label,
                        None if opener == Some(index) => to_participle(word),
                        None => continue,
                    };
                    if !found.contains(&label) {
                        found.push(label);
                    }
                }
            }
            labels.extend(found);
        }
        tracing::debug!(recipe = %recipe.id, labels = labels.len(), "extracted actions");
        labels
    }
}

/// Adverbs and connectives skipped before a clause's verb.
const LEADING_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "then", "now", "next", "first", "finally", "meanwhile",
    "also", "again", "gently", "carefully", "quickly", "slowly", "lightly", "well",
];

/// Words that open a clause with no imperative verb.
const NON_VERB_OPENERS: &[&str] = &[
    "in", "on", "into", "onto", "with", "for", "at", "from", "over", "under", "until", "when",
    "while", "after", "before", "if", "once", "it", "this", "they", "you", "serves", "makes",
];

/// Index of the word an imperative clause opens with.
fn imperative_opener(words: &[&str]) -> Option<usize> {
    let (index, word) = words
        .iter()
        .enumerate()
        .find(|(_, word)| !LEADING_WORDS.contains(*word))?;
    (!NON_VERB_OPENERS.contains(word)).then_some(index)
}

/// One record of a precomputed actions file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Recipe id.
    pub id: String,
    /// Ordered action labels.
    pub verbs: Vec<String>,
}

/// Labels produced ahead of time, keyed by recipe id.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedActions {
    by_id: HashMap<String, Vec<String>>,
}

impl PrecomputedActions {
    /// Builds the table from records; a repeated id keeps its last record.
    #[must_use]
    pub fn from_records(records: Vec<ActionRecord>) -> Self {
        Self {
            by_id: records.into_iter().map(|r| (r.id, r.verbs)).collect(),
        }
    }

    /// Reads a JSON array of `{"id": ..., "verbs": [...]}` records.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<ActionRecord> =
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(path = %path.display(), records = records.len(), "loaded precomputed actions");
        Ok(Self::from_records(records))
    }

    /// Number of recipes with labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if no recipe has labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl ActionExtractor for PrecomputedActions {
    fn extract(&self, recipe: &Recipe) -> Vec<String> {
        self.by_id.get(&recipe.id).cloned().unwrap_or_default()
    }
}
