//! Ordered action labels to restriction subgraphs.
//!
//! For labels `L0, L1, ..., Ln` attached to class `C`:
//!
//! | Step | Written |
//! |------|---------|
//! | 0 | `C ⊑ ∃includes_task.L0` |
//! | i > 0 | `C ⊑ (∃has_prior_task.L(i-1) ⊓ ∃includes_task.Li)` |
//!
//! A step whose label, or whose predecessor's label, does not resolve in the
//! catalog is skipped. Unresolved labels stay in the sequence, so they still
//! break the pairing of the step after them.

use recipe_ontology::{restriction, Document, Node, TaskCatalog};

use crate::config::VocabularyConfig;

/// Why a step produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The step's own label is not in the catalog.
    Unmapped,
    /// The previous step's label is not in the catalog.
    PriorUnmapped(String),
}

/// A step that produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    /// Position of the step in the label list.
    pub index: usize,
    /// The step's label.
    pub label: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

impl Skip {
    /// Human-readable description, used for report findings.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.reason {
            SkipReason::Unmapped => format!(
                "task '{}' (step {}) is not in the task catalog; skipping",
                self.label, self.index
            ),
            SkipReason::PriorUnmapped(prior) => format!(
                "task '{prior}' before '{}' (step {}) is not in the task catalog; skipping",
                self.label, self.index
            ),
        }
    }
}

/// What [`build_sequence`] wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceOutcome {
    /// Single restrictions written (0 or 1).
    pub singles: usize,
    /// Intersection expressions written.
    pub intersections: usize,
    /// Skipped steps, in order.
    pub skipped: Vec<Skip>,
}

impl SequenceOutcome {
    /// Returns true if at least one restriction was written.
    #[must_use]
    pub fn wrote_anything(&self) -> bool {
        self.singles + self.intersections > 0
    }
}

/// Attaches the restriction sequence for `labels` to `target`.
///
/// # Errors
///
/// Propagates restriction builder errors; none are expected for
/// two-element intersections.
pub fn build_sequence(
    doc: &mut Document,
    target: &Node,
    labels: &[String],
    catalog: &TaskCatalog,
    vocab: &VocabularyConfig,
) -> recipe_ontology::Result<SequenceOutcome> {
    let mut outcome = SequenceOutcome::default();

    for (index, label) in labels.iter().enumerate() {
        let skip = |reason| Skip {
            index,
            label: label.clone(),
            reason,
        };
        let Some(task) = catalog.resolve(label) else {
            outcome.skipped.push(skip(SkipReason::Unmapped));
            continue;
        };

        if index == 0 {
            restriction::build_single(doc, target, &vocab.includes_task, task);
            outcome.singles += 1;
            continue;
        }

        let prior = &labels[index - 1];
        let Some(prior_task) = catalog.resolve(prior) else {
            outcome.skipped.push(skip(SkipReason::PriorUnmapped(prior.clone())));
            continue;
        };
        restriction::build_intersection(
            doc,
            target,
            &[
                (vocab.has_prior_task.as_str(), prior_task),
                (vocab.includes_task.as_str(), task),
            ],
        )?;
        outcome.intersections += 1;
    }

    Ok(outcome)
}
