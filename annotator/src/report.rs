//! Edit report types: findings, severity levels, and run counters.

use std::fmt;

use recipe_ontology::CollectStats;

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Progress information.
    Info,
    /// A recoverable skip (unknown recipe id, unmapped action label).
    Warning,
}

/// Pipeline stage that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Restriction cleanup and taxonomy rebuild.
    Cleanup,
    /// Recipe enumeration and verb extraction.
    Extract,
    /// Class resolution and restriction synthesis.
    Annotate,
    /// Serialization of the result.
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Cleanup => "cleanup",
            Stage::Extract => "extract",
            Stage::Annotate => "annotate",
            Stage::Write => "write",
        })
    }
}

/// A single observation made during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Stage that produced this finding.
    pub stage: Stage,
    /// Human-readable message.
    pub message: String,
    /// Severity of the finding.
    pub severity: Severity,
}

impl Finding {
    /// Creates an informational finding.
    pub fn info(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
            severity: Severity::Info,
        }
    }

    /// Creates a warning.
    pub fn warn(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    /// Returns true if this finding is a warning.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.stage, self.message)
    }
}

/// Aggregated outcome of an annotation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditReport {
    /// Every finding, in the order it was made.
    pub findings: Vec<Finding>,
    /// Recipes enumerated from the document.
    pub recipes_seen: usize,
    /// Recipes that received at least one restriction.
    pub recipes_annotated: usize,
    /// Recipes skipped because no class carries their id.
    pub recipes_skipped: usize,
    /// Single restrictions written.
    pub singles: usize,
    /// Intersection expressions written.
    pub intersections: usize,
    /// What cleanup removed.
    pub collected: CollectStats,
}

impl EditReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finding, mirroring it to the log.
    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Info => tracing::info!(stage = %finding.stage, "{}", finding.message),
            Severity::Warning => tracing::warn!(stage = %finding.stage, "{}", finding.message),
        }
        self.findings.push(finding);
    }

    /// Merges another report's findings and counters into this one.
    pub fn extend(&mut self, other: EditReport) {
        self.findings.extend(other.findings);
        self.recipes_seen += other.recipes_seen;
        self.recipes_annotated += other.recipes_annotated;
        self.recipes_skipped += other.recipes_skipped;
        self.singles += other.singles;
        self.intersections += other.intersections;
        self.collected.merge(other.collected);
    }

    /// Returns the count of warnings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_warning()).count()
    }

    /// Iterates over the warnings only.
    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_warning())
    }

    /// One-line summary of the counters.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} recipes, {} annotated, {} skipped; {} single and {} intersection restrictions written; \
             {} restrictions removed; {} warnings",
            self.recipes_seen,
            self.recipes_annotated,
            self.recipes_skipped,
            self.singles,
            self.intersections,
            self.collected.restrictions,
            self.warning_count(),
        )
    }
}
