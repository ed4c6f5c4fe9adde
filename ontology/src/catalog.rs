//! Action label to task IRI resolution.
//!
//! A [`TaskCatalog`] is an explicit value handed to whoever needs to resolve
//! labels, so independent documents (or test fixtures) can use independent
//! mappings. It can be seeded from the built-in cooking-task table, filled
//! from configuration, or derived from the task taxonomy present in a
//! document.

use std::collections::BTreeMap;

use crate::closure::closure;
use crate::graph::Document;
use crate::model::iris::{NS_FOOD_CUTTING, NS_POURING_LIQUIDS, NS_RECIPE_INSTRUCTIONS, NS_SOMA};
use crate::model::Node;

/// Built-in `(label, namespace)` table; the task IRI is `namespace + label`.
pub const DEFAULT_TASKS: &[(&str, &str)] = &[
    // food arranging
    ("Arranging", NS_RECIPE_INSTRUCTIONS),
    ("Balancing", NS_RECIPE_INSTRUCTIONS),
    ("Changing", NS_RECIPE_INSTRUCTIONS),
    ("Collecting", NS_RECIPE_INSTRUCTIONS),
    ("Crumbling", NS_RECIPE_INSTRUCTIONS),
    ("Disposing", NS_RECIPE_INSTRUCTIONS),
    ("Finding", NS_RECIPE_INSTRUCTIONS),
    ("Gathering", NS_RECIPE_INSTRUCTIONS),
    ("Grounding", NS_RECIPE_INSTRUCTIONS),
    ("Inserting", NS_RECIPE_INSTRUCTIONS),
    ("Introducing", NS_RECIPE_INSTRUCTIONS),
    ("Ladling", NS_RECIPE_INSTRUCTIONS),
    ("Laying", NS_RECIPE_INSTRUCTIONS),
    ("Locating", NS_RECIPE_INSTRUCTIONS),
    ("Picking", NS_RECIPE_INSTRUCTIONS),
    ("Piling", NS_RECIPE_INSTRUCTIONS),
    ("Placing", NS_RECIPE_INSTRUCTIONS),
    ("Positioning", NS_RECIPE_INSTRUCTIONS),
    ("Putting", NS_RECIPE_INSTRUCTIONS),
    ("Reaching", NS_RECIPE_INSTRUCTIONS),
    ("Setting", NS_RECIPE_INSTRUCTIONS),
    ("Sticking", NS_RECIPE_INSTRUCTIONS),
    ("Throwing", NS_RECIPE_INSTRUCTIONS),
    // food mixing
    ("Admixing", NS_RECIPE_INSTRUCTIONS),
    ("Aggregating", NS_RECIPE_INSTRUCTIONS),
    ("Amalgamating", NS_RECIPE_INSTRUCTIONS),
    ("Blending", NS_RECIPE_INSTRUCTIONS),
    ("Coalescing", NS_RECIPE_INSTRUCTIONS),
    ("Combining", NS_RECIPE_INSTRUCTIONS),
    ("Commingleing", NS_RECIPE_INSTRUCTIONS),
    ("Commixing", NS_RECIPE_INSTRUCTIONS),
    ("Compounding", NS_RECIPE_INSTRUCTIONS),
    ("Concocting", NS_RECIPE_INSTRUCTIONS),
    ("Conflating", NS_RECIPE_INSTRUCTIONS),
    ("Fusing", NS_RECIPE_INSTRUCTIONS),
    ("Grouping", NS_RECIPE_INSTRUCTIONS),
    ("Integrating", NS_RECIPE_INSTRUCTIONS),
    ("Intermixing", NS_RECIPE_INSTRUCTIONS),
    ("Melding", NS_RECIPE_INSTRUCTIONS),
    ("Merging", NS_RECIPE_INSTRUCTIONS),
    ("Mingling", NS_RECIPE_INSTRUCTIONS),
    ("Mixing", NS_RECIPE_INSTRUCTIONS),
    ("Pairing", NS_RECIPE_INSTRUCTIONS),
    ("Shaking", NS_RECIPE_INSTRUCTIONS),
    ("Unifying", NS_RECIPE_INSTRUCTIONS),
    // food cutting
    ("Preparing", NS_FOOD_CUTTING),
    ("Filletting", NS_FOOD_CUTTING),
    ("Crosscutting", NS_FOOD_CUTTING),
    ("Jagging", NS_FOOD_CUTTING),
    ("Incising", NS_FOOD_CUTTING),
    ("Slashing", NS_FOOD_CUTTING),
    ("Slitting", NS_FOOD_CUTTING),
    ("Cutting", NS_SOMA),
    ("Carving", NS_FOOD_CUTTING),
    ("Paring", NS_FOOD_CUTTING),
    ("Sawing", NS_FOOD_CUTTING),
    ("Severing", NS_FOOD_CUTTING),
    ("Trenching", NS_FOOD_CUTTING),
    ("Dicing", NS_SOMA),
    ("Chopping", NS_FOOD_CUTTING),
    ("Cubing", NS_FOOD_CUTTING),
    ("Slicing", NS_SOMA),
    ("Slivering", NS_FOOD_CUTTING),
    ("Snipping", NS_FOOD_CUTTING),
    ("Halving", NS_FOOD_CUTTING),
    ("Julienning", NS_FOOD_CUTTING),
    ("Mincing", NS_FOOD_CUTTING),
    ("Quartering", NS_FOOD_CUTTING),
    ("Trisecting", NS_FOOD_CUTTING),
    // pouring liquids
    ("Draining", NS_POURING_LIQUIDS),
    ("Cascading", NS_POURING_LIQUIDS),
    ("Flowing", NS_POURING_LIQUIDS),
    ("Pouring", NS_POURING_LIQUIDS),
    ("Spilling", NS_POURING_LIQUIDS),
    ("Splashing", NS_POURING_LIQUIDS),
    ("Sprinkling", NS_POURING_LIQUIDS),
    ("Streaming", NS_POURING_LIQUIDS),
];

/// Mapping from action label to task IRI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCatalog {
    entries: BTreeMap<String, String>,
}

impl TaskCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the built-in [`DEFAULT_TASKS`] table.
    #[must_use]
    pub fn with_defaults() -> Self {
        DEFAULT_TASKS
            .iter()
            .map(|(label, ns)| ((*label).to_owned(), format!("{ns}{label}")))
            .collect()
    }

    /// Derives a catalog from the named classes below `task_root`.
    ///
    /// Each class is registered under the local name of its IRI. When two
    /// classes share a local name, the lexicographically smaller IRI wins.
    #[must_use]
    pub fn from_taxonomy(doc: &Document, task_root: &str) -> Self {
        let mut iris: Vec<String> = closure(doc, &Node::named(task_root))
            .into_iter()
            .filter_map(|node| node.iri().map(str::to_owned))
            .collect();
        iris.sort();

        let mut catalog = Self::new();
        for iri in iris {
            let label = crate::model::local_name(&iri).to_owned();
            catalog.entries.entry(label).or_insert(iri);
        }
        catalog
    }

    /// Registers (or replaces) a label.
    pub fn insert(&mut self, label: impl Into<String>, task: impl Into<String>) {
        self.entries.insert(label.into(), task.into());
    }

    /// Adds every entry of `other`, replacing labels already present.
    pub fn merge(&mut self, other: TaskCatalog) {
        self.entries.extend(other.entries);
    }

    /// Resolves a label to its task IRI; `None` means unmapped.
    #[must_use]
    pub fn resolve(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(String::as_str)
    }

    /// Iterates over the known labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog maps nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for TaskCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::iris;

    #[test]
    fn defaults_cover_every_table_entry() {
        let catalog = TaskCatalog::with_defaults();
        assert_eq!(catalog.len(), DEFAULT_TASKS.len());
        assert_eq!(catalog.resolve("Cutting"), Some("http://www.ease-crc.org/ont/SOMA.owl#Cutting"));
        assert_eq!(
            catalog.resolve("Mixing"),
            Some("http://purl.org/ProductKG/recipe-instructions#Mixing")
        );
        assert_eq!(catalog.resolve("Xyzzy"), None);
    }

    #[test]
    fn taxonomy_scan_uses_local_names() {
        let mut doc = Document::new();
        let cat = format!("{}FoodCutting", iris::NS_RECIPE_INSTRUCTIONS);
        let member = format!("{}Slicing", iris::NS_RECIPE_INSTRUCTIONS);
        doc.insert(Node::named(&cat), iris::RDFS_SUBCLASS_OF, Node::named(iris::DUL_TASK));
        doc.insert(Node::named(&member), iris::RDFS_SUBCLASS_OF, Node::named(&cat));

        let catalog = TaskCatalog::from_taxonomy(&doc, iris::DUL_TASK);
        assert_eq!(catalog.resolve("Slicing"), Some(member.as_str()));
        assert_eq!(catalog.resolve("FoodCutting"), Some(cat.as_str()));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn merge_overrides() {
        let mut catalog = TaskCatalog::with_defaults();
        let mut extra = TaskCatalog::new();
        extra.insert("Cutting", "http://example.org/Cutting");
        catalog.merge(extra);
        assert_eq!(catalog.resolve("Cutting"), Some("http://example.org/Cutting"));
    }
}
