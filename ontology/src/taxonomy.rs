//! Rebuild of the action-taxonomy subtree under the abstract task class.

use tracing::debug;

use crate::closure::closure;
use crate::graph::Document;
use crate::model::{iris, Node};

/// Where and how the taxonomy is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyOptions {
    /// Namespace the category and member classes are minted in.
    pub namespace: String,
    /// IRI of the abstract task class the categories hang from.
    pub task_root: String,
    /// Skip `ns:X rdfs:subClassOf ns:X` when a category lists itself as a member.
    pub suppress_self_edges: bool,
}

impl Default for TaxonomyOptions {
    fn default() -> Self {
        Self {
            namespace: iris::NS_RECIPE_INSTRUCTIONS.to_owned(),
            task_root: iris::DUL_TASK.to_owned(),
            suppress_self_edges: true,
        }
    }
}

/// Counters describing a rebuild.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaxonomyStats {
    /// Classes removed from the previous taxonomy.
    pub removed: usize,
    /// Category classes written.
    pub categories: usize,
    /// Member edges written.
    pub members: usize,
    /// Self-referential member edges skipped.
    pub self_edges_suppressed: usize,
}

/// Deletes every transitive subclass of `task_root`.
///
/// Each descendant loses every triple it appears in, as subject or object.
/// The root class itself is kept. Returns the number of classes removed.
pub fn prune(doc: &mut Document, task_root: &str) -> usize {
    let mut descendants: Vec<Node> = closure(doc, &Node::named(task_root))
        .into_iter()
        .filter(|node| !node.is_iri(task_root))
        .collect();
    descendants.sort_by_cached_key(|node| node.to_string());
    for node in &descendants {
        doc.remove_node(node);
    }
    descendants.len()
}

/// Replaces the taxonomy below `options.task_root` with `categories`.
///
/// Every category becomes `ns:Category rdfs:subClassOf task_root`; every
/// member label is passed through `class_name` and becomes
/// `ns:Member rdfs:subClassOf ns:Category`. All of them are typed `owl:Class`.
pub fn rebuild<'a, I, F>(
    doc: &mut Document,
    categories: I,
    options: &TaxonomyOptions,
    class_name: F,
) -> TaxonomyStats
where
    I: IntoIterator<Item = (&'a str, &'a [String])>,
    F: Fn(&str) -> String,
{
    let mut stats = TaxonomyStats {
        removed: prune(doc, &options.task_root),
        ..TaxonomyStats::default()
    };
    let root = Node::named(&options.task_root);
    let class = Node::named(iris::OWL_CLASS);

    for (category, members) in categories {
        let category_node = Node::named(&format!("{}{}", options.namespace, category));
        doc.insert(category_node.clone(), iris::RDF_TYPE, class.clone());
        doc.insert(category_node.clone(), iris::RDFS_SUBCLASS_OF, root.clone());
        stats.categories += 1;

        for member in members {
            let name = class_name(member);
            if options.suppress_self_edges && name == category {
                stats.self_edges_suppressed += 1;
                continue;
            }
            let member_node = Node::named(&format!("{}{}", options.namespace, name));
            doc.insert(member_node.clone(), iris::RDF_TYPE, class.clone());
            doc.insert(member_node, iris::RDFS_SUBCLASS_OF, category_node.clone());
            stats.members += 1;
        }
    }

    debug!(
        removed = stats.removed,
        categories = stats.categories,
        members = stats.members,
        "rebuilt action taxonomy"
    );
    stats
}
