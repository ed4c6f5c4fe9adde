//! Transitive subclass closure.

use std::collections::{HashSet, VecDeque};

use crate::graph::Document;
use crate::model::{iris, Node};

/// Returns every class that declares itself, directly or transitively, a
/// subclass of `root`.
///
/// The traversal follows `rdfs:subClassOf` edges backwards and keeps a
/// visited set, so cyclic or diamond-shaped hierarchies terminate and each
/// class appears once. `root` itself is only included when a cycle leads back
/// to it.
#[must_use]
pub fn closure(doc: &Document, root: &Node) -> HashSet<Node> {
    closure_via(doc, root, &[iris::RDFS_SUBCLASS_OF])
}

/// Like [`closure`], but follows any of `predicates` backwards.
#[must_use]
pub fn closure_via(doc: &Document, root: &Node, predicates: &[&str]) -> HashSet<Node> {
    let mut found = HashSet::new();
    let mut expanded = HashSet::new();
    let mut queue = VecDeque::from([root.clone()]);

    while let Some(node) = queue.pop_front() {
        if !expanded.insert(node.clone()) {
            continue;
        }
        for predicate in predicates {
            for child in doc.subjects(predicate, &node) {
                if found.insert(child.clone()) {
                    queue.push_back(child);
                }
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ex(name: &str) -> Node {
        Node::named(&format!("http://example.org/{name}"))
    }

    fn sub(doc: &mut Document, child: &str, parent: &str) {
        doc.insert(ex(child), iris::RDFS_SUBCLASS_OF, ex(parent));
    }

    #[test]
    fn chain() {
        let mut doc = Document::new();
        sub(&mut doc, "B", "A");
        sub(&mut doc, "C", "B");
        assert_eq!(closure(&doc, &ex("A")), HashSet::from([ex("B"), ex("C")]));
    }

    #[test]
    fn cycle_terminates_and_includes_root() {
        let mut doc = Document::new();
        sub(&mut doc, "B", "A");
        sub(&mut doc, "A", "B");
        assert_eq!(closure(&doc, &ex("A")), HashSet::from([ex("A"), ex("B")]));
    }

    #[test]
    fn diamond_counts_once() {
        let mut doc = Document::new();
        sub(&mut doc, "B", "A");
        sub(&mut doc, "C", "A");
        sub(&mut doc, "D", "B");
        sub(&mut doc, "D", "C");
        let found = closure(&doc, &ex("A"));
        assert_eq!(found.len(), 3);
        assert!(found.contains(&ex("D")));
    }

    #[test]
    fn leaf_has_empty_closure() {
        let mut doc = Document::new();
        sub(&mut doc, "B", "A");
        assert!(closure(&doc, &ex("B")).is_empty());
    }

    #[test]
    fn equivalence_edges_are_opt_in() {
        let mut doc = Document::new();
        doc.insert(ex("B"), iris::OWL_EQUIVALENT_CLASS, ex("A"));
        assert!(closure(&doc, &ex("A")).is_empty());
        let found = closure_via(&doc, &ex("A"), &[iris::RDFS_SUBCLASS_OF, iris::OWL_EQUIVALENT_CLASS]);
        assert_eq!(found, HashSet::from([ex("B")]));
    }
}
