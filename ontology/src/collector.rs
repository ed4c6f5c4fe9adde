//! Garbage collection of synthesized restriction subgraphs.
//!
//! The collector walks the class expressions anchored on a class through
//! `rdfs:subClassOf` and `owl:equivalentClass` and deletes the ones built
//! around the task properties. Each visited node is classified by a
//! [`NodeKind`] derived from its own triples, and the visitor dispatches on
//! that classification:
//!
//! | Kind | Action |
//! |------|--------|
//! | `Named` | never deleted |
//! | `Restriction`, qualifying | delete it, together with any list it owns |
//! | `Restriction`, other property | untouched |
//! | `Expression` | visit each list item; drop the items that went away |
//! | `ListCell`, `Other` | untouched |
//!
//! An expression whose lists lose every item is deleted as a unit, anchoring
//! edge included. One that loses only some items keeps its remaining items in
//! a freshly written list.

use std::collections::HashSet;

use tracing::debug;

use crate::closure::closure;
use crate::graph::Document;
use crate::model::{iris, Node};
use crate::restriction::build_list;

/// Predicates that attach a class expression to a class.
const ANCHORS: [&str; 2] = [iris::RDFS_SUBCLASS_OF, iris::OWL_EQUIVALENT_CLASS];

/// Predicates that attach a member list to a boolean class expression.
const COLLECTIONS: [&str; 2] = [iris::OWL_INTERSECTION_OF, iris::OWL_UNION_OF];

/// Structural classification of a node, derived from its triples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A named node; never deleted.
    Named,
    /// An anonymous `owl:Restriction`.
    Restriction {
        /// Whether its `owl:onProperty` is one of the collected properties.
        qualifying: bool,
    },
    /// An anonymous boolean class expression.
    Expression {
        /// `(collection predicate, list head)` pairs.
        lists: Vec<(&'static str, Node)>,
    },
    /// An anonymous `rdf:List` cell.
    ListCell,
    /// Any other anonymous node (or a literal).
    Other,
}

/// Counters describing what a collection pass removed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectStats {
    /// Restriction nodes deleted.
    pub restrictions: usize,
    /// Intersection/union expression nodes deleted.
    pub expressions: usize,
    /// `rdf:List` cells deleted.
    pub list_cells: usize,
    /// Triples removed in total.
    pub triples: usize,
}

impl CollectStats {
    /// Adds another pass's counters to this one.
    pub fn merge(&mut self, other: CollectStats) {
        self.restrictions += other.restrictions;
        self.expressions += other.expressions;
        self.list_cells += other.list_cells;
        self.triples += other.triples;
    }

    /// Returns true if nothing was removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples == 0
    }
}

/// Whether a visited node survived the visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Kept,
    Removed,
}

/// Deletes restriction subgraphs built on a fixed set of properties.
#[derive(Debug, Clone)]
pub struct Collector {
    properties: HashSet<Node>,
}

impl Collector {
    /// Creates a collector for restrictions on any of `properties`.
    #[must_use]
    pub fn new(properties: &[&str]) -> Self {
        Self {
            properties: properties.iter().map(|p| Node::named(p)).collect(),
        }
    }

    /// Creates a collector for the `has_prior_task` / `includes_task` pair.
    #[must_use]
    pub fn for_task_properties() -> Self {
        Self::new(&[iris::HAS_PRIOR_TASK, iris::INCLUDES_TASK])
    }

    /// Classifies `node` by inspecting its triples.
    #[must_use]
    pub fn classify(&self, doc: &Document, node: &Node) -> NodeKind {
        match node {
            Node::Named(_) => return NodeKind::Named,
            Node::Literal(_) => return NodeKind::Other,
            Node::Blank(_) => {}
        }

        if doc.has_type(node, iris::OWL_RESTRICTION) {
            let qualifying = doc
                .objects(node, iris::OWL_ON_PROPERTY)
                .iter()
                .any(|p| self.properties.contains(p));
            return NodeKind::Restriction { qualifying };
        }

        let lists = collection_heads(doc, node);
        if !lists.is_empty() {
            return NodeKind::Expression { lists };
        }

        if doc.object(node, iris::RDF_FIRST).is_some() {
            NodeKind::ListCell
        } else {
            NodeKind::Other
        }
    }

    /// Removes every qualifying expression anchored on `target`.
    ///
    /// Running it again on the same class finds nothing left to remove.
    pub fn collect(&self, doc: &mut Document, target: &Node) -> CollectStats {
        let mut stats = CollectStats::default();
        let mut active = HashSet::new();
        for anchor in ANCHORS {
            for node in doc.objects(target, anchor) {
                self.visit(doc, &node, &mut active, &mut stats);
            }
        }
        if !stats.is_empty() {
            debug!(class = %target, restrictions = stats.restrictions, expressions = stats.expressions, "collected restrictions");
        }
        stats
    }

    /// Runs [`collect`](Self::collect) on every class in the subclass closure
    /// of `root`. `root` itself is only visited when it sits on a cycle.
    pub fn collect_closure(&self, doc: &mut Document, root: &Node) -> CollectStats {
        let mut classes: Vec<Node> = closure(doc, root).into_iter().collect();
        // Deterministic order keeps blank ids of rewritten lists reproducible.
        classes.sort_by_cached_key(|class| class.to_string());

        let mut stats = CollectStats::default();
        for class in &classes {
            stats.merge(self.collect(doc, class));
        }
        stats
    }

    fn visit(
        &self,
        doc: &mut Document,
        node: &Node,
        active: &mut HashSet<Node>,
        stats: &mut CollectStats,
    ) -> Visit {
        if !active.insert(node.clone()) {
            return Visit::Kept;
        }
        let outcome = match self.classify(doc, node) {
            NodeKind::Restriction { qualifying: true } => {
                self.purge(doc, node, stats);
                Visit::Removed
            }
            NodeKind::Expression { lists } => {
                for (predicate, head) in lists {
                    self.prune_list(doc, node, predicate, &head, active, stats);
                }
                if collection_heads(doc, node).is_empty() {
                    stats.expressions += 1;
                    stats.triples += doc.remove_node(node);
                    Visit::Removed
                } else {
                    Visit::Kept
                }
            }
            NodeKind::Named
            | NodeKind::Restriction { qualifying: false }
            | NodeKind::ListCell
            | NodeKind::Other => Visit::Kept,
        };
        active.remove(node);
        outcome
    }

    /// Visits every item of the list `owner predicate head`, then rewrites or
    /// drops the list if any item was removed.
    fn prune_list(
        &self,
        doc: &mut Document,
        owner: &Node,
        predicate: &'static str,
        head: &Node,
        active: &mut HashSet<Node>,
        stats: &mut CollectStats,
    ) {
        let (cells, items) = walk_list(doc, head);
        let total = items.len();
        let mut kept = Vec::with_capacity(total);
        for item in items {
            if self.visit(doc, &item, active, stats) == Visit::Kept {
                kept.push(item);
            }
        }
        if kept.len() == total {
            return;
        }

        for cell in &cells {
            stats.list_cells += 1;
            stats.triples += doc.remove_node(cell);
        }
        if !kept.is_empty() {
            let head = build_list(doc, &kept);
            doc.insert(owner.clone(), predicate, head);
        }
    }

    /// Deletes an anonymous node and everything its lists own.
    fn purge(&self, doc: &mut Document, node: &Node, stats: &mut CollectStats) {
        let mut seen = HashSet::new();
        self.purge_inner(doc, node, &mut seen, stats);
    }

    fn purge_inner(
        &self,
        doc: &mut Document,
        node: &Node,
        seen: &mut HashSet<Node>,
        stats: &mut CollectStats,
    ) {
        if !node.is_blank() || !seen.insert(node.clone()) {
            return;
        }
        for (_, head) in collection_heads(doc, node) {
            let (cells, items) = walk_list(doc, &head);
            for item in &items {
                self.purge_inner(doc, item, seen, stats);
            }
            for cell in &cells {
                stats.list_cells += 1;
                stats.triples += doc.remove_node(cell);
            }
        }
        if doc.has_type(node, iris::OWL_RESTRICTION) {
            stats.restrictions += 1;
        } else {
            stats.expressions += 1;
        }
        stats.triples += doc.remove_node(node);
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::for_task_properties()
    }
}

/// Returns the `(predicate, head)` pairs of `owl:intersectionOf`/`owl:unionOf` on `node`.
fn collection_heads(doc: &Document, node: &Node) -> Vec<(&'static str, Node)> {
    COLLECTIONS
        .iter()
        .flat_map(|&predicate| {
            doc.objects(node, predicate)
                .into_iter()
                .map(move |head| (predicate, head))
        })
        .collect()
}

/// Walks an `rdf:List` from `head` until `rdf:nil` or a non-anonymous cell.
///
/// Returns the anonymous cells and their `rdf:first` items. A list that loops
/// back on itself stops at the first repeated cell.
fn walk_list(doc: &Document, head: &Node) -> (Vec<Node>, Vec<Node>) {
    let mut cells = Vec::new();
    let mut items = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor = head.clone();

    while cursor.is_blank() && seen.insert(cursor.clone()) {
        if let Some(item) = doc.object(&cursor, iris::RDF_FIRST) {
            items.push(item);
        }
        let next = doc.object(&cursor, iris::RDF_REST);
        cells.push(cursor);
        match next {
            Some(next) => cursor = next,
            None => break,
        }
    }
    (cells, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restriction::{build_intersection, build_single};

    const R1: &str = "http://purl.org/ProductKG/RecipeOn#R1";
    const CUTTING: &str = "http://www.ease-crc.org/ont/SOMA.owl#Cutting";
    const MIXING: &str = "http://purl.org/ProductKG/recipe-instructions#Mixing";
    const HAS_PART: &str = "http://example.org/hasPart";

    fn with_class() -> (Document, Node) {
        let mut doc = Document::new();
        let target = Node::named(R1);
        doc.insert(target.clone(), iris::RDF_TYPE, Node::named(iris::OWL_CLASS));
        doc.insert(target.clone(), iris::RDFS_SUBCLASS_OF, Node::named(iris::RECIPE));
        (doc, target)
    }

    #[test]
    fn classify_kinds() {
        let (mut doc, target) = with_class();
        let collector = Collector::default();
        let single = build_single(&mut doc, &target, iris::INCLUDES_TASK, CUTTING);
        let other = build_single(&mut doc, &target, HAS_PART, CUTTING);
        let expr = build_intersection(&mut doc, &target, &[(iris::INCLUDES_TASK, MIXING)]).unwrap();
        let head = doc.object(&expr, iris::OWL_INTERSECTION_OF).unwrap();

        assert_eq!(collector.classify(&doc, &target), NodeKind::Named);
        assert_eq!(collector.classify(&doc, &single), NodeKind::Restriction { qualifying: true });
        assert_eq!(collector.classify(&doc, &other), NodeKind::Restriction { qualifying: false });
        assert!(matches!(collector.classify(&doc, &expr), NodeKind::Expression { .. }));
        assert_eq!(collector.classify(&doc, &head), NodeKind::ListCell);
    }

    #[test]
    fn no_op_before_any_build() {
        let (mut doc, target) = with_class();
        let before = doc.clone();
        assert!(Collector::default().collect(&mut doc, &target).is_empty());
        assert_eq!(doc, before);
    }

    #[test]
    fn removes_single_and_intersection_as_units() {
        let (mut doc, target) = with_class();
        let before = doc.clone();
        build_single(&mut doc, &target, iris::INCLUDES_TASK, CUTTING);
        build_intersection(
            &mut doc,
            &target,
            &[(iris::HAS_PRIOR_TASK, CUTTING), (iris::INCLUDES_TASK, MIXING)],
        )
        .unwrap();

        let stats = Collector::default().collect(&mut doc, &target);
        assert_eq!(stats.restrictions, 3);
        assert_eq!(stats.expressions, 1);
        assert_eq!(stats.list_cells, 2);
        assert_eq!(doc, before);
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let (mut doc, target) = with_class();
        build_intersection(&mut doc, &target, &[(iris::INCLUDES_TASK, MIXING)]).unwrap();
        let collector = Collector::default();
        collector.collect(&mut doc, &target);
        let once = doc.clone();
        assert!(collector.collect(&mut doc, &target).is_empty());
        assert_eq!(doc, once);
    }

    #[test]
    fn restrictions_on_other_properties_survive() {
        let (mut doc, target) = with_class();
        let other = build_single(&mut doc, &target, HAS_PART, CUTTING);
        let after_other = doc.clone();
        build_single(&mut doc, &target, iris::INCLUDES_TASK, CUTTING);

        Collector::default().collect(&mut doc, &target);
        assert_eq!(doc, after_other);
        assert!(doc.contains(&target, iris::RDFS_SUBCLASS_OF, &other));
    }

    #[test]
    fn mixed_intersection_keeps_unrelated_members() {
        let (mut doc, target) = with_class();
        let expr = build_intersection(
            &mut doc,
            &target,
            &[(HAS_PART, CUTTING), (iris::INCLUDES_TASK, MIXING)],
        )
        .unwrap();

        let stats = Collector::default().collect(&mut doc, &target);
        assert_eq!(stats.restrictions, 1);
        assert_eq!(stats.expressions, 0);

        assert!(doc.contains(&target, iris::RDFS_SUBCLASS_OF, &expr));
        let head = doc.object(&expr, iris::OWL_INTERSECTION_OF).unwrap();
        let (cells, items) = walk_list(&doc, &head);
        assert_eq!(cells.len(), 1);
        assert_eq!(items.len(), 1);
        assert_eq!(doc.object(&items[0], iris::OWL_ON_PROPERTY), Some(Node::named(HAS_PART)));
    }

    #[test]
    fn equivalent_class_anchors_are_collected() {
        let (mut doc, target) = with_class();
        let before = doc.clone();
        let r = build_single(&mut doc, &target, iris::INCLUDES_TASK, CUTTING);
        let anchor = crate::model::Triple::new(target.clone(), iris::RDFS_SUBCLASS_OF, r.clone());
        doc.remove(&anchor);
        doc.insert(target.clone(), iris::OWL_EQUIVALENT_CLASS, r);

        Collector::default().collect(&mut doc, &target);
        assert_eq!(doc, before);
    }

    #[test]
    fn cyclic_list_terminates() {
        let (mut doc, target) = with_class();
        let expr = doc.fresh_blank();
        let cell = doc.fresh_blank();
        let r = doc.fresh_blank();
        doc.insert(target.clone(), iris::RDFS_SUBCLASS_OF, expr.clone());
        doc.insert(expr.clone(), iris::OWL_INTERSECTION_OF, cell.clone());
        doc.insert(cell.clone(), iris::RDF_FIRST, r.clone());
        doc.insert(cell.clone(), iris::RDF_REST, cell.clone());
        doc.insert(r.clone(), iris::RDF_TYPE, Node::named(iris::OWL_RESTRICTION));
        doc.insert(r.clone(), iris::OWL_ON_PROPERTY, Node::named(iris::INCLUDES_TASK));

        let stats = Collector::default().collect(&mut doc, &target);
        assert_eq!(stats.restrictions, 1);
        assert_eq!(stats.expressions, 1);
        assert!(doc.objects(&target, iris::RDFS_SUBCLASS_OF).iter().all(|n| !n.is_blank()));
    }

    #[test]
    fn scoped_to_the_target_class() {
        let (mut doc, x) = with_class();
        let y = Node::named("http://purl.org/ProductKG/RecipeOn#R2");
        build_single(&mut doc, &x, iris::INCLUDES_TASK, CUTTING);
        let ys = build_single(&mut doc, &y, iris::INCLUDES_TASK, MIXING);

        Collector::default().collect(&mut doc, &x);
        assert!(doc.contains(&y, iris::RDFS_SUBCLASS_OF, &ys));
        assert!(doc.has_type(&ys, iris::OWL_RESTRICTION));
    }

    #[test]
    fn closure_pass_reaches_descendants() {
        let (mut doc, r1) = with_class();
        let r2 = Node::named("http://purl.org/ProductKG/RecipeOn#R2");
        doc.insert(r2.clone(), iris::RDFS_SUBCLASS_OF, r1.clone());
        let before = doc.clone();
        build_single(&mut doc, &r1, iris::INCLUDES_TASK, CUTTING);
        build_single(&mut doc, &r2, iris::INCLUDES_TASK, MIXING);

        let stats = Collector::default().collect_closure(&mut doc, &Node::named(iris::RECIPE));
        assert_eq!(stats.restrictions, 2);
        assert_eq!(doc, before);
    }

    #[test]
    fn closure_pass_leaves_the_root_alone() {
        let (mut doc, r1) = with_class();
        let recipe = Node::named(iris::RECIPE);
        let root_restriction = build_single(&mut doc, &recipe, iris::INCLUDES_TASK, MIXING);
        build_single(&mut doc, &r1, iris::INCLUDES_TASK, CUTTING);

        let stats = Collector::default().collect_closure(&mut doc, &recipe);
        assert_eq!(stats.restrictions, 1);
        assert_eq!(doc.objects(&recipe, iris::RDFS_SUBCLASS_OF), vec![root_restriction]);
        assert_eq!(doc.objects(&r1, iris::RDFS_SUBCLASS_OF), vec![recipe]);
    }
}
