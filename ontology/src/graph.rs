//! In-memory triple store.
//!
//! [`Document`] keeps its triples in an append-only arena with tombstones and
//! maintains two indexes over it: one keyed by subject and one keyed by
//! object. Index entries are ordered by insertion, so every lookup returns
//! triples in the order they were added. That keeps "first match" queries
//! and serialized output deterministic.

use std::collections::{BTreeSet, HashMap};

use crate::model::{iris, BlankId, Node, Triple};

/// A mutable RDF graph with subject and object indexes.
#[derive(Debug, Default, Clone)]
pub struct Document {
    slots: Vec<Option<Triple>>,
    lookup: HashMap<Triple, usize>,
    by_subject: HashMap<Node, BTreeSet<usize>>,
    by_object: HashMap<Node, BTreeSet<usize>>,
    next_blank: u32,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// Returns true if the document holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Mints a new anonymous node, distinct from every other node of this document.
    pub fn fresh_blank(&mut self) -> Node {
        let id = BlankId(self.next_blank);
        self.next_blank += 1;
        Node::Blank(id)
    }

    /// Adds a triple. Returns false if it was already present.
    pub fn insert(&mut self, subject: Node, predicate: &str, object: Node) -> bool {
        self.insert_triple(Triple::new(subject, predicate, object))
    }

    /// Adds an already-built triple. Returns false if it was already present.
    pub fn insert_triple(&mut self, triple: Triple) -> bool {
        if self.lookup.contains_key(&triple) {
            return false;
        }
        let slot = self.slots.len();
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .insert(slot);
        self.by_object
            .entry(triple.object.clone())
            .or_default()
            .insert(slot);
        self.lookup.insert(triple.clone(), slot);
        self.slots.push(Some(triple));
        true
    }

    /// Removes a triple. Returns false if it was not present.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        let Some(slot) = self.lookup.remove(triple) else {
            return false;
        };
        unindex(&mut self.by_subject, &triple.subject, slot);
        unindex(&mut self.by_object, &triple.object, slot);
        self.slots[slot] = None;
        true
    }

    /// Returns true if the triple is present.
    #[must_use]
    pub fn contains(&self, subject: &Node, predicate: &str, object: &Node) -> bool {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .filter_map(|&slot| self.slot(slot))
            .any(|t| &*t.predicate == predicate && &t.object == object)
    }

    /// Iterates over all live triples in insertion order.
    pub fn triples(&self) -> impl Iterator<Item = &Triple> {
        self.slots.iter().flatten()
    }

    /// Triples whose subject is `subject`, in insertion order.
    #[must_use]
    pub fn outgoing(&self, subject: &Node) -> Vec<Triple> {
        self.indexed(&self.by_subject, subject)
    }

    /// Triples whose object is `object`, in insertion order.
    #[must_use]
    pub fn incoming(&self, object: &Node) -> Vec<Triple> {
        self.indexed(&self.by_object, object)
    }

    /// Objects of `(subject, predicate, ?)`.
    #[must_use]
    pub fn objects(&self, subject: &Node, predicate: &str) -> Vec<Node> {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .filter_map(|&slot| self.slot(slot))
            .filter(|t| &*t.predicate == predicate)
            .map(|t| t.object.clone())
            .collect()
    }

    /// First object of `(subject, predicate, ?)`.
    #[must_use]
    pub fn object(&self, subject: &Node, predicate: &str) -> Option<Node> {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .filter_map(|&slot| self.slot(slot))
            .find(|t| &*t.predicate == predicate)
            .map(|t| t.object.clone())
    }

    /// Subjects of `(?, predicate, object)`.
    #[must_use]
    pub fn subjects(&self, predicate: &str, object: &Node) -> Vec<Node> {
        self.by_object
            .get(object)
            .into_iter()
            .flatten()
            .filter_map(|&slot| self.slot(slot))
            .filter(|t| &*t.predicate == predicate)
            .map(|t| t.subject.clone())
            .collect()
    }

    /// All triples with predicate `predicate`, in insertion order.
    ///
    /// This is a full scan; it is used for lookups keyed on literal values.
    #[must_use]
    pub fn with_predicate(&self, predicate: &str) -> Vec<Triple> {
        self.triples()
            .filter(|t| &*t.predicate == predicate)
            .cloned()
            .collect()
    }

    /// Returns true if `(node, rdf:type, class)` is present.
    #[must_use]
    pub fn has_type(&self, node: &Node, class: &str) -> bool {
        self.contains(node, iris::RDF_TYPE, &Node::named(class))
    }

    /// Removes every triple in which `node` is the subject or the object.
    ///
    /// Returns the number of triples removed.
    pub fn remove_node(&mut self, node: &Node) -> usize {
        let mut doomed = self.outgoing(node);
        doomed.extend(self.incoming(node));
        doomed.into_iter().filter(|t| self.remove(t)).count()
    }

    fn slot(&self, slot: usize) -> Option<&Triple> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn indexed(&self, index: &HashMap<Node, BTreeSet<usize>>, key: &Node) -> Vec<Triple> {
        index
            .get(key)
            .into_iter()
            .flatten()
            .filter_map(|&slot| self.slot(slot))
            .cloned()
            .collect()
    }
}

fn unindex(index: &mut HashMap<Node, BTreeSet<usize>>, key: &Node, slot: usize) {
    if let Some(slots) = index.get_mut(key) {
        slots.remove(&slot);
        if slots.is_empty() {
            index.remove(key);
        }
    }
}

impl PartialEq for Document {
    /// Two documents are equal when they hold the same triple set.
    ///
    /// Blank node ids are compared as-is, which is what round-trip checks on a
    /// single document need.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.lookup.keys().all(|t| other.lookup.contains_key(t))
    }
}

impl Eq for Document {}
