//! Synthesis of OWL restriction subgraphs.
//!
//! Every call mints fresh anonymous nodes; nothing built here is ever shared
//! between two expressions, which is what lets the
//! [`collector`](crate::collector) delete an expression as a unit.

use tracing::debug;

use crate::error::{OntologyError, Result};
use crate::graph::Document;
use crate::model::{iris, Node};

/// Writes `_:r a owl:Restriction ; owl:onProperty property ; owl:someValuesFrom task`.
fn restriction(doc: &mut Document, property: &str, task: &str) -> Node {
    let node = doc.fresh_blank();
    doc.insert(node.clone(), iris::RDF_TYPE, Node::named(iris::OWL_RESTRICTION));
    doc.insert(node.clone(), iris::OWL_ON_PROPERTY, Node::named(property));
    doc.insert(node.clone(), iris::OWL_SOME_VALUES_FROM, Node::named(task));
    node
}

/// Attaches a single existential restriction to `target`:
/// `target rdfs:subClassOf [ owl:onProperty property ; owl:someValuesFrom task ]`.
///
/// Returns the new restriction node.
pub fn build_single(doc: &mut Document, target: &Node, property: &str, task: &str) -> Node {
    let node = restriction(doc, property, task);
    doc.insert(target.clone(), iris::RDFS_SUBCLASS_OF, node.clone());
    debug!(class = %target, property, task, "attached single restriction");
    node
}

/// Attaches the intersection of one restriction per `(property, task)` pair to
/// `target`.
///
/// The restrictions are collected into a fresh `rdf:List` in input order,
/// wrapped in an anonymous `owl:Class` with `owl:intersectionOf`, and linked
/// with `target rdfs:subClassOf _:intersection`. Returns the intersection node.
///
/// # Errors
///
/// Returns [`OntologyError::EmptyIntersection`] if `pairs` is empty.
pub fn build_intersection(
    doc: &mut Document,
    target: &Node,
    pairs: &[(&str, &str)],
) -> Result<Node> {
    if pairs.is_empty() {
        return Err(OntologyError::EmptyIntersection);
    }

    let members: Vec<Node> = pairs
        .iter()
        .map(|(property, task)| restriction(doc, property, task))
        .collect();
    let list = build_list(doc, &members);

    let node = doc.fresh_blank();
    doc.insert(node.clone(), iris::RDF_TYPE, Node::named(iris::OWL_CLASS));
    doc.insert(node.clone(), iris::OWL_INTERSECTION_OF, list);
    doc.insert(target.clone(), iris::RDFS_SUBCLASS_OF, node.clone());
    debug!(class = %target, members = pairs.len(), "attached intersection expression");
    Ok(node)
}

/// Writes `items` as an `rdf:first`/`rdf:rest` chain and returns its head.
///
/// An empty slice yields `rdf:nil` and writes nothing.
pub fn build_list(doc: &mut Document, items: &[Node]) -> Node {
    let nil = Node::named(iris::RDF_NIL);
    let Some((first, rest)) = items.split_first() else {
        return nil;
    };

    let head = doc.fresh_blank();
    doc.insert(head.clone(), iris::RDF_FIRST, first.clone());
    let mut cell = head.clone();
    for item in rest {
        let next = doc.fresh_blank();
        doc.insert(cell, iris::RDF_REST, next.clone());
        doc.insert(next.clone(), iris::RDF_FIRST, item.clone());
        cell = next;
    }
    doc.insert(cell, iris::RDF_REST, nil);
    head
}
