//! Lookup of recipe classes by their external identifier.

use crate::graph::Document;
use crate::model::{iris, Node};

/// Returns the class carrying `id` through `id_predicate`.
///
/// Every `(?, id_predicate, literal)` triple whose lexical form equals `id` is
/// a candidate, whatever the literal's datatype or language. The first
/// candidate (in document order) that is also typed `owl:Class` wins.
/// Returns `None` when no class carries the id; callers treat that as a
/// recoverable skip.
#[must_use]
pub fn find_by_external_id(doc: &Document, id_predicate: &str, id: &str) -> Option<Node> {
    doc.with_predicate(id_predicate)
        .into_iter()
        .filter(|t| t.object.lexical() == Some(id))
        .map(|t| t.subject)
        .find(|subject| doc.has_type(subject, iris::OWL_CLASS))
}

/// Returns the external identifier of `class`, if it carries one.
#[must_use]
pub fn external_id(doc: &Document, id_predicate: &str, class: &Node) -> Option<String> {
    doc.objects(class, id_predicate)
        .iter()
        .find_map(|o| o.lexical().map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Literal;

    fn class(doc: &mut Document, iri: &str, id: Literal, typed: bool) -> Node {
        let node = Node::named(iri);
        if typed {
            doc.insert(node.clone(), iris::RDF_TYPE, Node::named(iris::OWL_CLASS));
        }
        doc.insert(node.clone(), iris::RECIPE_ID, Node::Literal(id));
        node
    }

    #[test]
    fn finds_typed_class() {
        let mut doc = Document::new();
        let r1 = class(&mut doc, "http://example.org/R1", Literal::string("42"), true);
        assert_eq!(find_by_external_id(&doc, iris::RECIPE_ID, "42"), Some(r1.clone()));
        assert_eq!(external_id(&doc, iris::RECIPE_ID, &r1).as_deref(), Some("42"));
    }

    #[test]
    fn skips_untyped_subjects() {
        let mut doc = Document::new();
        class(&mut doc, "http://example.org/individual", Literal::string("42"), false);
        let r1 = class(&mut doc, "http://example.org/R1", Literal::string("42"), true);
        assert_eq!(find_by_external_id(&doc, iris::RECIPE_ID, "42"), Some(r1));
    }

    #[test]
    fn matches_any_literal_tag() {
        let mut doc = Document::new();
        let r1 = class(
            &mut doc,
            "http://example.org/R1",
            Literal::typed("7", "http://www.w3.org/2001/XMLSchema#integer"),
            true,
        );
        assert_eq!(find_by_external_id(&doc, iris::RECIPE_ID, "7"), Some(r1));
    }

    #[test]
    fn missing_id_is_none() {
        let mut doc = Document::new();
        class(&mut doc, "http://example.org/R1", Literal::string("42"), true);
        assert_eq!(find_by_external_id(&doc, iris::RECIPE_ID, "43"), None);
    }
}
