//! Conversion between [`Node`]s and sophia terms.

use std::collections::HashMap;

use sophia_api::term::{BnodeId, IriRef, LanguageTag, SimpleTerm, Term, TermKind};

use crate::graph::Document;
use crate::model::{Literal, LiteralKind, Node};

/// Borrows every triple of `doc` as a sophia triple.
pub(crate) fn export(doc: &Document) -> Vec<[SimpleTerm<'_>; 3]> {
    doc.triples()
        .map(|t| {
            [
                export_node(&t.subject),
                SimpleTerm::Iri(IriRef::new_unchecked(t.predicate.as_ref().into())),
                export_node(&t.object),
            ]
        })
        .collect()
}

fn export_node(node: &Node) -> SimpleTerm<'_> {
    match node {
        Node::Named(iri) => SimpleTerm::Iri(IriRef::new_unchecked(iri.as_ref().into())),
        Node::Blank(id) => SimpleTerm::BlankNode(BnodeId::new_unchecked(format!("n{}", id.index()).into())),
        Node::Literal(Literal { lexical, kind }) => match kind {
            LiteralKind::Datatype(dt) => SimpleTerm::LiteralDatatype(
                lexical.as_str().into(),
                IriRef::new_unchecked(dt.as_ref().into()),
            ),
            LiteralKind::Language(tag) => SimpleTerm::LiteralLanguage(
                lexical.as_str().into(),
                LanguageTag::new_unchecked(tag.as_ref().into()),
            ),
        },
    }
}

/// Maps parsed blank-node labels to fresh arena nodes of one document.
#[derive(Debug, Default)]
pub(crate) struct Importer {
    blanks: HashMap<String, Node>,
}

impl Importer {
    /// Converts a parsed term. Returns `None` for terms the model does not
    /// represent (quoted triples, variables).
    pub(crate) fn node<T: Term>(&mut self, doc: &mut Document, term: T) -> Option<Node> {
        match term.kind() {
            TermKind::Iri => term.iri().map(|iri| Node::named(iri.as_str())),
            TermKind::BlankNode => {
                let id = term.bnode_id()?;
                let label: &str = id.as_str();
                Some(
                    self.blanks
                        .entry(label.to_owned())
                        .or_insert_with(|| doc.fresh_blank())
                        .clone(),
                )
            }
            TermKind::Literal => {
                let lexical = term.lexical_form()?;
                let lexical: &str = &lexical;
                if let Some(tag) = term.language_tag() {
                    return Some(Node::Literal(Literal::lang(lexical, tag.as_str())));
                }
                let datatype = term.datatype()?;
                Some(Node::Literal(Literal::typed(lexical, datatype.as_str())))
            }
            _ => None,
        }
    }
}
