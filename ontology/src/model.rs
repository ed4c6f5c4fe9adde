//! Core graph model types.
//!
//! A document is a set of [`Triple`]s over [`Node`]s. Named nodes carry an
//! IRI, anonymous nodes carry a [`BlankId`] that is only meaningful inside
//! the [`Document`](crate::graph::Document) that minted it, and literals only
//! ever appear in object position.

use std::fmt;
use std::sync::Arc;

/// Arena-local identity of an anonymous (blank) node.
///
/// Blank ids are never exposed in serialized output; the serializer renames
/// them to fresh labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankId(pub(crate) u32);

impl BlankId {
    /// Returns the numeric index of this blank node inside its document.
    #[must_use]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// The tag of a literal: either an explicit datatype IRI or a language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// A typed literal (`"42"^^xsd:string`).
    Datatype(Arc<str>),
    /// A language-tagged string (`"Cut the onions"@en`).
    Language(Arc<str>),
}

/// An RDF literal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    /// The lexical form.
    pub lexical: String,
    /// Datatype or language tag.
    pub kind: LiteralKind,
}

impl Literal {
    /// Creates a plain `xsd:string` literal.
    #[must_use]
    pub fn string(lexical: impl Into<String>) -> Self {
        Self::typed(lexical, iris::XSD_STRING)
    }

    /// Creates a literal with an explicit datatype IRI.
    #[must_use]
    pub fn typed(lexical: impl Into<String>, datatype: &str) -> Self {
        Self {
            lexical: lexical.into(),
            kind: LiteralKind::Datatype(Arc::from(datatype)),
        }
    }

    /// Creates a language-tagged literal.
    #[must_use]
    pub fn lang(lexical: impl Into<String>, tag: &str) -> Self {
        Self {
            lexical: lexical.into(),
            kind: LiteralKind::Language(Arc::from(tag)),
        }
    }
}

/// A subject or object position in a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// A named node identified by an absolute IRI.
    Named(Arc<str>),
    /// An anonymous node scoped to one document.
    Blank(BlankId),
    /// A literal value (object position only).
    Literal(Literal),
}

impl Node {
    /// Creates a named node.
    #[must_use]
    pub fn named(iri: &str) -> Self {
        Node::Named(Arc::from(iri))
    }

    /// Returns the IRI of a named node.
    #[must_use]
    pub fn iri(&self) -> Option<&str> {
        match self {
            Node::Named(iri) => Some(iri.as_ref()),
            _ => None,
        }
    }

    /// Returns true for anonymous nodes.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Blank(_))
    }

    /// Returns true if this is the named node `iri`.
    #[must_use]
    pub fn is_iri(&self, iri: &str) -> bool {
        self.iri() == Some(iri)
    }

    /// Returns the lexical form of a literal node.
    #[must_use]
    pub fn lexical(&self) -> Option<&str> {
        match self {
            Node::Literal(lit) => Some(lit.lexical.as_str()),
            _ => None,
        }
    }

    /// Returns the fragment or last path segment of a named node's IRI.
    ///
    /// `http://purl.org/ProductKG/recipe-instructions#Mixing` yields `Mixing`.
    #[must_use]
    pub fn local_name(&self) -> Option<&str> {
        self.iri().map(local_name)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Named(iri) => write!(f, "<{}>", iri),
            Node::Blank(id) => write!(f, "_:n{}", id.0),
            Node::Literal(lit) => match &lit.kind {
                LiteralKind::Datatype(dt) => write!(f, "{:?}^^<{}>", lit.lexical, dt),
                LiteralKind::Language(tag) => write!(f, "{:?}@{}", lit.lexical, tag),
            },
        }
    }
}

/// One statement of a document. Predicates are always IRIs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject (named or anonymous).
    pub subject: Node,
    /// Predicate IRI.
    pub predicate: Arc<str>,
    /// Object (named, anonymous or literal).
    pub object: Node,
}

impl Triple {
    /// Creates a triple.
    #[must_use]
    pub fn new(subject: Node, predicate: &str, object: Node) -> Self {
        Self {
            subject,
            predicate: Arc::from(predicate),
            object,
        }
    }
}

/// Returns the part of `iri` after the last `#` or `/`.
#[must_use]
pub fn local_name(iri: &str) -> &str {
    iri.rsplit(|c: char| c == '#' || c == '/')
        .next()
        .unwrap_or(iri)
}

/// Standard and recipe-ontology IRI constants.
pub mod iris {
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdf:first`.
    pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    /// `rdf:rest`.
    pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    /// `rdf:nil`.
    pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
    /// `rdfs:subClassOf`.
    pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    /// `owl:Class`.
    pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    /// `owl:Restriction`.
    pub const OWL_RESTRICTION: &str = "http://www.w3.org/2002/07/owl#Restriction";
    /// `owl:onProperty`.
    pub const OWL_ON_PROPERTY: &str = "http://www.w3.org/2002/07/owl#onProperty";
    /// `owl:someValuesFrom`.
    pub const OWL_SOME_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#someValuesFrom";
    /// `owl:intersectionOf`.
    pub const OWL_INTERSECTION_OF: &str = "http://www.w3.org/2002/07/owl#intersectionOf";
    /// `owl:unionOf`.
    pub const OWL_UNION_OF: &str = "http://www.w3.org/2002/07/owl#unionOf";
    /// `owl:equivalentClass`.
    pub const OWL_EQUIVALENT_CLASS: &str = "http://www.w3.org/2002/07/owl#equivalentClass";
    /// `xsd:string`.
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    // Recipe ontology vocabulary
    /// RecipeOn namespace.
    pub const NS_RECIPE_ON: &str = "http://purl.org/ProductKG/RecipeOn#";
    /// Namespace of the rebuilt action taxonomy.
    pub const NS_RECIPE_INSTRUCTIONS: &str = "http://purl.org/ProductKG/recipe-instructions#";
    /// SOMA namespace (task properties and the cut/slice/dice tasks).
    pub const NS_SOMA: &str = "http://www.ease-crc.org/ont/SOMA.owl#";
    /// Food-cutting task namespace.
    pub const NS_FOOD_CUTTING: &str = "http://www.ease-crc.org/ont/food_cutting#";
    /// Pouring-liquids task namespace.
    pub const NS_POURING_LIQUIDS: &str = "http://www.ease-crc.org/ont/pouring_liquids#";

    /// Predicate carrying a recipe's external identifier.
    pub const RECIPE_ID: &str = "http://purl.org/ProductKG/RecipeOn#id";
    /// Predicate carrying a recipe's free-text instructions.
    pub const RECIPE_INSTRUCTIONS: &str = "http://purl.org/ProductKG/RecipeOn#instructions";
    /// Top-level recipe class.
    pub const RECIPE: &str = "http://purl.org/ProductKG/RecipeOn#Recipe";
    /// `soma:has_prior_task`.
    pub const HAS_PRIOR_TASK: &str = "http://www.ease-crc.org/ont/SOMA.owl#has_prior_task";
    /// `soma:includes_task`.
    pub const INCLUDES_TASK: &str = "http://www.ease-crc.org/ont/SOMA.owl#includes_task";
    /// `dul:Task`, the root of the action taxonomy.
    pub const DUL_TASK: &str = "http://www.ontologydesignpatterns.org/ont/dul/DUL.owl#Task";
}
