//! Restriction graph engine for recipe ontologies.
//!
//! The `recipe-ontology` crate loads an OWL document into an in-memory
//! [`Document`], and offers the graph operations the annotator is built from:
//! subclass closure, synthesis of `owl:Restriction` / `owl:intersectionOf`
//! subgraphs, and garbage collection of those subgraphs.
//!
//! # Entry Point
//!
//! ```
//! use recipe_ontology::{closure, fixtures, parser, Format, Node};
//! use recipe_ontology::model::iris;
//!
//! let doc = parser::parse_str(fixtures::RECIPES, Format::Turtle).unwrap();
//! let recipes = closure::closure(&doc, &Node::named(iris::RECIPE));
//! assert!(recipes.contains(&Node::named("http://purl.org/ProductKG/RecipeOn#R1")));
//! ```
//!
//! # Editing
//!
//! ```
//! use recipe_ontology::{fixtures, parser, restriction, Collector, Format, Node};
//! use recipe_ontology::model::iris;
//!
//! let mut doc = parser::parse_str(fixtures::RECIPES, Format::Turtle).unwrap();
//! let before = doc.clone();
//! let r1 = Node::named("http://purl.org/ProductKG/RecipeOn#R1");
//! restriction::build_single(&mut doc, &r1, iris::INCLUDES_TASK, "http://example.org/Cutting");
//! Collector::for_task_properties().collect(&mut doc, &r1);
//! assert_eq!(doc, before);
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod catalog;
pub mod closure;
pub mod collector;
pub mod error;
pub mod fixtures;
pub mod graph;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod restriction;
pub mod serializer;
pub mod taxonomy;

pub use catalog::TaskCatalog;
pub use collector::{CollectStats, Collector, NodeKind};
pub use error::{OntologyError, Result};
pub use graph::Document;
pub use model::{BlankId, Literal, LiteralKind, Node, Triple};
pub use serializer::Format;
pub use taxonomy::{TaxonomyOptions, TaxonomyStats};
