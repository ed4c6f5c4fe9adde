//! Turtle fixtures shared by the workspace's tests.
//!
//! Each constant holds a small recipe ontology in Turtle 1.1 covering one
//! situation the engine must handle.

mod annotated;
mod recipes;

pub use annotated::ANNOTATED_RECIPE;
pub use recipes::RECIPES;
