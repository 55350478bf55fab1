// src/graph/mod.rs
// =============================================================================
// The repository diagram.
//
// Submodules:
// - model: Graph, Node, Edge and the shape/color vocabulary
// - build: turns a top-level listing into a Graph
// - dot: writes a Graph out as Graphviz DOT text
// =============================================================================

mod build;
mod dot;
mod model;

pub use build::{generate_graph, BuildOptions};
pub use dot::to_dot;
pub use model::Graph;
