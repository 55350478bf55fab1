// src/render/mod.rs
// =============================================================================
// Output side of the tool: Graphviz invocation and writing the image file.
// =============================================================================

mod graphviz;

pub use graphviz::{default_output_path, render, write_output, OutputFormat};
