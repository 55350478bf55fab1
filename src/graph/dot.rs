// src/graph/dot.rs
// =============================================================================
// Serializes a Graph into Graphviz DOT text.
//
// Every id and attribute value is emitted as a quoted string, so file names
// with spaces, dots or quotes are always valid DOT.
// =============================================================================

use std::fmt::Write;

use super::model::Graph;

/// Escape a string for use inside a double-quoted DOT value
pub fn escape(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Render the whole graph as a DOT digraph
pub fn to_dot(graph: &Graph) -> String {
    let mut out = String::with_capacity(256 + graph.nodes().len() * 120);

    // The comment can't contain a newline or it would end the // line
    let _ = writeln!(out, "// {}", graph.comment.replace('\n', " "));
    out.push_str("digraph {\n");
    out.push_str("  compound=\"true\";\n");

    for node in graph.nodes() {
        let _ = write!(
            out,
            "  \"{}\" [label=\"{}\", shape=\"{}\", style=\"{}\", fillcolor=\"{}\"",
            escape(&node.id),
            escape(&node.label),
            node.shape.as_str(),
            node.style,
            node.fill_color.as_str(),
        );
        if let Some(size) = node.font_size {
            let _ = write!(out, ", fontsize=\"{}\"", size);
        }
        out.push_str("];\n");
    }

    for edge in graph.edges() {
        let _ = write!(out, "  \"{}\" -> \"{}\"", escape(&edge.from), escape(&edge.to));
        if let Some(label) = &edge.label {
            let _ = write!(out, " [label=\"{}\"]", escape(label));
        }
        out.push_str(";\n");
    }

    out.push_str("}\n");
    out
}
