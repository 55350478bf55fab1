// src/graph/model.rs
// =============================================================================
// The in-memory graph: nodes, edges and the small style vocabulary Graphviz
// understands (shapes and fill colors).
//
// The graph is built once per run, rendered once, and thrown away.
// =============================================================================

use anyhow::{bail, Result};
use serde::Serialize;
use std::collections::HashSet;

// Node shapes we pass through to Graphviz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Box,
    Folder,
    Cylinder,
    Note,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Box => "box",
            Shape::Folder => "folder",
            Shape::Cylinder => "cylinder",
            Shape::Note => "note",
        }
    }
}

// Fill colors, named after the X11 colors Graphviz accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Repository root
    LightGreen,
    /// UI files and the "UI Components" group
    LightBlue,
    /// Backend files and services
    LightCoral,
    /// Data stores
    LightGrey,
    /// Authentication
    Yellow,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::LightGreen => "lightgreen",
            Color::LightBlue => "lightblue",
            Color::LightCoral => "lightcoral",
            Color::LightGrey => "lightgrey",
            Color::Yellow => "yellow",
        }
    }
}

// How a listed file is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Ui,
    Backend,
}

impl FileKind {
    // ".js" (any case) is UI, everything else is Backend.
    // Directories go through the same rule; only the name is looked at.
    pub fn classify(name: &str) -> Self {
        if name.to_ascii_lowercase().ends_with(".js") {
            FileKind::Ui
        } else {
            FileKind::Backend
        }
    }

    pub fn color(&self) -> Color {
        match self {
            FileKind::Ui => Color::LightBlue,
            FileKind::Backend => Color::LightCoral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub shape: Shape,
    pub fill_color: Color,
    /// Graphviz style list, e.g. "filled" or "filled,bold"
    pub style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

impl Node {
    // A filled node with no extra styling
    pub fn new(id: &str, label: &str, shape: Shape, fill_color: Color) -> Self {
        Node {
            id: id.to_string(),
            label: label.to_string(),
            shape,
            fill_color,
            style: "filled".to_string(),
            font_size: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.style = "filled,bold".to_string();
        self
    }

    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = Some(size);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

// A directed graph with unique node ids
//
// Nodes and edges keep insertion order so the DOT output is stable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Graph {
    pub comment: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip)]
    ids: HashSet<String>,
}

impl Graph {
    pub fn new(comment: &str) -> Self {
        Graph {
            comment: comment.to_string(),
            ..Default::default()
        }
    }

    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if !self.ids.insert(node.id.clone()) {
            bail!("duplicate node id '{}'", node.id);
        }
        self.nodes.push(node);
        Ok(())
    }

    // Both endpoints must already exist
    pub fn add_edge(&mut self, from: &str, to: &str, label: Option<&str>) -> Result<()> {
        for id in [from, to] {
            if !self.ids.contains(id) {
                bail!("edge {} -> {} refers to unknown node '{}'", from, to, id);
            }
        }
        self.edges.push(Edge {
            from: from.to_string(),
            to: to.to_string(),
            label: label.map(str::to_string),
        });
        Ok(())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[cfg(test)]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_js_case_insensitive() {
        assert_eq!(FileKind::classify("app.js"), FileKind::Ui);
        assert_eq!(FileKind::classify("App.JS"), FileKind::Ui);
        assert_eq!(FileKind::classify("server.py"), FileKind::Backend);
        assert_eq!(FileKind::classify("README.md"), FileKind::Backend);
        // Only the suffix counts
        assert_eq!(FileKind::classify("app.json"), FileKind::Backend);
        assert_eq!(FileKind::classify("js"), FileKind::Backend);
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut graph = Graph::new("test");
        graph
            .add_node(Node::new("a", "A", Shape::Box, Color::Yellow))
            .unwrap();
        let dup = graph.add_node(Node::new("a", "Again", Shape::Note, Color::LightBlue));
        assert!(dup.is_err());
        assert_eq!(graph.nodes().len(), 1);
    }

    #[test]
    fn test_edge_requires_known_nodes() {
        let mut graph = Graph::new("test");
        graph
            .add_node(Node::new("a", "A", Shape::Box, Color::Yellow))
            .unwrap();
        assert!(graph.add_edge("a", "missing", None).is_err());
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_serialize_node() {
        let node = Node::new("repo", "widgets", Shape::Box, Color::LightGreen)
            .bold()
            .font_size(16);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["shape"], "box");
        assert_eq!(json["fill_color"], "lightgreen");
        assert_eq!(json["style"], "filled,bold");
        assert_eq!(json["font_size"], 16);
    }
}
