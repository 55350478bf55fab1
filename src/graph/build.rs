// src/graph/build.rs
// =============================================================================
// Builds the repository diagram.
//
// Layout of every graph:
//
//   repo ──contains──> UI Components
//   repo ──contains──> Backend Services ──provides auth──> Authentication Service ──stores data──> Database
//                                       ──interacts with──> Data
//   API Service (standalone)
//   repo ──> one note per top-level entry
//
// Everything except the root and the per-entry notes is illustrative: it is
// the same for every repository and says nothing about the actual code.
// Turn it off with BuildOptions { illustrative: false }.
// =============================================================================

use anyhow::Result;
use tracing::{debug, warn};

use super::model::{Color, FileKind, Graph, Node, Shape};
use crate::error::MappyError;
use crate::github::{ContentEntry, RepoContents, RepoRef};

pub const ROOT_ID: &str = "repo";

#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    /// Include the fixed, repository-independent nodes and edges
    pub illustrative: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions { illustrative: true }
    }
}

// Fetches the listing and builds the graph in one go
//
// Any failure (network, auth, decoding, graph construction) becomes a
// single `MappyError::Upstream`; no partial graph ever escapes.
pub async fn generate_graph<S: RepoContents>(
    source: &S,
    repo: &RepoRef,
    options: &BuildOptions,
) -> std::result::Result<Graph, MappyError> {
    let entries = match source.list_root(repo).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!(repo = %repo, error = %e, "listing failed");
            return Err(MappyError::upstream(e.context(format!("listing {}", repo))));
        }
    };

    build_graph(repo, &entries, options).map_err(MappyError::upstream)
}

// Builds the graph from an already-fetched listing
//
// Parameters:
//   repo: only the name is used, as the root label
//   entries: the top-level listing, drawn in the order given
//   options: whether to add the illustrative nodes
//
// Returns an error only if a node id clashes, which entry_id rules out
pub fn build_graph(
    repo: &RepoRef,
    entries: &[ContentEntry],
    options: &BuildOptions,
) -> Result<Graph> {
    let mut graph = Graph::new("Github Repository Structure");

    graph.add_node(
        Node::new(ROOT_ID, &repo.name, Shape::Box, Color::LightGreen)
            .bold()
            .font_size(16),
    )?;

    // The fixed nodes must exist before entries are added; their ids
    // ("ui", "backend", ...) are plain words, entries get a "file:" prefix
    if options.illustrative {
        add_illustrative(&mut graph)?;
    }

    // One note per entry, hung off the root with an unlabeled edge.
    // Directories are treated like files: only the name's suffix matters.
    for entry in entries {
        let kind = FileKind::classify(&entry.name);
        let id = entry_id(entry);
        debug!(path = %entry.path, entry_type = %entry.kind, ?kind, "adding entry");

        graph.add_node(Node::new(&id, &entry.name, Shape::Note, kind.color()))?;
        graph.add_edge(ROOT_ID, &id, None)?;
    }

    Ok(graph)
}

// Entry ids live in their own namespace so a file called "repo" or "ui"
// can't collide with the fixed nodes
pub fn entry_id(entry: &ContentEntry) -> String {
    format!("file:{}", entry.name)
}

fn add_illustrative(graph: &mut Graph) -> Result<()> {
    graph.add_node(Node::new("ui", "UI Components", Shape::Folder, Color::LightBlue))?;
    graph.add_node(Node::new("backend", "Backend Services", Shape::Folder, Color::LightCoral))?;
    graph.add_node(Node::new("database", "Data", Shape::Cylinder, Color::LightGrey))?;

    graph.add_node(Node::new("auth", "Authentication Service", Shape::Box, Color::Yellow))?;
    graph.add_node(Node::new("api", "API Service", Shape::Box, Color::LightCoral))?;
    graph.add_node(Node::new("db", "Database", Shape::Cylinder, Color::LightGrey))?;

    graph.add_edge(ROOT_ID, "ui", Some("contains"))?;
    graph.add_edge(ROOT_ID, "backend", Some("contains"))?;
    graph.add_edge("backend", "auth", Some("provides auth"))?;
    graph.add_edge("auth", "db", Some("stores data"))?;
    graph.add_edge("backend", "database", Some("interacts with"))?;
    Ok(())
}
