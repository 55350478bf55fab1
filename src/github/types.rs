// src/github/types.rs
// =============================================================================
// Data types shared by the GitHub client and the graph builder.
// =============================================================================

use serde::Deserialize;
use std::fmt;

// An owner/name pair such as "acme/widgets"
//
// Lives only for the duration of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

// One item of GET /repos/{owner}/{repo}/contents/
//
// GitHub sends many more fields (sha, size, urls...); serde ignores
// anything we don't declare.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    /// File or directory name, e.g. "index.js"
    pub name: String,
    /// Path from the repository root (same as `name` at the top level)
    #[serde(default)]
    pub path: String,
    /// "file", "dir", "symlink" or "submodule"
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl ContentEntry {
    /// Convenience constructor for a plain file at the repository root
    #[cfg(test)]
    pub fn file(name: &str) -> Self {
        ContentEntry {
            name: name.to_string(),
            path: name.to_string(),
            kind: "file".to_string(),
        }
    }
}
