// src/github/mod.rs
// =============================================================================
// Everything that talks about GitHub repositories.
//
// - Turning a free-text URL into an owner/name pair
// - Listing the top-level contents of a repository through the REST API
//
// The graph builder only depends on the `RepoContents` trait, so tests can
// hand it a canned listing instead of a live client.
// =============================================================================

mod fetch;
mod types;

pub use fetch::{parse_repo_name, GithubClient, RepoContents, DEFAULT_API_URL};
pub use types::{ContentEntry, RepoRef};
