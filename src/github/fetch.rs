// src/github/fetch.rs
// =============================================================================
// Talks to the GitHub REST API.
//
// Strategy:
// - Take the last two "/"-separated pieces of whatever the user typed as
//   owner and repository name (no other cleanup)
// - Make ONE authenticated request for the root directory listing
// - Hand back the entries; the caller decides what to draw
//
// Endpoint used:
//   GET {api_url}/repos/{owner}/{repo}/contents/
//
// Nothing is retried and nothing is cached. Subdirectories are never
// followed, so nested files never show up in the output.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::types::{ContentEntry, RepoRef};
use crate::error::MappyError;

/// Public GitHub; override with --api-url for GitHub Enterprise
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("mappy/", env!("CARGO_PKG_VERSION"));

// Anything that can list the top level of a repository.
//
// The live implementation is `GithubClient`; tests use an in-memory one.
pub trait RepoContents {
    async fn list_root(&self, repo: &RepoRef) -> Result<Vec<ContentEntry>>;
}

// Extracts "owner/name" from a repository URL
//
// Rules:
//   1. Strip every leading and trailing '/'
//   2. Split on '/'
//   3. The last two pieces are owner and name
//
// Example:
//   "https://github.com/acme/widgets" -> acme/widgets
//   "acme/widgets/"                   -> acme/widgets
//   "widgets"                         -> error
//
// Protocol prefixes, ".git" suffixes and query strings are NOT cleaned up,
// so "https://github.com/acme/widgets.git" yields name "widgets.git".
pub fn parse_repo_name(url: &str) -> std::result::Result<RepoRef, MappyError> {
    let parts: Vec<&str> = url.trim_matches('/').split('/').collect();

    if parts.len() < 2 {
        return Err(MappyError::InvalidRepoUrl(url.to_string()));
    }

    let repo = RepoRef {
        owner: parts[parts.len() - 2].to_string(),
        name: parts[parts.len() - 1].to_string(),
    };
    debug!(url, repo = %repo, "parsed repository name");
    Ok(repo)
}

// Error body GitHub sends alongside 4xx/5xx statuses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// A bearer-authenticated GitHub API client
//
// Not `Debug`: it holds the user's token.
pub struct GithubClient {
    client: Client,
    api_url: String,
    token: String,
}

impl GithubClient {
    pub fn new(token: &str, api_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .context("failed to create HTTP client")?;

        Ok(GithubClient {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn contents_url(&self, repo: &RepoRef) -> String {
        format!("{}/repos/{}/{}/contents/", self.api_url, repo.owner, repo.name)
    }
}

impl RepoContents for GithubClient {
    // Lists the repository root with a single GET
    //
    // Returns: every entry directly under the root, files and directories
    // alike, in the order GitHub sends them
    async fn list_root(&self, repo: &RepoRef) -> Result<Vec<ContentEntry>> {
        let url = self.contents_url(repo);
        info!(repo = %repo, "fetching top-level listing");

        // The token only ever goes into this header; it is never logged
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        let status = response.status();
        debug!(%status, "GitHub responded");

        if !status.is_success() {
            // Prefer GitHub's own explanation ("Not Found", "Bad credentials")
            // over the bare status line
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or(body);
            return Err(anyhow!("GitHub API returned HTTP {}: {}", status, detail.trim()));
        }

        // The root of a repository is always a directory, so GitHub answers
        // with a JSON array; anything else is reported as a decode error
        let entries: Vec<ContentEntry> = response
            .json()
            .await
            .context("unexpected response from GitHub contents API")?;

        info!(count = entries.len(), "listing received");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    #[test]
    fn test_parse_full_url() {
        let repo = parse_repo_name("https://github.com/acme/widgets").unwrap();
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.name, "widgets");
        assert_eq!(repo.to_string(), "acme/widgets");
    }

    #[test]
    fn test_parse_strips_outer_slashes() {
        let repo = parse_repo_name("/acme/widgets/").unwrap();
        assert_eq!(repo.to_string(), "acme/widgets");
    }

    #[test]
    fn test_parse_takes_last_two_segments() {
        let repo = parse_repo_name("github.com/acme/widgets/tree/main").unwrap();
        assert_eq!(repo.to_string(), "tree/main");
    }

    #[test]
    fn test_parse_does_not_strip_git_suffix() {
        let repo = parse_repo_name("https://github.com/acme/widgets.git").unwrap();
        assert_eq!(repo.name, "widgets.git");
    }

    #[test]
    fn test_parse_single_segment_is_error() {
        let err = parse_repo_name("reponame").unwrap_err();
        assert!(matches!(err, MappyError::InvalidRepoUrl(_)));
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert!(parse_repo_name("").is_err());
        assert!(parse_repo_name("///").is_err());
    }

    #[test]
    fn test_contents_url() {
        let client = GithubClient::new("t0ken", "https://ghe.example.com/api/v3/").unwrap();
        let repo = parse_repo_name("acme/widgets").unwrap();
        assert_eq!(
            client.contents_url(&repo),
            "https://ghe.example.com/api/v3/repos/acme/widgets/contents/"
        );
    }

    // Serves exactly one canned HTTP response on a loopback port.
    //
    // Returns the base URL to point the client at and a handle that
    // resolves to the raw request text the client sent.
    async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // A GET has no body, so the request ends at the blank line
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }

            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{}", addr), handle)
    }

    #[tokio::test]
    async fn test_list_root_decodes_listing_and_sends_headers() {
        let body = r#"[
            {"name": "index.js", "path": "index.js", "type": "file"},
            {"name": "src", "path": "src", "type": "dir"}
        ]"#;
        let (api_url, server) = serve_once("200 OK", body).await;

        let client = GithubClient::new("t0ken", &api_url).unwrap();
        let repo = parse_repo_name("https://github.com/acme/widgets").unwrap();
        let entries = client.list_root(&repo).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "index.js");
        assert_eq!(entries[1].kind, "dir");

        // Header names are case-insensitive on the wire
        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /repos/acme/widgets/contents/ http/1.1\r\n"));
        assert!(request.contains("authorization: bearer t0ken\r\n"));
        assert!(request.contains("accept: application/vnd.github+json\r\n"));
        assert!(request.contains("x-github-api-version: 2022-11-28\r\n"));
        assert!(request.contains(&format!("user-agent: mappy/{}\r\n", env!("CARGO_PKG_VERSION"))));
    }

    #[tokio::test]
    async fn test_list_root_surfaces_github_message() {
        let body = r#"{"message":"Not Found","documentation_url":"https://docs.github.com/rest"}"#;
        let (api_url, server) = serve_once("404 Not Found", body).await;

        let client = GithubClient::new("t0ken", &api_url).unwrap();
        let repo = parse_repo_name("acme/missing").unwrap();
        let err = client.list_root(&repo).await.unwrap_err();

        assert_eq!(err.to_string(), "GitHub API returned HTTP 404 Not Found: Not Found");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_list_root_non_json_error_body() {
        let (api_url, server) = serve_once("502 Bad Gateway", "upstream down").await;

        let client = GithubClient::new("t0ken", &api_url).unwrap();
        let repo = parse_repo_name("acme/widgets").unwrap();
        let err = client.list_root(&repo).await.unwrap_err();

        assert_eq!(err.to_string(), "GitHub API returned HTTP 502 Bad Gateway: upstream down");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_api_is_error() {
        // Grab a free port, then close it so nothing is listening there
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let api_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = GithubClient::new("t0ken", &api_url).unwrap();
        let repo = parse_repo_name("acme/widgets").unwrap();
        let err = client.list_root(&repo).await.unwrap_err();
        assert!(format!("{:#}", err).contains(&format!("request to {}", api_url)));
    }
}
