// src/error.rs
// =============================================================================
// User-facing errors.
//
// Internally everything propagates `anyhow::Error` with context attached.
// At the edges of each step (parse, fetch, render) the error is folded into
// one of these variants so `main` knows what to print and which exit code
// to use.
//
// Exit codes:
//   1 = the input itself was unusable (bad URL, empty token)
//   2 = something failed after the input was accepted (GitHub, Graphviz, disk)
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MappyError {
    /// The URL did not contain at least two "/"-separated segments
    #[error("Invalid GitHub URL format: {0:?}")]
    InvalidRepoUrl(String),

    /// A required text input was blank
    #[error("{0} must not be empty")]
    EmptyInput(&'static str),

    /// Anything that went wrong talking to GitHub.
    ///
    /// Bad tokens, missing repositories, rate limits and network failures
    /// all land here; the message carries the underlying error text.
    #[error("An error occurred: {0}")]
    Upstream(String),

    /// Graphviz could not be run, failed, or the image could not be written
    #[error("Failed to render graph: {0}")]
    Render(String),
}

impl MappyError {
    // Wraps any error chain as an upstream failure, keeping every
    // `.context()` layer in the message ("a: b: c")
    pub fn upstream(err: anyhow::Error) -> Self {
        MappyError::Upstream(format!("{:#}", err))
    }

    pub fn render(err: anyhow::Error) -> Self {
        MappyError::Render(format!("{:#}", err))
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            MappyError::InvalidRepoUrl(_) | MappyError::EmptyInput(_) => 1,
            MappyError::Upstream(_) | MappyError::Render(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_upstream_keeps_context_chain() {
        let err = anyhow!("HTTP 401 Unauthorized").context("listing acme/widgets");
        let wrapped = MappyError::upstream(err);
        assert_eq!(
            wrapped.to_string(),
            "An error occurred: listing acme/widgets: HTTP 401 Unauthorized"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(MappyError::InvalidRepoUrl("x".into()).exit_code(), 1);
        assert_eq!(MappyError::EmptyInput("GitHub token").exit_code(), 1);
        assert_eq!(MappyError::Upstream("boom".into()).exit_code(), 2);
        assert_eq!(MappyError::Render("no dot".into()).exit_code(), 2);
    }
}
