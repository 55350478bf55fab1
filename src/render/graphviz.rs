// src/render/graphviz.rs
// =============================================================================
// Turns a Graph into image bytes and puts them on disk.
//
// How it works:
// 1. Serialize the graph to DOT text
// 2. For png/svg, pipe the text into `dot -Tpng` / `dot -Tsvg` and collect
//    whatever it prints on stdout
// 3. For dot, skip Graphviz entirely and keep the text
// 4. Write the bytes to the output file
// =============================================================================

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::github::RepoRef;
use crate::graph::{to_dot, Graph};

// What the user wants out
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raster image (needs Graphviz)
    Png,
    /// Vector image (needs Graphviz)
    Svg,
    /// Raw DOT source, no Graphviz required
    Dot,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Dot => "dot",
        }
    }
}

// Produces the final bytes for the chosen format
//
// Parameters:
//   graph: the finished graph
//   format: png, svg or dot
//   dot_bin: name or path of the Graphviz `dot` executable
pub async fn render(graph: &Graph, format: OutputFormat, dot_bin: &str) -> Result<Vec<u8>> {
    let source = to_dot(graph);
    debug!(bytes = source.len(), "serialized graph to DOT");

    match format {
        OutputFormat::Dot => Ok(source.into_bytes()),
        OutputFormat::Png | OutputFormat::Svg => run_graphviz(dot_bin, format, &source).await,
    }
}

async fn run_graphviz(dot_bin: &str, format: OutputFormat, source: &str) -> Result<Vec<u8>> {
    info!(dot_bin, format = format.extension(), "running graphviz");

    let mut child = Command::new(dot_bin)
        .arg(format!("-T{}", format.extension()))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to run '{}' (is Graphviz installed?)", dot_bin))?;

    let mut stdin = child.stdin.take().context("graphviz stdin was not captured")?;

    // Feed stdin while collecting stdout, otherwise a big image could fill
    // the pipe and stall both sides
    let feed = async move {
        let written = stdin.write_all(source.as_bytes()).await;
        // Dropping stdin closes the pipe so dot sees end of input
        drop(stdin);
        written
    };
    let (fed, output) = tokio::join!(feed, child.wait_with_output());
    let output = output.with_context(|| format!("failed to wait for '{}'", dot_bin))?;

    // A dot that dies early also breaks our write; its stderr says why,
    // so the exit status is checked before the write result
    if !output.status.success() {
        bail!(
            "'{}' exited with {}: {}",
            dot_bin,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    fed.with_context(|| format!("failed to send DOT source to '{}'", dot_bin))?;

    Ok(output.stdout)
}

// "<repo name>.<ext>" in the current directory
pub fn default_output_path(repo: &RepoRef, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!("{}.{}", repo.name, format.extension()))
}

pub async fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("could not write {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote output");
    Ok(())
}
