// src/cli.rs
// =============================================================================
// Command-line interface, built with clap's derive API.
//
// There is no config file. Every knob is a flag with a sensible default,
// and log verbosity comes from RUST_LOG.
// =============================================================================

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing::warn;

use crate::error::MappyError;
use crate::github::DEFAULT_API_URL;
use crate::render::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "mappy",
    version,
    about = "Draw a GitHub repository's top-level layout as a diagram",
    long_about = "mappy lists the top level of a GitHub repository and draws it with Graphviz. \
                  Files ending in .js are colored as UI, everything else as Backend. \
                  A fixed set of illustrative service nodes is included unless --no-illustrative is given."
)]
pub struct Cli {
    /// GitHub repository URL (e.g., https://github.com/owner/repo)
    ///
    /// Only the last two "/"-separated segments are used.
    pub repo_url: String,

    /// GitHub access token; you will be prompted for it (masked) when omitted
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
    pub format: OutputFormat,

    /// Output file (default: <repo-name>.<format> in the current directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the graph as JSON instead of rendering an image
    #[arg(long)]
    pub json: bool,

    /// Leave out the fixed example nodes (auth, API, database, ...)
    #[arg(long)]
    pub no_illustrative: bool,

    /// Base URL of the GitHub REST API
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Graphviz `dot` executable to use
    #[arg(long, value_name = "PATH", default_value = "dot")]
    pub dot_bin: String,
}

impl Cli {
    // The repository URL, rejected if blank
    pub fn repo_url(&self) -> Result<&str, MappyError> {
        let url = self.repo_url.trim();
        if url.is_empty() {
            return Err(MappyError::EmptyInput("Repository URL"));
        }
        Ok(url)
    }

    // The token from --token, otherwise asked for interactively
    //
    // On a terminal the prompt is masked (nothing is echoed). When stdin is
    // a pipe, e.g. `echo $TOKEN | mappy ...`, one line is read as-is.
    pub fn token(&self) -> Result<String, MappyError> {
        let token = match &self.token {
            Some(token) => Ok(token.clone()),
            None if io::stdin().is_terminal() => read_masked("GitHub token: "),
            None => prompt_line("GitHub token: ", io::stdin().lock()),
        };

        // A failed read leaves the token blank, which check_token reports
        let token = token.unwrap_or_else(|e| {
            warn!(error = %e, "could not read token");
            String::new()
        });
        check_token(token)
    }
}

// Exit code for a clap parse failure
//
// --help and --version are "errors" to clap but should exit 0; every real
// usage mistake is malformed input, same as a bad URL.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

fn check_token(token: String) -> Result<String, MappyError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(MappyError::EmptyInput("GitHub token"));
    }
    Ok(token.to_string())
}

// Prints the prompt on stderr (stdout may be carrying --json output)
// and reads one line
fn prompt_line(prompt: &str, mut input: impl BufRead) -> anyhow::Result<String> {
    eprint!("{}", prompt);
    io::stderr().flush().context("failed to flush stderr")?;

    let mut line = String::new();
    input.read_line(&mut line).context("failed to read token from stdin")?;
    Ok(line)
}

// What a single keypress means for the masked prompt
#[derive(Debug, PartialEq, Eq)]
enum Keystroke {
    Continue,
    Done,
    Cancel,
}

// Applies one key event to the token typed so far
fn apply_key(buf: &mut String, key: KeyEvent) -> Keystroke {
    // Windows reports press and release separately; only count presses
    if key.kind == KeyEventKind::Release {
        return Keystroke::Continue;
    }

    match key.code {
        KeyCode::Enter => Keystroke::Done,
        KeyCode::Esc => Keystroke::Cancel,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Keystroke::Cancel,
        KeyCode::Char(c) => {
            buf.push(c);
            Keystroke::Continue
        }
        KeyCode::Backspace => {
            buf.pop();
            Keystroke::Continue
        }
        _ => Keystroke::Continue,
    }
}

// Leaves raw mode on every exit path, including `?` returns
struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

// Reads a secret from the terminal without echoing it
//
// Raw mode turns off the terminal's own echo and line editing, so we
// collect key events ourselves until Enter. Esc or Ctrl-C give back an
// empty string.
fn read_masked(prompt: &str) -> anyhow::Result<String> {
    eprint!("{}", prompt);
    io::stderr().flush().context("failed to flush stderr")?;

    enable_raw_mode().context("failed to switch terminal to raw mode")?;
    let guard = RawModeGuard;

    let mut token = String::new();
    loop {
        let Event::Key(key) = event::read().context("failed to read key press")? else {
            continue;
        };
        match apply_key(&mut token, key) {
            Keystroke::Continue => {}
            Keystroke::Done => break,
            Keystroke::Cancel => {
                token.clear();
                break;
            }
        }
    }

    drop(guard);
    // Enter was swallowed by raw mode, so move past the prompt line ourselves
    eprintln!();
    Ok(token)
}
