// src/main.rs
// =============================================================================
// Entry point of mappy.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Turn the repository URL into owner/name (stop here if that fails)
// 3. Get the token from --token or a prompt
// 4. List the repository root once and build the graph
// 5. Render the graph (or print it as JSON) and report where it went
// 6. Exit with a code: 0 = success, 1 = bad input, 2 = GitHub/render error
// =============================================================================

mod cli;
mod error;
mod github;
mod graph;
mod render;

use clap::Parser;
use cli::Cli;
use error::MappyError;
use github::GithubClient;
use graph::BuildOptions;

#[tokio::main]
async fn main() {
    // try_parse instead of parse: clap's own exit code for usage errors is 2,
    // which we reserve for GitHub/render failures
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Prints help/version to stdout, real usage errors to stderr
            let _ = e.print();
            std::process::exit(cli::usage_exit_code(&e));
        }
    };
    init_logging();

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("❌ {}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code);
}

// Logging stays silent unless RUST_LOG is set, e.g. RUST_LOG=mappy=debug
fn init_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

// The whole pipeline for one repository
//
// Order matters: the URL is checked before the token is asked for, and
// both are checked before any network traffic happens.
async fn run(cli: Cli) -> Result<(), MappyError> {
    // Step 1: "https://github.com/acme/widgets" -> acme/widgets
    let repo = github::parse_repo_name(cli.repo_url()?)?;

    // Step 2: token from --token or the masked prompt
    let token = cli.token()?;

    // Progress goes to stderr so --json output stays clean
    eprintln!("🔍 Mapping repository: {}", repo);

    // Step 3: one request for the root listing, then the graph.
    // Every failure in here comes back as MappyError::Upstream.
    let client = GithubClient::new(&token, &cli.api_url).map_err(MappyError::upstream)?;
    let options = BuildOptions {
        illustrative: !cli.no_illustrative,
    };
    let graph = graph::generate_graph(&client, &repo, &options).await?;

    eprintln!(
        "📄 Built graph with {} node(s) and {} edge(s)",
        graph.nodes().len(),
        graph.edges().len()
    );

    // Step 4a: --json dumps the model and stops; no Graphviz involved
    if cli.json {
        let json = serde_json::to_string_pretty(&graph)
            .map_err(|e| MappyError::render(e.into()))?;
        println!("{}", json);
        return Ok(());
    }

    // Step 4b: DOT -> png/svg (or raw DOT) -> file on disk
    let bytes = render::render(&graph, cli.format, &cli.dot_bin)
        .await
        .map_err(MappyError::render)?;

    let path = cli
        .output
        .clone()
        .unwrap_or_else(|| render::default_output_path(&repo, cli.format));
    render::write_output(&path, &bytes)
        .await
        .map_err(MappyError::render)?;

    println!("🗺️  Wrote {}", path.display());
    Ok(())
}
