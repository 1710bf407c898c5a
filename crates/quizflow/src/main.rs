mod config;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use quizflow_editor::{source_for, EditorSession};
use quizflow_layout::{layout_graph, Direction};
use quizflow_model::{export_graph, DocumentKind, Graph};
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "quizflow", version, about = "Quiz flow graph import, layout and export")]
struct Cli {
    /// Settings file (default: ./quizflow.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the three documents, build the graph and lay it out
    Import {
        /// Directory or http(s) URL holding questions.json, strings.json, results.json
        location: Option<String>,
        /// Rank direction (TB, BT, LR, RL)
        #[arg(long)]
        direction: Option<Direction>,
        /// Write the graph here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Re-flow a saved graph
    Layout {
        graph: PathBuf,
        #[arg(long)]
        direction: Option<Direction>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write questions.json and strings.json for a saved graph
    Export {
        graph: PathBuf,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Import and print a summary without writing anything
    Check { location: Option<String> },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().context("reading current directory")?;
    let config = Config::discover(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Import {
            location,
            direction,
            output,
        } => {
            let session = import(&config, location, direction)?;
            write_json(session.graph(), output.as_deref())
        }
        Commands::Layout {
            graph,
            direction,
            output,
        } => {
            let mut graph = read_graph(&graph)?;
            graph.nodes = layout_graph(&graph.nodes, &graph.edges, &config.layout_options(direction));
            write_json(&graph, output.as_deref())
        }
        Commands::Export { graph, out_dir } => export(&read_graph(&graph)?, &out_dir),
        Commands::Check { location } => {
            let session = import(&config, location, None)?;
            print_summary(&session);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn import(
    config: &Config,
    location: Option<String>,
    direction: Option<Direction>,
) -> Result<EditorSession> {
    let Some(location) = location.or_else(|| config.source.base_url.clone()) else {
        bail!("no document location given and [source] base_url is not set");
    };
    let source = source_for(&location).with_context(|| format!("opening {location}"))?;
    let mut session = EditorSession::new(config.session_options(direction));
    session
        .import_from(&*source)
        .with_context(|| format!("importing from {location}"))?;
    Ok(session)
}

fn read_graph(path: &Path) -> Result<Graph> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let graph: Graph =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    graph
        .validate()
        .with_context(|| format!("checking {}", path.display()))?;
    Ok(graph)
}

fn write_json(graph: &Graph, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(graph).context("serializing graph")?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "graph written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}

fn export(graph: &Graph, out_dir: &Path) -> Result<()> {
    let documents = export_graph(graph).context("exporting graph")?;
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let files = [
        (DocumentKind::Questions, documents.questions.to_json()?),
        (DocumentKind::Strings, documents.strings.to_json()?),
    ];
    for (kind, json) in files {
        let path = out_dir.join(kind.file_name());
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "document written");
    }
    // results.json is owned by whoever authored it; nothing to rebuild from the graph.
    tracing::debug!("results.json left untouched");
    Ok(())
}

fn print_summary(session: &EditorSession) {
    let graph = session.graph();
    let terminal = graph
        .options()
        .filter_map(|node| node.as_option())
        .filter(|option| option.is_terminal())
        .count();
    let result_sections = session.results().map_or(0, |results| results.sections.len());

    println!("questions:        {}", graph.questions().count());
    println!("options:          {}", graph.options().count());
    println!("  terminal:       {terminal}");
    println!("edges:            {}", graph.edges.len());
    println!("result sections:  {result_sections}");
}
