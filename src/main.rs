// ABOUTME: Entry point for the planner binary.
// ABOUTME: Parses CLI arguments, initializes tracing, replays a ledger script and prints event summaries.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use planner_core::catalog::{InMemoryCatalog, Vendor};
use planner_core::export::{ExportFormat, render};
use planner_core::{
    Category, EventId, EventSummary, LedgerConfig, LedgerStore, TaskBoard, actor, script,
};

#[derive(Debug, Parser)]
#[command(name = "planner", version, about = "Event planning ledger")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay a JSON-lines script of commands and print the resulting events.
    Run {
        /// Path to the script; one command or task step per line.
        script: PathBuf,
        /// Output format: markdown, yaml or json. Overrides PLANNER_FORMAT.
        #[arg(long, short)]
        format: Option<ExportFormat>,
        /// Only print this event.
        #[arg(long)]
        event: Option<String>,
        /// JSON array of catalog vendors used to resolve vendor names.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// List the planning categories.
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("planner=info,planner_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = LedgerConfig::from_env().context("loading configuration")?;

    match cli.command {
        Commands::Run {
            script: path,
            format,
            event,
            catalog,
        } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let format = format.unwrap_or(config.format);
            let currency = config.currency_symbol.clone();

            let handle = actor::spawn(LedgerStore::new(config));
            let mut board = TaskBoard::new();
            let applied = script::run_script(&handle, &mut board, &text).await?;
            tracing::info!(steps = applied, script = %path.display(), "script replayed");

            let catalog = match catalog {
                Some(path) => load_catalog(&path)?,
                None => InMemoryCatalog::new(),
            };
            let state = handle.read_state().await;
            let summaries: Vec<EventSummary> = match event {
                Some(id) => {
                    let id = EventId::new(id);
                    let event = state
                        .event(&id)
                        .with_context(|| format!("event {} not found", id))?;
                    vec![EventSummary::new(event, &catalog)]
                }
                None => state
                    .events
                    .values()
                    .map(|e| EventSummary::new(e, &catalog))
                    .collect(),
            };

            print!("{}", render(format, &summaries, &currency)?);
        }
        Commands::Categories => {
            for category in Category::ALL {
                println!("{}", category);
            }
        }
    }

    Ok(())
}

fn load_catalog(path: &Path) -> anyhow::Result<InMemoryCatalog> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let vendors: Vec<Vendor> = serde_json::from_str(&text)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    let catalog: InMemoryCatalog = vendors.into_iter().collect();
    tracing::debug!(vendors = catalog.len(), "catalog loaded");
    Ok(catalog)
}
