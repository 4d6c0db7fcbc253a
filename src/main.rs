//! larder CLI: build and query the recipe fact graph.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use larder::context::StoreContext;
use larder::entity::EntityKind;
use larder::graph::format;
use larder::graph::store::FactStore;
use larder::ingest;
use larder::query::{self, CategoryKind, SearchFilters};

#[derive(Parser)]
#[command(name = "larder", version, about = "Semantic recipe knowledge graph")]
struct Cli {
    /// Graph file (defaults to $LARDER_GRAPH_PATH, then data/recipes.facts).
    #[arg(long, global = true)]
    graph: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a fact graph from a recipe dataset (CSV or JSON).
    Build {
        /// Path to the dataset.
        input: PathBuf,
        /// Destination graph file.
        output: PathBuf,
    },

    /// List all cuisines in the graph.
    Cuisines,

    /// List all diet types in the graph.
    Diets,

    /// Search recipes with optional conjunctive filters.
    Search {
        /// Keep recipes with an ingredient label containing this text.
        #[arg(long)]
        ingredient: Option<String>,

        /// Keep recipes associated with this cuisine.
        #[arg(long)]
        cuisine: Option<String>,

        /// Keep recipes qualifying for this diet.
        #[arg(long)]
        diet: Option<String>,

        /// Keep recipes whose total time does not exceed this many minutes.
        #[arg(long)]
        max_time: Option<i64>,
    },

    /// Show the full record for one recipe reference.
    Show {
        /// Recipe reference, e.g. recipe-lentil-soup.
        reference: String,
    },

    /// Show graph statistics.
    Info,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => {
            let records = ingest::load_records(&input)?;
            let store = ingest::build_store(records);
            format::save(&store, &output)?;
            println!("wrote {} facts to {}", store.len(), output.display());
        }

        Commands::Cuisines => {
            let store = open_store(cli.graph)?;
            for label in query::list_category(&store, CategoryKind::Cuisine) {
                println!("{label}");
            }
        }

        Commands::Diets => {
            let store = open_store(cli.graph)?;
            for label in query::list_category(&store, CategoryKind::Diet) {
                println!("{label}");
            }
        }

        Commands::Search {
            ingredient,
            cuisine,
            diet,
            max_time,
        } => {
            let store = open_store(cli.graph)?;
            let filters = SearchFilters {
                ingredient,
                cuisine,
                diet,
                max_total_time: max_time,
            };
            let rows = query::search(&store, &filters);
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).into_diagnostic()?
            );
        }

        Commands::Show { reference } => {
            let store = open_store(cli.graph)?;
            match query::detail(&store, &reference) {
                Some(record) => println!(
                    "{}",
                    serde_json::to_string_pretty(&record).into_diagnostic()?
                ),
                None => eprintln!("recipe not found: {reference}"),
            }
        }

        Commands::Info => {
            let store = open_store(cli.graph)?;
            println!("facts:       {}", store.len());
            println!("entities:    {}", store.registry().len());
            for kind in [
                EntityKind::Recipe,
                EntityKind::Ingredient,
                EntityKind::Cuisine,
                EntityKind::Diet,
                EntityKind::Step,
            ] {
                let count = store.registry().of_kind(kind).count();
                println!("{:<12} {count}", format!("{kind}s:").to_lowercase());
            }
        }
    }

    Ok(())
}

fn open_store(graph: Option<PathBuf>) -> Result<Arc<FactStore>> {
    let context = graph.map(StoreContext::new).unwrap_or_else(StoreContext::from_env);
    Ok(context.store()?)
}
