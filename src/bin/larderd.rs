//! larderd — HTTP daemon serving the recipe graph API.
//!
//! Loads the fact graph once at startup (a missing graph file is fatal) and
//! serves read-only queries:
//!
//! - `GET /api/health` — liveness
//! - `GET /api/cuisines` — distinct cuisine labels
//! - `GET /api/diets` — distinct diet labels
//! - `GET /api/search?ingredient=&cuisine=&diet=&maxTime=` — filtered search
//! - `GET /api/recipes?id=` — single recipe detail
//!
//! Build and run: `cargo run --features server --bin larderd`

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use larder::context::StoreContext;
use larder::export::{RecipeDetail, RecipeSummary};
use larder::graph::store::FactStore;
use larder::query::{self, CategoryKind, SearchFilters};

#[derive(Parser)]
#[command(name = "larderd", version, about = "Recipe graph HTTP daemon")]
struct Cli {
    /// Graph file (defaults to $LARDER_GRAPH_PATH, then data/recipes.facts).
    #[arg(long)]
    graph: Option<PathBuf>,

    /// Listen address.
    #[arg(long, default_value = "127.0.0.1:5000")]
    listen: String,
}

struct ServerState {
    context: StoreContext,
}

type ApiError = (StatusCode, String);

impl ServerState {
    fn store(&self) -> Result<Arc<FactStore>, ApiError> {
        self.context.store().map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to load graph: {e}"),
            )
        })
    }
}

#[derive(Deserialize)]
struct SearchParams {
    ingredient: Option<String>,
    cuisine: Option<String>,
    diet: Option<String>,
    #[serde(rename = "maxTime", alias = "max_time")]
    max_time: Option<String>,
}

#[derive(Deserialize)]
struct RecipeParams {
    id: Option<String>,
}

async fn health() -> &'static str {
    "ok"
}

async fn cuisines(State(state): State<Arc<ServerState>>) -> Result<Json<Vec<String>>, ApiError> {
    let store = state.store()?;
    Ok(Json(query::list_category(&store, CategoryKind::Cuisine)))
}

async fn diets(State(state): State<Arc<ServerState>>) -> Result<Json<Vec<String>>, ApiError> {
    let store = state.store()?;
    Ok(Json(query::list_category(&store, CategoryKind::Diet)))
}

async fn search(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<RecipeSummary>>, ApiError> {
    let store = state.store()?;
    let filters = SearchFilters {
        ingredient: non_empty(params.ingredient),
        cuisine: non_empty(params.cuisine),
        diet: non_empty(params.diet),
        max_total_time: parse_time_bound(params.max_time.as_deref()),
    };
    tracing::info!(?filters, "search request");
    let rows = query::search(&store, &filters);
    tracing::info!(results = rows.len(), "search served");
    Ok(Json(rows))
}

async fn recipe(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<RecipeParams>,
) -> Result<Json<RecipeDetail>, ApiError> {
    let store = state.store()?;
    let id = non_empty(params.id).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            "missing `id` query parameter".to_string(),
        )
    })?;
    match query::detail(&store, &id) {
        Some(record) => Ok(Json(record)),
        None => Err((StatusCode::NOT_FOUND, format!("recipe not found: {id}"))),
    }
}

/// Empty query parameters impose no constraint.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// A non-numeric time bound from the boundary is treated as "no filter",
/// never rejected.
fn parse_time_bound(value: Option<&str>) -> Option<i64> {
    let value = value?;
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let context = cli
        .graph
        .map(StoreContext::new)
        .unwrap_or_else(StoreContext::from_env);

    // fail fast: queries must never be served without a graph
    context.store()?;

    let state = Arc::new(ServerState { context });
    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/cuisines", get(cuisines))
        .route("/api/diets", get(diets))
        .route("/api/search", get(search))
        .route("/api/recipes", get(recipe))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cli.listen)
        .await
        .into_diagnostic()?;
    tracing::info!(addr = %cli.listen, "larderd listening");
    axum::serve(listener, app).await.into_diagnostic()?;

    Ok(())
}
