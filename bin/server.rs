// Auto Catalog - Web Server
// Read-only presentation of the registry: HTML pages + JSON API (Axum)

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use auto_catalog::logging::{init_logging, level_from_verbosity};
use auto_catalog::{
    CatalogView, DatasetReader, IngestConfig, LoadReport, Manufacturer, ManufacturerView, Registry,
    RowLengthPolicy, UnknownColumnPolicy, DEFAULT_DATA_PATH,
};

#[derive(Parser)]
#[command(name = "auto-catalog-server", version, about = "Serve the vehicle catalog over HTTP")]
struct ServerArgs {
    /// Tab-separated dataset with a `name` column
    #[arg(long, env = "AUTO_CATALOG_DATA", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Listen address
    #[arg(long, env = "AUTO_CATALOG_ADDR", default_value = "0.0.0.0:3000")]
    addr: String,

    /// Drop columns that name no known attribute instead of failing
    #[arg(long, env = "AUTO_CATALOG_SKIP_UNKNOWN")]
    skip_unknown: bool,

    /// Accept records whose cell count differs from the header
    #[arg(long, env = "AUTO_CATALOG_LENIENT")]
    lenient: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Shared application state (read-only after startup)
#[derive(Clone)]
struct AppState {
    registry: Arc<Registry>,
    report: Arc<LoadReport>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn not_found(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

#[derive(Deserialize)]
struct BrandQuery {
    brand: Option<String>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Load report
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.report.as_ref().clone()))
}

/// GET /api/manufacturers - Whole catalog
async fn get_manufacturers(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(CatalogView::from(state.registry.as_ref())))
}

/// GET /api/manufacturers/:brand - One manufacturer
async fn get_manufacturer(
    State(state): State<AppState>,
    Path(brand): Path<String>,
) -> impl IntoResponse {
    // Path has already percent-decoded the brand
    match state.registry.get(&brand) {
        Some(manufacturer) => (
            StatusCode::OK,
            Json(ApiResponse::ok(ManufacturerView::from(manufacturer))),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<ManufacturerView>::not_found(format!(
                "no such manufacturer: {brand}"
            ))),
        )
            .into_response(),
    }
}

// ============================================================================
// HTML Pages
// ============================================================================

/// GET / - Catalog overview
async fn serve_index(State(state): State<AppState>) -> impl IntoResponse {
    Html(render_index(&state.registry))
}

/// GET /manufacturer?brand=<brand> - One manufacturer
async fn serve_manufacturer(
    State(state): State<AppState>,
    Query(query): Query<BrandQuery>,
) -> impl IntoResponse {
    let manufacturer = query.brand.as_deref().and_then(|b| state.registry.get(b));

    match manufacturer {
        Some(m) => (StatusCode::OK, Html(render_manufacturer(m))),
        None => (
            StatusCode::NOT_FOUND,
            Html(render_missing(query.brand.as_deref().unwrap_or(""))),
        ),
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        body
    )
}

fn render_index(registry: &Registry) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>Auto Catalog</h1>");
    let _ = writeln!(
        body,
        "<p>{} manufacturers, {} models</p>",
        registry.len(),
        registry.model_count()
    );
    body.push_str("<ul>\n");
    for m in registry.manufacturers() {
        let _ = writeln!(
            body,
            "<li><a href=\"/manufacturer?brand={}\">{}</a> ({} models)</li>",
            urlencoding::encode(m.brand()),
            escape_html(m.brand()),
            m.model_count()
        );
    }
    body.push_str("</ul>\n");

    page("Auto Catalog", &body)
}

fn render_manufacturer(manufacturer: &Manufacturer) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>{}</h1>", escape_html(manufacturer.brand()));
    body.push_str("<table>\n");
    for model in manufacturer.models() {
        let _ = write!(body, "<tr><th>{}</th>", escape_html(model.name()));
        for attr in model.attributes() {
            let _ = write!(
                body,
                "<td title=\"{}\">{}</td>",
                attr.kind().label(),
                escape_html(attr.display())
            );
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</table>\n<p><a href=\"/\">Back</a></p>\n");

    page(manufacturer.brand(), &body)
}

fn render_missing(brand: &str) -> String {
    let body = format!(
        "<h1>No such manufacturer</h1>\n<p>'{}' is not in the catalog.</p>\n<p><a href=\"/\">Back</a></p>\n",
        escape_html(brand)
    );
    page("Not found", &body)
}

// ============================================================================
// Main Server
// ============================================================================

fn app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/manufacturers", get(get_manufacturers))
        .route("/manufacturers/:brand", get(get_manufacturer))
        .with_state(state.clone());

    Router::new()
        .route("/", get(serve_index))
        .route("/manufacturer", get(serve_manufacturer))
        .with_state(state)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    init_logging(level_from_verbosity(args.verbose, false))?;

    let config = IngestConfig::default()
        .with_unknown_columns(if args.skip_unknown {
            UnknownColumnPolicy::Skip
        } else {
            UnknownColumnPolicy::Reject
        })
        .with_row_length(if args.lenient {
            RowLengthPolicy::Lenient
        } else {
            RowLengthPolicy::Strict
        });

    let ingestion = DatasetReader::new(config)?
        .load(&args.data)
        .with_context(|| format!("Failed to load dataset {}", args.data.display()))?;

    let state = AppState {
        registry: Arc::new(ingestion.registry),
        report: Arc::new(ingestion.report),
    };

    let listener = tokio::net::TcpListener::bind(&args.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", args.addr))?;

    info!(addr = %args.addr, "server running");

    axum::serve(listener, app(state))
        .await
        .context("Server error")?;

    Ok(())
}
