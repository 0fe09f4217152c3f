//! Web server and reactive render controller.
//!
//! ## Endpoints
//!
//! - `GET /` — UI page (sliders, chart region, stats block, download links)
//! - `GET /api/v1/render` — run the full sample→chart→export pipeline
//! - `GET /api/v1/latest` — most recent render snapshot
//! - `GET /health` — health check
//!
//! A render request is synchronous and total over the UI's input domain: it
//! recomputes samples, chart, exports, and stats in one pass and returns all
//! four together. A failed request (invalid alpha on direct API use) leaves
//! the latest snapshot untouched, so the prior render stays current.

use std::sync::{Arc, RwLock};

use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderValue, Request, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;
use uuid::Uuid;

use crate::chart::TernaryChart;
use crate::export::{samples_to_csv, to_data_uri};
use crate::sampler::SampleSet;
use crate::stats::SummaryStats;
use crate::{Alpha, VizError};

// ============================================================================
// Types & Configuration
// ============================================================================

/// Configuration for the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// IP address or hostname to bind to (e.g. `"0.0.0.0"` for all interfaces).
    pub host: String,
    /// TCP port the server listens on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Build a config from the environment, falling back to defaults.
    ///
    /// `HOST` and `PORT` are the only recognized variables — the hosting
    /// platform convention. There are no CLI flags. An unparseable `PORT`
    /// falls back to the default rather than failing startup.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(default.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(default.port),
        }
    }
}

/// Query parameters for `GET /api/v1/render`.
///
/// Missing parameters take the UI defaults `(2, 5, 3)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderQuery {
    /// First concentration parameter (`α1`).
    #[serde(default)]
    pub alpha1: Option<f64>,
    /// Second concentration parameter (`α2`).
    #[serde(default)]
    pub alpha2: Option<f64>,
    /// Third concentration parameter (`α3`).
    #[serde(default)]
    pub alpha3: Option<f64>,
}

/// One complete render: all four outputs, published together.
///
/// This is both the wire response of the render endpoint and the snapshot
/// retained as the "current" render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResponse {
    /// The concentration vector the render was computed with.
    pub alpha: [f64; 3],
    /// Inline SVG fragment for the UI chart region.
    pub chart_svg: String,
    /// `data:` URI for the CSV download (`samples.csv`).
    pub csv_href: String,
    /// `data:` URI for the standalone chart document (`plot.html`).
    pub html_href: String,
    /// Preformatted summary statistics table.
    pub stats: String,
}

/// Shared application context, constructed once at startup and handed to
/// every handler.
struct AppState {
    /// Most recent successful render; `None` until the first one completes.
    latest: RwLock<Option<RenderResponse>>,
}

// ============================================================================
// Render pipeline
// ============================================================================

/// Run one full recomputation: sample, summarize, chart, export.
///
/// # Errors
///
/// Returns [`VizError::Sampling`] if the distribution sampler fails; this is
/// unreachable for a validated [`Alpha`].
pub fn render(alpha: Alpha) -> Result<RenderResponse, VizError> {
    let mut rng = rand::thread_rng();
    let samples = SampleSet::draw(alpha, &mut rng)?;

    let stats = SummaryStats::from_samples(&samples);
    let chart = TernaryChart::new(&samples, format!("α = {alpha}"));
    let csv = samples_to_csv(&samples);
    let document = chart.to_html_document();

    Ok(RenderResponse {
        alpha: alpha.as_array(),
        chart_svg: chart.to_svg(),
        csv_href: to_data_uri("text/csv", &csv),
        html_href: to_data_uri("text/html", &document),
        stats: stats.to_table(),
    })
}

// ============================================================================
// Server
// ============================================================================

/// Start the web server.
///
/// Binds to `config.host:config.port` and serves the UI and API. Blocks
/// until the server shuts down.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn start_server(
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = format!("{}:{}", config.host, config.port);

    info!("Starting dirichlet-viz on http://{}", addr);

    let state = Arc::new(AppState {
        latest: RwLock::new(None),
    });

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("dirichlet-viz ready on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router. Split out so tests can drive the exact
/// production routing.
fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1/render", get(render_handler))
        .route("/api/v1/latest", get(latest_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// Middleware
// ============================================================================

/// Adds a unique `X-Request-ID` header to every response.
///
/// If the client sends an `X-Request-ID` header, it is preserved; otherwise
/// a new UUID v4 is generated.
async fn request_id_middleware(req: Request<Body>, next: Next) -> Response {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut response = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /` — serve the UI page.
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /api/v1/render` — recompute and publish all four outputs.
///
/// Missing query parameters default to `(2, 5, 3)`. Invalid parameters
/// (non-positive, NaN) return 400 and leave the latest snapshot untouched.
async fn render_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RenderQuery>,
) -> Result<Json<RenderResponse>, AppError> {
    let defaults = Alpha::default().as_array();
    let alpha = Alpha::new(
        query.alpha1.unwrap_or(defaults[0]),
        query.alpha2.unwrap_or(defaults[1]),
        query.alpha3.unwrap_or(defaults[2]),
    )
    .map_err(|e| AppError::InvalidAlpha(e.to_string()))?;

    let response = render(alpha).map_err(|e| AppError::Internal(e.to_string()))?;

    // Replace the snapshot only after the whole pipeline succeeded.
    match state.latest.write() {
        Ok(mut latest) => *latest = Some(response.clone()),
        Err(poisoned) => *poisoned.into_inner() = Some(response.clone()),
    }

    info!(alpha = %alpha, "render complete");

    Ok(Json(response))
}

/// `GET /api/v1/latest` — return the most recent render snapshot.
async fn latest_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RenderResponse>, AppError> {
    let latest = match state.latest.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };

    latest.map(Json).ok_or(AppError::NoRender)
}

/// `GET /health` — health check endpoint.
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ============================================================================
// Error Type
// ============================================================================

/// Handler-level errors, each mapped to an HTTP status and a JSON body.
#[derive(Debug)]
enum AppError {
    /// A concentration parameter failed validation (HTTP 400).
    InvalidAlpha(String),
    /// No render has completed yet (HTTP 404).
    NoRender,
    /// The render pipeline failed unexpectedly (HTTP 500).
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidAlpha(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NoRender => (StatusCode::NOT_FOUND, "no render yet".to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

// ============================================================================
// UI Page
// ============================================================================

/// The UI: three sliders in `[0.1, 10]` step 0.1 defaulting to `(2, 5, 3)`,
/// a chart region, a stats block, and two download links. The inline script
/// fetches a fresh render on every slider input and swaps all four outputs
/// in one pass.
const INDEX_HTML: &str = r##"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Dirichlet Distribution Visualizer</title>
<style>
  body { font-family: sans-serif; margin: 2rem auto; max-width: 720px; }
  .sliders { display: flex; gap: 2rem; margin: 1rem 0; }
  .sliders label { display: block; font-size: 0.9rem; }
  .sliders input { width: 160px; }
  #chart svg { max-width: 100%; height: auto; }
  #stats { background: #f4f4f4; padding: 0.75rem; }
  .downloads a { margin-right: 20px; }
</style>
</head>
<body>
<h2>Dirichlet Distribution Visualizer</h2>
<p>Alpha values (&alpha;1, &alpha;2, &alpha;3):</p>
<div class="sliders">
  <label>&alpha;1 = <span id="v1">2</span><br>
    <input type="range" id="alpha1" min="0.1" max="10" step="0.1" value="2"></label>
  <label>&alpha;2 = <span id="v2">5</span><br>
    <input type="range" id="alpha2" min="0.1" max="10" step="0.1" value="5"></label>
  <label>&alpha;3 = <span id="v3">3</span><br>
    <input type="range" id="alpha3" min="0.1" max="10" step="0.1" value="3"></label>
</div>
<div id="chart"></div>
<pre id="stats"></pre>
<div class="downloads">
  <a id="csv-link" href="" download="samples.csv">&#11015; Download CSV</a>
  <a id="html-link" href="" download="plot.html">&#11015; Download Plot (HTML)</a>
</div>
<script>
const sliders = ["alpha1", "alpha2", "alpha3"].map(id => document.getElementById(id));
const labels = ["v1", "v2", "v3"].map(id => document.getElementById(id));

async function refresh() {
  sliders.forEach((s, i) => { labels[i].textContent = s.value; });
  const params = new URLSearchParams({
    alpha1: sliders[0].value,
    alpha2: sliders[1].value,
    alpha3: sliders[2].value,
  });
  const res = await fetch(`/api/v1/render?${params}`);
  if (!res.ok) return; // keep the previous render on failure
  const out = await res.json();
  // Swap all four outputs together.
  document.getElementById("chart").innerHTML = out.chart_svg;
  document.getElementById("stats").textContent = out.stats;
  document.getElementById("csv-link").href = out.csv_href;
  document.getElementById("html-link").href = out.html_href;
}

sliders.forEach(s => s.addEventListener("input", refresh));
refresh();
</script>
</body>
</html>
"##;

// ============================================================================
// Tests
// ============================================================================
