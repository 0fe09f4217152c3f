//! Server binary for dirichlet-viz.
//!
//! Binds the visualizer on all interfaces (port 8080 unless `PORT` says
//! otherwise) and serves the UI until killed.
//!
//! ## Environment Variables
//!
//! - `HOST` / `PORT` — bind address overrides (hosting platform convention)
//! - `LOG_FORMAT=json` — structured JSON output (production)
//! - `RUST_LOG=info` — log level filter

use dirichlet_viz::{init_tracing, start_server, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize structured tracing (JSON or pretty, based on LOG_FORMAT env)
    let _ = init_tracing();

    let config = ServerConfig::from_env();
    info!(host = %config.host, port = config.port, "Starting dirichlet-viz");

    start_server(config).await
}
