//! # dirichlet-viz
//!
//! An interactive web visualizer for the Dirichlet distribution over the
//! 3-simplex, served over Tokio + axum.
//!
//! ## Pipeline
//!
//! Every render request runs one synchronous pass:
//! ```text
//! Alpha → Sampler(1000) → SummaryStats → Chart(SVG/HTML) → Exporter(CSV/data URIs)
//! ```
//! and publishes all four outputs (chart, CSV link, HTML link, stats text)
//! together — no partial update is ever observable.

// ── Lint policy ───────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(missing_docs)]

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub mod chart;
pub mod export;
pub mod sampler;
pub mod stats;
pub mod web;

// Re-exports for convenience
pub use chart::TernaryChart;
pub use export::{samples_to_csv, to_data_uri};
pub use sampler::SampleSet;
pub use stats::SummaryStats;
pub use web::{start_server, ServerConfig};

/// Initialise the global tracing subscriber.
///
/// Reads the `LOG_FORMAT` environment variable to choose output format:
/// - `"json"` — structured JSON output for production log aggregators
/// - anything else (including unset) — human-readable pretty output
///   for local development
///
/// Filter level is controlled by `RUST_LOG` (e.g. `RUST_LOG=info`).
///
/// # Errors
///
/// Returns [`VizError::Other`] if the global subscriber has already been set
/// (e.g. by a previous call or a test harness).
pub fn init_tracing() -> Result<(), VizError> {
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let result = match format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .with_current_span(true)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init(),
    };

    result.map_err(|e| VizError::Other(format!("tracing init failed: {e}")))
}

/// Top-level errors for the visualizer.
///
/// Every error surface in the render pipeline is mapped to a variant here.
/// All variants implement `std::error::Error` via [`thiserror`].
#[derive(Error, Debug)]
pub enum VizError {
    /// A concentration parameter is non-positive or not finite.
    ///
    /// The UI's sliders cannot produce such a value; this surfaces only on
    /// direct API use and is mapped to HTTP 400 by the web layer.
    #[error("invalid concentration parameter: {0}")]
    InvalidAlpha(String),

    /// The underlying distribution sampler rejected the parameters.
    #[error("sampling failed: {0}")]
    Sampling(String),

    /// Catch-all for errors that do not fit a specific variant.
    #[error("{0}")]
    Other(String),
}

/// A validated Dirichlet concentration vector `(α1, α2, α3)`.
///
/// Construction enforces the mathematical requirement (each component
/// positive and finite); the narrower `[0.1, 10]` range is a UI constraint
/// enforced by the slider widgets, not by this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alpha([f64; 3]);

impl Alpha {
    /// Create a new [`Alpha`] from three concentration parameters.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::InvalidAlpha`] if any component is non-positive,
    /// NaN, or infinite.
    pub fn new(a1: f64, a2: f64, a3: f64) -> Result<Self, VizError> {
        for (i, a) in [a1, a2, a3].iter().enumerate() {
            if !a.is_finite() || *a <= 0.0 {
                return Err(VizError::InvalidAlpha(format!(
                    "alpha{} must be positive and finite, got {a}",
                    i + 1
                )));
            }
        }
        Ok(Self([a1, a2, a3]))
    }

    /// Return the three components as an array.
    pub fn as_array(&self) -> [f64; 3] {
        self.0
    }

    /// Sum of the three components (`Σα`).
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Theoretical per-coordinate mean of the distribution, `αi / Σα`.
    pub fn theoretical_mean(&self) -> [f64; 3] {
        let total = self.sum();
        [self.0[0] / total, self.0[1] / total, self.0[2] / total]
    }
}

impl Default for Alpha {
    /// The UI's default slider positions: `(2, 5, 3)`.
    fn default() -> Self {
        Self([2.0, 5.0, 3.0])
    }
}

impl std::fmt::Display for Alpha {
    /// Formats as `[2, 5, 3]`, matching the chart title convention.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.0[0], self.0[1], self.0[2])
    }
}
