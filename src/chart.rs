//! Ternary scatter chart rendering.
//!
//! Samples live on the 3-simplex, so each point is projected barycentrically
//! into an equilateral triangle (X1 top, X2 bottom-left, X3 bottom-right)
//! and drawn as an SVG scatter. Hover text comes from native SVG `<title>`
//! tooltips; pan/zoom and anything fancier is out of scope.

use crate::sampler::SampleSet;

// ── Geometry & style constants ────────────────────────────────────────────

/// Total SVG width in pixels.
const WIDTH: f64 = 640.0;
/// Total SVG height in pixels.
const HEIGHT: f64 = 600.0;
/// Margin around the triangle, leaving room for title and corner labels.
const MARGIN: f64 = 60.0;
/// Marker diameter of 5px, as in the original rendering.
const MARKER_RADIUS: f64 = 2.5;
/// Marker fill color.
const MARKER_COLOR: &str = "blue";
/// Marker opacity.
const MARKER_OPACITY: f64 = 0.6;

/// A rendered ternary scatter of one [`SampleSet`].
///
/// Holds projected pixel positions and per-point hover labels; derived from
/// the samples, never stored independently.
#[derive(Debug, Clone)]
pub struct TernaryChart {
    title: String,
    /// Pixel position and hover label per sample, in draw order.
    markers: Vec<(f64, f64, String)>,
}

impl TernaryChart {
    /// Project `samples` into the chart triangle under the given title.
    pub fn new(samples: &SampleSet, title: impl Into<String>) -> Self {
        let markers = samples
            .points()
            .iter()
            .map(|&[a, b, c]| {
                let (x, y) = project([a, b, c]);
                let hover = format!("X1: {a:.3}, X2: {b:.3}, X3: {c:.3}");
                (x, y, hover)
            })
            .collect();

        Self {
            title: title.into(),
            markers,
        }
    }

    /// The chart title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of markers in the chart (one per sample).
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Render the chart as an SVG fragment.
    pub fn to_svg(&self) -> String {
        let (ax, ay) = corner_a();
        let (bx, by) = corner_b();
        let (cx, cy) = corner_c();

        let mut svg = String::with_capacity(self.markers.len() * 120 + 1024);
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" width="{WIDTH}" height="{HEIGHT}">"#
        ));
        svg.push_str(&format!(
            r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#
        ));

        // Title, centered above the triangle
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="30" text-anchor="middle" font-family="sans-serif" font-size="18">{}</text>"#,
            WIDTH / 2.0,
            xml_escape(&self.title)
        ));

        // Triangle frame
        svg.push_str(&format!(
            r##"<path d="M {ax:.1} {ay:.1} L {bx:.1} {by:.1} L {cx:.1} {cy:.1} Z" fill="none" stroke="#444" stroke-width="1"/>"##
        ));

        // Corner axis labels
        svg.push_str(&format!(
            r#"<text x="{ax:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="14">X1</text>"#,
            ay - 12.0
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="14">X2</text>"#,
            bx - 14.0,
            by + 18.0
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="14">X3</text>"#,
            cx + 14.0,
            cy + 18.0
        ));

        // Markers with native hover tooltips
        for (x, y, hover) in &self.markers {
            svg.push_str(&format!(
                r#"<circle cx="{x:.2}" cy="{y:.2}" r="{MARKER_RADIUS}" fill="{MARKER_COLOR}" fill-opacity="{MARKER_OPACITY}"><title>{}</title></circle>"#,
                xml_escape(hover)
            ));
        }

        svg.push_str("</svg>");
        svg
    }

    /// Render a complete standalone HTML document embedding the chart.
    ///
    /// The document is self-contained: opening it in a browser requires no
    /// external fetches.
    pub fn to_html_document(&self) -> String {
        format!(
            "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n\
             <style>body {{ margin: 0; display: flex; justify-content: center; }}</style>\n\
             </head>\n<body>\n{}\n</body>\n</html>\n",
            xml_escape(&self.title),
            self.to_svg()
        )
    }
}

// ── Projection ────────────────────────────────────────────────────────────

/// Triangle corner for X1 (top).
fn corner_a() -> (f64, f64) {
    (WIDTH / 2.0, MARGIN)
}

/// Triangle corner for X2 (bottom-left).
fn corner_b() -> (f64, f64) {
    let side = WIDTH - 2.0 * MARGIN;
    (MARGIN, MARGIN + side * 3_f64.sqrt() / 2.0)
}

/// Triangle corner for X3 (bottom-right).
fn corner_c() -> (f64, f64) {
    let side = WIDTH - 2.0 * MARGIN;
    (WIDTH - MARGIN, MARGIN + side * 3_f64.sqrt() / 2.0)
}

/// Barycentric projection of a simplex point into pixel coordinates.
fn project([a, b, c]: [f64; 3]) -> (f64, f64) {
    let (ax, ay) = corner_a();
    let (bx, by) = corner_b();
    let (cx, cy) = corner_c();
    (
        a * ax + b * bx + c * cx,
        a * ay + b * by + c * cy,
    )
}

/// Escape text for embedding in SVG/HTML.
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
