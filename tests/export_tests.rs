//! CSV export, data URIs, and chart document structure.

use rand::rngs::StdRng;
use rand::SeedableRng;

use dirichlet_viz::sampler::SampleSet;
use dirichlet_viz::{samples_to_csv, to_data_uri, Alpha, TernaryChart};

fn sample_set(seed: u64) -> SampleSet {
    let alpha = Alpha::default();
    let mut rng = StdRng::seed_from_u64(seed);
    SampleSet::draw(alpha, &mut rng).expect("draw")
}

// ============================================================================
// CSV
// ============================================================================

#[test]
fn test_csv_has_header_and_1000_rows() {
    let csv = samples_to_csv(&sample_set(1));
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("X1,X2,X3"));
    assert_eq!(lines.count(), 1000);
}

#[test]
fn test_csv_round_trip_recovers_all_samples() {
    let samples = sample_set(2);
    let csv = samples_to_csv(&samples);

    let parsed: Vec<[f64; 3]> = csv
        .lines()
        .skip(1)
        .map(|line| {
            let mut cells = line.split(',').map(|v| v.parse::<f64>().expect("f64 cell"));
            [
                cells.next().expect("X1"),
                cells.next().expect("X2"),
                cells.next().expect("X3"),
            ]
        })
        .collect();

    assert_eq!(parsed.len(), 1000);
    assert_eq!(parsed.as_slice(), samples.points());
}

#[test]
fn test_csv_rows_satisfy_simplex_invariant_after_parse() {
    let csv = samples_to_csv(&sample_set(3));
    for line in csv.lines().skip(1) {
        let sum: f64 = line
            .split(',')
            .map(|v| v.parse::<f64>().expect("f64 cell"))
            .sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }
}

// ============================================================================
// Data URIs
// ============================================================================

#[test]
fn test_csv_data_uri_decodes_back_to_csv() {
    let samples = sample_set(4);
    let csv = samples_to_csv(&samples);
    let uri = to_data_uri("text/csv", &csv);

    let encoded = uri
        .strip_prefix("data:text/csv;charset=utf-8,")
        .expect("data URI prefix");
    assert_eq!(percent_decode(encoded), csv);
}

#[test]
fn test_data_uri_is_attribute_safe() {
    let uri = to_data_uri("text/html", "<a href=\"x\">&amp;</a>\n");
    assert!(!uri.contains('"'));
    assert!(!uri.contains('<'));
    assert!(!uri.contains('\n'));
    assert!(!uri.contains(' '));
}

/// Minimal decoder for round-trip assertions.
fn percent_decode(s: &str) -> String {
    let mut bytes = Vec::with_capacity(s.len());
    let mut iter = s.bytes();
    while let Some(b) = iter.next() {
        if b == b'%' {
            let hi = iter.next().expect("hex digit");
            let lo = iter.next().expect("hex digit");
            let hex = [hi, lo];
            let hex = std::str::from_utf8(&hex).expect("ascii hex");
            bytes.push(u8::from_str_radix(hex, 16).expect("hex byte"));
        } else {
            bytes.push(b);
        }
    }
    String::from_utf8(bytes).expect("utf-8 payload")
}

// ============================================================================
// Chart documents
// ============================================================================

#[test]
fn test_chart_svg_has_1000_hoverable_markers() {
    let samples = sample_set(5);
    let svg = TernaryChart::new(&samples, "α = [2, 5, 3]").to_svg();
    assert_eq!(svg.matches("<circle").count(), 1000);
    assert_eq!(svg.matches("<title>").count(), 1000);
}

#[test]
fn test_chart_hover_text_matches_sample_to_three_decimals() {
    let samples = sample_set(6);
    let svg = TernaryChart::new(&samples, "t").to_svg();
    let [a, b, c] = samples.points()[0];
    let hover = format!("X1: {a:.3}, X2: {b:.3}, X3: {c:.3}");
    assert!(svg.contains(&hover));
}

#[test]
fn test_chart_document_embeds_full_svg() {
    let samples = sample_set(7);
    let chart = TernaryChart::new(&samples, "α = [2, 5, 3]");
    let html = chart.to_html_document();
    assert!(html.starts_with("<!doctype html>"));
    assert!(html.contains(&chart.to_svg()));
    assert!(html.ends_with("</html>\n"));
}
