//! Export of samples and charts as downloadable payloads.
//!
//! Both conversions are stateless and built entirely in memory; nothing is
//! written to disk. The download links handed to the browser are `data:`
//! URIs carrying the full payload, so the link a client sees always matches
//! the chart and stats it was published with.

use crate::sampler::SampleSet;

/// Serialize a sample set as CSV with a `X1,X2,X3` header row.
///
/// Values are written with `f64`'s shortest round-trippable representation,
/// so parsing the output recovers the samples exactly.
pub fn samples_to_csv(samples: &SampleSet) -> String {
    let mut csv = String::with_capacity(samples.len() * 60 + 16);
    csv.push_str("X1,X2,X3\n");
    for [a, b, c] in samples.points() {
        csv.push_str(&format!("{a},{b},{c}\n"));
    }
    csv
}

/// Build a `data:` URI for `payload` under the given MIME type.
///
/// The payload is percent-encoded so the URI survives attribute embedding
/// regardless of content.
pub fn to_data_uri(mime: &str, payload: &str) -> String {
    let mut uri = String::with_capacity(payload.len() * 3 / 2 + mime.len() + 32);
    uri.push_str("data:");
    uri.push_str(mime);
    uri.push_str(";charset=utf-8,");
    uri.push_str(&percent_encode(payload));
    uri
}

/// Percent-encode everything outside the URI unreserved set.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3 / 2);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
