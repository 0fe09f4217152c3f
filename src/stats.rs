//! Per-coordinate summary statistics for a sample set.

use crate::sampler::SampleSet;

/// Per-coordinate mean and standard deviation, rounded to 3 decimals.
///
/// Derived from a [`SampleSet`] and recomputed with it on every render;
/// never updated incrementally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    /// Mean of each coordinate.
    pub mean: [f64; 3],
    /// Sample standard deviation (n − 1 denominator) of each coordinate.
    pub std_dev: [f64; 3],
}

/// Round to 3 decimal places.
fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

impl SummaryStats {
    /// Compute mean and standard deviation over each of the three
    /// coordinates of `samples`.
    ///
    /// An empty set yields all zeros; the server never produces one, but the
    /// arithmetic should not divide by zero either way.
    pub fn from_samples(samples: &SampleSet) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self {
                mean: [0.0; 3],
                std_dev: [0.0; 3],
            };
        }

        let mut sum = [0.0_f64; 3];
        for p in samples.points() {
            for i in 0..3 {
                sum[i] += p[i];
            }
        }
        let mean = [
            sum[0] / n as f64,
            sum[1] / n as f64,
            sum[2] / n as f64,
        ];

        let mut sq = [0.0_f64; 3];
        for p in samples.points() {
            for i in 0..3 {
                let d = p[i] - mean[i];
                sq[i] += d * d;
            }
        }
        // Sample (n−1) standard deviation, matching the original report.
        let denom = if n > 1 { (n - 1) as f64 } else { 1.0 };
        let std_dev = [
            (sq[0] / denom).sqrt(),
            (sq[1] / denom).sqrt(),
            (sq[2] / denom).sqrt(),
        ];

        Self {
            mean: [round3(mean[0]), round3(mean[1]), round3(mean[2])],
            std_dev: [round3(std_dev[0]), round3(std_dev[1]), round3(std_dev[2])],
        }
    }

    /// Render as the preformatted text table shown under the chart:
    ///
    /// ```text
    ///           X1      X2      X3
    /// mean   0.200   0.500   0.300
    /// std    0.091   0.107   0.095
    /// ```
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{:<5}{:>8}{:>8}{:>8}\n", "", "X1", "X2", "X3"));
        out.push_str(&format!(
            "{:<5}{:>8.3}{:>8.3}{:>8.3}\n",
            "mean", self.mean[0], self.mean[1], self.mean[2]
        ));
        out.push_str(&format!(
            "{:<5}{:>8.3}{:>8.3}{:>8.3}",
            "std", self.std_dev[0], self.std_dev[1], self.std_dev[2]
        ));
        out
    }
}
