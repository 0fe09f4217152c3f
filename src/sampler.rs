//! Dirichlet sampling over the 3-simplex.
//!
//! One draw produces a full [`SampleSet`]: [`SAMPLE_COUNT`] independent
//! points, each a 3-tuple of non-negative reals summing to 1. Sample sets
//! are recomputed wholesale on every render and never mutated in place.

use rand::Rng;
use rand_distr::{Dirichlet, Distribution};

use crate::{Alpha, VizError};

/// Number of points drawn per render. Fixed by design; the visualizer is
/// not parameterized on sample size.
pub const SAMPLE_COUNT: usize = 1000;

/// An immutable set of points on the 3-simplex drawn from one Dirichlet
/// distribution.
#[derive(Debug, Clone)]
pub struct SampleSet {
    alpha: Alpha,
    points: Vec<[f64; 3]>,
}

impl SampleSet {
    /// Draw [`SAMPLE_COUNT`] points for the given concentration vector.
    ///
    /// Generic over the RNG so tests can pass a seeded [`rand::rngs::StdRng`]
    /// while the server uses [`rand::thread_rng`].
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Sampling`] if the distribution rejects the
    /// parameters. This cannot happen for an [`Alpha`] that passed
    /// validation, but the error path is kept explicit rather than panicking.
    pub fn draw<R: Rng + ?Sized>(alpha: Alpha, rng: &mut R) -> Result<Self, VizError> {
        Self::draw_n(alpha, SAMPLE_COUNT, rng)
    }

    /// Draw exactly `n` points. Exposed for tests; production callers use
    /// [`SampleSet::draw`].
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Sampling`] if the distribution rejects the
    /// parameters.
    pub fn draw_n<R: Rng + ?Sized>(
        alpha: Alpha,
        n: usize,
        rng: &mut R,
    ) -> Result<Self, VizError> {
        let dist = Dirichlet::new(&alpha.as_array())
            .map_err(|e| VizError::Sampling(e.to_string()))?;

        let mut points = Vec::with_capacity(n);
        for _ in 0..n {
            let v = dist.sample(rng);
            points.push([v[0], v[1], v[2]]);
        }

        Ok(Self { alpha, points })
    }

    /// The concentration vector these samples were drawn with.
    pub fn alpha(&self) -> Alpha {
        self.alpha
    }

    /// The sampled points, in draw order.
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    /// Number of points in the set.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` if the set contains no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
