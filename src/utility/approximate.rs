//! Randomized betweenness estimation by shortest-path sampling
//!
//! Riondato and Kornaropoulos: sample `r` node pairs uniformly, follow one
//! uniformly chosen shortest path between each pair, and credit every
//! interior node with `1/r`. With `r` sized from an upper bound on the vertex
//! diameter, every estimate is within `epsilon` of the pair-fraction
//! betweenness with probability at least `1 - delta`.

use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    Error, Result,
    network::{Graph, shortest_path_lengths, shortest_paths},
    utils::{NormalizationFallback, normalize_weights_with_fallback, sample_index},
};

/// Universal constant `c` of the sample-size bound.
pub const DEFAULT_CONSTANT: f64 = 1.0;

/// Smallest vertex diameter the sample-size formula accepts.
const MIN_VERTEX_DIAMETER: usize = 3;

/// Samples handled by one rayon task in [`ApproximateBetweenness::estimate_parallel`].
const CHUNK_SIZE: usize = 128;

/// Configuration of the (epsilon, delta) betweenness estimator.
///
/// # Examples
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use ngt::{network::Graph, utility::ApproximateBetweenness};
///
/// let star = Graph::from_edges(5, [(0, 1), (0, 2), (0, 3), (0, 4)])?;
/// let estimator = ApproximateBetweenness::new(0.1, 0.1)?;
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let estimates = estimator.estimate(&star, &mut rng);
/// assert_eq!(estimates.len(), 5);
/// // Only the hub lies inside shortest paths.
/// assert!(estimates[0] > 0.0);
/// assert!(estimates[1..].iter().all(|&b| b == 0.0));
/// # Ok::<(), ngt::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApproximateBetweenness {
    pub epsilon: f64,
    pub delta: f64,
    pub constant: f64,
}

impl ApproximateBetweenness {
    /// Create an estimator with additive error `epsilon` and failure
    /// probability `delta`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidProbability`] unless both parameters lie
    /// strictly between 0 and 1.
    pub fn new(epsilon: f64, delta: f64) -> Result<Self> {
        let estimator = Self {
            epsilon,
            delta,
            constant: DEFAULT_CONSTANT,
        };
        estimator.validate()?;
        Ok(estimator)
    }

    /// Override the universal constant `c` of the sample-size bound.
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("epsilon", self.epsilon), ("delta", self.delta)] {
            if !(value > 0.0 && value < 1.0) {
                return Err(Error::InvalidProbability {
                    parameter: parameter.to_string(),
                    value,
                });
            }
        }
        if !(self.constant > 0.0 && self.constant.is_finite()) {
            return Err(Error::InvalidConfiguration {
                message: format!("sample-size constant must be positive, got {}", self.constant),
            });
        }
        Ok(())
    }

    /// Upper bound on the vertex diameter: from a random source, the sum of
    /// the two largest finite distances. Never below 3.
    pub fn vertex_diameter<R: Rng>(graph: &Graph, rng: &mut R) -> usize {
        let n = graph.node_count();
        if n == 0 {
            return MIN_VERTEX_DIAMETER;
        }
        let source = rng.random_range(0..n);
        let mut distances: Vec<usize> = shortest_path_lengths(graph, source)
            .into_iter()
            .flatten()
            .filter(|&d| d > 0)
            .collect();
        if distances.len() < 2 {
            return MIN_VERTEX_DIAMETER;
        }
        distances.sort_unstable_by(|a, b| b.cmp(a));
        (distances[0] + distances[1]).max(MIN_VERTEX_DIAMETER)
    }

    /// Number of samples `r = ceil((c / eps^2) * (floor(log2(VD - 2)) + ln(1 / delta)))`.
    pub fn sample_size(&self, vertex_diameter: usize) -> usize {
        let vd = vertex_diameter.max(MIN_VERTEX_DIAMETER);
        let log_term = ((vd - 2) as f64).log2().floor();
        let bound = (self.constant / (self.epsilon * self.epsilon))
            * (log_term + (1.0 / self.delta).ln());
        (bound.ceil() as usize).max(1)
    }

    /// Estimate the pair-fraction betweenness of every node.
    pub fn estimate<R: Rng>(&self, graph: &Graph, rng: &mut R) -> Vec<f64> {
        let n = graph.node_count();
        let mut estimates = vec![0.0; n];
        if n < 2 {
            return estimates;
        }

        let vd = Self::vertex_diameter(graph, rng);
        let samples = self.sample_size(vd);
        trace!(vertex_diameter = vd, samples, "sampling shortest paths");

        let weight = 1.0 / samples as f64;
        for _ in 0..samples {
            sample_path(graph, rng, weight, &mut estimates);
        }
        estimates
    }

    /// Same estimate with sampling spread over rayon tasks.
    ///
    /// Each chunk of samples draws from its own RNG, seeded in order from
    /// `rng`, and partial sums are merged in chunk order. The result depends
    /// only on the caller's seed, not on thread scheduling.
    pub fn estimate_parallel<R: Rng>(&self, graph: &Graph, rng: &mut R) -> Vec<f64> {
        let n = graph.node_count();
        if n < 2 {
            return vec![0.0; n];
        }

        let vd = Self::vertex_diameter(graph, rng);
        let samples = self.sample_size(vd);
        let weight = 1.0 / samples as f64;
        let chunks: Vec<(u64, usize)> = (0..samples)
            .step_by(CHUNK_SIZE)
            .map(|start| (rng.random::<u64>(), CHUNK_SIZE.min(samples - start)))
            .collect();

        let partials: Vec<Vec<f64>> = chunks
            .par_iter()
            .map(|&(seed, count)| {
                let mut local_rng = StdRng::seed_from_u64(seed);
                let mut partial = vec![0.0; n];
                for _ in 0..count {
                    sample_path(graph, &mut local_rng, weight, &mut partial);
                }
                partial
            })
            .collect();

        let mut estimates = vec![0.0; n];
        for partial in partials {
            for (total, value) in estimates.iter_mut().zip(partial) {
                *total += value;
            }
        }
        estimates
    }

    /// Estimates rescaled to the normalization of
    /// [`betweenness_all`](super::betweenness_all), so they can stand in for
    /// exact values.
    pub fn estimate_normalized<R: Rng>(&self, graph: &Graph, rng: &mut R) -> Vec<f64> {
        rescale_to_normalized(graph.node_count(), self.estimate(graph, rng))
    }

    /// [`estimate_normalized`](Self::estimate_normalized) on top of
    /// [`estimate_parallel`](Self::estimate_parallel).
    pub fn estimate_normalized_parallel<R: Rng>(&self, graph: &Graph, rng: &mut R) -> Vec<f64> {
        rescale_to_normalized(graph.node_count(), self.estimate_parallel(graph, rng))
    }
}

fn rescale_to_normalized(n: usize, estimates: Vec<f64>) -> Vec<f64> {
    if n <= 2 {
        return vec![0.0; n];
    }
    let rescale = n as f64 / (n - 2) as f64;
    estimates.into_iter().map(|value| value * rescale).collect()
}

impl Default for ApproximateBetweenness {
    fn default() -> Self {
        Self {
            epsilon: 0.05,
            delta: 0.05,
            constant: DEFAULT_CONSTANT,
        }
    }
}

/// Draw one pair and credit the interior of one random shortest path.
/// Disconnected pairs contribute nothing.
fn sample_path<R: Rng>(graph: &Graph, rng: &mut R, weight: f64, estimates: &mut [f64]) {
    let n = graph.node_count();
    let source = rng.random_range(0..n);
    let mut target = rng.random_range(0..n - 1);
    if target >= source {
        target += 1;
    }

    let paths = shortest_paths(graph, source);
    if !paths.is_reachable(target) {
        return;
    }

    let mut current = target;
    loop {
        let predecessors = &paths.predecessors[current];
        let probabilities = normalize_weights_with_fallback(
            predecessors.iter().map(|&z| paths.sigma[z]),
            NormalizationFallback::Uniform,
        );
        let Some(idx) = probabilities.and_then(|p| sample_index(rng, &p)) else {
            return;
        };
        let next = predecessors[idx];
        if next == source {
            return;
        }
        estimates[next] += weight;
        current = next;
    }
}
