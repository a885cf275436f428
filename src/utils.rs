//! Numeric and sampling helpers shared across the crate

use rand::{Rng, distr::StandardUniform};

/// Fallback behavior when weight normalization fails (zero or negative total).
#[derive(Debug, Clone, Copy)]
pub enum NormalizationFallback {
    /// Return None if normalization fails
    None,
    /// Fall back to uniform distribution
    Uniform,
}

/// Normalize weights to probabilities that sum to 1.0 with configurable fallback.
///
/// # Arguments
///
/// * `weights` - Iterator of weight values
/// * `fallback` - Strategy to use when normalization fails
///
/// # Examples
///
/// ```
/// use ngt::utils::{normalize_weights_with_fallback, NormalizationFallback};
///
/// let normalized =
///     normalize_weights_with_fallback(vec![1.0, 2.0, 1.0], NormalizationFallback::None).unwrap();
/// assert_eq!(normalized, vec![0.25, 0.5, 0.25]);
///
/// let normalized =
///     normalize_weights_with_fallback(vec![0.0, 0.0], NormalizationFallback::Uniform).unwrap();
/// assert_eq!(normalized, vec![0.5, 0.5]);
/// ```
pub fn normalize_weights_with_fallback<I>(
    weights: I,
    fallback: NormalizationFallback,
) -> Option<Vec<f64>>
where
    I: IntoIterator<Item = f64>,
{
    let weights_vec: Vec<f64> = weights.into_iter().collect();

    if weights_vec.is_empty() {
        return match fallback {
            NormalizationFallback::None => None,
            NormalizationFallback::Uniform => Some(vec![]),
        };
    }

    let sum: f64 = weights_vec.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return apply_fallback(fallback, weights_vec.len());
    }

    Some(weights_vec.iter().map(|&w| w / sum).collect())
}

fn apply_fallback(fallback: NormalizationFallback, len: usize) -> Option<Vec<f64>> {
    match fallback {
        NormalizationFallback::None => None,
        NormalizationFallback::Uniform => {
            let uniform = 1.0 / len as f64;
            Some(vec![uniform; len])
        }
    }
}

/// Sample an index from a probability vector by cumulative search.
///
/// Floating-point drift can leave the cumulative sum slightly below 1, in
/// which case the last index is returned. Returns `None` for an empty slice.
pub fn sample_index<R: Rng>(rng: &mut R, probabilities: &[f64]) -> Option<usize> {
    if probabilities.is_empty() {
        return None;
    }
    let ticket: f64 = rng.sample(StandardUniform);
    let mut cumulative = 0.0;
    for (idx, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if ticket < cumulative {
            return Some(idx);
        }
    }
    Some(probabilities.len() - 1)
}

/// Derive an independent seed for a sub-stream (a round, a chunk) from a
/// base seed. SplitMix64 finalizer.
pub fn derive_seed(base: u64, stream: u64) -> u64 {
    let mut z = base ^ stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn sample_index_tolerates_drift() {
        let mut rng = StdRng::seed_from_u64(1);
        let drifted = [0.3, 0.3, 0.399_999_999];
        for _ in 0..100 {
            let idx = sample_index(&mut rng, &drifted).unwrap();
            assert!(idx < 3);
        }
        assert_eq!(sample_index(&mut rng, &[]), None);
    }

    #[test]
    fn zero_total_uses_fallback() {
        assert!(normalize_weights_with_fallback(vec![0.0, 0.0], NormalizationFallback::None).is_none());
        assert_eq!(
            normalize_weights_with_fallback(vec![0.0, 0.0], NormalizationFallback::Uniform),
            Some(vec![0.5, 0.5])
        );
    }

    #[test]
    fn derived_seeds_differ_per_stream() {
        assert_ne!(derive_seed(42, 0), derive_seed(42, 1));
        assert_eq!(derive_seed(42, 3), derive_seed(42, 3));
    }
}
