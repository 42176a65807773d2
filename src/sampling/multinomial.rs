use rand::Rng;
use rand_distr::{Binomial, Distribution};

use crate::errors::MuxSimError;

/// Draw a multinomial sample using the conditional-binomial decomposition
///
/// Walks the frequency vector left to right, drawing for each category a
/// binomial over the trials not yet allocated, conditioned on the remaining
/// probability mass. The final category absorbs whatever is left, so the
/// counts always sum to `trials` exactly.
pub fn sample_multinomial<R: Rng + ?Sized>(
    trials: u64,
    freqs: &[f64],
    rng: &mut R,
) -> Result<Vec<u64>, MuxSimError> {
    if freqs.is_empty() {
        return Err(MuxSimError::InvalidParameter(
            "frequency vector must be non-empty".to_string(),
        ));
    }

    let mut counts = vec![0u64; freqs.len()];
    let mut remaining = trials;
    let mut rest: f64 = freqs.iter().sum();

    for (idx, &freq) in freqs.iter().enumerate() {
        if remaining == 0 {
            break;
        }
        if idx == freqs.len() - 1 {
            counts[idx] = remaining;
            break;
        }

        let conditional = freq / rest;
        if !conditional.is_finite() || conditional >= 1.0 {
            // Remaining mass is concentrated on this category
            counts[idx] = remaining;
            break;
        }

        let binomial = Binomial::new(remaining, conditional).map_err(|e| {
            MuxSimError::InvalidParameter(format!("invalid binomial split: {e}"))
        })?;
        let drawn = binomial.sample(rng);

        counts[idx] = drawn;
        remaining -= drawn;
        rest -= freq;
    }

    Ok(counts)
}
