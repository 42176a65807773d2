pub mod multinomial;
pub mod negative_binomial;

#[cfg(test)]
mod negative_binomial_tests;

pub use multinomial::sample_multinomial;
pub use negative_binomial::NegativeBinomial;

/// Build the normalized background frequency vector over all guides
///
/// The raw vector repeats `background` once per guide and is normalized to
/// sum to one, so every entry ends up at 1/num_guides. The scalar cancels on
/// purpose: it only matters relative to the boosted `signal * background`
/// entries placed by [`guide_frequencies`].
pub fn background_frequencies(background: f64, num_guides: usize) -> Vec<f64> {
    let raw = vec![background; num_guides];
    let total: f64 = raw.iter().sum();
    raw.iter().map(|w| w / total).collect()
}

/// Build the per-cell guide frequency vector
///
/// Starts from the normalized background vector. Cells with a primary
/// assignment get the raw weight `signal * background` on their primary
/// guide (and on the dual guide, if any); the vector is then renormalized.
/// Unassigned cells keep the uniform background vector unchanged.
pub fn guide_frequencies(
    base: &[f64],
    primary: i64,
    dual: i64,
    signal: f64,
    background: f64,
) -> Vec<f64> {
    let mut freqs = base.to_vec();
    if primary != -1 {
        freqs[primary as usize] = signal * background;
        if dual != -1 {
            freqs[dual as usize] = signal * background;
        }
        let total: f64 = freqs.iter().sum();
        for f in freqs.iter_mut() {
            *f /= total;
        }
    }
    freqs
}
