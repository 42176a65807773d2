use super::NegativeBinomial;
use rand::prelude::*;
use rand_distr::Distribution;

#[test]
fn test_invalid_parameters_rejected() {
    assert!(NegativeBinomial::new(0.0, 0.1).is_err());
    assert!(NegativeBinomial::new(-1.0, 0.1).is_err());
    assert!(NegativeBinomial::new(f64::NAN, 0.1).is_err());
    assert!(NegativeBinomial::new(10.0, 0.0).is_err());
    assert!(NegativeBinomial::new(10.0, -0.5).is_err());
    assert!(NegativeBinomial::new(10.0, 1.5).is_err());
    assert!(NegativeBinomial::new(10.0, f64::NAN).is_err());
}

#[test]
fn test_degenerate_success_probability() {
    // p = 1 is a point mass at zero
    let dist = NegativeBinomial::new(10.0, 1.0).expect("p = 1 is a valid edge case");
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..1000 {
        assert_eq!(dist.sample(&mut rng), 0u64);
    }
}

#[test]
fn test_seeded_sampling_is_deterministic() {
    let dist = NegativeBinomial::new(10.0, 0.1).unwrap();

    let mut rng1 = StdRng::seed_from_u64(42);
    let mut rng2 = StdRng::seed_from_u64(42);

    let draws1: Vec<u64> = (0..100).map(|_| dist.sample(&mut rng1)).collect();
    let draws2: Vec<u64> = (0..100).map(|_| dist.sample(&mut rng2)).collect();

    assert_eq!(draws1, draws2);
}

#[cfg(test)]
mod statistical_tests {
    use super::*;

    #[test]
    fn test_sample_mean_matches_distribution() {
        // NB(n, p) has mean n * (1 - p) / p = 90 for n = 10, p = 0.1
        let dist = NegativeBinomial::new(10.0, 0.1).unwrap();
        let mut rng = StdRng::seed_from_u64(1234);

        let num_samples = 20_000;
        let total: u64 = (0..num_samples).map(|_| dist.sample(&mut rng)).sum();
        let mean = total as f64 / num_samples as f64;

        // Standard error is ~0.21, so a +/- 2.0 window is very lenient
        assert!(
            (mean - 90.0).abs() < 2.0,
            "Sample mean {} is too far from expected 90.0",
            mean
        );
    }

    #[test]
    fn test_sample_variance_matches_distribution() {
        // NB(n, p) has variance n * (1 - p) / p^2 = 900 for n = 10, p = 0.1
        let dist = NegativeBinomial::new(10.0, 0.1).unwrap();
        let mut rng = StdRng::seed_from_u64(5678);

        let num_samples = 20_000;
        let draws: Vec<f64> = (0..num_samples)
            .map(|_| dist.sample(&mut rng) as f64)
            .collect();

        let mean = draws.iter().sum::<f64>() / num_samples as f64;
        let variance = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>()
            / (num_samples - 1) as f64;

        assert!(
            (variance - 900.0).abs() < 0.2 * 900.0,
            "Sample variance {} deviates more than 20% from expected 900.0",
            variance
        );
    }
}
