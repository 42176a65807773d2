use rand::Rng;
use rand_distr::{Distribution, Gamma, Poisson};

use crate::errors::MuxSimError;

/// Negative-binomial distribution over non-negative counts
///
/// Sampled as a gamma-Poisson mixture: draw a rate from
/// `Gamma(shape = n, scale = (1 - p) / p)`, then a count from
/// `Poisson(rate)`. This matches the NB(n, p) parameterization commonly
/// used for sequencing depth, with mean `n * (1 - p) / p`.
#[derive(Debug, Clone, Copy)]
pub struct NegativeBinomial {
    // None when p == 1: the distribution is a point mass at zero and the
    // gamma scale would be zero.
    mixing: Option<Gamma<f64>>,
}

impl NegativeBinomial {
    /// Create a new distribution with shape `n > 0` and success
    /// probability `p` in (0, 1].
    pub fn new(n: f64, p: f64) -> Result<Self, MuxSimError> {
        if !n.is_finite() || n <= 0.0 {
            return Err(MuxSimError::InvalidParameter(format!(
                "negative binomial n must be a positive finite value, got {n}"
            )));
        }
        if !p.is_finite() || p <= 0.0 || p > 1.0 {
            return Err(MuxSimError::InvalidParameter(format!(
                "negative binomial p must be in (0, 1], got {p}"
            )));
        }

        if p >= 1.0 {
            return Ok(Self { mixing: None });
        }

        let scale = (1.0 - p) / p;
        let mixing = Gamma::new(n, scale).map_err(|e| {
            MuxSimError::InvalidParameter(format!("invalid gamma mixture parameters: {e}"))
        })?;

        Ok(Self {
            mixing: Some(mixing),
        })
    }
}

impl Distribution<u64> for NegativeBinomial {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        let mixing = match &self.mixing {
            Some(gamma) => gamma,
            None => return 0,
        };

        let rate = mixing.sample(rng);
        if !rate.is_finite() || rate <= 0.0 {
            return 0;
        }

        match Poisson::new(rate) {
            Ok(poisson) => poisson.sample(rng) as u64,
            Err(_) => 0,
        }
    }
}
