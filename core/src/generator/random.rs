use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Sampler backed by a `rand` generator.
///
/// Indices come from scaling a uniform `[0, 1)` draw by the bound and truncating it, so there is a
/// tiny floating point bias for very large bounds, which does not matter for a word list.
#[derive(Clone, Debug)]
pub struct RandomAssignmentEngine<R = SmallRng> {
    rng: R,
}

impl RandomAssignmentEngine<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl<R: Rng> RandomAssignmentEngine<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> IndexSampler for RandomAssignmentEngine<R> {
    fn random_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "cannot draw from an empty range");
        let unit: f64 = self.rng.random();
        // truncation is floor for non-negative values, min guards the rounding edge
        ((unit * bound as f64) as usize).min(bound.saturating_sub(1))
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}
