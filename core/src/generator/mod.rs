use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

/// Source of random indices used to place words and affiliations on the board.
pub trait IndexSampler {
    /// Uniform index in `[0, bound)`, `bound` must be positive.
    fn random_index(&mut self, bound: usize) -> usize;

    /// Fair coin, used to pick the starting team.
    fn coin_flip(&mut self) -> bool;

    /// Rejection sampling: redraws until the index is not in `excluded`.
    ///
    /// Never returns when `excluded` already covers `[0, bound)`, go through
    /// [`IndexSampler::draw_distinct`] when that can happen.
    fn random_index_excluding(&mut self, bound: usize, excluded: &BTreeSet<usize>) -> usize {
        loop {
            let index = self.random_index(bound);
            if !excluded.contains(&index) {
                return index;
            }
        }
    }

    /// Draws `count` distinct indices in `[0, bound)`, in draw order.
    fn draw_distinct(&mut self, count: usize, bound: usize) -> Result<Vec<usize>> {
        if count > bound {
            return Err(GameError::PoolTooSmall {
                required: count,
                available: bound,
            });
        }

        let mut excluded = BTreeSet::new();
        let mut picks = Vec::with_capacity(count);
        for _ in 0..count {
            let index = self.random_index_excluding(bound, &excluded);
            excluded.insert(index);
            picks.push(index);
        }
        Ok(picks)
    }
}

impl<S: IndexSampler + ?Sized> IndexSampler for &mut S {
    fn random_index(&mut self, bound: usize) -> usize {
        (**self).random_index(bound)
    }

    fn coin_flip(&mut self) -> bool {
        (**self).coin_flip()
    }
}
