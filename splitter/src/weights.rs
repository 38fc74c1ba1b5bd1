use std::collections::BTreeMap;

use crate::buckets::{TESTING, TRAINING};
use crate::error::{Error, Result};

/// Relative bucket weights.
///
/// The weights don't have to add up to 100, every draw is normalized by the
/// total. Buckets are walked in ascending weight order (ties broken by bucket
/// index), materialized once here so that every draw in a pass accumulates
/// the same floating point sums in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    order: Vec<(usize, u32)>,
    total: u64,
    fallback: usize,
}

impl Weights {
    /// Builds weights from `(bucket index, weight)` pairs. A repeated index
    /// keeps its last weight.
    pub fn new<I>(weights: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, u32)>,
    {
        let by_index: BTreeMap<usize, u32> = weights.into_iter().collect();
        let total: u64 = by_index.values().map(|&weight| weight as u64).sum();

        let mut order: Vec<(usize, u32)> = by_index.into_iter().collect();
        order.sort_by_key(|&(index, weight)| (weight, index));

        // Rounding can leave a draw unmatched at the end of the walk; it then
        // goes to the last bucket that is allowed to receive lines at all.
        let fallback = order
            .iter()
            .rev()
            .find(|&&(_, weight)| weight > 0)
            .map(|&(index, _)| index)
            .ok_or(Error::ZeroTotalWeight)?;

        Ok(Self {
            order,
            total,
            fallback,
        })
    }

    /// The standard two bucket layout: `train_percent` to training, the rest
    /// to testing.
    pub fn train_test(train_percent: u32) -> Result<Self> {
        if train_percent > 100 {
            return Err(Error::PercentOutOfRange(train_percent));
        }

        Self::new([(TESTING, 100 - train_percent), (TRAINING, train_percent)])
    }

    /// Bucket indices in walk order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().map(|&(index, _)| index)
    }

    /// Maps a uniform draw in `[0, 1)` to a bucket index.
    pub fn pick(&self, choice: f64) -> usize {
        let total = self.total as f64;
        let mut cumulative = 0.0;

        for &(index, weight) in &self.order {
            cumulative += weight as f64 / total;
            if choice < cumulative {
                return index;
            }
        }

        self.fallback
    }
}

#[cfg(test)]
impl Weights {
    fn get(&self, index: usize) -> Option<u32> {
        self.order
            .iter()
            .find(|&&(i, _)| i == index)
            .map(|&(_, weight)| weight)
    }

    fn total(&self) -> u64 {
        self.total
    }
}
