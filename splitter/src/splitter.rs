use std::num::NonZeroUsize;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::buckets::BucketSet;
use crate::error::{Error, Result};
use crate::weights::Weights;
use crate::well::Well;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Lines may still be added.
    Accepting,
    /// The final permute and assign pass is running.
    Finalizing,
    /// Buckets are complete and will not change again.
    Finalized,
}

/// Collects lines into a well and, on [`Splitter::finalize`], shuffles them
/// and deals each one into a bucket with probability proportional to the
/// bucket's weight.
///
/// With a well capacity set, the well is distributed every time it fills up
/// and `finalize` only has to deal with the remainder.
#[derive(Debug)]
pub struct Splitter<R = StdRng> {
    buckets: BucketSet,
    weights: Weights,
    well: Well,
    well_capacity: Option<NonZeroUsize>,
    state: State,
    rng: R,
}

impl Splitter<StdRng> {
    pub fn new(buckets: BucketSet, weights: Weights) -> Result<Self> {
        Self::with_rng(buckets, weights, StdRng::from_entropy())
    }

    pub fn seeded(buckets: BucketSet, weights: Weights, seed: u64) -> Result<Self> {
        Self::with_rng(buckets, weights, StdRng::seed_from_u64(seed))
    }

    /// A `test`/`train` splitter sending `train_percent` of the lines to
    /// training. A seed makes the split reproducible.
    pub fn train_test(train_percent: u32, seed: Option<u64>) -> Result<Self> {
        let buckets = BucketSet::train_test();
        let weights = Weights::train_test(train_percent)?;

        match seed {
            Some(seed) => Self::seeded(buckets, weights, seed),
            None => Self::new(buckets, weights),
        }
    }
}

impl<R: Rng> Splitter<R> {
    pub fn with_rng(buckets: BucketSet, weights: Weights, rng: R) -> Result<Self> {
        if let Some(index) = weights.indices().find(|&index| index >= buckets.len()) {
            return Err(Error::UnknownBucket {
                index,
                buckets: buckets.len(),
            });
        }

        Ok(Self {
            buckets,
            weights,
            well: Well::new(),
            well_capacity: None,
            state: State::Accepting,
            rng,
        })
    }

    /// Distribute the well every time it holds `capacity` lines instead of
    /// keeping everything until [`Splitter::finalize`].
    pub fn with_well_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.well = Well::with_capacity(capacity.get());
        self.well_capacity = Some(capacity);
        self
    }

    /// Queues a line as-is. Nothing about its content is checked.
    pub fn add_line(&mut self, line: impl Into<Vec<u8>>) -> Result<()> {
        if self.state != State::Accepting {
            return Err(Error::Finalized);
        }

        self.well.push(line.into());

        if let Some(capacity) = self.well_capacity {
            if self.well.count() >= capacity.get() {
                self.distribute();
            }
        }

        Ok(())
    }

    /// Distributes everything left in the well and freezes the buckets.
    ///
    /// Returns `false` without touching anything if the splitter was already
    /// finalized.
    pub fn finalize(&mut self) -> bool {
        if self.state != State::Accepting {
            return false;
        }

        self.state = State::Finalizing;
        self.distribute();
        self.state = State::Finalized;

        log::debug!(
            "Finalized {} lines into {} buckets",
            self.buckets.total_lines(),
            self.buckets.len()
        );

        true
    }

    fn distribute(&mut self) {
        let count = self.well.count();

        // The whole well is permuted before the first draw.
        for line in self.well.drain_shuffled(&mut self.rng) {
            let index = self.weights.pick(self.rng.gen::<f64>());
            self.buckets.push(index, line);
        }

        log::debug!("Distributed {} lines from the well", count);
    }
}

impl<R> Splitter<R> {
    pub fn buckets(&self) -> &BucketSet {
        &self.buckets
    }

    pub fn into_buckets(self) -> BucketSet {
        self.buckets
    }
}

#[cfg(test)]
impl<R> Splitter<R> {
    pub(crate) fn state(&self) -> State {
        self.state
    }

    pub(crate) fn is_finalized(&self) -> bool {
        self.state == State::Finalized
    }

    /// Lines waiting in the well.
    pub(crate) fn well_count(&self) -> usize {
        self.well.count()
    }
}
