use rand::Rng;

/// Lines ingested since the last distribution.
#[derive(Debug, Default, Clone)]
pub struct Well {
    lines: Vec<Vec<u8>>,
}

impl Well {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: Vec::with_capacity(capacity),
        }
    }

    /// Appends a line verbatim; empty, duplicate and non-UTF-8 lines are kept.
    #[inline]
    pub fn push(&mut self, line: Vec<u8>) {
        self.lines.push(line);
    }

    pub fn count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Shuffles the well in place, then hands its lines out in the new order,
    /// leaving the well empty.
    pub fn drain_shuffled<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> std::vec::Drain<'_, Vec<u8>> {
        permute(&mut self.lines, rng);
        self.lines.drain(..)
    }
}

/// Uniform in-place shuffle: position `i` is swapped with a position drawn
/// uniformly from `[i, n)`, for every `i` but the last.
pub fn permute<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    let n = items.len();
    if n < 2 {
        return;
    }

    for i in 0..n - 1 {
        let j = rng.gen_range(i..n);
        items.swap(i, j);
    }
}
