pub const TESTING: usize = 0;
pub const TRAINING: usize = 1;

/// A named output partition. Lines are raw bytes, kept in the order they
/// were assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    name: String,
    lines: Vec<Vec<u8>>,
}

impl Bucket {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSet {
    buckets: Vec<Bucket>,
}

impl BucketSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            buckets: names.into_iter().map(Bucket::new).collect(),
        }
    }

    /// `test` at [`TESTING`], `train` at [`TRAINING`].
    pub fn train_test() -> Self {
        Self::new(["test", "train"])
    }

    pub fn get(&self, index: usize) -> Option<&Bucket> {
        self.buckets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of lines across all buckets.
    pub fn total_lines(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }

    pub(crate) fn push(&mut self, index: usize, line: Vec<u8>) {
        self.buckets[index].lines.push(line);
    }
}
