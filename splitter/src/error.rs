use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("PERCENT must be between 0 and 100, got {0}")]
    PercentOutOfRange(u32),

    /// Every configured weight is zero, so no bucket could ever be chosen.
    #[error("bucket weights sum to zero")]
    ZeroTotalWeight,

    #[error("weight configured for bucket {index}, but only {buckets} buckets exist")]
    UnknownBucket { index: usize, buckets: usize },

    #[error("splitter is already finalized")]
    Finalized,
}

pub type Result<T> = std::result::Result<T, Error>;
