pub mod buckets;
pub mod error;
mod folds;
mod shared;
mod splitter;
pub mod weights;
pub mod well;

pub use buckets::{Bucket, BucketSet, TESTING, TRAINING};
pub use error::{Error, Result};
pub use folds::folds;
pub use shared::SharedSplitter;
pub use splitter::Splitter;
pub use weights::Weights;
pub use well::Well;
