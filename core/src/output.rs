use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use splitter::{folds, Bucket, BucketSet, TRAINING};

use crate::error::RunError;

/// Where a finished split is written: one `<base>.<bucket>` file per bucket,
/// plus `<base>.train.V.<k>` per validation fold.
#[derive(Debug, Clone)]
pub struct Destination {
    base: String,
    folds: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub path: PathBuf,
    pub lines: usize,
}

impl Destination {
    pub fn new(base: impl Into<String>, folds: usize) -> Self {
        Self {
            base: base.into(),
            folds,
        }
    }

    pub fn path(&self, suffix: &str) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.base, suffix))
    }

    /// Writes every bucket (and fold) to its own file, in parallel.
    pub fn write(&self, buckets: &BucketSet) -> Result<Vec<Written>, RunError> {
        self.plan(buckets)
            .into_par_iter()
            .map(|(path, lines)| {
                write_lines(&path, lines)?;
                Ok::<_, RunError>(Written {
                    path,
                    lines: lines.len(),
                })
            })
            .collect()
    }

    fn plan<'a>(&self, buckets: &'a BucketSet) -> Vec<(PathBuf, &'a [Vec<u8>])> {
        let mut files: Vec<(PathBuf, &[Vec<u8>])> = buckets
            .iter()
            .map(|bucket| (self.path(bucket.name()), bucket.lines()))
            .collect();

        if self.folds > 0 {
            let training = buckets.get(TRAINING);
            let name = training.map_or("train", Bucket::name);
            let lines = training.map(Bucket::lines).unwrap_or_default();

            for (k, fold) in folds(lines, self.folds).into_iter().enumerate() {
                files.push((self.path(&format!("{}.V.{}", name, k + 1)), fold));
            }
        }

        files
    }
}

/// Writes `lines` to `path` byte for byte, each followed by `\n`, replacing
/// any existing file.
pub fn write_lines(path: &Path, lines: &[Vec<u8>]) -> Result<(), RunError> {
    let file = File::create(path).map_err(|source| RunError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let write_error = |source: io::Error| RunError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(file);
    for line in lines {
        writer.write_all(line).map_err(write_error)?;
        writer.write_all(b"\n").map_err(write_error)?;
    }
    writer.flush().map_err(write_error)?;

    Ok(())
}
