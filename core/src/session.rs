use std::sync::Arc;

use splitter::{SharedSplitter, Splitter};

use crate::error::RunError;
use crate::output::{Destination, Written};

/// One split run: the splitter being filled and where its buckets go.
///
/// Cloned into the interrupt handler, so that end of input and Ctrl-C both
/// go through [`Session::finish`], and only the first one writes anything.
#[derive(Clone)]
pub struct Session {
    splitter: SharedSplitter,
    destination: Arc<Destination>,
}

impl Session {
    pub fn new(splitter: Splitter, destination: Destination) -> Self {
        Self {
            splitter: SharedSplitter::new(splitter),
            destination: Arc::new(destination),
        }
    }

    pub fn splitter(&self) -> &SharedSplitter {
        &self.splitter
    }

    /// Finalizes the split and writes the output files. Returns `None` if
    /// another caller already did.
    pub fn finish(&self) -> Result<Option<Vec<Written>>, RunError> {
        let written = self
            .splitter
            .finish(|buckets| self.destination.write(buckets))?;

        if let Some(files) = &written {
            for file in files {
                log::info!("Wrote {} lines to {}", file.lines, file.path.display());
            }
        }

        Ok(written)
    }
}
