use std::num::NonZeroUsize;
use std::path::PathBuf;

use splitter::Splitter;

use crate::args::Args;
use crate::error::ConfigError;
use crate::output::Destination;

/// Base name for output files when reading standard input.
pub const STDIN_NAME: &str = "STDIN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

/// Validated run settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: Input,
    pub base_name: String,
    pub train_percent: u32,
    pub folds: usize,
    pub well_size: Option<NonZeroUsize>,
    pub seed: Option<u64>,
    pub progress: bool,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let train_percent = u32::try_from(args.train)
            .ok()
            .filter(|&percent| percent <= 100)
            .ok_or(ConfigError::PercentOutOfRange(args.train))?;

        let folds =
            usize::try_from(args.validation).map_err(|_| ConfigError::NegativeFolds(args.validation))?;

        let well_size = args
            .well_size
            .map(|size| NonZeroUsize::new(size).ok_or(ConfigError::ZeroWellSize))
            .transpose()?;

        let (input, input_name) = match args.input.as_deref() {
            None | Some("") => return Err(ConfigError::MissingInput),
            Some("-") => (Input::Stdin, STDIN_NAME.to_string()),
            Some(path) => (Input::File(PathBuf::from(path)), path.to_string()),
        };

        Ok(Self {
            input,
            base_name: args.output.clone().unwrap_or(input_name),
            train_percent,
            folds,
            well_size,
            seed: args.seed,
            progress: args.progress,
        })
    }

    pub fn splitter(&self) -> Result<Splitter, ConfigError> {
        let splitter = Splitter::train_test(self.train_percent, self.seed)?;

        Ok(match self.well_size {
            Some(capacity) => splitter.with_well_capacity(capacity),
            None => splitter,
        })
    }

    pub fn destination(&self) -> Destination {
        Destination::new(&self.base_name, self.folds)
    }
}
