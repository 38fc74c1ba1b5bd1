use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

/// Long flags that may also be spelled with a single dash, `-train 80`.
const SINGLE_DASH_FLAGS: &[&str] = &[
    "train",
    "validation",
    "seed",
    "well-size",
    "output",
    "progress",
    "verbose",
    "log-file",
];

#[derive(Parser, Debug)]
#[command(name = "sptt")]
#[command(author = "Jørgen Hanssen <jorgen@hanssen.io>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Randomly split lines into training and testing sets")]
#[command(override_usage = "sptt -train PERCENT FILE\n       sptt -train PERCENT -")]
pub struct Args {
    /// Input file, or `-` to read standard input.
    pub input: Option<String>,

    /// Percentage of randomly selected lines for the training set.
    #[arg(long, value_name = "PERCENT", default_value_t = 0, allow_negative_numbers = true)]
    pub train: i64,

    /// Split the training set further into this many validation folds.
    #[arg(long, value_name = "N", default_value_t = 0, allow_negative_numbers = true)]
    pub validation: i64,

    /// Seed the random source to make the split reproducible.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Distribute lines every N lines instead of holding the whole input.
    #[arg(long, value_name = "N")]
    pub well_size: Option<usize>,

    /// Base name for output files. Defaults to the input name, or STDIN.
    #[arg(short, long, value_name = "BASE")]
    pub output: Option<String>,

    /// Show a running line count while reading input.
    #[arg(long)]
    pub progress: bool,

    /// Log debug output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Parses command line arguments, accepting `-flag` as well as `--flag`.
    pub fn parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut options_ended = false;

        let args = args.into_iter().map(|arg| {
            let arg = arg.into();
            if options_ended {
                return arg;
            }
            if arg == "--" {
                options_ended = true;
                return arg;
            }
            normalize_flag(arg)
        });

        Self::try_parse_from(args)
    }
}

pub fn usage() -> String {
    Args::command().render_usage().to_string()
}

fn normalize_flag(arg: OsString) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };

    let Some(flag) = text.strip_prefix('-') else {
        return arg;
    };
    if flag.starts_with('-') {
        return arg;
    }

    let name = flag.split('=').next().unwrap_or(flag);
    if SINGLE_DASH_FLAGS.contains(&name) {
        format!("-{}", text).into()
    } else {
        arg
    }
}
