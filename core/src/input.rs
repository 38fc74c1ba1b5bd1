use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use splitter::SharedSplitter;

use crate::config::Input;
use crate::error::RunError;

const PROGRESS_UPDATE_INTERVAL: usize = 10_000;

pub fn open(input: &Input) -> Result<Box<dyn BufRead>, RunError> {
    match input {
        Input::Stdin => Ok(Box::new(io::stdin().lock())),
        Input::File(path) => {
            let file = File::open(path).map_err(|source| RunError::Open {
                path: path.clone(),
                source,
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Spinner with a running line count, drawn on stderr. Hidden unless enabled.
pub fn progress_bar(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template(" {spinner:.cyan} {elapsed_precise} | {msg}") {
        bar.set_style(style);
    }
    bar.set_message("0 lines");
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Feeds every line of `reader` to the splitter and returns how many were
/// accepted. Lines are passed on as raw bytes, minus their line ending.
///
/// Stops early, without error, once the splitter has been finalized from
/// elsewhere.
pub fn ingest<B: BufRead>(
    mut reader: B,
    splitter: &SharedSplitter,
    progress: &ProgressBar,
) -> Result<usize, RunError> {
    let mut count = 0;

    loop {
        let mut line = Vec::new();
        if reader.read_until(b'\n', &mut line).map_err(RunError::Read)? == 0 {
            break;
        }
        strip_line_ending(&mut line);

        match splitter.add_line(line) {
            Ok(()) => count += 1,
            Err(splitter::Error::Finalized) => {
                log::debug!("Splitter finalized after {} lines, stopping input", count);
                break;
            }
            Err(e) => return Err(e.into()),
        }

        if count % PROGRESS_UPDATE_INTERVAL == 0 {
            progress.set_message(format!("{} lines", count));
        }
    }

    progress.set_message(format!("{} lines", count));

    Ok(count)
}

/// Drops a trailing `\n` or `\r\n`.
fn strip_line_ending(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitter::Splitter;
    use std::io::{Cursor, Read};
    use std::path::PathBuf;

    fn shared() -> SharedSplitter {
        SharedSplitter::new(Splitter::train_test(50, Some(8)).unwrap())
    }

    fn finish_sorted(splitter: &SharedSplitter) -> Vec<Vec<u8>> {
        splitter
            .finish(|buckets| {
                let mut lines: Vec<Vec<u8>> = buckets
                    .iter()
                    .flat_map(|bucket| bucket.lines().iter().cloned())
                    .collect();
                lines.sort();
                Ok::<_, ()>(lines)
            })
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_ingest_counts_lines() {
        let splitter = shared();
        let reader = Cursor::new("one\ntwo\n\nfour\r\nfive");

        let count = ingest(reader, &splitter, &ProgressBar::hidden()).unwrap();
        assert_eq!(count, 5);

        assert_eq!(
            finish_sorted(&splitter),
            vec![
                b"".to_vec(),
                b"five".to_vec(),
                b"four".to_vec(),
                b"one".to_vec(),
                b"two".to_vec(),
            ]
        );
    }

    #[test]
    fn test_ingest_keeps_non_utf8_bytes() {
        let splitter = shared();
        let reader = Cursor::new(b"caf\xe9\r\nplain\n\xff\xfe\x00\nlone\r".to_vec());

        let count = ingest(reader, &splitter, &ProgressBar::hidden()).unwrap();
        assert_eq!(count, 4);

        assert_eq!(
            finish_sorted(&splitter),
            vec![
                b"caf\xe9".to_vec(),
                b"lone\r".to_vec(),
                b"plain".to_vec(),
                b"\xff\xfe\x00".to_vec(),
            ]
        );
    }

    #[test]
    fn test_ingest_stops_once_finalized() {
        let splitter = shared();
        ingest(Cursor::new("a\nb\n"), &splitter, &ProgressBar::hidden()).unwrap();
        let total = splitter
            .finish(|buckets| Ok::<_, ()>(buckets.total_lines()))
            .unwrap();
        assert_eq!(total, Some(2));

        let count = ingest(Cursor::new("c\nd\n"), &splitter, &ProgressBar::hidden()).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_read_error_is_fatal() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "device gone"))
            }
        }

        let result = ingest(BufReader::new(Broken), &shared(), &ProgressBar::hidden());
        assert!(matches!(result, Err(RunError::Read(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let input = Input::File(PathBuf::from("/nonexistent/sptt/input.txt"));
        assert!(matches!(open(&input), Err(RunError::Open { .. })));
    }
}
