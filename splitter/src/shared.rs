use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::{rngs::StdRng, Rng};

use crate::buckets::BucketSet;
use crate::error::Result;
use crate::splitter::Splitter;

/// A [`Splitter`] handle shared between the thread feeding it lines and any
/// thread that may want to cut ingestion short.
///
/// Whichever caller reaches [`SharedSplitter::finish`] first finalizes the
/// splitter and gets to consume the buckets; everyone after that gets `None`.
/// Lines offered after that point are refused with
/// [`crate::Error::Finalized`], which is the ingestion side's cue to stop.
pub struct SharedSplitter<R = StdRng> {
    inner: Arc<Mutex<Splitter<R>>>,
}

impl<R> Clone for SharedSplitter<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Rng> SharedSplitter<R> {
    pub fn new(splitter: Splitter<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(splitter)),
        }
    }

    pub fn add_line(&self, line: impl Into<Vec<u8>>) -> Result<()> {
        self.lock().add_line(line)
    }

    /// Finalizes the splitter and runs `consume` on the buckets, holding the
    /// lock until `consume` returns. Returns `Ok(None)` if someone else
    /// already finalized.
    pub fn finish<T, E, F>(&self, consume: F) -> std::result::Result<Option<T>, E>
    where
        F: FnOnce(&BucketSet) -> std::result::Result<T, E>,
    {
        let mut splitter = self.lock();

        if !splitter.finalize() {
            return Ok(None);
        }

        consume(splitter.buckets()).map(Some)
    }

    fn lock(&self) -> MutexGuard<'_, Splitter<R>> {
        // Poisoning only means a consumer panicked; the splitter is
        // consistent between calls.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
impl<R: Rng> SharedSplitter<R> {
    fn is_finalized(&self) -> bool {
        self.lock().is_finalized()
    }

    /// Runs `f` with the splitter locked.
    fn with<T>(&self, f: impl FnOnce(&Splitter<R>) -> T) -> T {
        f(&self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::channel;
    use std::thread;

    fn shared(seed: u64) -> SharedSplitter {
        SharedSplitter::new(Splitter::train_test(50, Some(seed)).unwrap())
    }

    #[test]
    fn test_cancellation_keeps_lines_read_so_far() {
        let splitter = shared(1);
        let (ready_tx, ready_rx) = channel();
        let (cancelled_tx, cancelled_rx) = channel();

        let feeder = {
            let splitter = splitter.clone();
            thread::spawn(move || {
                for i in 0..10 {
                    splitter.add_line(format!("line {}", i)).unwrap();
                }
                ready_tx.send(()).unwrap();
                cancelled_rx.recv().unwrap();

                // Input that shows up after the cancellation is refused.
                splitter.add_line("line 10")
            })
        };

        ready_rx.recv().unwrap();
        let total = splitter
            .finish(|buckets| Ok::<_, ()>(buckets.total_lines()))
            .unwrap();
        cancelled_tx.send(()).unwrap();

        assert_eq!(total, Some(10));
        assert_eq!(feeder.join().unwrap(), Err(Error::Finalized));
        assert_eq!(splitter.with(|s| s.buckets().total_lines()), 10);
    }

    #[test]
    fn test_cancelled_total_matches_end_of_input_total() {
        let normal = shared(2);
        let cancelled = shared(2);

        for i in 0..10 {
            normal.add_line(i.to_string()).unwrap();
            cancelled.add_line(i.to_string()).unwrap();
        }

        let from_end_of_input = normal
            .finish(|buckets| Ok::<_, ()>(buckets.total_lines()))
            .unwrap();

        let handle = {
            let cancelled = cancelled.clone();
            thread::spawn(move || {
                cancelled
                    .finish(|buckets| Ok::<_, ()>(buckets.total_lines()))
                    .unwrap()
            })
        };
        let from_cancellation = handle.join().unwrap();

        assert_eq!(from_end_of_input, Some(10));
        assert_eq!(from_cancellation, from_end_of_input);
    }

    #[test]
    fn test_only_one_finish_wins() {
        let splitter = shared(3);
        for i in 0..100 {
            splitter.add_line(i.to_string()).unwrap();
        }

        let consumed = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let splitter = splitter.clone();
                let consumed = Arc::clone(&consumed);
                thread::spawn(move || {
                    splitter
                        .finish(|buckets| {
                            consumed.fetch_add(1, Ordering::SeqCst);
                            Ok::<_, ()>(buckets.total_lines())
                        })
                        .unwrap()
                })
            })
            .collect();

        let results: Vec<Option<usize>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(consumed.load(Ordering::SeqCst), 1);
        assert_eq!(results.iter().flatten().count(), 1);
        assert_eq!(results.iter().flatten().next(), Some(&100));
        assert!(splitter.is_finalized());
    }

    #[test]
    fn test_consume_error_is_returned() {
        let splitter = shared(4);
        splitter.add_line("x").unwrap();

        let result: std::result::Result<Option<()>, &str> = splitter.finish(|_| Err("disk full"));
        assert_eq!(result, Err("disk full"));

        // The split itself still happened exactly once.
        assert_eq!(splitter.finish(|_| Ok::<_, &str>(())), Ok(None));
    }
}
