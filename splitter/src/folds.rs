/// Cuts `lines` into `n` contiguous folds whose sizes differ by at most one.
/// The first `lines.len() % n` folds take the extra line.
///
/// The folds are only as random as `lines` is, so this is meant to run on a
/// bucket that was already filled by a [`crate::Splitter`].
pub fn folds<T>(lines: &[T], n: usize) -> Vec<&[T]> {
    if n == 0 {
        return Vec::new();
    }

    let base = lines.len() / n;
    let remainder = lines.len() % n;

    let mut result = Vec::with_capacity(n);
    let mut start = 0;

    for k in 0..n {
        let size = base + usize::from(k < remainder);
        result.push(&lines[start..start + size]);
        start += size;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        let training: Vec<u32> = (0..80).collect();
        let folds = folds(&training, 4);

        assert_eq!(folds.len(), 4);
        assert!(folds.iter().all(|fold| fold.len() == 20));

        let rejoined: Vec<u32> = folds.concat();
        assert_eq!(rejoined, training);
    }

    #[test]
    fn test_remainder_goes_to_first_folds() {
        let training: Vec<u32> = (0..10).collect();
        let sizes: Vec<usize> = folds(&training, 3).iter().map(|fold| fold.len()).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
    }

    #[test]
    fn test_more_folds_than_lines() {
        let training = ["only"];
        let sizes: Vec<usize> = folds(&training, 3).iter().map(|fold| fold.len()).collect();
        assert_eq!(sizes, vec![1, 0, 0]);
    }

    #[test]
    fn test_zero_folds() {
        let training = ["a", "b"];
        assert!(folds(&training, 0).is_empty());
    }
}
