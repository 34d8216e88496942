//! Top-N selection over count-ordered entries.

use crate::frequency::FrequencyEntry;

/// Number of entries a request for `requested` words actually yields.
///
/// Negative requests yield zero.
pub fn effective_count(requested: i64, available: usize) -> usize {
    if requested <= 0 {
        return 0;
    }
    usize::try_from(requested).unwrap_or(usize::MAX).min(available)
}

/// Returns the first `min(requested, sorted.len())` entries of `sorted`.
///
/// `sorted` must already be ordered by descending count (see
/// [`FrequencyTable::entries_by_count`](crate::FrequencyTable::entries_by_count)).
/// The input is left untouched.
pub fn find_top_n(sorted: &[FrequencyEntry], requested: i64) -> Vec<FrequencyEntry> {
    debug_assert!(
        sorted.windows(2).all(|w| w[0].count >= w[1].count),
        "entries must be sorted by descending count"
    );
    sorted[..effective_count(requested, sorted.len())].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<FrequencyEntry> {
        vec![
            FrequencyEntry::new("a", 5),
            FrequencyEntry::new("b", 3),
            FrequencyEntry::new("c", 1),
        ]
    }

    #[test]
    fn takes_leading_entries() {
        let top = find_top_n(&entries(), 2);
        assert_eq!(
            top,
            vec![FrequencyEntry::new("a", 5), FrequencyEntry::new("b", 3)]
        );
    }

    #[test]
    fn request_larger_than_available_returns_all() {
        assert_eq!(find_top_n(&entries(), 10), entries());
    }

    #[test]
    fn zero_or_negative_returns_empty() {
        assert!(find_top_n(&entries(), 0).is_empty());
        assert!(find_top_n(&entries(), -4).is_empty());
    }

    #[test]
    fn source_is_not_consumed() {
        let source = entries();
        let _ = find_top_n(&source, 2);
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn empty_source() {
        assert!(find_top_n(&[], 5).is_empty());
    }

    #[test]
    fn effective_count_clamps() {
        assert_eq!(effective_count(2, 3), 2);
        assert_eq!(effective_count(10, 3), 3);
        assert_eq!(effective_count(5, 0), 0);
        assert_eq!(effective_count(-1, 3), 0);
        assert_eq!(effective_count(i64::MAX, 7), 7);
    }
}
