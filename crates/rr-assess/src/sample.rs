//! Even down-sampling for display.
//!
//! Samples feed presentation only.  Route statistics are always computed
//! over the full matched set.

/// Indices picked by [`sample_evenly`] for a sequence of length `len`.
///
/// When `len <= max_count` this is `0..len`.  Otherwise it is
/// `floor(i * len / max_count)` for `i` in `0..max_count`, computed in
/// integers so large inputs do not pick up float rounding.
pub fn sample_indices(len: usize, max_count: usize) -> Vec<usize> {
    if len <= max_count {
        return (0..len).collect();
    }
    (0..max_count)
        .map(|i| ((i as u128 * len as u128) / max_count as u128) as usize)
        .collect()
}

/// Up to `max_count` evenly spaced elements of `items`, in their original
/// order.
///
/// Returns a copy of the input when it already fits.  `max_count == 0`
/// returns an empty vector for non-empty input.
///
/// ```
/// use rr_assess::sample_evenly;
///
/// let v: Vec<usize> = (0..1000).collect();
/// assert_eq!(sample_evenly(&v, 3), vec![0, 333, 666]);
/// ```
pub fn sample_evenly<T: Clone>(items: &[T], max_count: usize) -> Vec<T> {
    if items.len() <= max_count {
        return items.to_vec();
    }
    sample_indices(items.len(), max_count)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}
