//! Aggregation utilities
//!
//! Small summaries derived from a visible subset: group counts for the
//! choropleth and bar chart, numeric means for the detail table, and the
//! min/mid/max triple that anchors a color-scale domain. Empty input is a
//! normal state (a filter combination with no matches) and always degrades
//! to a safe default instead of an error.

use std::hash::Hash;

use ahash::AHashMap;

/// Count items per group key.
pub fn count_by<I, T, K, F>(items: I, key_fn: F) -> AHashMap<K, usize>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut counts = AHashMap::new();
    for item in items {
        *counts.entry(key_fn(&item)).or_insert(0) += 1;
    }
    counts
}

/// Mean of the finite values produced by `value_fn`.
///
/// Items yielding `None` or a non-finite number are skipped; when nothing
/// contributes the result is `0.0`, not NaN. Deliberately display-friendly
/// rather than statistically rigorous.
pub fn mean_of<I, T, F>(items: I, value_fn: F) -> f64
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> Option<f64>,
{
    let mut sum = 0.0;
    let mut n = 0usize;
    for item in items {
        if let Some(value) = value_fn(&item) {
            if value.is_finite() {
                sum += value;
                n += 1;
            }
        }
    }
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Min, midpoint and max of the non-zero counts, for a color-scale domain.
///
/// `mid = round((min + max) / 2)`. With no counts the domain defaults to
/// `min 0, max 1` so the downstream scale is never degenerate.
pub fn min_mid_max<I>(counts: I) -> (usize, usize, usize)
where
    I: IntoIterator<Item = usize>,
{
    let mut min: Option<usize> = None;
    let mut max: Option<usize> = None;
    for count in counts.into_iter().filter(|count| *count > 0) {
        min = Some(min.map_or(count, |m| m.min(count)));
        max = Some(max.map_or(count, |m| m.max(count)));
    }

    let min = min.unwrap_or(0);
    let max = max.unwrap_or(1);
    let mid = ((min + max) as f64 / 2.0).round() as usize;
    (min, mid, max)
}
