//! Top-K extraction over frequency tables
//!
//! Entries are ranked by value, highest first; equal values are ranked by
//! key in ascending [`Ord`] order. Keys are unique, so the ranking is total
//! and a larger `k` always extends the result of a smaller one.
//!
//! Selection is greedy: each pass scans the whole table for the best entry
//! ranked strictly after the previously selected one. That is `O(k * n)`
//! with no allocation beyond the result, and the table is never mutated, so
//! reports can be built any number of times.

use std::cmp::Ordering;
use std::hash::{BuildHasher, Hash};

use hashbrown::HashMap;

/// The `k` highest counts, descending, ties broken by ascending key
pub fn top_k<K, S>(counts: &HashMap<K, u64, S>, k: usize) -> Vec<(&K, u64)>
where
    K: Ord + Hash + Eq,
    S: BuildHasher,
{
    top_k_by(counts.iter().map(|(key, &count)| (key, count)), k, Ord::cmp)
}

/// Greedy top-K over any re-iterable set of `(key, value)` entries
///
/// `compare` orders values; the greater value ranks first. Keys must be
/// unique within `entries`.
pub fn top_k_by<'a, K, V, I, F>(entries: I, k: usize, compare: F) -> Vec<(&'a K, V)>
where
    K: Ord + 'a,
    V: Copy,
    I: IntoIterator<Item = (&'a K, V)> + Clone,
    F: Fn(&V, &V) -> Ordering,
{
    let ranks_before = |a: &(&K, V), b: &(&K, V)| match compare(&a.1, &b.1) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => a.0 < b.0,
    };

    let mut selected: Vec<(&'a K, V)> = Vec::new();

    while selected.len() < k {
        let mut best: Option<(&'a K, V)> = None;

        for entry in entries.clone() {
            if let Some(last) = selected.last() {
                if !ranks_before(last, &entry) {
                    continue;
                }
            }
            if best.as_ref().map_or(true, |b| ranks_before(&entry, b)) {
                best = Some(entry);
            }
        }

        match best {
            Some(entry) => selected.push(entry),
            None => break,
        }
    }

    selected
}
