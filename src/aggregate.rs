use std::collections::HashSet;
use std::hash::Hash;

use crate::calendar::CanonicalEvent;

/// Merges per-source adapter outputs into one collection. Pure
/// concatenation: insertion order is preserved, so events with equal
/// start instants keep a stable relative order downstream.
pub fn aggregate(sources: &[Vec<CanonicalEvent>]) -> Vec<CanonicalEvent> {
    sources.iter().flatten().cloned().collect()
}

/// Keeps the first occurrence per key, dropping later duplicates.
/// Per-clinic leave and holiday fetches can return the same row twice;
/// they are deduplicated by origin id before adaptation.
pub fn dedup_by_key<T, K, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}
