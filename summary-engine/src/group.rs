//! FILENAME: summary-engine/src/group.rs
//! Grouping and top-N primitives.
//!
//! `GroupMap` is an interning-style map: an FxHashMap index over an
//! insertion-ordered entry list. Group order is therefore the
//! first-encounter order of keys in the view's iteration, which is what
//! makes top-N tie-breaking reproducible: the ranking sort is stable, so
//! equal values keep that order.

use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;

/// A map that remembers the order in which keys first appeared.
pub struct GroupMap<K, V> {
    index: FxHashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> GroupMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Default,
{
    pub fn new() -> Self {
        GroupMap {
            index: FxHashMap::default(),
            entries: Vec::new(),
        }
    }

    /// The accumulator slot for `key`, inserting a default-initialized one
    /// on first encounter. The key is cloned only on that first insert.
    pub fn slot(&mut self, key: K) -> &mut V {
        if let Some(&i) = self.index.get(&key) {
            return &mut self.entries[i].1;
        }
        let i = self.entries.len();
        self.index.insert(key.clone(), i);
        self.entries.push((key, V::default()));
        &mut self.entries[i].1
    }

    /// The groups in first-encounter order.
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for GroupMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Default,
{
    fn default() -> Self {
        GroupMap::new()
    }
}

/// Keeps the `n` largest rows by `value`, descending. The sort is stable,
/// so ties resolve to the earlier row (first-encountered group).
pub fn top_n<T, F>(mut rows: Vec<T>, n: usize, value: F) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    rows.sort_by(|a, b| value(b).partial_cmp(&value(a)).unwrap_or(Ordering::Equal));
    rows.truncate(n);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_map_preserves_first_encounter_order() {
        let mut map: GroupMap<String, f64> = GroupMap::new();
        *map.slot("b".to_string()) += 1.0;
        *map.slot("a".to_string()) += 2.0;
        *map.slot("b".to_string()) += 3.0;

        let entries = map.into_entries();
        assert_eq!(entries[0], ("b".to_string(), 4.0));
        assert_eq!(entries[1], ("a".to_string(), 2.0));
    }

    #[test]
    fn top_n_is_descending_and_truncated() {
        let rows = vec![("a", 1.0), ("b", 5.0), ("c", 3.0), ("d", 5.0)];
        let top = top_n(rows, 3, |r| r.1);

        assert_eq!(top.len(), 3);
        // b and d tie at 5.0; b was encountered first.
        assert_eq!(top[0].0, "b");
        assert_eq!(top[1].0, "d");
        assert_eq!(top[2].0, "c");
    }

    #[test]
    fn top_n_with_fewer_rows_returns_all() {
        let rows = vec![("a", 1.0)];
        assert_eq!(top_n(rows, 10, |r| r.1).len(), 1);
    }
}
