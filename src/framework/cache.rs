//! Keyed compute-once caches shared by graph traversal workers.

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::{fmt, hash::Hash, sync::Arc};

/// Concurrent memoization table with single-flight population.
///
/// Each key owns a [`OnceCell`]. The map shard is locked only long enough to fetch
/// or insert that cell, so lookups of different keys never wait on each other's
/// computations. Concurrent misses on the same key block on the cell and observe
/// the one value the first caller produced. A computation that fails leaves the
/// cell empty and the next lookup runs it again.
pub struct MemoCache<K, V> {
    cells: DashMap<K, Arc<OnceCell<Arc<V>>>>,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            cells: DashMap::new(),
        }
    }

    /// Returns the cached value for `key`, computing it with `compute` on a miss.
    pub fn get_or_try_compute<E, F>(&self, key: K, compute: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let cell = self.cells.entry(key).or_default().value().clone();
        cell.get_or_try_init(|| compute().map(Arc::new)).cloned()
    }

    /// Cached value for `key`, without computing.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.cells.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Number of populated entries.
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|cell| cell.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Eq + Hash, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for MemoCache<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCache")
            .field("entries", &self.len())
            .finish()
    }
}
