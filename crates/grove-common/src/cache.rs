//! Completeness-tracked entity cache
//!
//! Registries populate this lazily: enumerate once, mark complete,
//! serve snapshots after. Partial additions never set completeness.

use crate::error::GroveResult;
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug)]
struct Inner<K, V> {
    entries: BTreeMap<K, V>,
    complete: bool,
}

/// Shared cache of entities keyed by ID, with a single completeness flag.
///
/// Registries fill it through [`EntityCache::ensure_complete`], which
/// holds the write lock across fill-and-mark so no reader sees the flag
/// over a partially populated map.
#[derive(Debug)]
pub struct EntityCache<K, V> {
    inner: RwLock<Inner<K, V>>,
}

impl<K: Ord + Clone, V: Clone> EntityCache<K, V> {
    /// Create an empty, incomplete cache.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: BTreeMap::new(),
                complete: false,
            }),
        }
    }

    /// Look up a single entity.
    pub fn get(&self, id: &K) -> Option<V> {
        self.inner.read().entries.get(id).cloned()
    }

    /// Insert or overwrite one entity. Never merges, never flips the
    /// completeness flag.
    pub fn insert(&self, id: K, entity: V) {
        self.inner.write().entries.insert(id, entity);
    }

    /// Evict one entity, returning it if present. Completeness is
    /// preserved: the map still reflects every known entity once the
    /// backing source no longer has this one.
    pub fn remove(&self, id: &K) -> Option<V> {
        self.inner.write().entries.remove(id)
    }

    /// Whether a full enumeration has populated this cache.
    pub fn is_complete(&self) -> bool {
        self.inner.read().complete
    }

    /// Assert that the cache reflects every known entity.
    pub fn mark_complete(&self) {
        self.inner.write().complete = true;
    }

    /// Force the next [`EntityCache::ensure_complete`] to re-enumerate.
    pub fn mark_incomplete(&self) {
        self.inner.write().complete = false;
    }

    /// Read-only snapshot of the current entries.
    pub fn snapshot(&self) -> BTreeMap<K, V> {
        self.inner.read().entries.clone()
    }

    /// Whether an entity is cached under this ID.
    pub fn contains(&self, id: &K) -> bool {
        self.inner.read().entries.contains_key(id)
    }

    /// Number of cached entities.
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Whether the cache holds no entities.
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// Drop all entries and the completeness flag.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.entries.clear();
        inner.complete = false;
    }

    /// Return the complete snapshot, enumerating first if needed.
    ///
    /// Holds the write lock across the check-enumerate-mark sequence:
    /// a second caller blocks until enumeration finishes rather than
    /// observing a torn, partially populated result. `fill` runs only
    /// when the cache is incomplete; a failed `fill` leaves the flag
    /// unset (already-inserted entries stay, as any lazy partial
    /// population may).
    pub fn ensure_complete<F>(&self, fill: F) -> GroveResult<BTreeMap<K, V>>
    where
        F: FnOnce(&mut CacheFill<'_, K, V>) -> GroveResult<()>,
    {
        let mut inner = self.inner.write();
        if !inner.complete {
            fill(&mut CacheFill {
                entries: &mut inner.entries,
            })?;
            inner.complete = true;
        }
        Ok(inner.entries.clone())
    }
}

impl<K: Ord + Clone, V: Clone> Default for EntityCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable view handed to the enumeration closure of
/// [`EntityCache::ensure_complete`].
pub struct CacheFill<'a, K, V> {
    entries: &'a mut BTreeMap<K, V>,
}

impl<K: Ord, V> CacheFill<'_, K, V> {
    /// Whether an entity is already cached under this ID.
    pub fn contains(&self, id: &K) -> bool {
        self.entries.contains_key(id)
    }

    /// Insert one enumerated entity.
    pub fn insert(&mut self, id: K, entity: V) {
        self.entries.insert(id, entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GroveError;

    #[test]
    fn test_insert_overwrites() {
        let cache = EntityCache::new();
        cache.insert(1, "a");
        cache.insert(1, "b");
        assert_eq!(cache.get(&1), Some("b"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_partial_population_is_not_complete() {
        let cache = EntityCache::new();
        cache.insert(1, "a");
        assert!(!cache.is_complete());
    }

    #[test]
    fn test_ensure_complete_enumerates_once() {
        let cache = EntityCache::new();
        let mut runs = 0;

        for _ in 0..2 {
            let snapshot = cache
                .ensure_complete(|fill| {
                    runs += 1;
                    fill.insert(1, "a");
                    fill.insert(2, "b");
                    Ok(())
                })
                .unwrap();
            assert_eq!(snapshot.len(), 2);
        }

        assert_eq!(runs, 1);
        assert!(cache.is_complete());
    }

    #[test]
    fn test_failed_enumeration_stays_incomplete() {
        let cache: EntityCache<i64, &str> = EntityCache::new();
        let result = cache.ensure_complete(|fill| {
            fill.insert(1, "a");
            Err(GroveError::Host("listing failed".into()))
        });
        assert!(result.is_err());
        assert!(!cache.is_complete());
        // partial entries are allowed, just never flagged complete
        assert_eq!(cache.get(&1), Some("a"));
    }

    #[test]
    fn test_eviction_preserves_completeness() {
        let cache = EntityCache::new();
        cache
            .ensure_complete(|fill| {
                fill.insert(1, "a");
                fill.insert(2, "b");
                Ok(())
            })
            .unwrap();

        cache.remove(&2);
        assert!(cache.is_complete());
        assert_eq!(cache.snapshot().len(), 1);

        cache.mark_incomplete();
        assert!(!cache.is_complete());
    }
}
