//! Single-slot dataset cache
//!
//! Holds the last successfully fetched dataset so a resize can re-render
//! without re-fetching. The slot is replace-only: readers get an `Arc`
//! snapshot that stays consistent even if a new load lands mid-render.

use parking_lot::RwLock;
use std::sync::Arc;
use xpboard_types::CachedDataset;

#[derive(Debug, Default)]
pub struct DatasetCache {
    slot: RwLock<Option<Arc<CachedDataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the cached dataset, if any
    pub fn get(&self) -> Option<Arc<CachedDataset>> {
        self.slot.read().clone()
    }

    /// Replace the cached dataset wholesale
    pub fn set(&self, dataset: CachedDataset) -> Arc<CachedDataset> {
        let dataset = Arc::new(dataset);
        *self.slot.write() = Some(Arc::clone(&dataset));
        dataset
    }

    pub fn clear(&self) {
        *self.slot.write() = None;
    }

    pub fn is_populated(&self) -> bool {
        self.slot.read().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xpboard_types::Record;

    fn dataset(n: usize) -> CachedDataset {
        CachedDataset {
            xp: (0..n)
                .map(|i| Record::xp(i.to_string(), "/m/a", 1.0))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_cache_set_get_clear() {
        let cache = DatasetCache::new();
        assert!(cache.get().is_none());

        cache.set(dataset(2));
        assert!(cache.is_populated());
        assert_eq!(cache.get().unwrap().xp.len(), 2);

        cache.clear();
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_cache_snapshot_survives_replacement() {
        let cache = DatasetCache::new();
        cache.set(dataset(1));
        let snapshot = cache.get().unwrap();

        cache.set(dataset(5));

        assert_eq!(snapshot.xp.len(), 1);
        assert_eq!(cache.get().unwrap().xp.len(), 5);
    }
}
