//! Reference Cache
//!
//! Session-scoped memo of the read-mostly lists (categories, wastes, final
//! types). Entries never expire on their own: writers invalidate the list
//! they touched, refresh buttons force a reload, logout drops everything.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::{FinalWasteType, Waste, WasteCategory};

/// One memoised list, shared by every clone
#[derive(Debug)]
pub struct CachedList<T> {
    slot: Arc<Mutex<Option<Vec<T>>>>,
}

impl<T> Clone for CachedList<T> {
    fn clone(&self) -> Self {
        Self { slot: Arc::clone(&self.slot) }
    }
}

impl<T> Default for CachedList<T> {
    fn default() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }
}

impl<T: Clone> CachedList<T> {
    fn lock(&self) -> MutexGuard<'_, Option<Vec<T>>> {
        // single-threaded runtime; a poisoned lock still holds usable data
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self) -> Option<Vec<T>> {
        self.lock().clone()
    }

    pub fn set(&self, items: Vec<T>) {
        *self.lock() = Some(items);
    }

    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    pub fn is_cached(&self) -> bool {
        self.lock().is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceCache {
    pub categories: CachedList<WasteCategory>,
    pub wastes: CachedList<Waste>,
    pub final_types: CachedList<FinalWasteType>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&self) {
        self.categories.invalidate();
        self.wastes.invalidate();
        self.final_types.invalidate();
        tracing::debug!("reference cache cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: u64) -> WasteCategory {
        WasteCategory { id, name: format!("C{}", id), slug: format!("c{}", id) }
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = ReferenceCache::new();
        let other = cache.clone();

        cache.categories.set(vec![category(1)]);

        assert_eq!(other.categories.get().map(|c| c.len()), Some(1));
        assert!(!other.wastes.is_cached());
    }

    #[test]
    fn test_invalidate_single_list() {
        let cache = ReferenceCache::new();
        cache.categories.set(vec![category(1)]);
        cache.wastes.set(Vec::new());

        cache.categories.invalidate();

        assert!(!cache.categories.is_cached());
        assert!(cache.wastes.is_cached());
    }

    #[test]
    fn test_clear_drops_everything() {
        let cache = ReferenceCache::new();
        cache.categories.set(vec![category(1)]);
        cache.wastes.set(Vec::new());
        cache.final_types.set(Vec::new());

        cache.clear();

        assert!(cache.categories.get().is_none());
        assert!(cache.wastes.get().is_none());
        assert!(cache.final_types.get().is_none());
    }
}
