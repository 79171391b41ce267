#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use placemap_shared::{DetailRecord, DetailsCacheEntry, ImageCandidate};

/// Shared handle over the per-place details cache. The fetch layer owns the
/// writes; the map core only takes snapshots at hover time, so a mid-fetch
/// entry simply resolves to the loading branch.
#[derive(Clone, Default)]
pub struct DetailsCache {
    entries: Rc<RefCell<HashMap<String, DetailsCacheEntry>>>,
}

impl DetailsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the entry for `place_name`, or `None` when nothing has
    /// been cached for it yet.
    pub fn lookup(&self, place_name: &str) -> Option<DetailsCacheEntry> {
        self.entries.borrow().get(place_name).cloned()
    }

    /// Mark a place as fetch-in-flight. Fetch-layer entry point.
    pub fn set_loading(&self, place_name: &str) {
        self.entries.borrow_mut().insert(
            place_name.to_string(),
            DetailsCacheEntry {
                is_loading: true,
                ..DetailsCacheEntry::default()
            },
        );
    }

    /// Store a resolved lookup result. Fetch-layer entry point.
    pub fn insert(
        &self,
        place_name: &str,
        detail: Option<DetailRecord>,
        images: Vec<ImageCandidate>,
    ) {
        self.entries.borrow_mut().insert(
            place_name.to_string(),
            DetailsCacheEntry {
                detail,
                images,
                is_loading: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::DetailsCache;
    use placemap_shared::DetailRecord;

    #[test]
    fn lookup_misses_return_none() {
        let cache = DetailsCache::new();
        assert!(cache.lookup("nowhere").is_none());
    }

    #[test]
    fn insert_replaces_loading_state() {
        let cache = DetailsCache::new();
        cache.set_loading("Cafe Seoul");
        assert!(cache.lookup("Cafe Seoul").unwrap().is_loading);

        cache.insert("Cafe Seoul", Some(DetailRecord::default()), Vec::new());
        let entry = cache.lookup("Cafe Seoul").unwrap();
        assert!(!entry.is_loading);
        assert!(entry.detail.is_some());
    }
}
