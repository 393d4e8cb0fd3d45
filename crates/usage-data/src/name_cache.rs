//! Per-run memo of application id to display name.

use std::collections::HashMap;

/// Remembers directory answers for the duration of one report run.
///
/// Each distinct id is fetched at most once; every later request for the
/// same id is served from the map. A new cache is created for every run.
#[derive(Debug, Default)]
pub struct NameCache {
    names: HashMap<String, String>,
    fetches: usize,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached name for `app_id`, calling `fetch` only on the first
    /// request for that id.
    pub fn get_or_fetch<F>(&mut self, app_id: &str, fetch: F) -> String
    where
        F: FnOnce(&str) -> String,
    {
        if let Some(name) = self.names.get(app_id) {
            return name.clone();
        }
        let name = fetch(app_id);
        self.fetches += 1;
        self.names.insert(app_id.to_string(), name.clone());
        name
    }

    /// Number of times a fetch was actually performed.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_first_call_fetches() {
        let mut cache = NameCache::new();
        let name = cache.get_or_fetch("123", |_| "MyApp".to_string());
        assert_eq!(name, "MyApp");
        assert_eq!(cache.fetch_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_repeat_call_uses_cached_value() {
        let calls = Cell::new(0);
        let mut cache = NameCache::new();
        for _ in 0..5 {
            let name = cache.get_or_fetch("555", |id| {
                calls.set(calls.get() + 1);
                format!("app-{id}")
            });
            assert_eq!(name, "app-555");
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.fetch_count(), 1);
    }

    #[test]
    fn test_distinct_ids_fetch_separately() {
        let mut cache = NameCache::new();
        cache.get_or_fetch("a", |id| id.to_uppercase());
        cache.get_or_fetch("b", |id| id.to_uppercase());
        cache.get_or_fetch("a", |_| unreachable!("a is cached"));
        assert_eq!(cache.fetch_count(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_miss_result_is_cached_too() {
        let mut cache = NameCache::new();
        // A directory miss echoes the id; that answer is remembered as well.
        assert_eq!(cache.get_or_fetch("999", |id| id.to_string()), "999");
        assert_eq!(cache.get_or_fetch("999", |_| "late".to_string()), "999");
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = NameCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.fetch_count(), 0);
    }
}
