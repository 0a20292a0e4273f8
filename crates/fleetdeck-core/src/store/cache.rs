use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use tracing::debug;

use crate::error::CoreError;
use crate::store::QueryKey;

/// One cached query result. The value is type-erased so a single map
/// can hold every entity; the stale flag survives until the next read
/// recomputes.
struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    fetched_at: Instant,
    stale: bool,
}

/// Concurrent query cache keyed by [`QueryKey`].
///
/// Consistency discipline: invalidate on mutation, recompute on next
/// read. Entries are replaced wholesale, never mutated in place.
#[derive(Default)]
pub struct QueryCache {
    entries: DashMap<QueryKey, CacheEntry>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached value for `key`, unless absent, stale, or of another
    /// type.
    pub fn get<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let entry = self.entries.get(key)?;
        if entry.stale {
            return None;
        }
        Arc::clone(&entry.value).downcast::<T>().ok()
    }

    /// When the value was last fetched, stale or not.
    pub fn fetched_at(&self, key: &QueryKey) -> Option<Instant> {
        self.entries.get(key).map(|e| e.fetched_at)
    }

    /// Store a fresh value under `key`.
    pub fn put<T: Send + Sync + 'static>(&self, key: QueryKey, value: T) {
        self.entries.insert(
            key,
            CacheEntry {
                value: Arc::new(value),
                fetched_at: Instant::now(),
                stale: false,
            },
        );
    }

    /// The cached value, or the fetcher's result when the entry is
    /// absent or stale. The fetcher's result is cached on success.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        key: QueryKey,
        fetcher: F,
    ) -> Result<Arc<T>, CoreError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        if let Some(hit) = self.get::<T>(&key) {
            return Ok(hit);
        }

        debug!("cache miss for {key:?}");
        let value = Arc::new(fetcher().await?);
        self.entries.insert(
            key,
            CacheEntry {
                value: Arc::clone(&value) as Arc<dyn Any + Send + Sync>,
                fetched_at: Instant::now(),
                stale: false,
            },
        );
        Ok(value)
    }

    /// Mark one key stale. The entry (and its timestamp) survives until
    /// the next read replaces it.
    pub fn invalidate(&self, key: &QueryKey) {
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.stale = true;
        }
    }

    /// Mark a list key and every id-scoped key under it stale.
    pub fn invalidate_root(&self, root: &QueryKey) {
        let root = root.root();
        for mut entry in self.entries.iter_mut() {
            if entry.key().root() == root {
                entry.stale = true;
            }
        }
    }

    /// Drop everything (logout).
    pub fn clear(&self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub(crate) fn is_stale(&self, key: &QueryKey) -> Option<bool> {
        self.entries.get(key).map(|e| e.stale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn get_or_fetch_runs_fetcher_once() {
        let cache = QueryCache::new();
        let calls = AtomicU32::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_fetch(QueryKey::Vehicles, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, CoreError>(vec!["v-1".to_owned()])
                })
                .await
                .unwrap();
            assert_eq!(value.len(), 1);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cache = QueryCache::new();
        let calls = AtomicU32::new(0);

        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, CoreError>(42_u32)
        };

        cache.get_or_fetch(QueryKey::Settings, fetch).await.unwrap();
        cache.invalidate(&QueryKey::Settings);
        assert!(cache.get::<u32>(&QueryKey::Settings).is_none());

        cache.get_or_fetch(QueryKey::Settings, fetch).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fetch_failure_leaves_no_entry() {
        let cache = QueryCache::new();

        let result = cache
            .get_or_fetch(QueryKey::Alerts, || async {
                Err::<u32, _>(CoreError::Internal("boom".into()))
            })
            .await;

        assert!(result.is_err());
        assert!(cache.fetched_at(&QueryKey::Alerts).is_none());
    }

    #[test]
    fn invalidate_root_marks_list_and_scoped_keys() {
        let cache = QueryCache::new();
        cache.put(QueryKey::Drivers, vec!["d-1".to_owned()]);
        cache.put(QueryKey::Driver("d-1".into()), "d-1".to_owned());
        cache.put(QueryKey::Vehicles, vec!["v-1".to_owned()]);

        cache.invalidate_root(&QueryKey::Drivers);

        assert_eq!(cache.is_stale(&QueryKey::Drivers), Some(true));
        assert_eq!(cache.is_stale(&QueryKey::Driver("d-1".into())), Some(true));
        assert_eq!(cache.is_stale(&QueryKey::Vehicles), Some(false));
    }

    #[test]
    fn wrong_type_reads_as_miss() {
        let cache = QueryCache::new();
        cache.put(QueryKey::Users, 7_u32);
        assert!(cache.get::<String>(&QueryKey::Users).is_none());
    }
}
