//! Process-lifetime cache of resolved poster URLs.
//!
//! Each movie id gets one slot, created on first use and never evicted. The
//! slot is a `OnceCell`, so concurrent resolutions of the same id share a
//! single in-flight fetch and the cache is written exactly once per id.

use catalog::MovieId;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::OnceCell;

type Slot = Arc<OnceCell<String>>;

/// Cache of poster URLs keyed by movie id
#[derive(Debug, Default)]
pub struct PosterCache {
    slots: Mutex<HashMap<MovieId, Slot>>,
}

impl PosterCache {
    pub fn new() -> Self {
        Self::default()
    }

    // The map is only touched for slot lookup/insert, so a poisoned lock
    // still holds consistent data.
    fn lock(&self) -> MutexGuard<'_, HashMap<MovieId, Slot>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn slot(&self, movie_id: MovieId) -> Slot {
        self.lock().entry(movie_id).or_default().clone()
    }

    /// Cached URL for `movie_id`, if a resolution already completed
    pub fn get(&self, movie_id: MovieId) -> Option<String> {
        let slot = self.lock().get(&movie_id).cloned()?;
        slot.get().cloned()
    }

    /// Return the cached URL, or run `resolve` once to populate it.
    ///
    /// Callers racing on the same id wait for the first one's result instead
    /// of issuing their own fetch.
    pub async fn get_or_resolve<F, Fut>(&self, movie_id: MovieId, resolve: F) -> String
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = String>,
    {
        let slot = self.slot(movie_id);
        slot.get_or_init(resolve).await.clone()
    }

    /// Number of movies with a resolved URL
    pub fn len(&self) -> usize {
        self.lock().values().filter(|slot| slot.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_populates_once() {
        let cache = PosterCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let url = cache
                .get_or_resolve(7, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    "https://img/7.jpg".to_string()
                })
                .await;
            assert_eq!(url, "https://img/7.jpg");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get(7).as_deref(), Some("https://img/7.jpg"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_get_on_unknown_id() {
        let cache = PosterCache::new();
        assert!(cache.get(1).is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_ids_are_independent() {
        let cache = PosterCache::new();
        cache.get_or_resolve(1, || async { "one".to_string() }).await;
        cache.get_or_resolve(2, || async { "two".to_string() }).await;

        assert_eq!(cache.get(1).as_deref(), Some("one"));
        assert_eq!(cache.get(2).as_deref(), Some("two"));
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_share_one_resolution() {
        let cache = Arc::new(PosterCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let cache = cache.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_resolve(42, || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                        "https://img/42.jpg".to_string()
                    })
                    .await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), "https://img/42.jpg");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
