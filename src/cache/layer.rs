//! Keyed cache that coalesces concurrent reads and refetches on
//! invalidation.

use color_eyre::{eyre::eyre, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use super::key::QueryKey;

/// Published by the leading fetch: `None` while in flight, then exactly one
/// `Some` with the outcome.
type FetchOutcome = Option<Result<Value, String>>;

enum Entry {
  /// A cached value. Fresh until explicitly invalidated; no time-based
  /// expiry.
  Fresh(Value),
  /// A fetch is in flight; waiters subscribe instead of fetching again.
  InFlight(watch::Receiver<FetchOutcome>),
}

struct Inner {
  entries: HashMap<QueryKey, Entry>,
  /// Bumped on invalidation. A fetch that completes after its key was
  /// invalidated must not re-enter the cache as fresh.
  epochs: HashMap<QueryKey, u64>,
}

/// Keyed read cache over the remote store.
///
/// Values are stored as JSON, erased of their concrete type, and decoded on
/// read. Two reads with equal keys share one in-flight fetch and one cached
/// value. Entries stay fresh until `invalidate` removes them; the next read
/// then refetches. The inner mutex is never held across an await.
pub struct QueryCache {
  inner: Arc<Mutex<Inner>>,
}

impl QueryCache {
  pub fn new() -> Self {
    Self {
      inner: Arc::new(Mutex::new(Inner {
        entries: HashMap::new(),
        epochs: HashMap::new(),
      })),
    }
  }

  /// Peek at the cached value for `key` without fetching.
  pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
    let inner = self.lock();
    match inner.entries.get(key) {
      Some(Entry::Fresh(value)) => serde_json::from_value(value.clone()).ok(),
      _ => None,
    }
  }

  /// Whether `key` currently holds a fresh value.
  #[allow(dead_code)]
  pub fn is_fresh(&self, key: &QueryKey) -> bool {
    matches!(self.lock().entries.get(key), Some(Entry::Fresh(_)))
  }

  /// Drop the entry for `key`, forcing the next read to refetch.
  pub fn invalidate(&self, key: &QueryKey) {
    let mut inner = self.lock();
    inner.entries.remove(key);
    *inner.epochs.entry(key.clone()).or_insert(0) += 1;
    tracing::debug!(key = %key, "cache entry invalidated");
  }

  /// Return the fresh value for `key`, or run `loader` to produce it.
  ///
  /// If another read of the same key is already in flight, this call waits
  /// for that fetch instead of issuing its own; the loader runs at most
  /// once per outstanding key. Loader failures are not cached.
  pub async fn fetch_or_wait<T, F, Fut>(&self, key: QueryKey, loader: F) -> Result<T>
  where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
  {
    enum Plan {
      Cached(Value),
      Wait(watch::Receiver<FetchOutcome>),
      Lead {
        publisher: watch::Sender<FetchOutcome>,
        epoch: u64,
      },
    }

    let plan = {
      let mut inner = self.lock();
      match inner.entries.get(&key) {
        Some(Entry::Fresh(value)) => Plan::Cached(value.clone()),
        Some(Entry::InFlight(rx)) if rx.has_changed().is_ok() => Plan::Wait(rx.clone()),
        _ => {
          // Vacant, or a leftover from a fetch that was dropped mid-flight.
          let (tx, rx) = watch::channel(None);
          inner.entries.insert(key.clone(), Entry::InFlight(rx));
          let epoch = inner.epochs.get(&key).copied().unwrap_or(0);
          Plan::Lead {
            publisher: tx,
            epoch,
          }
        }
      }
    };

    match plan {
      Plan::Cached(value) => decode(value),
      Plan::Wait(rx) => self.wait_for_leader(&key, rx).await,
      Plan::Lead { publisher, epoch } => self.lead_fetch(&key, loader, publisher, epoch).await,
    }
  }

  /// Wait for the outcome of the in-flight fetch for `key`.
  async fn wait_for_leader<T: DeserializeOwned>(
    &self,
    key: &QueryKey,
    mut rx: watch::Receiver<FetchOutcome>,
  ) -> Result<T> {
    loop {
      let outcome = rx.borrow().clone();
      if let Some(result) = outcome {
        return match result {
          Ok(value) => decode(value),
          Err(message) => Err(eyre!(message)),
        };
      }
      if rx.changed().await.is_err() {
        // The leading fetch was dropped before publishing. Clear the dead
        // entry so the next read can fetch.
        let mut inner = self.lock();
        if let Some(Entry::InFlight(current)) = inner.entries.get(key) {
          if current.same_channel(&rx) {
            inner.entries.remove(key);
          }
        }
        return Err(eyre!("fetch for {} was cancelled", key));
      }
    }
  }

  /// Run the loader, cache the outcome, and publish it to waiters.
  async fn lead_fetch<T, F, Fut>(
    &self,
    key: &QueryKey,
    loader: F,
    publisher: watch::Sender<FetchOutcome>,
    epoch: u64,
  ) -> Result<T>
  where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
  {
    match loader().await {
      Ok(data) => {
        let value = match serde_json::to_value(&data) {
          Ok(value) => value,
          Err(e) => {
            self.clear_own_in_flight(key, &publisher);
            let message = format!("failed to encode value for {}: {}", key, e);
            let _ = publisher.send(Some(Err(message.clone())));
            return Err(eyre!(message));
          }
        };

        {
          let mut inner = self.lock();
          if inner.epochs.get(key).copied().unwrap_or(0) == epoch {
            inner.entries.insert(key.clone(), Entry::Fresh(value.clone()));
          }
          // Otherwise the key was invalidated while the fetch was in
          // flight; waiters still get this value but it stays out of the
          // cache.
        }

        let _ = publisher.send(Some(Ok(value)));
        Ok(data)
      }
      Err(e) => {
        self.clear_own_in_flight(key, &publisher);
        let _ = publisher.send(Some(Err(e.to_string())));
        Err(e)
      }
    }
  }

  /// Remove the in-flight entry for `key`, but only if it is still ours.
  fn clear_own_in_flight(&self, key: &QueryKey, publisher: &watch::Sender<FetchOutcome>) {
    let mut inner = self.lock();
    if let Some(Entry::InFlight(current)) = inner.entries.get(key) {
      if current.same_channel(&publisher.subscribe()) {
        inner.entries.remove(key);
      }
    }
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
    // No code path panics while holding the lock, so poisoning is
    // recoverable by taking the guard anyway.
    self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

impl Default for QueryCache {
  fn default() -> Self {
    Self::new()
  }
}

impl Clone for QueryCache {
  fn clone(&self) -> Self {
    Self {
      inner: Arc::clone(&self.inner),
    }
  }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
  serde_json::from_value(value).map_err(|e| eyre!("failed to decode cached value: {}", e))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicU32, Ordering};
  use std::time::Duration;

  fn completions_key(date: &str) -> QueryKey {
    QueryKey::Completions {
      date: date.to_string(),
    }
  }

  #[tokio::test]
  async fn test_fetch_populates_and_second_read_hits_cache() {
    let cache = QueryCache::new();
    let calls = Arc::new(AtomicU32::new(0));

    for _ in 0..2 {
      let calls = calls.clone();
      let value: Vec<u32> = cache
        .fetch_or_wait(QueryKey::Prayers, move || async move {
          calls.fetch_add(1, Ordering::SeqCst);
          Ok(vec![1, 2, 3])
        })
        .await
        .unwrap();
      assert_eq!(value, vec![1, 2, 3]);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(cache.is_fresh(&QueryKey::Prayers));
  }

  #[tokio::test]
  async fn test_concurrent_reads_of_one_key_coalesce() {
    let cache = QueryCache::new();
    let calls = Arc::new(AtomicU32::new(0));

    let mut handles = Vec::new();
    for _ in 0..4 {
      let cache = cache.clone();
      let calls = calls.clone();
      handles.push(tokio::spawn(async move {
        cache
          .fetch_or_wait(QueryKey::Schedule, move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, color_eyre::Report>(7u32)
          })
          .await
          .unwrap()
      }));
    }

    for handle in handles {
      assert_eq!(handle.await.unwrap(), 7);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_invalidate_forces_refetch() {
    let cache = QueryCache::new();
    let calls = Arc::new(AtomicU32::new(0));
    let key = completions_key("2025-01-15");

    for _ in 0..2 {
      let calls = calls.clone();
      let _: Vec<u32> = cache
        .fetch_or_wait(key.clone(), move || async move {
          calls.fetch_add(1, Ordering::SeqCst);
          Ok(vec![])
        })
        .await
        .unwrap();
      cache.invalidate(&key);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(!cache.is_fresh(&key));
  }

  #[tokio::test]
  async fn test_invalidation_scope_is_per_key() {
    let cache = QueryCache::new();
    let jan15 = completions_key("2025-01-15");
    let jan16 = completions_key("2025-01-16");

    let _: Vec<u32> = cache
      .fetch_or_wait(jan15.clone(), || async { Ok(vec![1]) })
      .await
      .unwrap();
    let _: Vec<u32> = cache
      .fetch_or_wait(jan16.clone(), || async { Ok(vec![2]) })
      .await
      .unwrap();

    cache.invalidate(&jan15);

    assert!(!cache.is_fresh(&jan15));
    assert!(cache.is_fresh(&jan16));
    assert_eq!(cache.get::<Vec<u32>>(&jan16), Some(vec![2]));
  }

  #[tokio::test]
  async fn test_failed_fetch_is_not_cached() {
    let cache = QueryCache::new();
    let calls = Arc::new(AtomicU32::new(0));

    let first = {
      let calls = calls.clone();
      cache
        .fetch_or_wait::<Vec<u32>, _, _>(QueryKey::Rituals, move || async move {
          calls.fetch_add(1, Ordering::SeqCst);
          Err(eyre!("store unreachable"))
        })
        .await
    };
    assert!(first.is_err());
    assert!(!cache.is_fresh(&QueryKey::Rituals));

    // The next read retries instead of serving the failure.
    let second = {
      let calls = calls.clone();
      cache
        .fetch_or_wait(QueryKey::Rituals, move || async move {
          calls.fetch_add(1, Ordering::SeqCst);
          Ok(vec![9u32])
        })
        .await
        .unwrap()
    };
    assert_eq!(second, vec![9]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn test_waiters_see_the_leaders_error() {
    let cache = QueryCache::new();

    let leader = {
      let cache = cache.clone();
      tokio::spawn(async move {
        cache
          .fetch_or_wait::<u32, _, _>(QueryKey::Favorites, || async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Err(eyre!("store unreachable"))
          })
          .await
      })
    };

    tokio::time::sleep(Duration::from_millis(5)).await;
    let waiter: Result<u32> = cache
      .fetch_or_wait(QueryKey::Favorites, || async { Ok(1) })
      .await;

    assert!(leader.await.unwrap().is_err());
    assert!(waiter.is_err());
  }

  #[tokio::test]
  async fn test_fetch_finishing_after_invalidation_is_not_fresh() {
    let cache = QueryCache::new();
    let key = QueryKey::Favorites;

    let slow = {
      let cache = cache.clone();
      let key = key.clone();
      tokio::spawn(async move {
        cache
          .fetch_or_wait(key, || async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok(vec![1u32])
          })
          .await
      })
    };

    tokio::time::sleep(Duration::from_millis(5)).await;
    cache.invalidate(&key);

    // The slow fetch still resolves for its caller...
    assert_eq!(slow.await.unwrap().unwrap(), vec![1]);
    // ...but its result did not re-enter the cache as fresh.
    assert!(!cache.is_fresh(&key));
  }

  #[tokio::test]
  async fn test_get_peeks_without_fetching() {
    let cache = QueryCache::new();
    assert_eq!(cache.get::<Vec<u32>>(&QueryKey::Prayers), None);

    let _: Vec<u32> = cache
      .fetch_or_wait(QueryKey::Prayers, || async { Ok(vec![5]) })
      .await
      .unwrap();
    assert_eq!(cache.get::<Vec<u32>>(&QueryKey::Prayers), Some(vec![5]));
  }
}
