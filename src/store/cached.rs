//! Store client with transparent read caching.
//!
//! Wraps a `RemoteStore` and provides the same read surface through the
//! query cache. Mutations go gateway-first and never touch the cache
//! optimistically: only after the store accepts a write is the affected
//! key invalidated, which guarantees read-after-write consistency for this
//! session and leaves nothing to roll back when a write fails.

use color_eyre::Result;

use crate::cache::{QueryCache, QueryKey};
use crate::filter::ALL_CATEGORY;
use crate::store::client::RemoteStore;
use crate::store::types::{FavoriteRecord, ItemId, ItemType, Prayer, Ritual, ScheduleItem};

#[derive(Clone)]
pub struct CachedStoreClient<S: RemoteStore> {
  inner: S,
  cache: QueryCache,
}

impl<S: RemoteStore> CachedStoreClient<S> {
  pub fn new(inner: S) -> Self {
    Self {
      inner,
      cache: QueryCache::new(),
    }
  }

  /// The full prayer catalog.
  pub async fn prayers(&self) -> Result<Vec<Prayer>> {
    let inner = self.inner.clone();
    self
      .cache
      .fetch_or_wait(QueryKey::Prayers, move || async move {
        inner.list_prayers().await
      })
      .await
  }

  /// The last fresh prayer list for a category, without fetching.
  pub fn cached_prayers_by_category(&self, category: &str) -> Option<Vec<Prayer>> {
    let key = if category == ALL_CATEGORY {
      QueryKey::Prayers
    } else {
      QueryKey::PrayersByCategory {
        category: category.to_string(),
      }
    };
    self.cache.get(&key)
  }

  /// Prayers for one category. The "All" sentinel resolves to the
  /// unfiltered catalog locally and is never sent to the store.
  pub async fn prayers_by_category(&self, category: &str) -> Result<Vec<Prayer>> {
    if category == ALL_CATEGORY {
      return self.prayers().await;
    }

    let key = QueryKey::PrayersByCategory {
      category: category.to_string(),
    };
    let inner = self.inner.clone();
    let category = category.to_string();
    self
      .cache
      .fetch_or_wait(key, move || async move {
        inner.list_prayers_by_category(&category).await
      })
      .await
  }

  pub async fn rituals(&self) -> Result<Vec<Ritual>> {
    let inner = self.inner.clone();
    self
      .cache
      .fetch_or_wait(QueryKey::Rituals, move || async move {
        inner.list_rituals().await
      })
      .await
  }

  pub async fn schedule(&self) -> Result<Vec<ScheduleItem>> {
    let inner = self.inner.clone();
    self
      .cache
      .fetch_or_wait(QueryKey::Schedule, move || async move {
        inner.list_schedule().await
      })
      .await
  }

  pub async fn favorites(&self) -> Result<Vec<FavoriteRecord>> {
    let inner = self.inner.clone();
    self
      .cache
      .fetch_or_wait(QueryKey::Favorites, move || async move {
        inner.list_favorites().await
      })
      .await
  }

  /// Completed prayer ids for one date. The date is part of the cache key,
  /// so completions for different days never collide.
  pub async fn completions(&self, date: &str) -> Result<Vec<ItemId>> {
    let key = QueryKey::Completions {
      date: date.to_string(),
    };
    let inner = self.inner.clone();
    let date = date.to_string();
    self
      .cache
      .fetch_or_wait(key, move || async move {
        inner.list_completions(&date).await
      })
      .await
  }

  pub async fn add_favorite(&self, id: &ItemId, item_type: ItemType) -> Result<()> {
    self.inner.add_favorite(id, item_type).await?;
    self.cache.invalidate(&QueryKey::Favorites);
    Ok(())
  }

  pub async fn remove_favorite(&self, id: &ItemId, item_type: ItemType) -> Result<()> {
    self.inner.remove_favorite(id, item_type).await?;
    self.cache.invalidate(&QueryKey::Favorites);
    Ok(())
  }

  pub async fn mark_completed(&self, prayer_id: &ItemId, date: &str) -> Result<()> {
    self.inner.mark_completed(prayer_id, date).await?;
    self.cache.invalidate(&QueryKey::Completions {
      date: date.to_string(),
    });
    Ok(())
  }

  #[cfg(test)]
  fn cache(&self) -> &QueryCache {
    &self.cache
  }
}
