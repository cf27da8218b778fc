//! Remote store gateway.
//!
//! `RemoteStore` is the full contract the rest of the app consumes;
//! `StoreClient` is the HTTP implementation. The gateway is a pure
//! pass-through: no retries, no optimism, no validation beyond type shape.
//! Every failure surfaces as one generic report with context.

use crate::config::Config;
use crate::store::types::{FavoriteRecord, ItemId, ItemType, Prayer, Ritual, ScheduleItem};
use color_eyre::{eyre::eyre, Result};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::future::Future;
use url::Url;

/// Operations the remote devotional store exposes.
///
/// All calls are async and fallible. `list_prayers_by_category` is a
/// server-side filter; the "All" sentinel is a client-side convention and
/// must never be sent here.
pub trait RemoteStore: Clone + Send + Sync + 'static {
  fn list_prayers(&self) -> impl Future<Output = Result<Vec<Prayer>>> + Send;
  fn list_prayers_by_category(
    &self,
    category: &str,
  ) -> impl Future<Output = Result<Vec<Prayer>>> + Send;
  fn list_rituals(&self) -> impl Future<Output = Result<Vec<Ritual>>> + Send;
  fn list_schedule(&self) -> impl Future<Output = Result<Vec<ScheduleItem>>> + Send;
  fn list_favorites(&self) -> impl Future<Output = Result<Vec<FavoriteRecord>>> + Send;
  /// Ids of prayers completed on `date` (`YYYY-MM-DD`).
  fn list_completions(&self, date: &str) -> impl Future<Output = Result<Vec<ItemId>>> + Send;
  fn add_favorite(
    &self,
    id: &ItemId,
    item_type: ItemType,
  ) -> impl Future<Output = Result<()>> + Send;
  fn remove_favorite(
    &self,
    id: &ItemId,
    item_type: ItemType,
  ) -> impl Future<Output = Result<()>> + Send;
  fn mark_completed(
    &self,
    prayer_id: &ItemId,
    date: &str,
  ) -> impl Future<Output = Result<()>> + Send;
}

/// HTTP client for the remote store.
#[derive(Clone)]
pub struct StoreClient {
  http: reqwest::Client,
  base: Url,
}

impl StoreClient {
  pub fn new(config: &Config) -> Result<Self> {
    let base = Url::parse(&config.store.url)
      .map_err(|e| eyre!("Invalid store url {}: {}", config.store.url, e))?;

    Ok(Self {
      http: reqwest::Client::new(),
      base,
    })
  }

  fn endpoint(&self, path: &str) -> Result<Url> {
    self
      .base
      .join(path)
      .map_err(|e| eyre!("Invalid store endpoint {}: {}", path, e))
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
    let url = self.endpoint(path)?;
    let response = self
      .http
      .get(url)
      .query(query)
      .send()
      .await
      .map_err(|e| eyre!("Failed to reach store at {}: {}", path, e))?
      .error_for_status()
      .map_err(|e| eyre!("Store rejected {}: {}", path, e))?;

    response
      .json()
      .await
      .map_err(|e| eyre!("Failed to parse store response for {}: {}", path, e))
  }

  async fn send_json(
    &self,
    method: reqwest::Method,
    path: &str,
    body: serde_json::Value,
  ) -> Result<()> {
    let url = self.endpoint(path)?;
    self
      .http
      .request(method, url)
      .json(&body)
      .send()
      .await
      .map_err(|e| eyre!("Failed to reach store at {}: {}", path, e))?
      .error_for_status()
      .map_err(|e| eyre!("Store rejected {}: {}", path, e))?;

    Ok(())
  }
}

impl RemoteStore for StoreClient {
  async fn list_prayers(&self) -> Result<Vec<Prayer>> {
    self.get_json("prayers", &[]).await
  }

  async fn list_prayers_by_category(&self, category: &str) -> Result<Vec<Prayer>> {
    self.get_json("prayers", &[("category", category)]).await
  }

  async fn list_rituals(&self) -> Result<Vec<Ritual>> {
    self.get_json("rituals", &[]).await
  }

  async fn list_schedule(&self) -> Result<Vec<ScheduleItem>> {
    self.get_json("schedule", &[]).await
  }

  async fn list_favorites(&self) -> Result<Vec<FavoriteRecord>> {
    self.get_json("favorites", &[]).await
  }

  async fn list_completions(&self, date: &str) -> Result<Vec<ItemId>> {
    self.get_json("completions", &[("date", date)]).await
  }

  async fn add_favorite(&self, id: &ItemId, item_type: ItemType) -> Result<()> {
    let body = json!({ "id": id, "itemType": item_type });
    self.send_json(reqwest::Method::POST, "favorites", body).await
  }

  async fn remove_favorite(&self, id: &ItemId, item_type: ItemType) -> Result<()> {
    let body = json!({ "id": id, "itemType": item_type });
    self.send_json(reqwest::Method::DELETE, "favorites", body).await
  }

  async fn mark_completed(&self, prayer_id: &ItemId, date: &str) -> Result<()> {
    let body = json!({ "prayerId": prayer_id, "date": date });
    self.send_json(reqwest::Method::POST, "completions", body).await
  }
}
