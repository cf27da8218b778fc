//! Remote store gateway, wire types, and the cached client built on top.

pub mod cached;
pub mod client;
pub mod types;

pub use cached::CachedStoreClient;
pub use client::{RemoteStore, StoreClient};
