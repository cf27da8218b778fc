//! Derived membership sets for favorites and completions.
//!
//! These are pure reductions of the raw record lists the store returns.
//! They are rebuilt from scratch on every cache update and never persisted,
//! so staleness cannot outlive the data they were derived from.

use crate::store::types::{FavoriteRecord, ItemId, ItemType};
use std::collections::HashSet;

/// Favorited ids, split by item type.
///
/// Set semantics dedup defensively: the store is supposed to hold at most
/// one record per (id, item_type) pair, but the client does not rely on it.
#[derive(Debug, Clone, Default)]
pub struct FavoriteSets {
  prayers: HashSet<ItemId>,
  rituals: HashSet<ItemId>,
}

impl FavoriteSets {
  pub fn from_records(records: &[FavoriteRecord]) -> Self {
    let mut sets = Self::default();
    for record in records {
      match record.item_type {
        ItemType::Prayer => sets.prayers.insert(record.id.clone()),
        ItemType::Ritual => sets.rituals.insert(record.id.clone()),
      };
    }
    sets
  }

  pub fn is_favorited(&self, id: &ItemId, item_type: ItemType) -> bool {
    match item_type {
      ItemType::Prayer => self.prayers.contains(id),
      ItemType::Ritual => self.rituals.contains(id),
    }
  }
}

/// Prayer ids completed on a single date.
#[derive(Debug, Clone, Default)]
pub struct CompletionSet {
  date: String,
  ids: HashSet<ItemId>,
}

impl CompletionSet {
  pub fn for_date(date: impl Into<String>, ids: &[ItemId]) -> Self {
    Self {
      date: date.into(),
      ids: ids.iter().cloned().collect(),
    }
  }

  /// The date this set was scoped to when it was built.
  pub fn date(&self) -> &str {
    &self.date
  }

  pub fn is_completed(&self, id: &ItemId) -> bool {
    self.ids.contains(id)
  }

  pub fn len(&self) -> usize {
    self.ids.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(id: u64, item_type: ItemType) -> FavoriteRecord {
    FavoriteRecord {
      id: ItemId::from(id),
      item_type,
    }
  }

  #[test]
  fn test_membership_split_by_item_type() {
    let sets = FavoriteSets::from_records(&[
      record(1, ItemType::Prayer),
      record(1, ItemType::Ritual),
      record(2, ItemType::Ritual),
    ]);

    assert!(sets.is_favorited(&ItemId::from(1), ItemType::Prayer));
    assert!(sets.is_favorited(&ItemId::from(1), ItemType::Ritual));
    assert!(sets.is_favorited(&ItemId::from(2), ItemType::Ritual));
    assert!(!sets.is_favorited(&ItemId::from(2), ItemType::Prayer));
  }

  #[test]
  fn test_duplicate_records_collapse() {
    let sets = FavoriteSets::from_records(&[
      record(5, ItemType::Prayer),
      record(5, ItemType::Prayer),
    ]);
    assert!(sets.is_favorited(&ItemId::from(5), ItemType::Prayer));
  }

  #[test]
  fn test_empty_records_is_valid() {
    let sets = FavoriteSets::from_records(&[]);
    assert!(!sets.is_favorited(&ItemId::from(1), ItemType::Prayer));
  }

  #[test]
  fn test_completions_scoped_to_date() {
    let ids = vec![ItemId::from(3), ItemId::from(4)];
    let today = CompletionSet::for_date("2025-01-15", &ids);

    assert_eq!(today.date(), "2025-01-15");
    assert!(today.is_completed(&ItemId::from(3)));
    assert!(!today.is_completed(&ItemId::from(9)));

    // A set built for another date shares nothing with today's.
    let other = CompletionSet::for_date("2025-01-16", &[]);
    assert!(!other.is_completed(&ItemId::from(3)));
  }

  #[test]
  fn test_completion_ids_dedup() {
    let ids = vec![ItemId::from(3), ItemId::from(3)];
    let set = CompletionSet::for_date("2025-01-15", &ids);
    assert_eq!(set.len(), 1);
  }
}
