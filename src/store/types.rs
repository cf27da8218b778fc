//! Domain types for the remote devotional store.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Canonical identifier for a store entity.
///
/// The store emits ids as JSON numbers or strings, and they may exceed
/// 64-bit precision. All comparison and hashing happens on the canonical
/// decimal string, never on a numeric representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ItemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<u64> for ItemId {
  fn from(value: u64) -> Self {
    Self(value.to_string())
  }
}

impl Serialize for ItemId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.0)
  }
}

impl<'de> Deserialize<'de> for ItemId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct IdVisitor;

    impl Visitor<'_> for IdVisitor {
      type Value = ItemId;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an id as a number or string")
      }

      fn visit_u64<E: de::Error>(self, v: u64) -> Result<ItemId, E> {
        Ok(ItemId(v.to_string()))
      }

      fn visit_i64<E: de::Error>(self, v: i64) -> Result<ItemId, E> {
        Ok(ItemId(v.to_string()))
      }

      fn visit_u128<E: de::Error>(self, v: u128) -> Result<ItemId, E> {
        Ok(ItemId(v.to_string()))
      }

      fn visit_str<E: de::Error>(self, v: &str) -> Result<ItemId, E> {
        Ok(ItemId(v.to_string()))
      }
    }

    deserializer.deserialize_any(IdVisitor)
  }
}

/// What a favorite record points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
  Prayer,
  Ritual,
}

impl fmt::Display for ItemType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ItemType::Prayer => f.write_str("prayer"),
      ItemType::Ritual => f.write_str("ritual"),
    }
  }
}

/// A prayer from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prayer {
  pub id: ItemId,
  pub title: String,
  pub text: String,
  pub translation: String,
  pub category: String,
}

/// A ritual with an ordered sequence of steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ritual {
  pub id: ItemId,
  pub title: String,
  pub description: String,
  /// Step order is meaningful and preserved as received.
  pub steps: Vec<String>,
}

/// A recurring daily schedule entry. `time` is free-form text; parsing
/// lives in the schedule module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleItem {
  pub id: ItemId,
  pub name: String,
  pub time: String,
  pub description: String,
}

/// A bookmark on a prayer or ritual. The store is authoritative for the
/// at-most-one-record-per-(id, item_type) invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteRecord {
  pub id: ItemId,
  #[serde(rename = "itemType")]
  pub item_type: ItemType,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_item_id_from_number_and_string() {
    let from_number: ItemId = serde_json::from_str("42").unwrap();
    let from_string: ItemId = serde_json::from_str("\"42\"").unwrap();
    assert_eq!(from_number, from_string);
    assert_eq!(from_number.as_str(), "42");
  }

  #[test]
  fn test_item_id_beyond_u64() {
    // Larger than u64::MAX; must survive without precision loss.
    let id: ItemId = serde_json::from_str("\"98765432109876543210987654321\"").unwrap();
    assert_eq!(id.as_str(), "98765432109876543210987654321");
  }

  #[test]
  fn test_item_type_wire_format() {
    assert_eq!(serde_json::to_string(&ItemType::Prayer).unwrap(), "\"prayer\"");
    let parsed: ItemType = serde_json::from_str("\"ritual\"").unwrap();
    assert_eq!(parsed, ItemType::Ritual);
  }

  #[test]
  fn test_favorite_record_round_trip() {
    let json = r#"{"id": 7, "itemType": "prayer"}"#;
    let record: FavoriteRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.id, ItemId::from(7));
    assert_eq!(record.item_type, ItemType::Prayer);
  }
}
