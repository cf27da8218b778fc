//! Query keys for the cache.

use std::fmt;

/// Identifies one cached read: the operation plus every parameter it was
/// issued with.
///
/// Key precision is the structural defense against stale in-flight results:
/// a fetch for another category or date lives under a different key, so a
/// superseded response can never overwrite fresher data for the key the
/// view is actually showing. There is deliberately no cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
  /// Full prayer catalog. Also serves the "All" category convention.
  Prayers,
  /// Server-side filtered catalog for one concrete category.
  PrayersByCategory { category: String },
  Rituals,
  Schedule,
  Favorites,
  /// Completions for a single date string (`YYYY-MM-DD`).
  Completions { date: String },
}

impl fmt::Display for QueryKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      QueryKey::Prayers => write!(f, "prayers"),
      QueryKey::PrayersByCategory { category } => write!(f, "prayers:{category}"),
      QueryKey::Rituals => write!(f, "rituals"),
      QueryKey::Schedule => write!(f, "schedule"),
      QueryKey::Favorites => write!(f, "favorites"),
      QueryKey::Completions { date } => write!(f, "completions:{date}"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_keys_with_different_parameters_are_distinct() {
    let a = QueryKey::Completions {
      date: "2025-01-15".to_string(),
    };
    let b = QueryKey::Completions {
      date: "2025-01-16".to_string(),
    };
    assert_ne!(a, b);

    let c = QueryKey::PrayersByCategory {
      category: "Morning".to_string(),
    };
    let d = QueryKey::PrayersByCategory {
      category: "Evening".to_string(),
    };
    assert_ne!(c, d);
  }

  #[test]
  fn test_display_includes_parameters() {
    let key = QueryKey::Completions {
      date: "2025-01-15".to_string(),
    };
    assert_eq!(key.to_string(), "completions:2025-01-15");
  }
}
