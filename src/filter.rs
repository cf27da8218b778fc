//! Category selection for the prayer catalog.

use crate::store::types::Prayer;

/// Sentinel category that bypasses filtering. Client-side convention only;
/// never sent to the store.
pub const ALL_CATEGORY: &str = "All";

/// Select the prayers whose category matches `category` exactly
/// (case-sensitive). The `All` sentinel returns the unfiltered catalog.
pub fn filter_by_category<'a>(prayers: &'a [Prayer], category: &str) -> Vec<&'a Prayer> {
  prayers
    .iter()
    .filter(|prayer| category == ALL_CATEGORY || prayer.category == category)
    .collect()
}
