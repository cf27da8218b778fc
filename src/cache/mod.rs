//! Invalidation-driven read cache for remote collections.
//!
//! Reads are keyed by operation plus every parameter, so two requests with
//! equal keys share one in-flight fetch and one cached value. Entries are
//! fresh until a mutation invalidates them; there is no time-based expiry
//! and no optimistic write path.

mod key;
mod layer;

pub use key::QueryKey;
pub use layer::QueryCache;
