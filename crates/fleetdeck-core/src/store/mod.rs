// ── Query cache ──
//
// Cache-aware data access: structured keys, type-erased entries, and
// invalidate-on-mutation consistency. Cached values are never mutated in
// place; mutation success marks exactly the keys that could be stale and
// the next read recomputes.

pub mod cache;
pub mod keys;

pub use cache::QueryCache;
pub use keys::QueryKey;
