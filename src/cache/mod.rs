//! Metadata caching layer
//!
//! A memoizing cache with per-key mutual exclusion, plus a background
//! prefetcher that warms it right after login so interactive commands see
//! already-fetched data.

pub mod keyed;
pub mod prefetch;

pub use keyed::KeyedCache;
pub use prefetch::{prefetch, Accessor, PrefetchHandle};
