//! Permission pattern module.
//!
//! Provides:
//! - [`PatternType`] for choosing equality, regex, or handler-driven matching
//! - [`PermissionPattern`], a regex that only matches whole permission values
//! - [`PatternCache`], a thread-safe cache of compiled patterns keyed by source

mod cache;
mod types;

pub use cache::{CacheConfig, CacheStats, PatternCache};
pub use types::{PatternType, PermissionPattern};
