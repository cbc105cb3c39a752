//! Compiled pattern cache

use super::types::PermissionPattern;
use crate::error::Result;
use dashmap::DashMap;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Configuration for the pattern cache
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of compiled patterns held before the cache is flushed
    pub max_cache_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_cache_size: 10_000,
        }
    }
}

/// Cache statistics for monitoring performance
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub size: usize,
    pub hit_count: u64,
    pub miss_count: u64,
    pub hit_rate: f64,
}

/// Pattern cache keyed by source expression
///
/// Permission patterns are declared once and checked on every request, so
/// compiling them per check is wasteful. Compilation failures are never
/// cached; the same bad expression fails again on the next call.
///
/// # Thread Safety
///
/// PatternCache uses DashMap and atomic counters and can be safely shared
/// across threads.
///
/// # Examples
///
/// ```
/// use authz_analyzer::{CacheConfig, PatternCache};
///
/// let cache = PatternCache::new(CacheConfig::default());
///
/// let pattern = cache.get_or_compile(r"printers\..*").unwrap();
/// assert!(pattern.is_match("printers.edit"));
///
/// cache.get_or_compile(r"printers\..*").unwrap();
/// assert_eq!(cache.stats().hit_count, 1);
/// ```
pub struct PatternCache {
    config: CacheConfig,
    patterns: DashMap<String, PermissionPattern>,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
}

impl PatternCache {
    /// Creates a new pattern cache with the given configuration
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            patterns: DashMap::new(),
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        }
    }

    /// Returns the compiled pattern for `source`, compiling it on first use
    ///
    /// # Errors
    ///
    /// Returns `AuthzError::InvalidPattern` if the expression does not compile
    pub fn get_or_compile(&self, source: &str) -> Result<PermissionPattern> {
        if let Some(entry) = self.patterns.get(source) {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(pattern = source, "pattern cache hit");
            return Ok(entry.value().clone());
        }

        self.miss_count.fetch_add(1, Ordering::Relaxed);

        let pattern = PermissionPattern::new(source).inspect_err(|e| {
            tracing::warn!(pattern = source, error = %e, "failed to compile permission pattern");
        })?;

        if self.config.max_cache_size == 0 {
            return Ok(pattern);
        }

        if self.patterns.len() >= self.config.max_cache_size {
            tracing::debug!(
                size = self.patterns.len(),
                max = self.config.max_cache_size,
                "pattern cache full, flushing"
            );
            self.patterns.clear();
        }

        self.patterns.insert(source.to_string(), pattern.clone());
        Ok(pattern)
    }

    /// Clears the cache and resets statistics
    pub fn clear(&self) {
        self.patterns.clear();
        self.hit_count.store(0, Ordering::Relaxed);
        self.miss_count.store(0, Ordering::Relaxed);
    }

    /// Returns cache statistics
    pub fn stats(&self) -> CacheStats {
        let size = self.patterns.len();
        let hits = self.hit_count.load(Ordering::Relaxed);
        let misses = self.miss_count.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        CacheStats {
            size,
            hit_count: hits,
            miss_count: misses,
            hit_rate,
        }
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthzError;

    #[test]
    fn test_get_or_compile_caching() {
        let cache = PatternCache::default();

        // First call - cache miss
        let first = cache.get_or_compile(r".*\.edit").unwrap();
        let stats1 = cache.stats();
        assert_eq!(stats1.miss_count, 1);
        assert_eq!(stats1.size, 1);

        // Second call - cache hit
        let second = cache.get_or_compile(r".*\.edit").unwrap();
        let stats2 = cache.stats();
        assert_eq!(stats2.hit_count, 1);
        assert_eq!(first, second);
        assert!((stats2.hit_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_pattern_not_cached() {
        let cache = PatternCache::default();

        assert!(matches!(
            cache.get_or_compile("printers.("),
            Err(AuthzError::InvalidPattern { .. })
        ));
        assert!(cache.get_or_compile("printers.(").is_err());

        let stats = cache.stats();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.miss_count, 2);
        assert_eq!(stats.hit_count, 0);
    }

    #[test]
    fn test_flush_when_full() {
        let cache = PatternCache::new(CacheConfig { max_cache_size: 2 });

        cache.get_or_compile("a").unwrap();
        cache.get_or_compile("b").unwrap();
        assert_eq!(cache.stats().size, 2);

        cache.get_or_compile("c").unwrap();
        assert_eq!(cache.stats().size, 1);
    }

    #[test]
    fn test_zero_size_disables_caching() {
        let cache = PatternCache::new(CacheConfig { max_cache_size: 0 });

        cache.get_or_compile("a").unwrap();
        cache.get_or_compile("a").unwrap();

        let stats = cache.stats();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.miss_count, 2);
    }

    #[test]
    fn test_clear() {
        let cache = PatternCache::default();

        cache.get_or_compile("printers.edit").unwrap();
        cache.get_or_compile("printers.edit").unwrap();
        assert!(cache.stats().size > 0);

        cache.clear();
        let stats = cache.stats();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.hit_count, 0);
        assert_eq!(stats.miss_count, 0);
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: CacheConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_cache_size, 10_000);

        let config: CacheConfig = serde_json::from_str(r#"{"max_cache_size": 16}"#).unwrap();
        assert_eq!(config.max_cache_size, 16);
    }
}
