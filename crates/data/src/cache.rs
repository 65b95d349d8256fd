//! Country dataset caching using Moka.
//!
//! Parsing a country's CSV files dominates request latency, so loaded
//! datasets are kept in memory keyed by normalized country identifier.

use moka::sync::Cache;
use snt_core::CountryDatasets;
use snt_shared::DataConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::error::{DataError, DataResult};
use crate::provider::{DatasetProvider, normalize_country};

/// Default cache capacity (number of countries).
const DEFAULT_CACHE_CAPACITY: u64 = 32;

/// Default time-to-live for cache entries (10 minutes).
const DEFAULT_TTL_SECS: u64 = 600;

/// Wraps a provider with a per-country cache.
///
/// Concurrent misses for one country share a single load. Failed loads are
/// not cached.
#[derive(Clone)]
pub struct CachedDatasetProvider<P> {
    inner: P,
    cache: Cache<String, Arc<CountryDatasets>>,
}

impl<P: DatasetProvider> CachedDatasetProvider<P> {
    /// Creates a cache with default settings.
    ///
    /// Default: 32 countries max, 10 minute TTL.
    #[must_use]
    pub fn new(inner: P) -> Self {
        Self::with_config(inner, DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache with custom capacity and TTL.
    #[must_use]
    pub fn with_config(inner: P, max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, cache }
    }

    /// Creates a cache sized from application configuration.
    #[must_use]
    pub fn from_config(inner: P, config: &DataConfig) -> Self {
        Self::with_config(inner, config.cache_capacity, config.cache_ttl_secs)
    }

    /// Drops one country's cached datasets.
    pub fn invalidate(&self, country: &str) {
        if let Ok(country) = normalize_country(country) {
            self.cache.invalidate(&country);
        }
    }

    /// Drops every cached country.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Number of countries currently cached.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs pending cache maintenance.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl<P: DatasetProvider> DatasetProvider for CachedDatasetProvider<P> {
    fn load(&self, country: &str) -> DataResult<Arc<CountryDatasets>> {
        let country = normalize_country(country)?;

        if let Some(datasets) = self.cache.get(&country) {
            debug!(country = %country, "Dataset cache hit");
            return Ok(datasets);
        }

        self.cache
            .try_get_with_by_ref(&country, || self.inner.load(&country))
            .map_err(|err| Arc::try_unwrap(err).unwrap_or_else(DataError::Shared))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts loads and serves empty datasets for `drc` only.
    #[derive(Default)]
    struct CountingProvider {
        loads: AtomicUsize,
    }

    impl DatasetProvider for CountingProvider {
        fn load(&self, country: &str) -> DataResult<Arc<CountryDatasets>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if country == "drc" {
                Ok(Arc::new(CountryDatasets::default()))
            } else {
                Err(DataError::UnknownCountry(country.to_string()))
            }
        }
    }

    #[test]
    fn test_second_load_hits_cache() {
        let provider = CachedDatasetProvider::new(CountingProvider::default());

        let first = provider.load("drc").unwrap();
        let second = provider.load("DRC").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.inner.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failures_not_cached() {
        let provider = CachedDatasetProvider::new(CountingProvider::default());

        assert!(provider.load("nga").is_err());
        assert!(provider.load("nga").is_err());
        assert_eq!(provider.inner.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_misses_share_one_load() {
        struct SlowProvider(CountingProvider);

        impl DatasetProvider for SlowProvider {
            fn load(&self, country: &str) -> DataResult<Arc<CountryDatasets>> {
                std::thread::sleep(Duration::from_millis(50));
                self.0.load(country)
            }
        }

        let provider = CachedDatasetProvider::new(SlowProvider(CountingProvider::default()));
        let barrier = Barrier::new(4);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    barrier.wait();
                    provider.load("drc").unwrap();
                });
            }
        });

        assert_eq!(provider.inner.0.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let provider = CachedDatasetProvider::new(CountingProvider::default());

        provider.load("drc").unwrap();
        provider.invalidate("drc");
        provider.load("drc").unwrap();

        assert_eq!(provider.inner.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_from_config() {
        let provider =
            CachedDatasetProvider::from_config(CountingProvider::default(), &DataConfig::default());

        provider.load("drc").unwrap();
        provider.run_pending_tasks();
        assert_eq!(provider.entry_count(), 1);
    }
}
