// =============================================================================
// CachedSource — read-through series cache keyed by (ticker, start, end)
// =============================================================================
//
// Purely an optimization layer: a comparison request that touches the same
// instrument and range twice hits the upstream source once.  Correctness
// never depends on this cache; dropping it yields identical results.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use tracing::debug;

use crate::series::OhlcvSeries;
use crate::source::{DataSource, FetchError};

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct CacheKey {
    ticker: String,
    start: NaiveDate,
    end: NaiveDate,
}

/// A decorator that memoizes successful fetches of an inner source.
/// Failed fetches are not cached, so transient upstream errors can recover.
pub struct CachedSource<S> {
    inner: S,
    cache: RwLock<HashMap<CacheKey, Arc<OhlcvSeries>>>,
}

impl<S> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of distinct (ticker, range) entries currently cached.
    pub fn cached_ranges(&self) -> usize {
        self.cache.read().len()
    }

    pub fn clear(&self) {
        self.cache.write().clear();
    }
}

#[async_trait]
impl<S: DataSource> DataSource for CachedSource<S> {
    async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<OhlcvSeries, FetchError> {
        let key = CacheKey {
            ticker: ticker.to_string(),
            start,
            end,
        };

        let hit = self.cache.read().get(&key).cloned();
        if let Some(series) = hit {
            debug!(ticker = %ticker, "series cache hit");
            return Ok((*series).clone());
        }

        let series = self.inner.fetch(ticker, start, end).await?;
        self.cache.write().insert(key, Arc::new(series.clone()));
        Ok(series)
    }
}
