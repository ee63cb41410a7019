// History cache - Reuses the downsampled history until it goes stale
use crate::application::station_source::{FetchError, StationSource};
use crate::domain::telemetry::HistorySeries;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(60);

/// The history endpoint serves at most a week.
pub const MAX_WINDOW_HOURS: u32 = 168;

struct CachedHistory {
    window_hours: u32,
    series: Arc<HistorySeries>,
    fetched_at: Instant,
}

/// Holds at most one history series.
///
/// The entry lock is held across the network fetch, so callers that arrive
/// while a refetch is in flight wait for it and then reuse its result.
pub struct HistoryCache {
    source: Arc<dyn StationSource>,
    max_age: Duration,
    entry: Mutex<Option<CachedHistory>>,
}

impl HistoryCache {
    pub fn new(source: Arc<dyn StationSource>, max_age: Duration) -> Self {
        Self {
            source,
            max_age,
            entry: Mutex::new(None),
        }
    }

    /// Cached series for `window_hours`, refetched once older than `max_age`.
    ///
    /// A failed refetch serves the previous entry for the same window and
    /// leaves its fetch time alone, so the next call tries again. The error is
    /// returned only when there is nothing to fall back to.
    pub async fn get(&self, window_hours: u32) -> Result<Arc<HistorySeries>, FetchError> {
        let window_hours = clamp_window(window_hours);
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref() {
            let age = cached.fetched_at.elapsed();
            if cached.window_hours == window_hours && age < self.max_age {
                tracing::debug!("History cache hit ({}h, age {:?})", window_hours, age);
                return Ok(Arc::clone(&cached.series));
            }
        }

        let series = match self.source.history(window_hours).await {
            Ok(series) => Arc::new(series),
            Err(e) => {
                return match entry.as_ref() {
                    Some(cached) if cached.window_hours == window_hours => {
                        tracing::warn!(
                            "History refetch failed, serving entry aged {:?}: {}",
                            cached.fetched_at.elapsed(),
                            e
                        );
                        Ok(Arc::clone(&cached.series))
                    }
                    _ => Err(e),
                };
            }
        };
        tracing::info!(
            "Fetched {}h history with {} series",
            window_hours,
            series.len()
        );

        *entry = Some(CachedHistory {
            window_hours,
            series: Arc::clone(&series),
            fetched_at: Instant::now(),
        });

        Ok(series)
    }

    /// Age of the cached entry, `None` before the first successful fetch.
    pub async fn age(&self) -> Option<Duration> {
        self.entry
            .lock()
            .await
            .as_ref()
            .map(|cached| cached.fetched_at.elapsed())
    }
}

fn clamp_window(window_hours: u32) -> u32 {
    window_hours.clamp(1, MAX_WINDOW_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::FakeStation;

    fn cache(station: &Arc<FakeStation>) -> HistoryCache {
        HistoryCache::new(station.clone(), DEFAULT_MAX_AGE)
    }

    #[tokio::test(start_paused = true)]
    async fn test_reuses_series_within_window() {
        let station = Arc::new(FakeStation::new());
        let cache = cache(&station);

        let first = cache.get(24).await.unwrap();
        tokio::time::advance(Duration::from_secs(10)).await;
        let second = cache.get(24).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(station.history_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetches_when_stale() {
        let station = Arc::new(FakeStation::new());
        let cache = cache(&station);

        let first = cache.get(24).await.unwrap();
        tokio::time::advance(Duration::from_secs(60)).await;
        let second = cache.get(24).await.unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(station.history_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_fetch_per_window_under_frequent_calls() {
        let station = Arc::new(FakeStation::new());
        let cache = cache(&station);

        // 5 s cadence for three minutes
        for _ in 0..36 {
            cache.get(24).await.unwrap();
            tokio::time::advance(Duration::from_secs(5)).await;
        }

        assert_eq!(station.history_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_share_one_fetch() {
        let station = Arc::new(FakeStation::new().with_history_delay(Duration::from_millis(500)));
        let cache = cache(&station);

        let (a, b) = futures::future::join(cache.get(24), cache.get(24)).await;

        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(station.history_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_without_cache_propagates() {
        let station = Arc::new(FakeStation::new());
        station.fail_history(true);
        let cache = cache(&station);

        assert!(matches!(cache.get(24).await, Err(FetchError::Network(_))));
        assert!(cache.age().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refetch_serves_previous_entry() {
        let station = Arc::new(FakeStation::new());
        let cache = cache(&station);

        let first = cache.get(24).await.unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;
        station.fail_history(true);
        let served = cache.get(24).await.unwrap();
        assert!(Arc::ptr_eq(&first, &served));
        assert!(cache.age().await.unwrap() >= Duration::from_secs(61));

        // Still stale, so every call retries the source.
        cache.get(24).await.unwrap();
        assert_eq!(station.history_calls(), 3);

        station.fail_history(false);
        let second = cache.get(24).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(station.history_calls(), 4);
        assert!(cache.age().await.unwrap() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refetch_for_other_window_propagates() {
        let station = Arc::new(FakeStation::new());
        let cache = cache(&station);

        cache.get(24).await.unwrap();
        station.fail_history(true);

        assert!(matches!(cache.get(48).await, Err(FetchError::Network(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_different_window_is_a_miss() {
        let station = Arc::new(FakeStation::new());
        let cache = cache(&station);

        cache.get(24).await.unwrap();
        cache.get(48).await.unwrap();
        cache.get(48).await.unwrap();

        assert_eq!(station.history_calls(), 2);
        assert_eq!(station.last_window(), Some(48));
    }

    #[tokio::test]
    async fn test_window_is_clamped() {
        let station = Arc::new(FakeStation::new());
        let cache = cache(&station);

        cache.get(1_000).await.unwrap();
        assert_eq!(station.last_window(), Some(MAX_WINDOW_HOURS));
        cache.get(0).await.unwrap();
        assert_eq!(station.last_window(), Some(1));
    }
}
