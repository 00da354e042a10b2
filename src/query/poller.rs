use std::sync::Arc;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval, interval_at};
use tracing::debug;

use super::{MetricsSource, QueryKey, QueryOptions, SharedQueryCache, fetch_query, read_cache};

/// Background refresh for one mounted page's query.
///
/// Fetches immediately when the cached entry is missing or stale, then every
/// `refetch_interval`. `refetch` forces a fetch and restarts the period.
/// Dropping the poller stops it, including any fetch in flight.
pub struct Poller {
    key: QueryKey,
    refetch: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn spawn(
        key: QueryKey,
        cache: SharedQueryCache,
        source: Arc<dyn MetricsSource>,
        options: QueryOptions,
    ) -> Self {
        let refetch = Arc::new(Notify::new());
        let trigger = refetch.clone();

        let handle = tokio::spawn(async move {
            let now = Instant::now();
            let fresh = !read_cache(&cache)
                .state(key)
                .is_stale(options.stale_time, now);

            let mut ticker = if fresh {
                debug!(key = key.as_str(), "cached data is fresh, waiting a full period");
                interval_at(now + options.refetch_interval, options.refetch_interval)
            } else {
                interval(options.refetch_interval)
            };
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = trigger.notified() => {
                        debug!(key = key.as_str(), "manual refetch");
                        ticker.reset();
                    }
                }
                fetch_query(&cache, source.as_ref(), key, &options).await;
            }
        });

        debug!(key = key.as_str(), "poller started");
        Self {
            key,
            refetch,
            handle,
        }
    }

    #[cfg(test)]
    pub fn key(&self) -> QueryKey {
        self.key
    }

    pub fn refetch(&self) {
        self.refetch.notify_one();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
        debug!(key = self.key.as_str(), "poller stopped");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::query::test_support::ScriptedSource;
    use crate::query::{QueryStatus, shared_cache};

    fn options() -> QueryOptions {
        QueryOptions::with_interval(Duration::from_secs(30))
    }

    /// Lets spawned tasks run without moving the paused clock.
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn polls_on_mount_and_every_period() {
        let cache = shared_cache();
        let source = Arc::new(ScriptedSource::new(vec![]));
        let _poller = Poller::spawn(QueryKey::Overview, cache.clone(), source.clone(), options());

        settle().await;
        assert_eq!(source.calls(), 1);
        assert_eq!(read_cache(&cache).state(QueryKey::Overview).status, QueryStatus::Success);

        tokio::time::sleep(Duration::from_secs(30)).await;
        settle().await;
        assert_eq!(source.calls(), 2);

        tokio::time::sleep(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(source.calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_poller_stops_fetching() {
        let cache = shared_cache();
        let source = Arc::new(ScriptedSource::new(vec![]));
        let poller = Poller::spawn(QueryKey::CityMetrics, cache, source.clone(), options());
        settle().await;
        assert_eq!(source.calls(), 1);

        drop(poller);
        tokio::time::sleep(Duration::from_secs(120)).await;
        settle().await;
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_cache_skips_the_mount_fetch() {
        let cache = shared_cache();
        let source = Arc::new(ScriptedSource::new(vec![]));
        let first = Poller::spawn(QueryKey::WorldSimulation, cache.clone(), source.clone(), options());
        settle().await;
        drop(first);

        tokio::time::sleep(Duration::from_secs(2)).await;
        let _second = Poller::spawn(QueryKey::WorldSimulation, cache.clone(), source.clone(), options());
        settle().await;
        assert_eq!(source.calls(), 1);

        tokio::time::sleep(Duration::from_secs(30)).await;
        settle().await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_cache_refetches_on_focus() {
        let cache = shared_cache();
        let source = Arc::new(ScriptedSource::new(vec![]));
        let first = Poller::spawn(QueryKey::EconomicMetrics, cache.clone(), source.clone(), options());
        settle().await;
        drop(first);

        tokio::time::sleep(Duration::from_secs(6)).await;
        let _second = Poller::spawn(QueryKey::EconomicMetrics, cache, source.clone(), options());
        settle().await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_refetch_fetches_now() {
        let cache = shared_cache();
        let source = Arc::new(ScriptedSource::new(vec![]));
        let poller = Poller::spawn(QueryKey::ServerMetrics, cache, source.clone(), options());
        settle().await;

        poller.refetch();
        settle().await;
        assert_eq!(source.calls(), 2);
    }
}
