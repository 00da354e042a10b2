//! Keyed cache of metrics payloads shared between fetch tasks and the
//! render loop.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::api::ApiError;
use crate::metrics::{
    BattleMetrics, CityMetrics, EconomicMetrics, FactionMetrics, OverviewMetrics, PlayerMetrics,
    ServerMetrics, SimulationPerformance, WorldSimulationMetrics,
};

pub mod poller;
pub mod source;

pub use poller::Poller;
pub use source::{MetricsSource, MockSource, RemoteSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Overview,
    WorldSimulation,
    PlayerMetrics,
    ServerMetrics,
    BattleMetrics,
    CityMetrics,
    EconomicMetrics,
    FactionMetrics,
    SimulationPerformance,
}

impl QueryKey {
    pub const ALL: [QueryKey; 9] = [
        QueryKey::Overview,
        QueryKey::WorldSimulation,
        QueryKey::PlayerMetrics,
        QueryKey::ServerMetrics,
        QueryKey::BattleMetrics,
        QueryKey::CityMetrics,
        QueryKey::EconomicMetrics,
        QueryKey::FactionMetrics,
        QueryKey::SimulationPerformance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKey::Overview => "metrics-overview",
            QueryKey::WorldSimulation => "world-simulation",
            QueryKey::PlayerMetrics => "player-metrics",
            QueryKey::ServerMetrics => "server-metrics",
            QueryKey::BattleMetrics => "battle-metrics",
            QueryKey::CityMetrics => "city-metrics",
            QueryKey::EconomicMetrics => "economic-metrics",
            QueryKey::FactionMetrics => "faction-metrics",
            QueryKey::SimulationPerformance => "simulation-performance",
        }
    }

    /// The API endpoint serving this key, if the backend has one.
    pub fn remote_endpoint(&self) -> Option<&'static str> {
        use crate::api::metrics;
        match self {
            QueryKey::Overview => Some(metrics::OVERVIEW),
            QueryKey::WorldSimulation => Some(metrics::WORLD),
            QueryKey::PlayerMetrics => Some(metrics::PLAYERS),
            QueryKey::ServerMetrics => Some(metrics::SERVER),
            QueryKey::BattleMetrics => Some(metrics::BATTLES),
            QueryKey::CityMetrics
            | QueryKey::EconomicMetrics
            | QueryKey::FactionMetrics
            | QueryKey::SimulationPerformance => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricsPayload {
    Overview(OverviewMetrics),
    World(WorldSimulationMetrics),
    Players(PlayerMetrics),
    Server(ServerMetrics),
    Battles(BattleMetrics),
    Cities(CityMetrics),
    Economy(EconomicMetrics),
    Factions(FactionMetrics),
    Simulation(SimulationPerformance),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct QueryState {
    pub status: QueryStatus,
    pub data: Option<Arc<MetricsPayload>>,
    pub error: Option<String>,
    pub is_fetching: bool,
    /// Bumped on every successful fetch.
    pub version: u64,
    pub updated_at: Option<Instant>,
    pub updated_wall: Option<DateTime<Local>>,
    pub failure_count: u32,
}

impl QueryState {
    /// First fetch still pending with nothing to show.
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.error.is_none()
    }

    pub fn is_stale(&self, stale_time: Duration, now: Instant) -> bool {
        match self.updated_at {
            Some(at) => now.saturating_duration_since(at) >= stale_time,
            None => true,
        }
    }
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, QueryState>,
}

pub type SharedQueryCache = Arc<RwLock<QueryCache>>;

pub fn shared_cache() -> SharedQueryCache {
    Arc::new(RwLock::new(QueryCache::default()))
}

/// Poisoning only means a writer panicked mid-update; the map is still usable.
pub fn read_cache(cache: &SharedQueryCache) -> RwLockReadGuard<'_, QueryCache> {
    cache.read().unwrap_or_else(|p| p.into_inner())
}

pub fn write_cache(cache: &SharedQueryCache) -> RwLockWriteGuard<'_, QueryCache> {
    cache.write().unwrap_or_else(|p| p.into_inner())
}

impl QueryCache {
    pub fn state(&self, key: QueryKey) -> QueryState {
        self.entries.get(&key).cloned().unwrap_or_default()
    }

    pub fn begin_fetch(&mut self, key: QueryKey) {
        let entry = self.entries.entry(key).or_default();
        entry.is_fetching = true;
        if entry.data.is_none() {
            entry.status = QueryStatus::Loading;
        }
    }

    pub fn resolve(&mut self, key: QueryKey, payload: MetricsPayload, now: Instant) {
        let entry = self.entries.entry(key).or_default();
        entry.status = QueryStatus::Success;
        entry.data = Some(Arc::new(payload));
        entry.error = None;
        entry.is_fetching = false;
        entry.version += 1;
        entry.updated_at = Some(now);
        entry.updated_wall = Some(Local::now());
        entry.failure_count = 0;
    }

    /// Marks the key errored. Earlier data stays in place.
    pub fn reject(&mut self, key: QueryKey, error: String) {
        let entry = self.entries.entry(key).or_default();
        entry.status = QueryStatus::Error;
        entry.error = Some(error);
        entry.is_fetching = false;
        entry.failure_count += 1;
    }

    pub fn abandon(&mut self, key: QueryKey) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.is_fetching = false;
            if entry.status == QueryStatus::Loading {
                entry.status = QueryStatus::Idle;
            }
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.entries.values().any(|e| e.is_fetching)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    pub refetch_interval: Duration,
    pub stale_time: Duration,
    /// Extra attempts after the first failure.
    pub retry: u32,
    pub retry_delay: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            refetch_interval: Duration::from_secs(30),
            stale_time: Duration::from_secs(5),
            retry: 2,
            retry_delay: Duration::from_millis(500),
        }
    }
}

impl QueryOptions {
    pub fn with_interval(refetch_interval: Duration) -> Self {
        Self {
            refetch_interval,
            ..Self::default()
        }
    }
}

/// Clears the fetching flag if the fetch future is dropped before finishing.
struct InFlight<'a> {
    cache: &'a SharedQueryCache,
    key: QueryKey,
    done: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.done {
            write_cache(self.cache).abandon(self.key);
        }
    }
}

/// Fetches `key` into the cache, retrying failures with a linear backoff.
/// Returns whether fresh data landed.
pub async fn fetch_query(
    cache: &SharedQueryCache,
    source: &dyn MetricsSource,
    key: QueryKey,
    options: &QueryOptions,
) -> bool {
    write_cache(cache).begin_fetch(key);
    let mut guard = InFlight {
        cache,
        key,
        done: false,
    };

    let mut attempt = 0;
    let outcome = loop {
        match source.fetch(key).await {
            Ok(payload) => break Ok(payload),
            Err(err @ ApiError::Unauthorized) => break Err(err),
            Err(err) if attempt < options.retry => {
                attempt += 1;
                debug!(key = key.as_str(), attempt, error = %err, "fetch failed, retrying");
                tokio::time::sleep(options.retry_delay * attempt).await;
            }
            Err(err) => break Err(err),
        }
    };

    guard.done = true;
    let mut cache = write_cache(cache);
    match outcome {
        Ok(payload) => {
            cache.resolve(key, payload, Instant::now());
            debug!(key = key.as_str(), "fetched");
            true
        }
        Err(err) => {
            warn!(
                key = key.as_str(),
                attempts = attempt + 1,
                transient = err.is_transient(),
                error = %err,
                "fetch failed"
            );
            cache.reject(key, err.to_string());
            false
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::ScriptedSource;
    use super::*;

    fn network() -> Result<(), ApiError> {
        Err(ApiError::Network("connection refused".to_string()))
    }

    #[tokio::test(start_paused = true)]
    async fn success_populates_the_cache() {
        let cache = shared_cache();
        let source = ScriptedSource::new(vec![]);
        assert!(fetch_query(&cache, &source, QueryKey::CityMetrics, &QueryOptions::default()).await);

        let state = read_cache(&cache).state(QueryKey::CityMetrics);
        assert_eq!(state.status, QueryStatus::Success);
        assert_eq!(state.version, 1);
        assert!(!state.is_fetching);
        assert!(matches!(state.data.as_deref(), Some(MetricsPayload::Cities(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_are_retried() {
        let cache = shared_cache();
        let source = ScriptedSource::new(vec![network(), network()]);
        assert!(fetch_query(&cache, &source, QueryKey::Overview, &QueryOptions::default()).await);
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_retries_and_keeps_stale_data() {
        let cache = shared_cache();
        let options = QueryOptions::default();
        let ok = ScriptedSource::new(vec![]);
        fetch_query(&cache, &ok, QueryKey::Overview, &options).await;

        let failing = ScriptedSource::new(vec![network(), network(), network()]);
        assert!(!fetch_query(&cache, &failing, QueryKey::Overview, &options).await);
        assert_eq!(failing.calls(), 3);

        let state = read_cache(&cache).state(QueryKey::Overview);
        assert_eq!(state.status, QueryStatus::Error);
        assert!(state.data.is_some());
        assert_eq!(state.version, 1);
        assert!(state.error.unwrap().contains("connection refused"));
    }

    #[tokio::test(start_paused = true)]
    async fn unauthorized_is_not_retried() {
        let cache = shared_cache();
        let source = ScriptedSource::new(vec![Err(ApiError::Unauthorized)]);
        assert!(!fetch_query(&cache, &source, QueryKey::PlayerMetrics, &QueryOptions::default()).await);
        assert_eq!(source.calls(), 1);
        let state = read_cache(&cache).state(QueryKey::PlayerMetrics);
        assert_eq!(state.status, QueryStatus::Error);
        assert!(!state.is_loading());
    }

    #[test]
    fn staleness_follows_the_stale_time() {
        let now = Instant::now();
        let mut state = QueryState::default();
        assert!(state.is_stale(Duration::from_secs(5), now));
        state.updated_at = Some(now);
        assert!(!state.is_stale(Duration::from_secs(5), now + Duration::from_secs(4)));
        assert!(state.is_stale(Duration::from_secs(5), now + Duration::from_secs(5)));
    }

    #[test]
    fn key_names_are_stable() {
        assert_eq!(QueryKey::Overview.as_str(), "metrics-overview");
        assert_eq!(QueryKey::SimulationPerformance.as_str(), "simulation-performance");
        assert_eq!(QueryKey::ServerMetrics.remote_endpoint(), Some("/metrics/server"));
        assert_eq!(QueryKey::EconomicMetrics.remote_endpoint(), None);
    }
}
