use async_trait::async_trait;
use tracing::debug;

use super::{MetricsPayload, QueryKey};
use crate::api::{ApiClient, ApiError};
use crate::mock::MockDataService;

/// Where a query's payload comes from.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn fetch(&self, key: QueryKey) -> Result<MetricsPayload, ApiError>;

    /// Short label naming the origin of `key`, shown on the settings page.
    fn origin(&self, key: QueryKey) -> &'static str;
}

pub(crate) fn mock_payload(data: &MockDataService, key: QueryKey) -> MetricsPayload {
    match key {
        QueryKey::Overview => MetricsPayload::Overview(data.overview()),
        QueryKey::WorldSimulation => MetricsPayload::World(data.world_simulation()),
        QueryKey::PlayerMetrics => MetricsPayload::Players(data.player_metrics()),
        QueryKey::ServerMetrics => MetricsPayload::Server(data.server_metrics()),
        QueryKey::BattleMetrics => MetricsPayload::Battles(data.battle_metrics()),
        QueryKey::CityMetrics => MetricsPayload::Cities(data.city_metrics()),
        QueryKey::EconomicMetrics => MetricsPayload::Economy(data.economic_metrics()),
        QueryKey::FactionMetrics => MetricsPayload::Factions(data.faction_metrics()),
        QueryKey::SimulationPerformance => {
            MetricsPayload::Simulation(data.simulation_performance())
        }
    }
}

#[derive(Default)]
pub struct MockSource {
    data: MockDataService,
}

impl MockSource {
    pub fn new(data: MockDataService) -> Self {
        Self { data }
    }
}

#[async_trait]
impl MetricsSource for MockSource {
    async fn fetch(&self, key: QueryKey) -> Result<MetricsPayload, ApiError> {
        Ok(mock_payload(&self.data, key))
    }

    fn origin(&self, _key: QueryKey) -> &'static str {
        "mock"
    }
}

/// Fetches from the API where an endpoint exists; the rest come from the
/// mock generator.
pub struct RemoteSource {
    client: ApiClient,
    fallback: MockDataService,
}

impl RemoteSource {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            fallback: MockDataService::new(),
        }
    }
}

#[async_trait]
impl MetricsSource for RemoteSource {
    async fn fetch(&self, key: QueryKey) -> Result<MetricsPayload, ApiError> {
        let payload = match key {
            QueryKey::Overview => MetricsPayload::Overview(self.client.overview().await?),
            QueryKey::WorldSimulation => {
                MetricsPayload::World(self.client.world_simulation().await?)
            }
            QueryKey::PlayerMetrics => MetricsPayload::Players(self.client.player_metrics().await?),
            QueryKey::ServerMetrics => MetricsPayload::Server(self.client.server_metrics().await?),
            QueryKey::BattleMetrics => MetricsPayload::Battles(self.client.battle_metrics().await?),
            _ => {
                debug!(key = key.as_str(), "no remote endpoint, using mock data");
                mock_payload(&self.fallback, key)
            }
        };
        Ok(payload)
    }

    fn origin(&self, key: QueryKey) -> &'static str {
        if key.remote_endpoint().is_some() {
            "remote"
        } else {
            "mock (no endpoint)"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::router::{Navigator, Route};
    use crate::server::{DEFAULT_ADMIN_PASSWORD, test_support};
    use crate::session::SessionStore;

    #[tokio::test]
    async fn mock_source_answers_every_key_with_the_matching_variant() {
        let source = MockSource::new(MockDataService::with_seed(3));
        for key in QueryKey::ALL {
            let payload = source.fetch(key).await.unwrap();
            let matches = matches!(
                (key, &payload),
                (QueryKey::Overview, MetricsPayload::Overview(_))
                    | (QueryKey::WorldSimulation, MetricsPayload::World(_))
                    | (QueryKey::PlayerMetrics, MetricsPayload::Players(_))
                    | (QueryKey::ServerMetrics, MetricsPayload::Server(_))
                    | (QueryKey::BattleMetrics, MetricsPayload::Battles(_))
                    | (QueryKey::CityMetrics, MetricsPayload::Cities(_))
                    | (QueryKey::EconomicMetrics, MetricsPayload::Economy(_))
                    | (QueryKey::FactionMetrics, MetricsPayload::Factions(_))
                    | (QueryKey::SimulationPerformance, MetricsPayload::Simulation(_))
            );
            assert!(matches, "{} produced the wrong payload", key.as_str());
        }
    }

    #[tokio::test]
    async fn remote_source_uses_api_and_falls_back_without_endpoint() {
        let (base, handle) = test_support::start().await;
        let config = DashboardConfig {
            base_url: base,
            ..DashboardConfig::default()
        };
        let (navigator, _rx) = Navigator::new(Route::Overview);
        let client = ApiClient::new(&config, SessionStore::in_memory(), navigator).unwrap();
        let source = RemoteSource::new(client.clone());

        let err = source.fetch(QueryKey::Overview).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(source.fetch(QueryKey::CityMetrics).await.is_ok());

        client.sign_in("admin", DEFAULT_ADMIN_PASSWORD).await.unwrap();
        assert!(matches!(
            source.fetch(QueryKey::Overview).await.unwrap(),
            MetricsPayload::Overview(_)
        ));
        assert_eq!(source.origin(QueryKey::Overview), "remote");
        assert_eq!(source.origin(QueryKey::EconomicMetrics), "mock (no endpoint)");
        handle.abort();
    }
}
