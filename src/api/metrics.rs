use super::client::ApiClient;
use super::error::Result;
use crate::metrics::{
    BattleMetrics, OverviewMetrics, PlayerMetrics, ServerMetrics, WorldSimulationMetrics,
};

pub const OVERVIEW: &str = "/metrics/overview";
pub const WORLD: &str = "/metrics/world";
pub const PLAYERS: &str = "/metrics/players";
pub const SERVER: &str = "/metrics/server";
pub const BATTLES: &str = "/metrics/battles";

impl ApiClient {
    pub async fn overview(&self) -> Result<OverviewMetrics> {
        self.get_json(OVERVIEW).await
    }

    pub async fn world_simulation(&self) -> Result<WorldSimulationMetrics> {
        self.get_json(WORLD).await
    }

    pub async fn player_metrics(&self) -> Result<PlayerMetrics> {
        self.get_json(PLAYERS).await
    }

    pub async fn server_metrics(&self) -> Result<ServerMetrics> {
        self.get_json(SERVER).await
    }

    pub async fn battle_metrics(&self) -> Result<BattleMetrics> {
        self.get_json(BATTLES).await
    }
}
