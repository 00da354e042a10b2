//! Simulation tick health and API server statistics; the server page reads this payload.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationPerformance {
    pub tick_rate: TickRate,
    pub entity_counts: EntityCounts,
    pub system_load: SystemLoad,
    pub performance_metrics: PerformanceMetrics,
    pub bottlenecks: Vec<Bottleneck>,
    #[serde(default)]
    pub total_requests: u64,
    #[serde(default)]
    pub successful_requests: u64,
    #[serde(default)]
    pub failed_requests: u64,
    /// Percentage.
    #[serde(default)]
    pub error_rate: f64,
    #[serde(default)]
    pub response_times: ResponseTimes,
    /// Seconds.
    #[serde(default)]
    pub uptime: u64,
    #[serde(default)]
    pub requests_over_time: Vec<RequestSample>,
    #[serde(default)]
    pub requests_by_endpoint: Vec<EndpointStats>,
    #[serde(default)]
    pub server_health: ServerHealth,
    #[serde(default)]
    pub errors_by_type: Vec<ErrorTypeStats>,
}

pub type ServerMetrics = SimulationPerformance;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TickRate {
    /// Ticks per second.
    pub current: f64,
    pub target: f64,
    pub average_last60s: f64,
    /// 0-100
    pub stability: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntityCounts {
    pub cities: u32,
    pub factions: u32,
    pub characters: u32,
    pub quests: u32,
    pub trade_routes: u32,
    pub monsters: u32,
    pub total: u32,
}

/// Percentage of tick time spent per subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemLoad {
    pub pathfinding: f64,
    pub economy: f64,
    pub combat: f64,
    pub quest_generation: f64,
    pub ai: f64,
    pub overall: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    /// Milliseconds.
    pub avg_tick_duration: f64,
    pub max_tick_duration: f64,
    pub fps: u32,
    /// MB.
    pub memory_usage: u32,
    /// In-game days elapsed.
    pub simulated_time: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BottleneckSeverity {
    Low,
    Medium,
    High,
}

impl BottleneckSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            BottleneckSeverity::Low => "low",
            BottleneckSeverity::Medium => "medium",
            BottleneckSeverity::High => "high",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bottleneck {
    pub system: String,
    pub severity: BottleneckSeverity,
    pub impact: String,
    pub recommendation: String,
}

/// Milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseTimes {
    pub avg: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestSample {
    pub timestamp: String,
    pub requests: u32,
    pub errors: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EndpointStats {
    pub endpoint: String,
    pub count: u32,
    pub requests: u32,
    pub avg_response_time: f64,
    pub error_rate: f64,
}

/// Utilisation percentages.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerHealth {
    pub cpu: u32,
    pub memory: u32,
    pub disk: u32,
    pub network: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorTypeStats {
    #[serde(rename = "type")]
    pub error_type: String,
    pub count: u32,
    pub percentage: f64,
    pub last_occurrence: String,
}
