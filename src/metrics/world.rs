use serde::{Deserialize, Serialize};

use super::overview::WorldDate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorldSimulationMetrics {
    pub world_state: WorldState,
    pub recent_events: Vec<WorldEvent>,
    pub events_by_type: Vec<EventTypeCount>,
    pub disaster_impact: DisasterStats,
    pub discoveries: Vec<Discovery>,
    pub monster_activity: MonsterActivity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorldState {
    pub current_date: WorldDate,
    pub total_population: u64,
    pub active_regions: u32,
    /// 0-100
    pub economic_stability: u32,
    /// 0-100
    pub overall_prosperity: u32,
    /// 0-100, monster and danger pressure.
    pub threat_level: u32,
    /// 0-100, averaged across factions.
    pub technology_progress: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorldEventType {
    Disaster,
    Discovery,
    Political,
    Economic,
    MonsterSpawn,
    Technology,
}

impl WorldEventType {
    pub const ALL: [WorldEventType; 6] = [
        WorldEventType::Disaster,
        WorldEventType::Discovery,
        WorldEventType::Political,
        WorldEventType::Economic,
        WorldEventType::MonsterSpawn,
        WorldEventType::Technology,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            WorldEventType::Disaster => "disaster",
            WorldEventType::Discovery => "discovery",
            WorldEventType::Political => "political",
            WorldEventType::Economic => "economic",
            WorldEventType::MonsterSpawn => "monster_spawn",
            WorldEventType::Technology => "technology",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorldEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: WorldEventType,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    /// City or region.
    pub location: String,
    pub timestamp: String,
    /// Cities, factions, or characters touched by the event.
    pub affected_entities: Vec<String>,
    pub impact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeCount {
    #[serde(rename = "type")]
    pub event_type: String,
    pub count: u32,
    pub last24h: u32,
    pub last7d: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisasterStats {
    pub total_disasters: u32,
    pub disasters_by_type: Vec<TypeCount>,
    pub population_lost: u32,
    /// Gold value.
    pub economic_damage: u64,
    pub cities_affected: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryType {
    Ruins,
    ResourceNode,
    Technology,
    Artifact,
    Location,
}

impl DiscoveryType {
    pub fn label(&self) -> &'static str {
        match self {
            DiscoveryType::Ruins => "ruins",
            DiscoveryType::ResourceNode => "resource node",
            DiscoveryType::Technology => "technology",
            DiscoveryType::Artifact => "artifact",
            DiscoveryType::Location => "location",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Discovery {
    pub id: String,
    #[serde(rename = "type")]
    pub discovery_type: DiscoveryType,
    pub name: String,
    pub location: String,
    /// Character or faction.
    pub discovered_by: String,
    pub timestamp: String,
    /// Economic or strategic value.
    pub value: u64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonsterActivity {
    pub total_monsters: u32,
    pub active_spawns: u32,
    pub dangerous_regions: Vec<String>,
    pub recent_encounters: Vec<MonsterEncounter>,
    pub spawning_trends: Vec<SpawnTrend>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EncounterOutcome {
    Ongoing,
    Defeated,
    Fled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonsterEncounter {
    pub id: String,
    pub monster_type: String,
    pub location: String,
    /// 1-10
    pub threat_level: u8,
    pub outcome: EncounterOutcome,
    pub participants: Vec<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub const ALL: [TrendDirection; 3] = [
        TrendDirection::Increasing,
        TrendDirection::Decreasing,
        TrendDirection::Stable,
    ];

    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "↑",
            TrendDirection::Decreasing => "↓",
            TrendDirection::Stable => "→",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpawnTrend {
    pub region: String,
    /// Monsters per day.
    pub spawn_rate: f64,
    pub average_threat: f64,
    pub trend: TrendDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_tags_match_wire_names() {
        for kind in WorldEventType::ALL {
            let value = serde_json::to_value(kind).expect("serializes");
            assert_eq!(value, kind.key());
        }
    }

    #[test]
    fn severity_orders_from_low_to_critical() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::High < Severity::Critical);
    }
}
