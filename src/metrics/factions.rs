//! Faction, diplomacy, and battle statistics. The battles page reads the same payload.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FactionMetrics {
    pub factions: Vec<Faction>,
    pub total_factions: u32,
    pub active_conflicts: Vec<Conflict>,
    pub recent_treaties: Vec<DiplomaticEvent>,
    pub relationship_matrix: Vec<FactionRelationship>,
    #[serde(default)]
    pub total_battles: u32,
    #[serde(default)]
    pub active_battles: u32,
    #[serde(default)]
    pub player_victories: u32,
    /// Seconds.
    #[serde(default)]
    pub average_duration: u32,
    #[serde(default)]
    pub damage_distribution: DamageDistribution,
    #[serde(default)]
    pub battles_by_type: Vec<BattleTypeStats>,
    #[serde(default)]
    pub skill_usage: Vec<SkillUsage>,
    #[serde(default)]
    pub recent_battles: Vec<BattleRecord>,
}

pub type BattleMetrics = FactionMetrics;

impl FactionMetrics {
    pub fn win_rate(&self) -> f64 {
        if self.total_battles == 0 {
            return 0.0;
        }
        self.player_victories as f64 / self.total_battles as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FactionType {
    Empire,
    Guild,
    Syndicate,
    Clan,
    Order,
}

impl FactionType {
    pub const ALL: [FactionType; 5] = [
        FactionType::Empire,
        FactionType::Guild,
        FactionType::Syndicate,
        FactionType::Clan,
        FactionType::Order,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FactionType::Empire => "empire",
            FactionType::Guild => "guild",
            FactionType::Syndicate => "syndicate",
            FactionType::Clan => "clan",
            FactionType::Order => "order",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Faction {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub faction_type: FactionType,
    pub member_count: u32,
    pub cities_controlled: u32,
    pub regions_controlled: u32,
    pub treasury: u64,
    /// 0-100
    pub military_strength: u32,
    /// 0-100
    pub technology_level: u32,
    /// -100 to 100
    pub reputation: i32,
    pub active_goals: Vec<String>,
    pub recent_activity: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    War,
    Raid,
    Skirmish,
    TerritorialDispute,
}

impl ConflictType {
    pub fn label(&self) -> &'static str {
        match self {
            ConflictType::War => "war",
            ConflictType::Raid => "raid",
            ConflictType::Skirmish => "skirmish",
            ConflictType::TerritorialDispute => "territorial dispute",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConflictStatus {
    Active,
    Ceasefire,
    Concluded,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub id: String,
    #[serde(rename = "type")]
    pub conflict_type: ConflictType,
    pub factions: Vec<String>,
    pub start_date: String,
    pub status: ConflictStatus,
    pub casualties: u32,
    pub territories_disputed: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiplomaticEventType {
    Treaty,
    Alliance,
    TradeAgreement,
    Peace,
    DeclarationOfWar,
}

impl DiplomaticEventType {
    pub fn label(&self) -> &'static str {
        match self {
            DiplomaticEventType::Treaty => "treaty",
            DiplomaticEventType::Alliance => "alliance",
            DiplomaticEventType::TradeAgreement => "trade agreement",
            DiplomaticEventType::Peace => "peace",
            DiplomaticEventType::DeclarationOfWar => "declaration of war",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiplomaticEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: DiplomaticEventType,
    pub factions: Vec<String>,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStatus {
    Allied,
    Friendly,
    Neutral,
    Tense,
    Hostile,
    AtWar,
}

impl RelationshipStatus {
    pub fn from_standing(standing: i32) -> Self {
        if standing > 70 {
            RelationshipStatus::Allied
        } else if standing > 30 {
            RelationshipStatus::Friendly
        } else if standing > -30 {
            RelationshipStatus::Neutral
        } else if standing > -70 {
            RelationshipStatus::Tense
        } else {
            RelationshipStatus::Hostile
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RelationshipStatus::Allied => "allied",
            RelationshipStatus::Friendly => "friendly",
            RelationshipStatus::Neutral => "neutral",
            RelationshipStatus::Tense => "tense",
            RelationshipStatus::Hostile => "hostile",
            RelationshipStatus::AtWar => "at war",
        }
    }
}

/// Faction names here are free text and are not checked against `FactionMetrics::factions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FactionRelationship {
    pub faction1: String,
    pub faction2: String,
    /// -100 (hostile) to 100 (allied)
    pub standing: i32,
    pub status: RelationshipStatus,
    pub treaties: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DamageDistribution {
    pub physical: u64,
    pub magical: u64,
    pub elemental: u64,
    #[serde(rename = "true")]
    pub true_damage: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BattleTypeStats {
    #[serde(rename = "type")]
    pub battle_type: String,
    pub count: u32,
    pub win_rate: f64,
    pub average_duration: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkillUsage {
    pub skill_name: String,
    pub uses: u32,
    pub usage_count: u32,
    pub average_damage: u32,
    pub hit_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BattleRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub battle_type: String,
    pub participants: Vec<String>,
    pub winner: String,
    pub location: String,
    pub outcome: String,
    pub duration: u32,
    pub total_damage: u64,
    pub timestamp: String,
}
