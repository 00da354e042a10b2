//! Character (NPC) analytics plus player activity; the players page reads this payload.

use serde::{Deserialize, Serialize};

use super::world::TypeCount;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CharacterMetrics {
    pub total_characters: u32,
    pub characters_by_level: Vec<LevelDistribution>,
    pub characters_by_profession: Vec<ProfessionDistribution>,
    pub top_characters: Vec<TopCharacter>,
    pub reputation_leaders: Vec<ReputationLeader>,
    pub wealth_distribution: Vec<WealthBracket>,
    pub quest_activity: QuestActivity,
    #[serde(default)]
    pub active_players: u32,
    #[serde(default)]
    pub total_sessions: u32,
    #[serde(default)]
    pub new_players: u32,
    /// Minutes.
    #[serde(default)]
    pub average_session_duration: u32,
    #[serde(default)]
    pub top_players: Vec<TopPlayer>,
    #[serde(default)]
    pub activity_by_hour: Vec<HourlyActivity>,
    #[serde(default)]
    pub recent_sessions: Vec<PlayerSession>,
}

pub type PlayerMetrics = CharacterMetrics;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LevelDistribution {
    /// e.g. "1-20"
    pub level_range: String,
    pub count: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionDistribution {
    pub profession: String,
    pub count: u32,
    pub percentage: f64,
    pub average_level: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopCharacter {
    pub name: String,
    pub level: u32,
    pub profession: String,
    pub faction: String,
    pub wealth: u64,
    pub reputation: i32,
    pub location: String,
    pub recent_activity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReputationLeader {
    pub name: String,
    pub faction: String,
    pub reputation: i32,
    /// Earned title.
    pub title: String,
    pub known_for: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WealthBracket {
    /// e.g. "1K-10K"
    pub bracket: String,
    pub count: u32,
    pub percentage: f64,
    pub total_wealth: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestActivity {
    pub active_quests: u32,
    pub completed_today: u32,
    pub failed_today: u32,
    /// Ticks.
    pub average_completion_time: u32,
    pub quests_by_type: Vec<TypeCount>,
    pub top_quest_givers: Vec<QuestGiver>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestGiver {
    /// City or faction.
    pub entity: String,
    pub quests_generated: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopPlayer {
    pub username: String,
    pub character_name: String,
    pub level: u32,
    /// Hours.
    pub playtime: u32,
    pub achievements: u32,
    pub last_seen: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HourlyActivity {
    pub hour: String,
    pub timestamp: String,
    pub active_players: u32,
    pub new_sessions: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSession {
    pub id: String,
    pub username: String,
    pub character: String,
    pub character_name: String,
    pub level: u32,
    pub region: String,
    pub login_time: String,
    /// Minutes.
    pub duration: u32,
    pub actions: u32,
    pub status: String,
}
