use chrono::{Duration, Timelike, Utc};
use rand::Rng;

use super::{
    CHARACTER_NAMES, CITY_NAMES, FACTION_NAMES, PROFESSIONS, REGIONS, minutes_ago, pick,
    pick_owned, round_to,
};
use crate::metrics::{
    CharacterMetrics, HourlyActivity, LevelDistribution, PlayerSession, ProfessionDistribution,
    QuestActivity, QuestGiver, ReputationLeader, TopCharacter, TopPlayer, TypeCount,
    WealthBracket,
};

const LEVEL_RANGES: [&str; 5] = ["1-20", "21-40", "41-60", "61-80", "81-100"];

const WEALTH_BRACKETS: [(&str, u64); 5] = [
    ("0-1K", 500),
    ("1K-10K", 5_000),
    ("10K-50K", 25_000),
    ("50K-100K", 75_000),
    ("100K+", 150_000),
];

const ACTIVITIES: [&str; 6] = [
    "Completed legendary quest",
    "Crafted rare weapon",
    "Defeated world boss",
    "Opened new trade route",
    "Discovered hidden dungeon",
    "Won arena tournament",
];

const TITLES: [&str; 5] = [
    "Hero of the Realm",
    "Champion of Light",
    "Master Artisan",
    "Merchant Prince",
    "Dragon Slayer",
];

const KNOWN_FOR: [&str; 5] = [
    "Defending cities from monster raids",
    "Brokering peace between factions",
    "Forging legendary equipment",
    "Building trade empires",
    "Slaying ancient dragons",
];

const QUEST_TYPES: [&str; 5] = ["Combat", "Gathering", "Delivery", "Exploration", "Escort"];

pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> CharacterMetrics {
    let mut top_characters: Vec<TopCharacter> = CHARACTER_NAMES
        .iter()
        .map(|name| TopCharacter {
            name: name.to_string(),
            level: rng.gen_range(40..=100),
            profession: pick_owned(rng, &PROFESSIONS),
            faction: pick_owned(rng, &FACTION_NAMES),
            wealth: rng.gen_range(5_000..=100_000),
            reputation: rng.gen_range(20..=100),
            location: pick_owned(rng, &CITY_NAMES),
            recent_activity: pick_owned(rng, &ACTIVITIES),
        })
        .collect();
    top_characters.sort_by(|a, b| b.level.cmp(&a.level));

    let mut by_reputation: Vec<&TopCharacter> = top_characters.iter().collect();
    by_reputation.sort_by(|a, b| b.reputation.cmp(&a.reputation));
    let reputation_leaders = by_reputation
        .iter()
        .take(5)
        .enumerate()
        .map(|(i, c)| ReputationLeader {
            name: c.name.clone(),
            faction: c.faction.clone(),
            reputation: c.reputation,
            title: TITLES[i].to_string(),
            known_for: KNOWN_FOR[i].to_string(),
        })
        .collect();

    let level_counts: Vec<u32> = LEVEL_RANGES.iter().map(|_| rng.gen_range(20..=150)).collect();
    let total_characters: u32 = level_counts.iter().sum();
    let characters_by_level = LEVEL_RANGES
        .iter()
        .zip(&level_counts)
        .map(|(range, &count)| LevelDistribution {
            level_range: range.to_string(),
            count,
            percentage: share(count, total_characters),
        })
        .collect();

    let profession_counts: Vec<u32> = PROFESSIONS.iter().map(|_| rng.gen_range(10..=80)).collect();
    let profession_total: u32 = profession_counts.iter().sum();
    let characters_by_profession = PROFESSIONS
        .iter()
        .zip(&profession_counts)
        .map(|(profession, &count)| ProfessionDistribution {
            profession: profession.to_string(),
            count,
            percentage: share(count, profession_total),
            average_level: rng.gen_range(15..=70),
        })
        .collect();

    let bracket_counts: Vec<u32> = WEALTH_BRACKETS.iter().map(|_| rng.gen_range(10..=200)).collect();
    let bracket_total: u32 = bracket_counts.iter().sum();
    let wealth_distribution = WEALTH_BRACKETS
        .iter()
        .zip(&bracket_counts)
        .map(|((bracket, typical), &count)| WealthBracket {
            bracket: bracket.to_string(),
            count,
            percentage: share(count, bracket_total),
            total_wealth: typical * count as u64,
        })
        .collect();

    let quest_activity = QuestActivity {
        active_quests: rng.gen_range(100..=400),
        completed_today: rng.gen_range(50..=200),
        failed_today: rng.gen_range(5..=40),
        average_completion_time: rng.gen_range(200..=1_200),
        quests_by_type: QUEST_TYPES
            .iter()
            .map(|kind| TypeCount {
                kind: kind.to_string(),
                count: rng.gen_range(10..=120),
            })
            .collect(),
        top_quest_givers: CITY_NAMES[..3]
            .iter()
            .chain(FACTION_NAMES[..2].iter())
            .map(|entity| QuestGiver {
                entity: entity.to_string(),
                quests_generated: rng.gen_range(20..=150),
            })
            .collect(),
    };

    let active_players = rng.gen_range(50..=500);
    let top_players = top_characters
        .iter()
        .take(10)
        .map(|c| TopPlayer {
            username: username(&c.name),
            character_name: c.name.clone(),
            level: c.level,
            playtime: rng.gen_range(50..=2_000),
            achievements: rng.gen_range(10..=250),
            last_seen: minutes_ago(rng.gen_range(1..=720)),
        })
        .collect();

    CharacterMetrics {
        total_characters,
        characters_by_level,
        characters_by_profession,
        top_characters,
        reputation_leaders,
        wealth_distribution,
        quest_activity,
        active_players,
        total_sessions: active_players + rng.gen_range(0..=2_000),
        new_players: rng.gen_range(5..=50),
        average_session_duration: rng.gen_range(15..=120),
        top_players,
        activity_by_hour: hourly_activity(rng),
        recent_sessions: (0..15).map(|i| session(rng, i)).collect(),
    }
}

fn share(count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(count as f64 / total as f64 * 100.0, 1)
}

fn username(character: &str) -> String {
    character
        .split_whitespace()
        .next()
        .unwrap_or(character)
        .to_lowercase()
}

/// Oldest first, one point per hour ending at the current hour.
fn hourly_activity<R: Rng + ?Sized>(rng: &mut R) -> Vec<HourlyActivity> {
    let now = Utc::now();
    (0..24)
        .rev()
        .map(|hours_back| {
            let at = now - Duration::hours(hours_back);
            HourlyActivity {
                hour: format!("{:02}:00", at.hour()),
                timestamp: at.to_rfc3339(),
                active_players: rng.gen_range(20..=300),
                new_sessions: rng.gen_range(5..=60),
            }
        })
        .collect()
}

fn session<R: Rng + ?Sized>(rng: &mut R, index: usize) -> PlayerSession {
    let character = pick(rng, &CHARACTER_NAMES);
    let online = rng.gen_bool(0.6);
    PlayerSession {
        id: format!("session-{index}"),
        username: username(character),
        character: character.to_string(),
        character_name: character.to_string(),
        level: rng.gen_range(1..=100),
        region: pick_owned(rng, &REGIONS),
        login_time: minutes_ago(rng.gen_range(5..=480)),
        duration: rng.gen_range(5..=240),
        actions: rng.gen_range(10..=900),
        status: if online { "online" } else { "offline" }.to_string(),
    }
}
