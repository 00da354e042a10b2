use rand::Rng;

use super::{CHARACTER_NAMES, FACTION_NAMES, REGIONS, minutes_ago, pick, pick_owned, round_to};
use crate::metrics::{
    BattleRecord, BattleTypeStats, Conflict, ConflictStatus, ConflictType, DamageDistribution,
    DiplomaticEvent, DiplomaticEventType, Faction, FactionMetrics, FactionRelationship,
    FactionType, RelationshipStatus, SkillUsage,
};

const PRIMARY_GOALS: [&str; 4] = [
    "Expand territory",
    "Build wealth",
    "Research technology",
    "Form alliances",
];

const SECONDARY_GOALS: [&str; 4] = [
    "Train army",
    "Establish trade",
    "Explore ruins",
    "Defend borders",
];

const ACTIVITIES: [&str; 6] = [
    "Declared war on rival faction",
    "Signed trade agreement",
    "Discovered ancient ruins",
    "Completed major construction",
    "Recruited new members",
    "Won territorial battle",
];

const BATTLE_TYPES: [&str; 5] = ["PvE", "PvP", "Raid", "Siege", "Skirmish"];

const SKILLS: [&str; 8] = [
    "Fireball",
    "Shield Bash",
    "Frost Nova",
    "Backstab",
    "Chain Lightning",
    "Whirlwind",
    "Holy Smite",
    "Arcane Missile",
];

const MONSTERS: [&str; 6] = [
    "Forest Wolves",
    "Mountain Trolls",
    "Cave Spiders",
    "Undead Warriors",
    "Ice Drakes",
    "Shadow Beasts",
];

pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> FactionMetrics {
    let factions: Vec<Faction> = FACTION_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| Faction {
            id: format!("faction-{i}"),
            name: name.to_string(),
            faction_type: FactionType::ALL[rng.gen_range(0..FactionType::ALL.len())],
            member_count: rng.gen_range(20..=80),
            cities_controlled: rng.gen_range(1..=4),
            regions_controlled: rng.gen_range(1..=3),
            treasury: rng.gen_range(200_000..=800_000),
            military_strength: rng.gen_range(40..=95),
            technology_level: rng.gen_range(30..=85),
            reputation: rng.gen_range(-50..=100),
            active_goals: vec![
                pick_owned(rng, &PRIMARY_GOALS),
                pick_owned(rng, &SECONDARY_GOALS),
            ],
            recent_activity: pick_owned(rng, &ACTIVITIES),
        })
        .collect();

    let relationship_matrix = relationships(rng, &factions);
    let active_conflicts = conflicts(rng);
    let recent_treaties = treaties(rng);

    let total_battles = rng.gen_range(500..=2_000);
    let damage_distribution = damage(rng);

    FactionMetrics {
        total_factions: factions.len() as u32,
        factions,
        active_conflicts,
        recent_treaties,
        relationship_matrix,
        total_battles,
        active_battles: rng.gen_range(5..=30),
        player_victories: (total_battles as f64 * rng.gen_range(0.45..0.75)) as u32,
        average_duration: rng.gen_range(60..=300),
        damage_distribution,
        battles_by_type: BATTLE_TYPES
            .iter()
            .map(|kind| BattleTypeStats {
                battle_type: kind.to_string(),
                count: rng.gen_range(50..=400),
                win_rate: round_to(rng.gen_range(35.0..80.0), 1),
                average_duration: rng.gen_range(60..=300),
            })
            .collect(),
        skill_usage: SKILLS
            .iter()
            .map(|skill| {
                let uses = rng.gen_range(200..=5_000);
                SkillUsage {
                    skill_name: skill.to_string(),
                    uses,
                    usage_count: uses,
                    average_damage: rng.gen_range(50..=600),
                    hit_rate: round_to(rng.gen_range(55.0..98.0), 1),
                }
            })
            .collect(),
        recent_battles: (0..10).map(|i| battle(rng, i)).collect(),
    }
}

/// One entry per unordered faction pair.
fn relationships<R: Rng + ?Sized>(rng: &mut R, factions: &[Faction]) -> Vec<FactionRelationship> {
    let mut matrix = Vec::new();
    for (i, first) in factions.iter().enumerate() {
        for second in &factions[i + 1..] {
            let standing = rng.gen_range(-100..=100);
            let treaties = if standing > 50 {
                vec![pick_owned(rng, &["Trade Agreement", "Non-Aggression Pact"])]
            } else {
                Vec::new()
            };
            matrix.push(FactionRelationship {
                faction1: first.name.clone(),
                faction2: second.name.clone(),
                standing,
                status: RelationshipStatus::from_standing(standing),
                treaties,
            });
        }
    }
    matrix
}

fn conflicts<R: Rng + ?Sized>(rng: &mut R) -> Vec<Conflict> {
    vec![
        Conflict {
            id: "conflict-1".to_string(),
            conflict_type: ConflictType::War,
            factions: vec![
                "Valorian Empire".to_string(),
                "Shadowborn Syndicate".to_string(),
            ],
            start_date: format!(
                "Day {}, Summer, Year {}",
                rng.gen_range(1..=50),
                rng.gen_range(1..=3)
            ),
            status: ConflictStatus::Active,
            casualties: rng.gen_range(50..=200),
            territories_disputed: vec!["Shadowfall".to_string(), "Crystal Plains".to_string()],
            description: "Long-standing territorial dispute over resource-rich regions"
                .to_string(),
        },
        Conflict {
            id: "conflict-2".to_string(),
            conflict_type: ConflictType::Raid,
            factions: vec!["Dragon Clan".to_string(), "Coastal Alliance".to_string()],
            start_date: format!(
                "Day {}, Autumn, Year {}",
                rng.gen_range(1..=30),
                rng.gen_range(2..=4)
            ),
            status: ConflictStatus::Active,
            casualties: rng.gen_range(10..=50),
            territories_disputed: vec!["Dragon's Peak".to_string()],
            description: "Series of raids over disputed mining operations".to_string(),
        },
    ]
}

fn treaties<R: Rng + ?Sized>(rng: &mut R) -> Vec<DiplomaticEvent> {
    vec![
        DiplomaticEvent {
            id: "treaty-1".to_string(),
            event_type: DiplomaticEventType::TradeAgreement,
            factions: vec!["Merchant's Guild".to_string(), "Coastal Alliance".to_string()],
            date: format!(
                "Day {}, Spring, Year {}",
                rng.gen_range(1..=20),
                rng.gen_range(3..=5)
            ),
            description: "Mutual trade benefits and reduced tariffs".to_string(),
        },
        DiplomaticEvent {
            id: "treaty-2".to_string(),
            event_type: DiplomaticEventType::Alliance,
            factions: vec!["Crystal Order".to_string(), "Iron Brotherhood".to_string()],
            date: format!(
                "Day {}, Summer, Year {}",
                rng.gen_range(1..=40),
                rng.gen_range(2..=4)
            ),
            description: "Military and economic alliance for mutual defense".to_string(),
        },
    ]
}

fn damage<R: Rng + ?Sized>(rng: &mut R) -> DamageDistribution {
    let physical = rng.gen_range(200_000..=900_000);
    let magical = rng.gen_range(150_000..=700_000);
    let elemental = rng.gen_range(100_000..=500_000);
    let true_damage = rng.gen_range(10_000..=80_000);
    DamageDistribution {
        physical,
        magical,
        elemental,
        true_damage,
        total: physical + magical + elemental + true_damage,
    }
}

fn battle<R: Rng + ?Sized>(rng: &mut R, index: usize) -> BattleRecord {
    let hero = pick(rng, &CHARACTER_NAMES).to_string();
    let foe = pick(rng, &MONSTERS).to_string();
    let hero_won = rng.gen_bool(0.6);
    BattleRecord {
        id: format!("battle-{index}"),
        battle_type: pick_owned(rng, &BATTLE_TYPES),
        winner: if hero_won { hero.clone() } else { foe.clone() },
        outcome: if hero_won { "victory" } else { "defeat" }.to_string(),
        participants: vec![hero, foe],
        location: pick_owned(rng, &REGIONS),
        duration: rng.gen_range(30..=600),
        total_damage: rng.gen_range(1_000..=50_000),
        timestamp: minutes_ago(rng.gen_range(1..=240)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::test_support::for_many_seeds;

    #[test]
    fn faction_values_stay_in_range() {
        for_many_seeds(|rng| {
            let metrics = generate(rng);
            assert_eq!(metrics.total_factions, 7);
            for f in &metrics.factions {
                assert!((20..=80).contains(&f.member_count));
                assert!((40..=95).contains(&f.military_strength));
                assert!((30..=85).contains(&f.technology_level));
                assert!((-50..=100).contains(&f.reputation));
                assert_eq!(f.active_goals.len(), 2);
            }
        });
    }

    #[test]
    fn matrix_covers_each_pair_once() {
        for_many_seeds(|rng| {
            let metrics = generate(rng);
            assert_eq!(metrics.relationship_matrix.len(), 7 * 6 / 2);
            for rel in &metrics.relationship_matrix {
                assert_ne!(rel.faction1, rel.faction2);
                assert!((-100..=100).contains(&rel.standing));
                assert_eq!(rel.status, RelationshipStatus::from_standing(rel.standing));
                if rel.standing <= 50 {
                    assert!(rel.treaties.is_empty());
                } else {
                    assert_eq!(rel.treaties.len(), 1);
                }
            }
        });
    }

    #[test]
    fn battle_statistics_are_consistent() {
        for_many_seeds(|rng| {
            let metrics = generate(rng);
            assert!(metrics.player_victories <= metrics.total_battles);
            let d = &metrics.damage_distribution;
            assert_eq!(d.total, d.physical + d.magical + d.elemental + d.true_damage);
            assert_eq!(metrics.recent_battles.len(), 10);
            for battle in &metrics.recent_battles {
                assert!(battle.participants.contains(&battle.winner));
            }
        });
    }
}
