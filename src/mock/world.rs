use rand::Rng;

use super::{CITY_NAMES, REGIONS, minutes_ago, round_to};
use crate::metrics::{
    DisasterStats, Discovery, DiscoveryType, EncounterOutcome, EventTypeCount, MonsterActivity,
    MonsterEncounter, Severity, SpawnTrend, TrendDirection, TypeCount, WorldDate, WorldEvent,
    WorldEventType, WorldSimulationMetrics, WorldState,
};

pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> WorldSimulationMetrics {
    let day = rng.gen_range(1..=365);
    let year = rng.gen_range(1..=5);

    let world_state = WorldState {
        current_date: WorldDate::from_day(day, year),
        total_population: rng.gen_range(45_000..=60_000),
        active_regions: rng.gen_range(6..=8),
        economic_stability: rng.gen_range(60..=85),
        overall_prosperity: rng.gen_range(55..=80),
        threat_level: rng.gen_range(30..=70),
        technology_progress: rng.gen_range(40..=75),
    };

    let events_by_type = WorldEventType::ALL
        .iter()
        .map(|kind| EventTypeCount {
            event_type: kind.key().to_string(),
            count: rng.gen_range(5..=50),
            last24h: rng.gen_range(0..=5),
            last7d: rng.gen_range(5..=30),
        })
        .collect();

    let affected = rng.gen_range(2..=5);
    let disaster_impact = DisasterStats {
        total_disasters: rng.gen_range(10..=50),
        disasters_by_type: vec![
            type_count("Earthquake", rng.gen_range(2..=10)),
            type_count("Flood", rng.gen_range(1..=8)),
            type_count("Drought", rng.gen_range(3..=12)),
            type_count("Plague", rng.gen_range(1..=5)),
        ],
        population_lost: rng.gen_range(100..=1_000),
        economic_damage: rng.gen_range(50_000..=500_000),
        cities_affected: CITY_NAMES[..affected].iter().map(|c| c.to_string()).collect(),
    };

    let discoveries = vec![
        Discovery {
            id: "discovery-1".to_string(),
            discovery_type: DiscoveryType::Ruins,
            name: "Ancient Titan Temple".to_string(),
            location: "Mystic Woods".to_string(),
            discovered_by: "Zephyr Stormcaller".to_string(),
            timestamp: minutes_ago(120),
            value: rng.gen_range(50_000..=200_000),
            description: "Massive temple complex with essence crystal deposits".to_string(),
        },
        Discovery {
            id: "discovery-2".to_string(),
            discovery_type: DiscoveryType::ResourceNode,
            name: "Rich Gold Vein".to_string(),
            location: "Ironforge Mountains".to_string(),
            discovered_by: "Iron Brotherhood".to_string(),
            timestamp: minutes_ago(1_440),
            value: rng.gen_range(100_000..=300_000),
            description: "Highly productive gold mining location".to_string(),
        },
    ];

    let monster_activity = MonsterActivity {
        total_monsters: rng.gen_range(500..=2_000),
        active_spawns: rng.gen_range(50..=200),
        dangerous_regions: REGIONS
            .iter()
            .filter(|_| rng.gen_bool(0.5))
            .map(|r| r.to_string())
            .collect(),
        recent_encounters: encounters(),
        spawning_trends: REGIONS
            .iter()
            .map(|region| SpawnTrend {
                region: region.to_string(),
                spawn_rate: round_to(rng.gen_range(10.0..100.0), 1),
                average_threat: round_to(rng.gen_range(3.0..8.0), 1),
                trend: TrendDirection::ALL[rng.gen_range(0..TrendDirection::ALL.len())],
            })
            .collect(),
    };

    WorldSimulationMetrics {
        world_state,
        recent_events: recent_events(),
        events_by_type,
        disaster_impact,
        discoveries,
        monster_activity,
    }
}

fn type_count(kind: &str, count: u32) -> TypeCount {
    TypeCount {
        kind: kind.to_string(),
        count,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

struct EventSeed {
    kind: WorldEventType,
    severity: Severity,
    title: &'static str,
    description: &'static str,
    location: &'static str,
    hours_ago: i64,
    affected: &'static [&'static str],
    impact: &'static str,
}

const EVENT_SEEDS: [EventSeed; 6] = [
    EventSeed {
        kind: WorldEventType::Disaster,
        severity: Severity::High,
        title: "Earthquake Strikes Crystal Plains",
        description: "A massive earthquake has damaged infrastructure and disrupted mining operations",
        location: "Crystal Plains",
        hours_ago: 1,
        affected: &["Crystalholm", "Crystal Order"],
        impact: "Mining production reduced by 40% for next 7 days",
    },
    EventSeed {
        kind: WorldEventType::Discovery,
        severity: Severity::Medium,
        title: "Ancient Ruins Discovered",
        description: "Explorers have uncovered ancient Titan ruins in the Mystic Woods",
        location: "Mystic Woods",
        hours_ago: 2,
        affected: &["Woodhaven", "Dragon Clan"],
        impact: "New essence crystal deposits available for mining",
    },
    EventSeed {
        kind: WorldEventType::Political,
        severity: Severity::Critical,
        title: "War Declared",
        description: "Shadowborn Syndicate has officially declared war on Valorian Empire",
        location: "Shadowfall",
        hours_ago: 3,
        affected: &[
            "Shadowfall City",
            "Lithmere",
            "Shadowborn Syndicate",
            "Valorian Empire",
        ],
        impact: "Trade routes disrupted, military mobilization in progress",
    },
    EventSeed {
        kind: WorldEventType::Economic,
        severity: Severity::High,
        title: "Food Prices Spike",
        description: "Crop failure in Desert Wastes causes food prices to surge",
        location: "Desert Wastes",
        hours_ago: 4,
        affected: &["Oasis", "Merchant's Guild"],
        impact: "Food prices increased by 60%, cities scrambling for supplies",
    },
    EventSeed {
        kind: WorldEventType::MonsterSpawn,
        severity: Severity::Medium,
        title: "Dragon Sighted Near Peak",
        description: "A powerful ice dragon has been spotted near Dragonwatch",
        location: "Dragon's Peak",
        hours_ago: 5,
        affected: &["Dragonwatch", "Dragon Clan"],
        impact: "Travel to region extremely dangerous, high-level threats active",
    },
    EventSeed {
        kind: WorldEventType::Technology,
        severity: Severity::Low,
        title: "New Forging Technique Developed",
        description: "Iron Brotherhood discovers advanced metalworking methods",
        location: "Ironforge Mountains",
        hours_ago: 6,
        affected: &["Ironforge", "Iron Brotherhood"],
        impact: "Equipment quality improved by 15% for faction members",
    },
];

fn recent_events() -> Vec<WorldEvent> {
    EVENT_SEEDS
        .iter()
        .enumerate()
        .map(|(i, seed)| WorldEvent {
            id: format!("event-{}", i + 1),
            event_type: seed.kind,
            severity: seed.severity,
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            location: seed.location.to_string(),
            timestamp: minutes_ago(seed.hours_ago * 60),
            affected_entities: strings(seed.affected),
            impact: seed.impact.to_string(),
        })
        .collect()
}

fn encounters() -> Vec<MonsterEncounter> {
    vec![
        MonsterEncounter {
            id: "encounter-1".to_string(),
            monster_type: "Ice Drake".to_string(),
            location: "Dragon's Peak".to_string(),
            threat_level: 9,
            outcome: EncounterOutcome::Ongoing,
            participants: strings(&["Drake Emberforge", "Magnus Steelheart"]),
            timestamp: minutes_ago(30),
        },
        MonsterEncounter {
            id: "encounter-2".to_string(),
            monster_type: "Shadow Beasts".to_string(),
            location: "Shadowfall".to_string(),
            threat_level: 6,
            outcome: EncounterOutcome::Defeated,
            participants: strings(&["Raven Nightblade", "Lyra Shadowstep"]),
            timestamp: minutes_ago(90),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::test_support::for_many_seeds;

    #[test]
    fn world_state_stays_in_range() {
        for_many_seeds(|rng| {
            let state = generate(rng).world_state;
            assert!((45_000..=60_000).contains(&state.total_population));
            assert!((6..=8).contains(&state.active_regions));
            assert!((60..=85).contains(&state.economic_stability));
            assert!((55..=80).contains(&state.overall_prosperity));
            assert!((30..=70).contains(&state.threat_level));
            assert!((40..=75).contains(&state.technology_progress));
        });
    }

    #[test]
    fn every_event_type_is_counted() {
        for_many_seeds(|rng| {
            let metrics = generate(rng);
            assert_eq!(metrics.events_by_type.len(), WorldEventType::ALL.len());
            for row in &metrics.events_by_type {
                assert!((5..=50).contains(&row.count));
                assert!(row.last24h <= 5);
            }
        });
    }

    #[test]
    fn monster_activity_references_known_regions() {
        for_many_seeds(|rng| {
            let activity = generate(rng).monster_activity;
            assert!(activity.dangerous_regions.len() <= REGIONS.len());
            for region in &activity.dangerous_regions {
                assert!(REGIONS.contains(&region.as_str()));
            }
            for trend in &activity.spawning_trends {
                assert!((10.0..=100.0).contains(&trend.spawn_rate));
                assert!((3.0..=8.0).contains(&trend.average_threat));
            }
        });
    }

    #[test]
    fn fixed_events_are_newest_first() {
        let events = recent_events();
        assert_eq!(events.len(), 6);
        for pair in events.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }
}
