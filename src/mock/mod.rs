//! Randomized metrics fixtures used when no metrics backend is wired up.
//!
//! Every call is independent: values are drawn uniformly from hand-picked
//! ranges and names come from the fixed lists below. Nothing is carried
//! between calls.

use std::sync::Mutex;

use chrono::{Duration, SecondsFormat, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::metrics::{
    BattleMetrics, CharacterMetrics, CityMetrics, EconomicMetrics, FactionMetrics,
    OverviewMetrics, PlayerMetrics, ServerMetrics, SimulationPerformance,
    WorldSimulationMetrics,
};

pub mod characters;
pub mod cities;
pub mod economy;
pub mod factions;
pub mod overview;
pub mod performance;
pub mod world;

pub const REGIONS: [&str; 8] = [
    "Titan's Rest",
    "Shadowfall",
    "Crystal Plains",
    "Ironforge Mountains",
    "Mystic Woods",
    "Dragon's Peak",
    "Coastal Haven",
    "Desert Wastes",
];

pub const CITY_NAMES: [&str; 12] = [
    "Lithmere",
    "Vothaven",
    "Ironforge",
    "Shadowfall City",
    "Crystalholm",
    "Dragonwatch",
    "Seaport",
    "Oasis",
    "Stonehelm",
    "Woodhaven",
    "Peakfort",
    "Haven's Rest",
];

pub const FACTION_NAMES: [&str; 7] = [
    "Valorian Empire",
    "Shadowborn Syndicate",
    "Merchant's Guild",
    "Crystal Order",
    "Iron Brotherhood",
    "Dragon Clan",
    "Coastal Alliance",
];

pub const CHARACTER_NAMES: [&str; 12] = [
    "Thorin Ironforge",
    "Lyra Shadowstep",
    "Zephyr Stormcaller",
    "Kael Fireborn",
    "Aria Moonwhisper",
    "Magnus Steelheart",
    "Selene Frostweaver",
    "Raven Nightblade",
    "Drake Emberforge",
    "Luna Starlight",
    "Garrick Stonefist",
    "Iris Meadowbrook",
];

pub const PROFESSIONS: [&str; 10] = [
    "Miner",
    "Blacksmith",
    "Merchant",
    "Hunter",
    "Alchemist",
    "Enchanter",
    "Warrior",
    "Scout",
    "Builder",
    "Trader",
];

pub const RESOURCES: [&str; 10] = [
    "Iron Ore",
    "Gold Ore",
    "Timber",
    "Stone",
    "Food",
    "Herbs",
    "Leather",
    "Cloth",
    "Gems",
    "Essence Crystals",
];

pub(crate) fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

pub(crate) fn pick_owned<R: Rng + ?Sized>(rng: &mut R, items: &[&str]) -> String {
    pick(rng, items).to_string()
}

/// RFC 3339 timestamp `minutes` before now.
pub(crate) fn minutes_ago(minutes: i64) -> String {
    (Utc::now() - Duration::minutes(minutes)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Thread-safe front for the generators, one method per metrics domain.
pub struct MockDataService {
    rng: Mutex<SmallRng>,
}

impl MockDataService {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, generate: impl FnOnce(&mut SmallRng) -> T) -> T {
        // A panic while generating leaves the rng usable, so recover from poisoning.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        generate(&mut *rng)
    }

    pub fn overview(&self) -> OverviewMetrics {
        self.with_rng(|rng| overview::generate(rng))
    }

    pub fn city_metrics(&self) -> CityMetrics {
        self.with_rng(|rng| cities::generate(rng))
    }

    pub fn faction_metrics(&self) -> FactionMetrics {
        self.with_rng(|rng| factions::generate(rng))
    }

    pub fn economic_metrics(&self) -> EconomicMetrics {
        self.with_rng(|rng| economy::generate(rng))
    }

    pub fn world_simulation(&self) -> WorldSimulationMetrics {
        self.with_rng(|rng| world::generate(rng))
    }

    pub fn character_metrics(&self) -> CharacterMetrics {
        self.with_rng(|rng| characters::generate(rng))
    }

    pub fn simulation_performance(&self) -> SimulationPerformance {
        self.with_rng(|rng| performance::generate(rng))
    }

    pub fn player_metrics(&self) -> PlayerMetrics {
        self.character_metrics()
    }

    pub fn server_metrics(&self) -> ServerMetrics {
        self.simulation_performance()
    }

    pub fn battle_metrics(&self) -> BattleMetrics {
        self.faction_metrics()
    }
}

impl Default for MockDataService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Runs `check` against many independently seeded generators.
    pub fn for_many_seeds(mut check: impl FnMut(&mut SmallRng)) {
        for seed in 0..200u64 {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_mul(7919) + 3);
            check(&mut rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_service_is_reproducible() {
        let a = MockDataService::with_seed(42).city_metrics();
        let b = MockDataService::with_seed(42).city_metrics();
        assert_eq!(a.cities, b.cities);
    }

    #[test]
    fn aliases_produce_the_matching_shapes() {
        let service = MockDataService::new();
        assert!(!service.player_metrics().top_characters.is_empty());
        assert!(service.server_metrics().entity_counts.total > 0);
        assert_eq!(service.battle_metrics().factions.len(), FACTION_NAMES.len());
    }

    #[test]
    fn minutes_ago_is_rfc3339() {
        let stamp = minutes_ago(20);
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }
}
