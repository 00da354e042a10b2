use rand::Rng;

use super::{CITY_NAMES, FACTION_NAMES, REGIONS, pick_owned, round_to};
use crate::metrics::{City, CityMetrics, FoodStatus, RegionStats, WorkforceDistribution};

pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> CityMetrics {
    let cities = CITY_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| city(rng, i, name))
        .collect();

    let region_stats = REGIONS
        .iter()
        .map(|name| RegionStats {
            name: name.to_string(),
            cities: rng.gen_range(1..=3),
            total_population: rng.gen_range(5_000..=12_000),
            prosperity: rng.gen_range(50..=90),
            active_nodes: rng.gen_range(5..=15),
            danger_level: rng.gen_range(10..=70),
            controlling_faction: pick_owned(rng, &FACTION_NAMES),
        })
        .collect();

    CityMetrics::from_cities(cities, region_stats)
}

fn city<R: Rng + ?Sized>(rng: &mut R, index: usize, name: &str) -> City {
    let food_reserves = rng.gen_range(1..=30);
    City {
        id: format!("city-{index}"),
        name: name.to_string(),
        region: REGIONS[index % REGIONS.len()].to_string(),
        population: rng.gen_range(2_000..=5_000),
        population_growth: round_to(rng.gen_range(-1.0..3.0), 2),
        treasury: rng.gen_range(50_000..=500_000),
        economic_health: rng.gen_range(40..=95),
        food_reserves,
        food_status: FoodStatus::from_reserves(food_reserves),
        trade_routes: rng.gen_range(2..=6),
        active_quests: rng.gen_range(5..=25),
        completed_quests_today: rng.gen_range(3..=15),
        defense_rating: rng.gen_range(30..=90),
        faction_control: pick_owned(rng, &FACTION_NAMES),
        production_chains: rng.gen_range(3..=12),
        production_efficiency: rng.gen_range(55..=95),
        workforce_distribution: WorkforceDistribution {
            gathering: rng.gen_range(15..=30),
            crafting: rng.gen_range(10..=25),
            trading: rng.gen_range(8..=20),
            military: rng.gen_range(5..=15),
            infrastructure: rng.gen_range(5..=12),
            other: rng.gen_range(10..=20),
        },
    }
}
