use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CityMetrics {
    pub cities: Vec<City>,
    pub total_cities: u32,
    pub average_population: u32,
    pub average_economic_health: u32,
    pub cities_in_crisis: u32,
    pub total_trade_routes: u32,
    pub region_stats: Vec<RegionStats>,
}

impl CityMetrics {
    /// Builds the aggregate view from a list of cities.
    pub fn from_cities(cities: Vec<City>, region_stats: Vec<RegionStats>) -> Self {
        let count = cities.len().max(1) as u64;
        let total_population: u64 = cities.iter().map(|c| c.population as u64).sum();
        let total_health: u64 = cities.iter().map(|c| c.economic_health as u64).sum();
        Self {
            total_cities: cities.len() as u32,
            average_population: (total_population / count) as u32,
            average_economic_health: (total_health / count) as u32,
            cities_in_crisis: cities.iter().filter(|c| c.in_crisis()).count() as u32,
            total_trade_routes: cities.iter().map(|c| c.trade_routes).sum(),
            cities,
            region_stats,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FoodStatus {
    Abundant,
    Sufficient,
    Low,
    Critical,
}

impl FoodStatus {
    pub fn from_reserves(days: u32) -> Self {
        if days < 5 {
            FoodStatus::Critical
        } else if days < 10 {
            FoodStatus::Low
        } else if days < 20 {
            FoodStatus::Sufficient
        } else {
            FoodStatus::Abundant
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FoodStatus::Abundant => "abundant",
            FoodStatus::Sufficient => "sufficient",
            FoodStatus::Low => "low",
            FoodStatus::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: String,
    pub name: String,
    pub region: String,
    pub population: u32,
    /// Percentage.
    pub population_growth: f64,
    pub treasury: u64,
    /// 0-100
    pub economic_health: u32,
    /// Days remaining.
    pub food_reserves: u32,
    pub food_status: FoodStatus,
    pub trade_routes: u32,
    pub active_quests: u32,
    pub completed_quests_today: u32,
    pub defense_rating: u32,
    /// Controlling faction name; not validated against the faction list.
    pub faction_control: String,
    pub production_chains: u32,
    /// 0-100
    pub production_efficiency: u32,
    pub workforce_distribution: WorkforceDistribution,
}

impl City {
    pub fn in_crisis(&self) -> bool {
        self.food_status == FoodStatus::Critical || self.economic_health < 50
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkforceDistribution {
    pub gathering: u32,
    pub crafting: u32,
    pub trading: u32,
    pub military: u32,
    pub infrastructure: u32,
    pub other: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegionStats {
    pub name: String,
    pub cities: u32,
    pub total_population: u32,
    /// 0-100
    pub prosperity: u32,
    /// Resource nodes.
    pub active_nodes: u32,
    /// 0-100, monster spawning pressure.
    pub danger_level: u32,
    pub controlling_faction: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(name: &str, population: u32, health: u32, food: u32, routes: u32) -> City {
        City {
            id: format!("city-{name}"),
            name: name.to_string(),
            region: "Shadowfall".to_string(),
            population,
            population_growth: 0.5,
            treasury: 100_000,
            economic_health: health,
            food_reserves: food,
            food_status: FoodStatus::from_reserves(food),
            trade_routes: routes,
            active_quests: 10,
            completed_quests_today: 4,
            defense_rating: 50,
            faction_control: "Dragon Clan".to_string(),
            production_chains: 5,
            production_efficiency: 80,
            workforce_distribution: WorkforceDistribution::default(),
        }
    }

    #[test]
    fn food_status_thresholds() {
        assert_eq!(FoodStatus::from_reserves(1), FoodStatus::Critical);
        assert_eq!(FoodStatus::from_reserves(4), FoodStatus::Critical);
        assert_eq!(FoodStatus::from_reserves(5), FoodStatus::Low);
        assert_eq!(FoodStatus::from_reserves(10), FoodStatus::Sufficient);
        assert_eq!(FoodStatus::from_reserves(19), FoodStatus::Sufficient);
        assert_eq!(FoodStatus::from_reserves(20), FoodStatus::Abundant);
    }

    #[test]
    fn crisis_is_starvation_or_weak_economy() {
        assert!(city("a", 3000, 90, 2, 3).in_crisis());
        assert!(city("b", 3000, 49, 25, 3).in_crisis());
        assert!(!city("c", 3000, 50, 6, 3).in_crisis());
    }

    #[test]
    fn aggregates_are_computed_from_cities() {
        let metrics = CityMetrics::from_cities(
            vec![
                city("a", 2000, 40, 25, 2),
                city("b", 4000, 80, 2, 5),
                city("c", 3000, 60, 15, 4),
            ],
            Vec::new(),
        );
        assert_eq!(metrics.total_cities, 3);
        assert_eq!(metrics.average_population, 3000);
        assert_eq!(metrics.average_economic_health, 60);
        assert_eq!(metrics.cities_in_crisis, 2);
        assert_eq!(metrics.total_trade_routes, 11);
    }

    #[test]
    fn empty_city_list_does_not_divide_by_zero() {
        let metrics = CityMetrics::from_cities(Vec::new(), Vec::new());
        assert_eq!(metrics.total_cities, 0);
        assert_eq!(metrics.average_population, 0);
    }
}
