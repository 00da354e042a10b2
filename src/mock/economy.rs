use rand::Rng;

use super::{CITY_NAMES, RESOURCES, pick, pick_owned, round_to};
use crate::metrics::{
    EconomicMetrics, EconomyOverview, MarketActivity, PriceTrend, ProductionChain, ResourcePrice,
    ResourceScarcity, RouteStatus, ScarcityLevel, TradeRoute, WealthDistribution,
};

const BOTTLENECKS: [&str; 3] = ["Labor shortage", "Resource scarcity", "Equipment failure"];

fn tier(index: usize) -> u8 {
    (index % 3) as u8 + 1
}

pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> EconomicMetrics {
    let resource_prices = RESOURCES
        .iter()
        .enumerate()
        .map(|(i, resource)| {
            let change_24h = round_to(rng.gen_range(-15.0..20.0), 2);
            ResourcePrice {
                resource: resource.to_string(),
                tier: tier(i),
                current_price: rng.gen_range(10..=500),
                price_change_24h: change_24h,
                price_change_7d: round_to(rng.gen_range(-25.0..35.0), 2),
                trend: PriceTrend::from_change(change_24h),
                volume: rng.gen_range(100..=5_000),
            }
        })
        .collect();

    let scarcity_levels = RESOURCES
        .iter()
        .enumerate()
        .map(|(i, resource)| {
            let score = rng.gen_range(0..=100);
            let affected_cities = if score > 60 {
                let count = rng.gen_range(2..=5);
                CITY_NAMES[..count].iter().map(|c| c.to_string()).collect()
            } else {
                Vec::new()
            };
            ResourceScarcity {
                resource: resource.to_string(),
                tier: tier(i),
                scarcity_level: ScarcityLevel::from_score(score),
                scarcity_score: score,
                supply: rng.gen_range(1_000..=10_000),
                demand: rng.gen_range(800..=12_000),
                node_availability: rng.gen_range(5..=30),
                affected_cities,
            }
        })
        .collect();

    let trade_routes = (0..15).map(|i| trade_route(rng, i)).collect();

    let production_chains = (0..20)
        .map(|_| ProductionChain {
            city: pick_owned(rng, &CITY_NAMES),
            input: pick_owned(rng, &RESOURCES),
            output: pick_owned(rng, &RESOURCES),
            efficiency: rng.gen_range(60..=98),
            daily_output: rng.gen_range(100..=1_000),
            bottleneck: (rng.gen_range(1..=100) > 70).then(|| pick_owned(rng, &BOTTLENECKS)),
        })
        .collect();

    EconomicMetrics {
        overview: EconomyOverview {
            total_wealth: rng.gen_range(2_000_000..=4_000_000),
            wealth_distribution: WealthDistribution {
                factions: rng.gen_range(40..=50),
                cities: rng.gen_range(30..=40),
                individuals: rng.gen_range(10..=20),
            },
            daily_trade_volume: rng.gen_range(100_000..=200_000),
            inflation_rate: round_to(rng.gen_range(1.0..4.0), 2),
            economic_growth: round_to(rng.gen_range(-1.0..5.0), 2),
            unemployment_rate: round_to(rng.gen_range(2.0..8.0), 2),
        },
        resource_prices,
        scarcity_levels,
        trade_routes,
        market_activity: MarketActivity {
            active_orders: rng.gen_range(500..=2_000),
            buy_orders: rng.gen_range(250..=1_100),
            sell_orders: rng.gen_range(250..=900),
            orders_filled_today: rng.gen_range(300..=1_500),
            average_fulfillment_time: rng.gen_range(20..=100),
            top_traded_resources: RESOURCES[..5].iter().map(|r| r.to_string()).collect(),
        },
        production_chains,
    }
}

/// Origin and destination are always distinct cities.
fn trade_route<R: Rng + ?Sized>(rng: &mut R, index: usize) -> TradeRoute {
    let origin_index = rng.gen_range(0..CITY_NAMES.len());
    let offset = rng.gen_range(1..CITY_NAMES.len());
    let destination_index = (origin_index + offset) % CITY_NAMES.len();

    let status = if rng.gen_range(1..=100) > 10 {
        RouteStatus::Active
    } else if rng.gen_bool(0.5) {
        RouteStatus::Disrupted
    } else {
        RouteStatus::Blocked
    };

    TradeRoute {
        id: format!("route-{index}"),
        origin: CITY_NAMES[origin_index].to_string(),
        destination: CITY_NAMES[destination_index].to_string(),
        volume: rng.gen_range(5_000..=50_000),
        profitability: round_to(rng.gen_range(5.0..35.0), 1),
        status,
        primary_goods: vec![
            pick(rng, &RESOURCES).to_string(),
            pick(rng, &RESOURCES).to_string(),
        ],
        travel_time: rng.gen_range(50..=300),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::test_support::for_many_seeds;

    #[test]
    fn price_rows_stay_in_range() {
        for_many_seeds(|rng| {
            let metrics = generate(rng);
            assert_eq!(metrics.resource_prices.len(), RESOURCES.len());
            for (i, price) in metrics.resource_prices.iter().enumerate() {
                assert_eq!(price.tier as usize, i % 3 + 1);
                assert!((10..=500).contains(&price.current_price));
                assert!((-15.0..=20.0).contains(&price.price_change_24h));
                assert!((-25.0..=35.0).contains(&price.price_change_7d));
                assert_eq!(price.trend, PriceTrend::from_change(price.price_change_24h));
            }
        });
    }

    #[test]
    fn scarcity_rows_are_classified_from_score() {
        for_many_seeds(|rng| {
            for row in generate(rng).scarcity_levels {
                assert!(row.scarcity_score <= 100);
                assert_eq!(row.scarcity_level, ScarcityLevel::from_score(row.scarcity_score));
                if row.scarcity_score > 60 {
                    assert!((2..=5).contains(&row.affected_cities.len()));
                } else {
                    assert!(row.affected_cities.is_empty());
                }
            }
        });
    }

    #[test]
    fn trade_routes_never_loop_back() {
        for_many_seeds(|rng| {
            let metrics = generate(rng);
            assert_eq!(metrics.trade_routes.len(), 15);
            for route in &metrics.trade_routes {
                assert_ne!(route.origin, route.destination);
                assert!((5.0..=35.0).contains(&route.profitability));
                assert!((50..=300).contains(&route.travel_time));
            }
        });
    }

    #[test]
    fn production_chains_stay_in_range() {
        for_many_seeds(|rng| {
            let metrics = generate(rng);
            assert_eq!(metrics.production_chains.len(), 20);
            for chain in &metrics.production_chains {
                assert!((60..=98).contains(&chain.efficiency));
                if let Some(reason) = &chain.bottleneck {
                    assert!(BOTTLENECKS.contains(&reason.as_str()));
                }
            }
        });
    }
}
