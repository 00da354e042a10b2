use rand::Rng;

use super::minutes_ago;
use crate::metrics::{
    Alert, AlertCategory, AlertType, ConflictSummary, EconomySummary, OverviewMetrics,
    SimulationSummary, SystemStatus, WorldDate, WorldSummary,
};

pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> OverviewMetrics {
    let day = rng.gen_range(1..=365);
    let year = rng.gen_range(1..=5);

    OverviewMetrics {
        simulation: SimulationSummary {
            current_tick: rng.gen_range(10_000..=50_000),
            tick_rate: rng.gen_range(8.0..12.0),
            elapsed_time: rng.gen_range(10_000..=50_000),
            fps: rng.gen_range(55..=60),
        },
        world: WorldSummary {
            date: WorldDate::from_day(day, year),
            population: rng.gen_range(40_000..=60_000),
            active_regions: rng.gen_range(6..=8),
            total_cities: rng.gen_range(10..=12),
            total_factions: rng.gen_range(5..=7),
        },
        economy: EconomySummary {
            total_wealth: rng.gen_range(2_000_000..=3_000_000),
            trade_volume_24h: rng.gen_range(120_000..=180_000),
            economic_health: rng.gen_range(65..=85),
            critical_shortages: rng.gen_range(1..=3),
        },
        conflicts: ConflictSummary {
            active_wars: rng.gen_range(1..=3),
            tense_diplomacy: rng.gen_range(2..=5),
            recent_treaties: rng.gen_range(0..=2),
        },
        system_status: system_status(rng),
        alerts: standing_alerts(),
    }
}

/// Healthy about four times in five; the remainder splits between warning and critical.
fn system_status<R: Rng + ?Sized>(rng: &mut R) -> SystemStatus {
    if rng.gen_range(1..=100) > 20 {
        SystemStatus::Healthy
    } else if rng.gen_range(1..=100) > 50 {
        SystemStatus::Warning
    } else {
        SystemStatus::Critical
    }
}

fn standing_alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: "alert-1".to_string(),
            alert_type: AlertType::Critical,
            category: AlertCategory::Economy,
            title: "Food Crisis in Lithmere".to_string(),
            message: "City food reserves down to 2 days. Production disrupted.".to_string(),
            location: Some("Lithmere".to_string()),
            timestamp: minutes_ago(20),
        },
        Alert {
            id: "alert-2".to_string(),
            alert_type: AlertType::Warning,
            category: AlertCategory::Conflict,
            title: "Tensions Rising".to_string(),
            message: "Shadowborn Syndicate has made hostile moves toward Valorian Empire"
                .to_string(),
            location: Some("Shadowfall".to_string()),
            timestamp: minutes_ago(40),
        },
        Alert {
            id: "alert-3".to_string(),
            alert_type: AlertType::Info,
            category: AlertCategory::Economy,
            title: "New Trade Route Established".to_string(),
            message: "Profitable trade route opened between Lithmere and Vothaven".to_string(),
            location: None,
            timestamp: minutes_ago(60),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::test_support::for_many_seeds;

    #[test]
    fn overview_values_stay_in_range() {
        for_many_seeds(|rng| {
            let o = generate(rng);
            assert!((10_000..=50_000).contains(&o.simulation.current_tick));
            assert!((8.0..12.0).contains(&o.simulation.tick_rate));
            assert!((55..=60).contains(&o.simulation.fps));
            assert!((1..=365).contains(&o.world.date.day));
            assert!((1..=5).contains(&o.world.date.year));
            assert!((40_000..=60_000).contains(&o.world.population));
            assert!((6..=8).contains(&o.world.active_regions));
            assert!((10..=12).contains(&o.world.total_cities));
            assert!((5..=7).contains(&o.world.total_factions));
            assert!((2_000_000..=3_000_000).contains(&o.economy.total_wealth));
            assert!((120_000..=180_000).contains(&o.economy.trade_volume_24h));
            assert!((65..=85).contains(&o.economy.economic_health));
            assert!((1..=3).contains(&o.economy.critical_shortages));
            assert!((1..=3).contains(&o.conflicts.active_wars));
            assert!((2..=5).contains(&o.conflicts.tense_diplomacy));
            assert!(o.conflicts.recent_treaties <= 2);
            assert_eq!(o.alerts.len(), 3);
        });
    }

    #[test]
    fn date_label_matches_day_and_year() {
        for_many_seeds(|rng| {
            let date = generate(rng).world.date;
            assert_eq!(
                date.formatted,
                format!("Day {}, {}, Year {}", date.day, date.season.label(), date.year)
            );
        });
    }

    #[test]
    fn system_status_is_mostly_healthy() {
        let mut healthy = 0;
        let mut total = 0;
        for_many_seeds(|rng| {
            total += 1;
            if generate(rng).system_status == SystemStatus::Healthy {
                healthy += 1;
            }
        });
        assert!(healthy * 2 > total);
    }
}
