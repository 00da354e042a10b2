use chrono::{Duration, SecondsFormat, Utc};
use rand::Rng;

use super::{minutes_ago, round_to};
use crate::metrics::{
    Bottleneck, BottleneckSeverity, EndpointStats, EntityCounts, ErrorTypeStats,
    PerformanceMetrics, RequestSample, ResponseTimes, ServerHealth, SimulationPerformance,
    SystemLoad, TickRate,
};

const ENDPOINTS: [&str; 5] = [
    "/metrics/overview",
    "/metrics/world",
    "/metrics/players",
    "/metrics/server",
    "/metrics/battles",
];

const ERROR_TYPES: [&str; 4] = ["Timeout", "Validation", "Unauthorized", "Internal"];

pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> SimulationPerformance {
    let current = round_to(rng.gen_range(8.0..12.0), 2);

    let cities = rng.gen_range(10..=12);
    let factions = rng.gen_range(5..=7);
    let characters = rng.gen_range(200..=600);
    let quests = rng.gen_range(100..=400);
    let trade_routes = rng.gen_range(10..=20);
    let monsters = rng.gen_range(500..=2_000);

    let total_requests: u64 = rng.gen_range(50_000..=250_000);
    let failed_requests = (total_requests as f64 * rng.gen_range(0.001..0.03)) as u64;

    SimulationPerformance {
        tick_rate: TickRate {
            current,
            target: 10.0,
            average_last60s: round_to(rng.gen_range(9.0..11.0), 2),
            stability: rng.gen_range(85..=98),
        },
        entity_counts: EntityCounts {
            cities,
            factions,
            characters,
            quests,
            trade_routes,
            monsters,
            total: cities + factions + characters + quests + trade_routes + monsters,
        },
        system_load: SystemLoad {
            pathfinding: round_to(rng.gen_range(10.0..25.0), 1),
            economy: round_to(rng.gen_range(10.0..20.0), 1),
            combat: round_to(rng.gen_range(5.0..20.0), 1),
            quest_generation: round_to(rng.gen_range(5.0..15.0), 1),
            ai: round_to(rng.gen_range(15.0..30.0), 1),
            overall: round_to(rng.gen_range(45.0..85.0), 1),
        },
        performance_metrics: PerformanceMetrics {
            avg_tick_duration: round_to(rng.gen_range(60.0..95.0), 2),
            max_tick_duration: round_to(rng.gen_range(100.0..180.0), 2),
            fps: rng.gen_range(55..=60),
            memory_usage: rng.gen_range(512..=2_048),
            simulated_time: rng.gen_range(100..=1_500),
        },
        bottlenecks: bottlenecks(),
        total_requests,
        successful_requests: total_requests - failed_requests,
        failed_requests,
        error_rate: round_to(failed_requests as f64 / total_requests as f64 * 100.0, 2),
        response_times: response_times(rng),
        uptime: rng.gen_range(86_400..=2_592_000),
        requests_over_time: requests_over_time(rng),
        requests_by_endpoint: ENDPOINTS
            .iter()
            .map(|endpoint| {
                let requests = rng.gen_range(1_000..=50_000);
                EndpointStats {
                    endpoint: endpoint.to_string(),
                    count: requests,
                    requests,
                    avg_response_time: round_to(rng.gen_range(20.0..250.0), 1),
                    error_rate: round_to(rng.gen_range(0.0..3.0), 2),
                }
            })
            .collect(),
        server_health: ServerHealth {
            cpu: rng.gen_range(10..=90),
            memory: rng.gen_range(30..=85),
            disk: rng.gen_range(20..=75),
            network: rng.gen_range(5..=60),
        },
        errors_by_type: errors_by_type(rng),
    }
}

/// Draws ordered samples so that p50 <= p95 <= p99 <= max and avg <= p95.
fn response_times<R: Rng + ?Sized>(rng: &mut R) -> ResponseTimes {
    let p50 = round_to(rng.gen_range(20.0..80.0), 1);
    let avg = round_to(p50 * rng.gen_range(1.0..1.4), 1);
    let p95 = round_to(avg + rng.gen_range(50.0..200.0), 1);
    let p99 = round_to(p95 + rng.gen_range(20.0..300.0), 1);
    let max = round_to(p99 + rng.gen_range(50.0..1_000.0), 1);
    ResponseTimes {
        avg,
        p50,
        p95,
        p99,
        max,
    }
}

fn requests_over_time<R: Rng + ?Sized>(rng: &mut R) -> Vec<RequestSample> {
    let now = Utc::now();
    (0..24)
        .rev()
        .map(|hours_back| {
            let requests = rng.gen_range(1_500..=12_000);
            RequestSample {
                timestamp: (now - Duration::hours(hours_back))
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
                requests,
                errors: rng.gen_range(0..=requests / 50),
            }
        })
        .collect()
}

fn errors_by_type<R: Rng + ?Sized>(rng: &mut R) -> Vec<ErrorTypeStats> {
    let counts: Vec<u32> = ERROR_TYPES.iter().map(|_| rng.gen_range(5..=300)).collect();
    let total: u32 = counts.iter().sum();
    ERROR_TYPES
        .iter()
        .zip(counts)
        .map(|(kind, count)| ErrorTypeStats {
            error_type: kind.to_string(),
            count,
            percentage: round_to(count as f64 / total as f64 * 100.0, 1),
            last_occurrence: minutes_ago(rng.gen_range(1..=180)),
        })
        .collect()
}

fn bottlenecks() -> Vec<Bottleneck> {
    vec![
        Bottleneck {
            system: "Pathfinding".to_string(),
            severity: BottleneckSeverity::Medium,
            impact: "Trade caravans delayed by 5-10 ticks in dense regions".to_string(),
            recommendation: "Cache route segments between frequently visited cities".to_string(),
        },
        Bottleneck {
            system: "AI Decision Making".to_string(),
            severity: BottleneckSeverity::Low,
            impact: "Faction planning occasionally skips a tick under load".to_string(),
            recommendation: "Stagger faction goal evaluation across ticks".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::test_support::for_many_seeds;

    #[test]
    fn entity_total_is_sum_of_parts() {
        for_many_seeds(|rng| {
            let e = generate(rng).entity_counts;
            assert_eq!(
                e.total,
                e.cities + e.factions + e.characters + e.quests + e.trade_routes + e.monsters
            );
        });
    }

    #[test]
    fn tick_rate_stays_in_range() {
        for_many_seeds(|rng| {
            let tick = generate(rng).tick_rate;
            assert!((8.0..=12.0).contains(&tick.current));
            assert_eq!(tick.target, 10.0);
            assert!((85..=98).contains(&tick.stability));
        });
    }

    #[test]
    fn request_counts_add_up() {
        for_many_seeds(|rng| {
            let m = generate(rng);
            assert_eq!(m.successful_requests + m.failed_requests, m.total_requests);
            let expected = m.failed_requests as f64 / m.total_requests as f64 * 100.0;
            assert!((m.error_rate - expected).abs() < 0.01);
        });
    }

    #[test]
    fn percentiles_are_ordered() {
        for_many_seeds(|rng| {
            let r = generate(rng).response_times;
            assert!(r.avg <= r.p95);
            assert!(r.p50 <= r.p95);
            assert!(r.p95 <= r.p99);
            assert!(r.p99 <= r.max);
        });
    }

    #[test]
    fn server_series_have_expected_shape() {
        for_many_seeds(|rng| {
            let m = generate(rng);
            assert_eq!(m.requests_over_time.len(), 24);
            assert_eq!(m.requests_by_endpoint.len(), ENDPOINTS.len());
            for health in [
                m.server_health.cpu,
                m.server_health.memory,
                m.server_health.disk,
                m.server_health.network,
            ] {
                assert!(health <= 100);
            }
            for sample in &m.requests_over_time {
                assert!(sample.errors <= sample.requests);
            }
        });
    }
}
