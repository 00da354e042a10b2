//! Tracing setup and colorized alert pulse lines for quick log scanning.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use colored::{Color, Colorize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::metrics::{Alert, AlertCategory, AlertType, OverviewMetrics};

const DEFAULT_FILTER: &str = "titan_saga_admin=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// The dashboard owns the terminal, so its logs go to a file.
pub fn init_file(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

pub fn init_stdout() {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();
}

fn badge(label: &str, color: Color) -> String {
    format!("[{}]", label).color(color).to_string()
}

fn alert_color(alert_type: AlertType) -> Color {
    match alert_type {
        AlertType::Info => Color::BrightBlue,
        AlertType::Warning => Color::Yellow,
        AlertType::Error => Color::Red,
        AlertType::Critical => Color::BrightRed,
    }
}

fn category_color(category: AlertCategory) -> Color {
    match category {
        AlertCategory::Economy => Color::BrightCyan,
        AlertCategory::Conflict => Color::Red,
        AlertCategory::Disaster => Color::BrightMagenta,
        AlertCategory::Simulation => Color::BrightGreen,
    }
}

pub fn format_alert_line(alert: &Alert) -> String {
    let location = alert
        .location
        .as_deref()
        .map(|l| format!(" | {}", l.color(Color::BrightBlack)))
        .unwrap_or_default();
    format!(
        "{} {} {}{} | {}",
        badge(alert.alert_type.label(), alert_color(alert.alert_type)),
        badge(alert.category.label(), category_color(alert.category)),
        alert.title.bold(),
        location,
        alert.message
    )
}

/// Remembers the alert ids of the last overview so an alert pulses once
/// while it stays listed.
#[derive(Debug, Default)]
pub struct AlertPulse {
    seen: HashSet<String>,
}

impl AlertPulse {
    /// Returns the lines for alerts absent from the previous payload and logs them.
    pub fn observe(&mut self, overview: &OverviewMetrics) -> Vec<String> {
        let lines: Vec<String> = overview
            .alerts
            .iter()
            .filter(|alert| !self.seen.contains(&alert.id))
            .map(format_alert_line)
            .collect();
        self.seen = overview.alerts.iter().map(|alert| alert.id.clone()).collect();

        if !lines.is_empty() {
            let header = format!(
                "{} {} {}",
                badge("Pulse", Color::BrightWhite),
                badge(&overview.world.date.formatted, Color::BrightBlue),
                badge(overview.system_status.headline(), Color::BrightGreen),
            );
            info!("\n{}\n{}", header, lines.join("\n"));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn alerts_pulse_only_once() {
        let mut rng = SmallRng::seed_from_u64(7);
        let overview = crate::mock::overview::generate(&mut rng);
        let mut pulse = AlertPulse::default();
        assert_eq!(pulse.observe(&overview).len(), overview.alerts.len());
        assert!(pulse.observe(&overview).is_empty());
    }

    #[test]
    fn pulse_memory_tracks_only_the_latest_alerts() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut overview = crate::mock::overview::generate(&mut rng);
        let mut pulse = AlertPulse::default();
        pulse.observe(&overview);

        for round in 0..50 {
            for alert in &mut overview.alerts {
                alert.id = format!("{}-{round}", alert.id);
            }
            assert_eq!(pulse.observe(&overview).len(), overview.alerts.len());
            assert_eq!(pulse.seen.len(), overview.alerts.len());
        }
    }

    #[test]
    fn alert_line_carries_title_and_message() {
        colored::control::set_override(false);
        let mut rng = SmallRng::seed_from_u64(1);
        let overview = crate::mock::overview::generate(&mut rng);
        let line = format_alert_line(&overview.alerts[0]);
        assert!(line.starts_with("[CRITICAL] [Economy] Food Crisis in Lithmere"));
        assert!(line.contains("| Lithmere"));
    }
}
