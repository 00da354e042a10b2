//! Dashboard landing payload and the date/alert types shared with other sections.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverviewMetrics {
    pub simulation: SimulationSummary,
    pub world: WorldSummary,
    pub economy: EconomySummary,
    pub conflicts: ConflictSummary,
    pub system_status: SystemStatus,
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub current_tick: u64,
    /// Ticks per second.
    pub tick_rate: f64,
    /// Total ticks elapsed.
    pub elapsed_time: u64,
    pub fps: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorldSummary {
    pub date: WorldDate,
    pub population: u64,
    pub active_regions: u32,
    pub total_cities: u32,
    pub total_factions: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EconomySummary {
    pub total_wealth: u64,
    pub trade_volume_24h: u64,
    /// 0-100
    pub economic_health: u32,
    pub critical_shortages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConflictSummary {
    pub active_wars: u32,
    pub tense_diplomacy: u32,
    pub recent_treaties: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    Healthy,
    Warning,
    Critical,
}

impl SystemStatus {
    pub fn headline(&self) -> &'static str {
        match self {
            SystemStatus::Healthy => "All Systems Operational",
            SystemStatus::Warning => "Performance Degraded",
            SystemStatus::Critical => "Critical Issues Detected",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [
        Season::Spring,
        Season::Summer,
        Season::Autumn,
        Season::Winter,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }

    /// Seasons are 91 days long; the last day or two of a 365-day year stay in winter.
    pub fn for_day(day: u32) -> Season {
        let index = (day / 91).min(3) as usize;
        Season::ALL[index]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorldDate {
    pub day: u32,
    pub season: Season,
    pub year: u32,
    /// e.g. "Day 47, Summer, Year 3"
    pub formatted: String,
}

impl WorldDate {
    pub fn from_day(day: u32, year: u32) -> Self {
        let season = Season::for_day(day);
        Self {
            day,
            season,
            year,
            formatted: format!("Day {}, {}, Year {}", day, season.label(), year),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Info,
    Warning,
    Error,
    Critical,
}

impl AlertType {
    pub fn label(&self) -> &'static str {
        match self {
            AlertType::Info => "INFO",
            AlertType::Warning => "WARN",
            AlertType::Error => "ERROR",
            AlertType::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
    Economy,
    Conflict,
    Disaster,
    Simulation,
}

impl AlertCategory {
    pub fn label(&self) -> &'static str {
        match self {
            AlertCategory::Economy => "Economy",
            AlertCategory::Conflict => "Conflict",
            AlertCategory::Disaster => "Disaster",
            AlertCategory::Simulation => "Simulation",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub category: AlertCategory,
    pub title: String,
    pub message: String,
    /// City or region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_boundaries_follow_91_day_quarters() {
        assert_eq!(Season::for_day(1), Season::Spring);
        assert_eq!(Season::for_day(90), Season::Spring);
        assert_eq!(Season::for_day(91), Season::Summer);
        assert_eq!(Season::for_day(182), Season::Autumn);
        assert_eq!(Season::for_day(273), Season::Winter);
        assert_eq!(Season::for_day(365), Season::Winter);
    }

    #[test]
    fn world_date_formats_like_the_game_calendar() {
        let date = WorldDate::from_day(120, 3);
        assert_eq!(date.formatted, "Day 120, Summer, Year 3");
    }

    #[test]
    fn alert_reads_camel_case_json_without_location() {
        let raw = r#"{
            "id": "alert-9",
            "type": "critical",
            "category": "disaster",
            "title": "Flood",
            "message": "River broke its banks",
            "timestamp": "2026-01-01T00:00:00Z"
        }"#;
        let alert: Alert = serde_json::from_str(raw).expect("alert parses");
        assert_eq!(alert.alert_type, AlertType::Critical);
        assert_eq!(alert.category, AlertCategory::Disaster);
        assert!(alert.location.is_none());
    }

    #[test]
    fn system_status_headlines() {
        assert_eq!(SystemStatus::Healthy.headline(), "All Systems Operational");
        assert_eq!(SystemStatus::Critical.headline(), "Critical Issues Detected");
    }
}
