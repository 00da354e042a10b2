use ratatui::{
    prelude::*,
    widgets::{Cell, Row},
};

use super::rows;
use crate::metrics::{CityMetrics, FoodStatus};
use crate::ui::THEME;
use crate::ui::components::{
    MetricsCard, columns, data_table, format_currency, format_number, health_color, heat_bar,
};

fn food_color(status: FoodStatus) -> Color {
    match status {
        FoodStatus::Abundant => THEME.good,
        FoodStatus::Sufficient => THEME.accent_a,
        FoodStatus::Low => THEME.warn,
        FoodStatus::Critical => THEME.bad,
    }
}

pub fn render(frame: &mut Frame, area: Rect, metrics: &CityMetrics) {
    let region_height = metrics.region_stats.len() as u16 + 3;
    let lanes = rows(
        area,
        [
            Constraint::Length(5),
            Constraint::Length(region_height),
            Constraint::Min(6),
        ],
    );

    let cards = columns(lanes[0], 4);
    frame.render_widget(
        MetricsCard::new("Total Cities", metrics.total_cities.to_string())
            .subtitle(format!("{} trade routes", metrics.total_trade_routes)),
        cards[0],
    );
    frame.render_widget(
        MetricsCard::new(
            "Avg Population",
            format_number(metrics.average_population as u64),
        ),
        cards[1],
    );
    frame.render_widget(
        MetricsCard::new(
            "Avg Economic Health",
            format!("{}%", metrics.average_economic_health),
        )
        .color(health_color(metrics.average_economic_health)),
        cards[2],
    );
    frame.render_widget(
        MetricsCard::new("Cities in Crisis", metrics.cities_in_crisis.to_string()).color(
            if metrics.cities_in_crisis > 0 {
                THEME.bad
            } else {
                THEME.good
            },
        ),
        cards[3],
    );

    let region_rows: Vec<Row> = metrics
        .region_stats
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.name.clone()),
                Cell::from(r.cities.to_string()),
                Cell::from(format_number(r.total_population as u64)),
                Cell::from(format!("{} {:>3}%", heat_bar(r.prosperity as f64, 100.0, 10), r.prosperity))
                    .style(Style::default().fg(health_color(r.prosperity))),
                Cell::from(r.active_nodes.to_string()),
                Cell::from(format!("{:>3}%", r.danger_level))
                    .style(Style::default().fg(health_color(100u32.saturating_sub(r.danger_level)))),
                Cell::from(r.controlling_faction.clone()),
            ])
        })
        .collect();
    frame.render_widget(
        data_table(
            "Regional Overview",
            ["Region", "Cities", "Population", "Prosperity", "Nodes", "Danger", "Controlled by"],
            region_rows,
            [
                Constraint::Length(14),
                Constraint::Length(6),
                Constraint::Length(11),
                Constraint::Length(16),
                Constraint::Length(6),
                Constraint::Length(7),
                Constraint::Min(12),
            ],
        ),
        lanes[1],
    );

    let city_rows: Vec<Row> = metrics
        .cities
        .iter()
        .map(|c| {
            Row::new(vec![
                Cell::from(c.name.clone()),
                Cell::from(c.region.clone()),
                Cell::from(format_number(c.population as u64)),
                Cell::from(format!("{:+.1}%", c.population_growth)),
                Cell::from(format_currency(c.treasury)),
                Cell::from(format!("{}%", c.economic_health))
                    .style(Style::default().fg(health_color(c.economic_health))),
                Cell::from(format!("{}d {}", c.food_reserves, c.food_status.label()))
                    .style(Style::default().fg(food_color(c.food_status))),
                Cell::from(c.trade_routes.to_string()),
                Cell::from(format!("{}/{}", c.completed_quests_today, c.active_quests)),
                Cell::from(c.defense_rating.to_string()),
                Cell::from(format!("{}%", c.production_efficiency)),
                Cell::from(c.faction_control.clone()),
            ])
        })
        .collect();
    frame.render_widget(
        data_table(
            "Cities",
            [
                "City", "Region", "Pop.", "Growth", "Treasury", "Health", "Food", "Routes",
                "Quests", "Def.", "Prod.", "Faction",
            ],
            city_rows,
            [
                Constraint::Length(12),
                Constraint::Length(13),
                Constraint::Length(8),
                Constraint::Length(7),
                Constraint::Length(9),
                Constraint::Length(7),
                Constraint::Length(14),
                Constraint::Length(6),
                Constraint::Length(7),
                Constraint::Length(5),
                Constraint::Length(6),
                Constraint::Min(10),
            ],
        ),
        lanes[2],
    );
}
