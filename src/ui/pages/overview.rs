use ratatui::{
    prelude::*,
    style::Stylize,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use super::rows;
use crate::metrics::{AlertType, OverviewMetrics, SystemStatus};
use crate::query::QueryState;
use crate::ui::THEME;
use crate::ui::components::{
    MetricsCard, columns, format_currency, format_number, format_uptime, health_color, panel,
    relative_time,
};

fn status_color(status: SystemStatus) -> Color {
    match status {
        SystemStatus::Healthy => THEME.good,
        SystemStatus::Warning => THEME.warn,
        SystemStatus::Critical => THEME.bad,
    }
}

fn alert_color(alert_type: AlertType) -> Color {
    match alert_type {
        AlertType::Info => THEME.accent_a,
        AlertType::Warning => THEME.warn,
        AlertType::Error | AlertType::Critical => THEME.bad,
    }
}

pub fn render(frame: &mut Frame, area: Rect, metrics: &OverviewMetrics, state: &QueryState) {
    let lanes = rows(
        area,
        [
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(5),
        ],
    );

    let updated = state
        .updated_wall
        .map(|ts| ts.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    let color = status_color(metrics.system_status);
    let banner = Paragraph::new(Line::from(vec![
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(metrics.system_status.headline(), Style::default().fg(color).bold()),
        Span::styled(
            format!("   {}   last updated {updated}", metrics.world.date.formatted),
            Style::default().fg(THEME.muted),
        ),
    ]))
    .block(panel("System Status"));
    frame.render_widget(banner, lanes[0]);

    let sim = &metrics.simulation;
    let first = columns(lanes[1], 4);
    frame.render_widget(
        MetricsCard::new("Current Tick", format_number(sim.current_tick))
            .subtitle(format!("{:.1} ticks/s", sim.tick_rate)),
        first[0],
    );
    frame.render_widget(
        MetricsCard::new("Simulation FPS", sim.fps.to_string())
            .subtitle(format!("running {}", format_uptime(sim.elapsed_time))),
        first[1],
    );
    frame.render_widget(
        MetricsCard::new("World Population", format_number(metrics.world.population))
            .subtitle(format!("{} active regions", metrics.world.active_regions)),
        first[2],
    );
    frame.render_widget(
        MetricsCard::new("Cities & Factions", metrics.world.total_cities.to_string()).subtitle(
            format!("{} factions", metrics.world.total_factions),
        ),
        first[3],
    );

    let economy = &metrics.economy;
    let conflicts = &metrics.conflicts;
    let second = columns(lanes[2], 4);
    frame.render_widget(
        MetricsCard::new("Total Wealth", format_currency(economy.total_wealth))
            .subtitle(format!("24h trade {}", format_currency(economy.trade_volume_24h))),
        second[0],
    );
    frame.render_widget(
        MetricsCard::new("Economic Health", format!("{}%", economy.economic_health))
            .color(health_color(economy.economic_health)),
        second[1],
    );
    frame.render_widget(
        MetricsCard::new("Critical Shortages", economy.critical_shortages.to_string()).color(
            if economy.critical_shortages > 0 {
                THEME.bad
            } else {
                THEME.good
            },
        ),
        second[2],
    );
    frame.render_widget(
        MetricsCard::new("Active Wars", conflicts.active_wars.to_string())
            .subtitle(format!(
                "{} tense · {} treaties",
                conflicts.tense_diplomacy, conflicts.recent_treaties
            ))
            .color(if conflicts.active_wars > 0 {
                THEME.bad
            } else {
                THEME.accent_b
            }),
        second[3],
    );

    let now = chrono::Local::now();
    let items: Vec<ListItem> = if metrics.alerts.is_empty() {
        vec![ListItem::new(Span::styled(
            "No active alerts",
            Style::default().fg(THEME.muted),
        ))]
    } else {
        metrics
            .alerts
            .iter()
            .map(|alert| {
                let mut head = vec![
                    Span::styled(
                        format!("[{}] ", alert.alert_type.label()),
                        Style::default().fg(alert_color(alert.alert_type)).bold(),
                    ),
                    Span::styled(
                        format!("{} · ", alert.category.label()),
                        Style::default().fg(THEME.muted),
                    ),
                    Span::styled(alert.title.clone(), Style::default().bold()),
                ];
                if let Some(location) = &alert.location {
                    head.push(Span::styled(
                        format!("  @ {location}"),
                        Style::default().fg(THEME.accent_a),
                    ));
                }
                head.push(Span::styled(
                    format!("  {}", relative_time(&alert.timestamp, now)),
                    Style::default().fg(THEME.muted),
                ));
                ListItem::new(vec![
                    Line::from(head),
                    Line::from(Span::raw(format!("    {}", alert.message))),
                ])
            })
            .collect()
    };
    let title = format!("Alerts ({})", metrics.alerts.len());
    frame.render_widget(List::new(items).block(panel(&title)), lanes[3]);
}
