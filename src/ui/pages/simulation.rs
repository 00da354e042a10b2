use ratatui::{
    prelude::*,
    style::Stylize,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use super::{rows, split_columns};
use crate::metrics::{BottleneckSeverity, SimulationPerformance};
use crate::ui::THEME;
use crate::ui::components::{
    BarChartCard, MetricsCard, columns, format_number, heat_bar, health_color, load_color, panel,
};

fn severity_color(severity: BottleneckSeverity) -> Color {
    match severity {
        BottleneckSeverity::Low => THEME.accent_a,
        BottleneckSeverity::Medium => THEME.warn,
        BottleneckSeverity::High => THEME.bad,
    }
}

pub fn render(frame: &mut Frame, area: Rect, metrics: &SimulationPerformance) {
    let lanes = rows(
        area,
        [
            Constraint::Length(5),
            Constraint::Length(11),
            Constraint::Min(6),
        ],
    );

    let tick = &metrics.tick_rate;
    let perf = &metrics.performance_metrics;
    let cards = columns(lanes[0], 4);
    frame.render_widget(
        MetricsCard::new("Tick Rate", format!("{:.1}/s", tick.current))
            .subtitle(format!("target {:.0} · 60s avg {:.1}", tick.target, tick.average_last60s)),
        cards[0],
    );
    frame.render_widget(
        MetricsCard::new("Stability", format!("{}%", tick.stability))
            .color(health_color(tick.stability)),
        cards[1],
    );
    frame.render_widget(
        MetricsCard::new("Tick Duration", format!("{:.1} ms", perf.avg_tick_duration))
            .subtitle(format!("max {:.1} ms · {} fps", perf.max_tick_duration, perf.fps)),
        cards[2],
    );
    frame.render_widget(
        MetricsCard::new("Memory", format!("{} MB", format_number(perf.memory_usage as u64)))
            .subtitle(format!("{} days simulated", format_number(perf.simulated_time as u64))),
        cards[3],
    );

    let middle = split_columns(
        lanes[1],
        [Constraint::Percentage(55), Constraint::Percentage(45)],
    );
    let counts = &metrics.entity_counts;
    let bars = [
        ("cities", counts.cities),
        ("factions", counts.factions),
        ("chars", counts.characters),
        ("quests", counts.quests),
        ("routes", counts.trade_routes),
        ("monsters", counts.monsters),
    ]
    .into_iter()
    .map(|(label, count)| (label.to_string(), count as u64))
    .collect();
    let title = format!("Entities ({})", format_number(counts.total as u64));
    frame.render_widget(BarChartCard::new(&title, bars).color(THEME.accent_b), middle[0]);

    let load = &metrics.system_load;
    let load_lines: Vec<Line> = [
        ("Pathfinding", load.pathfinding),
        ("Economy", load.economy),
        ("Combat", load.combat),
        ("Quests", load.quest_generation),
        ("AI", load.ai),
        ("Overall", load.overall),
    ]
    .into_iter()
    .map(|(label, value)| {
        Line::from(vec![
            Span::styled(format!("{label:<12}"), Style::default().fg(THEME.muted)),
            Span::styled(
                heat_bar(value, 100.0, 16),
                Style::default().fg(load_color(value)),
            ),
            Span::raw(format!(" {value:>5.1}%")),
        ])
    })
    .collect();
    frame.render_widget(
        Paragraph::new(load_lines).block(panel("System Load")),
        middle[1],
    );

    let items: Vec<ListItem> = if metrics.bottlenecks.is_empty() {
        vec![ListItem::new(Span::styled(
            "No bottlenecks detected",
            Style::default().fg(THEME.good),
        ))]
    } else {
        metrics
            .bottlenecks
            .iter()
            .map(|b| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            format!("[{}] ", b.severity.label()),
                            Style::default().fg(severity_color(b.severity)).bold(),
                        ),
                        Span::styled(b.system.clone(), Style::default().bold()),
                        Span::raw(format!("  {}", b.impact)),
                    ]),
                    Line::from(Span::styled(
                        format!("    → {}", b.recommendation),
                        Style::default().fg(THEME.muted),
                    )),
                ])
            })
            .collect()
    };
    frame.render_widget(List::new(items).block(panel("Bottlenecks")), lanes[2]);
}
