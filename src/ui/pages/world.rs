use ratatui::{
    prelude::*,
    style::Stylize,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Wrap},
};

use super::{rows, split_columns};
use crate::metrics::{EncounterOutcome, Severity, WorldSimulationMetrics};
use crate::ui::THEME;
use crate::ui::components::{
    BarChartCard, MetricsCard, columns, data_table, format_currency, format_number, health_color,
    panel, relative_time,
};

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Low => THEME.muted,
        Severity::Medium => THEME.accent_a,
        Severity::High => THEME.warn,
        Severity::Critical => THEME.bad,
    }
}

pub fn render(frame: &mut Frame, area: Rect, metrics: &WorldSimulationMetrics) {
    let lanes = rows(
        area,
        [
            Constraint::Length(5),
            Constraint::Length(12),
            Constraint::Min(8),
        ],
    );

    let state = &metrics.world_state;
    let cards = columns(lanes[0], 5);
    frame.render_widget(
        MetricsCard::new("World Date", state.current_date.formatted.clone())
            .subtitle(format!("{} active regions", state.active_regions)),
        cards[0],
    );
    frame.render_widget(
        MetricsCard::new("Population", format_number(state.total_population)),
        cards[1],
    );
    frame.render_widget(
        MetricsCard::new("Economic Stability", format!("{}%", state.economic_stability))
            .subtitle(format!("prosperity {}%", state.overall_prosperity))
            .color(health_color(state.economic_stability)),
        cards[2],
    );
    frame.render_widget(
        MetricsCard::new("Threat Level", format!("{}%", state.threat_level)).color(
            health_color(100u32.saturating_sub(state.threat_level)),
        ),
        cards[3],
    );
    frame.render_widget(
        MetricsCard::new("Technology", format!("{}%", state.technology_progress)),
        cards[4],
    );

    let middle = split_columns(
        lanes[1],
        [Constraint::Percentage(40), Constraint::Percentage(60)],
    );
    let bars = metrics
        .events_by_type
        .iter()
        .map(|e| (e.event_type.replace('_', " "), e.count as u64))
        .collect();
    frame.render_widget(BarChartCard::new("Events by Type", bars), middle[0]);

    let now = chrono::Local::now();
    let event_rows: Vec<Row> = metrics
        .recent_events
        .iter()
        .map(|event| {
            Row::new(vec![
                Cell::from(relative_time(&event.timestamp, now)),
                Cell::from(event.event_type.key().replace('_', " ")),
                Cell::from(event.severity.label())
                    .style(Style::default().fg(severity_color(event.severity))),
                Cell::from(event.title.clone()),
                Cell::from(event.location.clone()),
                Cell::from(event.impact.clone()),
            ])
        })
        .collect();
    frame.render_widget(
        data_table(
            "Recent Events",
            ["When", "Type", "Severity", "Title", "Location", "Impact"],
            event_rows,
            [
                Constraint::Length(8),
                Constraint::Length(13),
                Constraint::Length(8),
                Constraint::Percentage(30),
                Constraint::Length(14),
                Constraint::Min(10),
            ],
        ),
        middle[1],
    );

    let bottom = split_columns(
        lanes[2],
        [
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ],
    );

    let disasters = &metrics.disaster_impact;
    let mut disaster_lines = vec![
        Line::from(vec![
            Span::styled("Total ", Style::default().fg(THEME.muted)),
            Span::styled(disasters.total_disasters.to_string(), Style::default().bold()),
            Span::styled("  lost ", Style::default().fg(THEME.muted)),
            Span::styled(
                format_number(disasters.population_lost as u64),
                Style::default().fg(THEME.bad),
            ),
            Span::styled("  damage ", Style::default().fg(THEME.muted)),
            Span::raw(format_currency(disasters.economic_damage)),
        ]),
    ];
    disaster_lines.extend(disasters.disasters_by_type.iter().map(|d| {
        Line::from(format!("  {:<12}{:>4}", d.kind, d.count))
    }));
    disaster_lines.push(Line::from(Span::styled(
        format!("Affected: {}", disasters.cities_affected.join(", ")),
        Style::default().fg(THEME.warn),
    )));
    frame.render_widget(
        Paragraph::new(disaster_lines)
            .wrap(Wrap { trim: true })
            .block(panel("Disaster Impact")),
        bottom[0],
    );

    let discovery_lines: Vec<Line> = metrics
        .discoveries
        .iter()
        .flat_map(|d| {
            [
                Line::from(vec![
                    Span::styled(d.name.clone(), Style::default().fg(THEME.accent_b).bold()),
                    Span::styled(
                        format!("  {} · {}", d.discovery_type.label(), d.location),
                        Style::default().fg(THEME.muted),
                    ),
                ]),
                Line::from(format!(
                    "  by {} · value {} · {}",
                    d.discovered_by,
                    format_currency(d.value),
                    relative_time(&d.timestamp, now)
                )),
                Line::from(Span::styled(
                    format!("  {}", d.description),
                    Style::default().fg(THEME.muted),
                )),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(discovery_lines)
            .wrap(Wrap { trim: false })
            .block(panel("Discoveries")),
        bottom[1],
    );

    let monsters = &metrics.monster_activity;
    let mut monster_lines = vec![Line::from(vec![
        Span::styled("Monsters ", Style::default().fg(THEME.muted)),
        Span::styled(format_number(monsters.total_monsters as u64), Style::default().bold()),
        Span::styled("  spawns ", Style::default().fg(THEME.muted)),
        Span::raw(monsters.active_spawns.to_string()),
    ])];
    if !monsters.dangerous_regions.is_empty() {
        monster_lines.push(Line::from(Span::styled(
            format!("Dangerous: {}", monsters.dangerous_regions.join(", ")),
            Style::default().fg(THEME.bad),
        )));
    }
    for encounter in &monsters.recent_encounters {
        let outcome = match encounter.outcome {
            EncounterOutcome::Ongoing => Span::styled("ongoing", Style::default().fg(THEME.warn)),
            EncounterOutcome::Defeated => {
                Span::styled("defeated", Style::default().fg(THEME.good))
            }
            EncounterOutcome::Fled => Span::styled("fled", Style::default().fg(THEME.muted)),
        };
        monster_lines.push(Line::from(vec![
            Span::raw(format!(
                "  {} (threat {}) at {} ",
                encounter.monster_type, encounter.threat_level, encounter.location
            )),
            outcome,
        ]));
    }
    for trend in &monsters.spawning_trends {
        monster_lines.push(Line::from(format!(
            "  {} {:<12} {:.1}/h  avg threat {:.1}",
            trend.trend.arrow(),
            trend.region,
            trend.spawn_rate,
            trend.average_threat
        )));
    }
    frame.render_widget(
        Paragraph::new(monster_lines)
            .wrap(Wrap { trim: false })
            .block(panel("Monster Activity")),
        bottom[2],
    );
}
