use ratatui::{
    prelude::*,
    style::Stylize,
    text::{Line, Span},
    widgets::{Cell, List, ListItem, Row},
};

use super::{rows, split_columns};
use crate::metrics::{ConflictStatus, FactionMetrics, RelationshipStatus};
use crate::ui::THEME;
use crate::ui::components::{
    MetricsCard, columns, data_table, format_currency, format_number, heat_bar, panel,
};

fn relationship_color(status: RelationshipStatus) -> Color {
    match status {
        RelationshipStatus::Allied | RelationshipStatus::Friendly => THEME.good,
        RelationshipStatus::Neutral => THEME.muted,
        RelationshipStatus::Tense => THEME.warn,
        RelationshipStatus::Hostile | RelationshipStatus::AtWar => THEME.bad,
    }
}

pub fn render(frame: &mut Frame, area: Rect, metrics: &FactionMetrics) {
    let lanes = rows(
        area,
        [
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(12),
        ],
    );

    let wars = metrics
        .active_conflicts
        .iter()
        .filter(|c| c.status == ConflictStatus::Active)
        .count();
    let members: u64 = metrics.factions.iter().map(|f| f.member_count as u64).sum();
    let treasury: u64 = metrics.factions.iter().map(|f| f.treasury).sum();
    let cards = columns(lanes[0], 4);
    frame.render_widget(
        MetricsCard::new("Factions", metrics.total_factions.to_string())
            .subtitle(format!("{} members", format_number(members))),
        cards[0],
    );
    frame.render_widget(
        MetricsCard::new("Active Conflicts", wars.to_string())
            .subtitle(format!("{} tracked", metrics.active_conflicts.len()))
            .color(if wars > 0 { THEME.bad } else { THEME.good }),
        cards[1],
    );
    frame.render_widget(
        MetricsCard::new("Recent Treaties", metrics.recent_treaties.len().to_string()),
        cards[2],
    );
    frame.render_widget(
        MetricsCard::new("Combined Treasury", format_currency(treasury)),
        cards[3],
    );

    let faction_rows: Vec<Row> = metrics
        .factions
        .iter()
        .map(|f| {
            Row::new(vec![
                Cell::from(f.name.clone()).style(Style::default().fg(THEME.accent_b)),
                Cell::from(f.faction_type.label()),
                Cell::from(format_number(f.member_count as u64)),
                Cell::from(format!("{}/{}", f.cities_controlled, f.regions_controlled)),
                Cell::from(format_currency(f.treasury)),
                Cell::from(format!(
                    "{} {:>3}",
                    heat_bar(f.military_strength as f64, 100.0, 8),
                    f.military_strength
                )),
                Cell::from(f.technology_level.to_string()),
                Cell::from(format!("{:+}", f.reputation)),
                Cell::from(f.active_goals.join(", ")),
            ])
        })
        .collect();
    frame.render_widget(
        data_table(
            "Factions",
            [
                "Faction", "Type", "Members", "Cities/Reg.", "Treasury", "Military", "Tech",
                "Rep.", "Goals",
            ],
            faction_rows,
            [
                Constraint::Length(18),
                Constraint::Length(9),
                Constraint::Length(8),
                Constraint::Length(11),
                Constraint::Length(9),
                Constraint::Length(13),
                Constraint::Length(5),
                Constraint::Length(5),
                Constraint::Min(14),
            ],
        ),
        lanes[1],
    );

    let bottom = split_columns(
        lanes[2],
        [
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ],
    );

    let conflicts: Vec<ListItem> = metrics
        .active_conflicts
        .iter()
        .map(|c| {
            let status = match c.status {
                ConflictStatus::Active => Span::styled("active", Style::default().fg(THEME.bad)),
                ConflictStatus::Ceasefire => {
                    Span::styled("ceasefire", Style::default().fg(THEME.warn))
                }
                ConflictStatus::Concluded => {
                    Span::styled("concluded", Style::default().fg(THEME.muted))
                }
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(c.conflict_type.label().to_uppercase(), Style::default().bold()),
                    Span::raw(format!(" {} ", c.factions.join(" vs "))),
                    status,
                ]),
                Line::from(Span::styled(
                    format!(
                        "  {} casualties · {}",
                        format_number(c.casualties as u64),
                        c.territories_disputed.join(", ")
                    ),
                    Style::default().fg(THEME.muted),
                )),
            ])
        })
        .collect();
    frame.render_widget(List::new(conflicts).block(panel("Active Conflicts")), bottom[0]);

    let relations: Vec<ListItem> = metrics
        .relationship_matrix
        .iter()
        .map(|r| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ↔ {} ", r.faction1, r.faction2)),
                Span::styled(
                    format!("{:+} {}", r.standing, r.status.label()),
                    Style::default().fg(relationship_color(r.status)),
                ),
            ]))
        })
        .collect();
    frame.render_widget(List::new(relations).block(panel("Relationships")), bottom[1]);

    let treaties: Vec<ListItem> = metrics
        .recent_treaties
        .iter()
        .map(|t| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(t.event_type.label(), Style::default().fg(THEME.accent_a).bold()),
                    Span::raw(format!(" {}", t.factions.join(", "))),
                ]),
                Line::from(Span::styled(
                    format!("  {}", t.description),
                    Style::default().fg(THEME.muted),
                )),
            ])
        })
        .collect();
    frame.render_widget(List::new(treaties).block(panel("Diplomacy")), bottom[2]);
}
