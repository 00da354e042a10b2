use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row},
};

use super::{rows, split_columns};
use crate::metrics::BattleMetrics;
use crate::ui::THEME;
use crate::ui::components::{
    BarChartCard, MetricsCard, columns, data_table, format_number, format_percent, heat_bar,
    panel, relative_time,
};

fn format_seconds(seconds: u32) -> String {
    format!("{}m {:02}s", seconds / 60, seconds % 60)
}

pub fn render(frame: &mut Frame, area: Rect, metrics: &BattleMetrics) {
    let lanes = rows(
        area,
        [
            Constraint::Length(5),
            Constraint::Length(11),
            Constraint::Min(6),
        ],
    );

    let cards = columns(lanes[0], 4);
    frame.render_widget(
        MetricsCard::new("Total Battles", format_number(metrics.total_battles as u64)),
        cards[0],
    );
    frame.render_widget(
        MetricsCard::new("Active Battles", metrics.active_battles.to_string())
            .color(THEME.warn),
        cards[1],
    );
    frame.render_widget(
        MetricsCard::new("Player Win Rate", format_percent(metrics.win_rate(), 1))
            .subtitle(format!("{} victories", format_number(metrics.player_victories as u64)))
            .color(THEME.good),
        cards[2],
    );
    frame.render_widget(
        MetricsCard::new("Avg Duration", format_seconds(metrics.average_duration)),
        cards[3],
    );

    let middle = split_columns(
        lanes[1],
        [
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ],
    );

    let damage = &metrics.damage_distribution;
    let total = damage.total.max(1) as f64;
    let mut damage_lines: Vec<Line> = [
        ("Physical", damage.physical, THEME.accent_b),
        ("Magical", damage.magical, THEME.accent_a),
        ("Elemental", damage.elemental, THEME.good),
        ("True", damage.true_damage, THEME.bad),
    ]
    .into_iter()
    .map(|(label, value, color)| {
        Line::from(vec![
            Span::styled(format!("{label:<10}"), Style::default().fg(THEME.muted)),
            Span::styled(heat_bar(value as f64, total, 12), Style::default().fg(color)),
            Span::raw(format!(" {:>5.1}%", value as f64 / total * 100.0)),
        ])
    })
    .collect();
    damage_lines.push(Line::from(Span::styled(
        format!("Total {}", format_number(damage.total)),
        Style::default().fg(THEME.muted),
    )));
    frame.render_widget(
        Paragraph::new(damage_lines).block(panel("Damage Distribution")),
        middle[0],
    );

    let bars = metrics
        .battles_by_type
        .iter()
        .map(|b| (b.battle_type.clone(), b.count as u64))
        .collect();
    frame.render_widget(BarChartCard::new("Battles by Type", bars), middle[1]);

    let skill_rows: Vec<Row> = metrics
        .skill_usage
        .iter()
        .map(|s| {
            Row::new(vec![
                s.skill_name.clone(),
                format_number(s.uses as u64),
                s.average_damage.to_string(),
                format_percent(s.hit_rate, 1),
            ])
        })
        .collect();
    frame.render_widget(
        data_table(
            "Top Skills",
            ["Skill", "Uses", "Avg dmg", "Hit"],
            skill_rows,
            [
                Constraint::Min(12),
                Constraint::Length(6),
                Constraint::Length(7),
                Constraint::Length(6),
            ],
        ),
        middle[2],
    );

    let bottom = split_columns(
        lanes[2],
        [Constraint::Percentage(35), Constraint::Percentage(65)],
    );
    let type_rows: Vec<Row> = metrics
        .battles_by_type
        .iter()
        .map(|b| {
            Row::new(vec![
                b.battle_type.clone(),
                format_number(b.count as u64),
                format_percent(b.win_rate, 1),
                format_seconds(b.average_duration),
            ])
        })
        .collect();
    frame.render_widget(
        data_table(
            "Type Statistics",
            ["Type", "Count", "Win", "Avg"],
            type_rows,
            [
                Constraint::Min(8),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Length(8),
            ],
        ),
        bottom[0],
    );

    let now = chrono::Local::now();
    let battle_rows: Vec<Row> = metrics
        .recent_battles
        .iter()
        .map(|b| {
            let color = if b.outcome == "victory" {
                THEME.good
            } else {
                THEME.bad
            };
            Row::new(vec![
                Cell::from(relative_time(&b.timestamp, now)),
                Cell::from(b.battle_type.clone()),
                Cell::from(b.participants.join(" vs ")),
                Cell::from(b.location.clone()),
                Cell::from(b.outcome.clone()).style(Style::default().fg(color)),
                Cell::from(format_seconds(b.duration)),
                Cell::from(format_number(b.total_damage)),
            ])
        })
        .collect();
    frame.render_widget(
        data_table(
            "Recent Battles",
            ["When", "Type", "Participants", "Location", "Outcome", "Duration", "Damage"],
            battle_rows,
            [
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Min(20),
                Constraint::Length(14),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(8),
            ],
        ),
        bottom[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_render_as_minutes_and_padded_seconds() {
        assert_eq!(format_seconds(0), "0m 00s");
        assert_eq!(format_seconds(125), "2m 05s");
    }
}
