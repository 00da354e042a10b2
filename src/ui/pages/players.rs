use ratatui::{prelude::*, widgets::Row};

use super::{rows, split_columns};
use crate::metrics::PlayerMetrics;
use crate::ui::THEME;
use crate::ui::components::{
    MetricsCard, Series, TimeSeriesChart, columns, data_table, format_duration_minutes,
    format_number, time_label,
};

pub fn render(frame: &mut Frame, area: Rect, metrics: &PlayerMetrics) {
    let lanes = rows(
        area,
        [
            Constraint::Length(5),
            Constraint::Length(12),
            Constraint::Min(6),
        ],
    );

    let cards = columns(lanes[0], 4);
    frame.render_widget(
        MetricsCard::new("Active Players", format_number(metrics.active_players as u64))
            .subtitle(format!("{} characters", format_number(metrics.total_characters as u64))),
        cards[0],
    );
    frame.render_widget(
        MetricsCard::new("Total Sessions", format_number(metrics.total_sessions as u64)),
        cards[1],
    );
    let growth = if metrics.active_players == 0 {
        0.0
    } else {
        metrics.new_players as f64 / metrics.active_players as f64 * 100.0
    };
    frame.render_widget(
        MetricsCard::new("New Players", metrics.new_players.to_string())
            .trend(growth)
            .color(THEME.good),
        cards[2],
    );
    frame.render_widget(
        MetricsCard::new(
            "Avg Session",
            format_duration_minutes(metrics.average_session_duration),
        ),
        cards[3],
    );

    let middle = split_columns(
        lanes[1],
        [Constraint::Percentage(55), Constraint::Percentage(45)],
    );
    let timestamps = metrics
        .activity_by_hour
        .iter()
        .map(|h| h.timestamp.clone())
        .collect();
    let chart = TimeSeriesChart::new("Activity (24h)", timestamps)
        .series(Series {
            name: "active players",
            color: THEME.accent_a,
            values: metrics
                .activity_by_hour
                .iter()
                .map(|h| h.active_players as f64)
                .collect(),
        })
        .series(Series {
            name: "new sessions",
            color: THEME.accent_b,
            values: metrics
                .activity_by_hour
                .iter()
                .map(|h| h.new_sessions as f64)
                .collect(),
        });
    frame.render_widget(chart, middle[0]);

    let top_rows: Vec<Row> = metrics
        .top_players
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            Row::new(vec![
                format!("#{}", idx + 1),
                p.username.clone(),
                p.character_name.clone(),
                p.level.to_string(),
                format!("{}h", p.playtime),
                p.achievements.to_string(),
            ])
        })
        .collect();
    frame.render_widget(
        data_table(
            "Top Players",
            ["#", "User", "Character", "Lvl", "Played", "Ach."],
            top_rows,
            [
                Constraint::Length(3),
                Constraint::Length(10),
                Constraint::Min(12),
                Constraint::Length(4),
                Constraint::Length(7),
                Constraint::Length(5),
            ],
        ),
        middle[1],
    );

    let session_rows: Vec<Row> = metrics
        .recent_sessions
        .iter()
        .map(|s| {
            let status_color = if s.status == "online" {
                THEME.good
            } else {
                THEME.muted
            };
            Row::new(vec![
                s.username.clone(),
                s.character_name.clone(),
                s.level.to_string(),
                s.region.clone(),
                time_label(&s.login_time),
                format_duration_minutes(s.duration),
                format_number(s.actions as u64),
                s.status.clone(),
            ])
            .style(Style::default().fg(status_color))
        })
        .collect();
    frame.render_widget(
        data_table(
            "Recent Sessions",
            [
                "User", "Character", "Lvl", "Region", "Login", "Duration", "Actions", "Status",
            ],
            session_rows,
            [
                Constraint::Length(10),
                Constraint::Min(12),
                Constraint::Length(4),
                Constraint::Length(14),
                Constraint::Length(6),
                Constraint::Length(9),
                Constraint::Length(8),
                Constraint::Length(8),
            ],
        ),
        lanes[2],
    );
}
