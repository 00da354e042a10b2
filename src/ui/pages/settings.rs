use ratatui::{
    prelude::*,
    style::Stylize,
    text::{Line, Span},
    widgets::{Paragraph, Row, Wrap},
};

use super::split_columns;
use crate::app::App;
use crate::config::APP_VERSION;
use crate::query::{QueryKey, QueryStatus};
use crate::ui::THEME;
use crate::ui::components::{data_table, panel};

fn field<'a>(label: &'a str, value: String, color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:<18}"), Style::default().fg(THEME.muted)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn status_label(status: QueryStatus) -> (&'static str, Color) {
    match status {
        QueryStatus::Idle => ("idle", THEME.muted),
        QueryStatus::Loading => ("loading", THEME.warn),
        QueryStatus::Success => ("ok", THEME.good),
        QueryStatus::Error => ("error", THEME.bad),
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let halves = split_columns(
        area,
        [Constraint::Percentage(50), Constraint::Percentage(50)],
    );
    let config = &app.config;

    let env_color = if config.is_development() {
        THEME.warn
    } else {
        THEME.good
    };
    let user = match app.admin_session() {
        Some(session) => format!(
            "{} <{}> ({})",
            session.user.display_name(),
            session.user.email.as_deref().unwrap_or("no email"),
            session.user.role
        ),
        None if app.is_remote() => "signed out".to_string(),
        None => "not required in mock mode".to_string(),
    };
    let session_file = app
        .session()
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "in memory".to_string());

    let lines = vec![
        Line::from(Span::styled(
            "Dashboard",
            Style::default().fg(THEME.accent_b).bold(),
        )),
        field("Version", APP_VERSION.to_string(), Color::White),
        field("Environment", config.environment.clone(), env_color),
        field("Data source", config.data_source.label().to_string(), THEME.accent_a),
        field(
            "Refresh interval",
            format!("{}s", config.refresh_interval.as_secs()),
            Color::White,
        ),
        Line::from(""),
        Line::from(Span::styled("API", Style::default().fg(THEME.accent_b).bold())),
        field("Endpoint", config.api_url(""), Color::White),
        field("Debug logging", config.debug.to_string(), Color::White),
        field("Log file", config.log_file.display().to_string(), Color::White),
        Line::from(""),
        Line::from(Span::styled("Session", Style::default().fg(THEME.accent_b).bold())),
        field("User", user, THEME.accent_a),
        field("Session file", session_file, Color::White),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel("Settings")),
        halves[0],
    );

    let query_rows: Vec<Row> = QueryKey::ALL
        .iter()
        .map(|key| {
            let state = app.query_state(*key);
            let (label, color) = status_label(state.status);
            let updated = state
                .updated_wall
                .map(|ts| ts.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string());
            Row::new(vec![
                Span::raw(key.as_str()),
                Span::raw(app.source_origin(*key)),
                Span::styled(label, Style::default().fg(color)),
                Span::raw(updated),
            ])
        })
        .collect();
    frame.render_widget(
        data_table(
            "Data Sources",
            ["Query", "Origin", "Status", "Updated"],
            query_rows,
            [
                Constraint::Min(20),
                Constraint::Length(18),
                Constraint::Length(8),
                Constraint::Length(9),
            ],
        ),
        halves[1],
    );
}
