use ratatui::{
    prelude::*,
    style::Stylize,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::app::{App, LoginField};
use crate::config::APP_NAME;
use crate::ui::THEME;
use crate::ui::components::panel;

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn input_line<'a>(label: &'a str, value: String, focused: bool) -> Line<'a> {
    let marker = if focused { "▸ " } else { "  " };
    let style = if focused {
        Style::default().fg(THEME.accent_a).bold()
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(THEME.accent_a)),
        Span::styled(format!("{label:<10}"), Style::default().fg(THEME.muted)),
        Span::styled(format!("[{value:<24}]"), style),
    ])
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let card = centered(area, 56, 12);
    frame.render_widget(Clear, card);

    if !app.is_remote() {
        let lines = vec![
            Line::from(Span::styled(APP_NAME, Style::default().fg(THEME.accent_b).bold())),
            Line::from(""),
            Line::from("The dashboard is showing mock data; no sign-in is needed."),
            Line::from(Span::styled(
                "Start with --source remote to connect to a metrics API.",
                Style::default().fg(THEME.muted),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .block(panel("Sign in")),
            card,
        );
        return;
    }

    let form = &app.login;
    let masked = "•".repeat(form.password.chars().count());
    let mut lines = vec![
        Line::from(Span::styled(APP_NAME, Style::default().fg(THEME.accent_b).bold()))
            .alignment(Alignment::Center),
        Line::from(Span::styled(
            "Administrator access required",
            Style::default().fg(THEME.muted),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        input_line("Username", form.username.clone(), form.focus == LoginField::Username),
        input_line("Password", masked, form.focus == LoginField::Password),
        Line::from(""),
    ];
    if form.pending {
        lines.push(Line::from(Span::styled(
            "Signing in…",
            Style::default().fg(THEME.warn),
        )));
    } else if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(THEME.bad),
        )));
    }
    lines.push(Line::from(Span::styled(
        format!("API {}", app.config.api_url("")),
        Style::default().fg(THEME.muted),
    )));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(panel("Sign in")),
        card,
    );
}
