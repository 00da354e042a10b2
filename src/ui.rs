pub mod components;
mod pages;

use ratatui::{
    prelude::*,
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::app::{App, InputMode};
use crate::config::APP_NAME;
use crate::router::Route;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent_a: Color,
    pub accent_b: Color,
    pub border: Color,
    pub muted: Color,
    pub good: Color,
    pub warn: Color,
    pub bad: Color,
    pub surface: Color,
}

pub const THEME: Theme = Theme {
    accent_a: Color::Rgb(122, 162, 247),
    accent_b: Color::Rgb(224, 175, 104),
    border: Color::Rgb(65, 72, 104),
    muted: Color::Rgb(130, 137, 163),
    good: Color::Rgb(158, 206, 106),
    warn: Color::Rgb(224, 175, 104),
    bad: Color::Rgb(247, 118, 142),
    surface: Color::Rgb(26, 27, 38),
};

/// Draws the whole dashboard: header, tab bar, mounted page, footer.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(frame.size());

    render_header(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app.route());
    pages::render(frame, chunks[2], app);
    render_footer(frame, chunks[3], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(48)])
        .split(area);

    let mut left = vec![
        Span::styled(
            format!(" ⚔ {APP_NAME} "),
            Style::default().fg(THEME.surface).bg(THEME.accent_a).bold(),
        ),
        Span::raw(" "),
        Span::styled(
            app.route().title(),
            Style::default().fg(THEME.accent_b).bold(),
        ),
    ];
    if let Some(state) = app.current_query() {
        if let (Some(error), true) = (&state.error, state.data.is_some()) {
            left.push(Span::styled(
                format!("  ⚠ refresh failed ({}x): {error}", state.failure_count),
                Style::default().fg(THEME.warn),
            ));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(left)), halves[0]);

    let indicator = if app.is_fetching() {
        Span::styled("⟳ Updating", Style::default().fg(THEME.warn))
    } else {
        Span::styled("● Live", Style::default().fg(THEME.good))
    };
    let who = match (app.is_remote(), app.admin_session()) {
        (false, _) => Span::styled("mock data", Style::default().fg(THEME.muted)),
        (true, Some(session)) => Span::styled(
            format!("{} ({})  L logout", session.user.display_name(), session.user.role),
            Style::default().fg(THEME.accent_a),
        ),
        (true, None) => Span::styled("signed out  i login", Style::default().fg(THEME.bad)),
    };
    let right = Line::from(vec![indicator, Span::raw("  "), who, Span::raw(" ")])
        .alignment(Alignment::Right);
    frame.render_widget(Paragraph::new(right), halves[1]);
}

fn render_tabs(frame: &mut Frame, area: Rect, route: Route) {
    let titles: Vec<Line> = Route::TABS
        .iter()
        .enumerate()
        .map(|(idx, tab)| {
            let hotkey = (idx + 1) % 10;
            Line::from(vec![
                Span::styled(format!("{hotkey} "), Style::default().fg(THEME.muted)),
                Span::raw(tab.title()),
            ])
        })
        .collect();
    let selected = Route::TABS.iter().position(|tab| *tab == route);

    let mut tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(THEME.border)),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(THEME.accent_a).bold().underlined())
        .divider("│");
    if let Some(selected) = selected {
        tabs = tabs.select(selected);
    }
    frame.render_widget(tabs, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.input {
        InputMode::PathPrompt(buffer) => Line::from(vec![
            Span::styled(" go to: ", Style::default().fg(THEME.accent_b).bold()),
            Span::raw(buffer.clone()),
            Span::styled("▏", Style::default().fg(THEME.accent_a)),
            Span::styled("  Enter open · Esc cancel", Style::default().fg(THEME.muted)),
        ]),
        InputMode::Normal => {
            let hints = if app.route() == Route::Login && app.is_remote() {
                " Tab switch field · Enter submit · Esc clear · Ctrl-C quit"
            } else {
                " ←/→ tabs · 1-0 jump · : path · r refresh · L logout · q quit"
            };
            let mut spans = vec![Span::styled(hints, Style::default().fg(THEME.muted))];
            if let Some(status) = &app.status {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(status.clone(), Style::default().fg(THEME.accent_b)));
            }
            Line::from(spans)
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::config::{APP_VERSION, DashboardConfig, DataSourceMode};
    use crate::session::SessionStore;

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buf = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buf.get(x, y).symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn press(app: &mut App, keys: &str) {
        for c in keys.chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn remote_config() -> DashboardConfig {
        DashboardConfig {
            data_source: DataSourceMode::Remote,
            base_url: "http://127.0.0.1:9".to_string(),
            ..DashboardConfig::default()
        }
    }

    #[tokio::test]
    async fn shell_draws_header_tabs_and_footer() {
        let app = App::new(DashboardConfig::default(), SessionStore::in_memory()).unwrap();
        let text = screen(&app, 160, 40);
        assert!(text.contains(APP_NAME));
        assert!(text.contains("mock data"));
        assert!(text.contains("1 Overview"));
        assert!(text.contains("0 Settings"));
        assert!(text.contains("q quit"));
    }

    #[tokio::test]
    async fn footer_echoes_the_path_prompt() {
        let mut app = App::new(DashboardConfig::default(), SessionStore::in_memory()).unwrap();
        press(&mut app, ":admin/cit");
        let text = screen(&app, 120, 30);
        assert!(text.contains("go to: admin/cit"));
        assert!(!text.contains("q quit"));
    }

    #[tokio::test]
    async fn settings_tab_shows_the_version() {
        let mut app = App::new(DashboardConfig::default(), SessionStore::in_memory()).unwrap();
        press(&mut app, "0");
        app.tick();
        let text = screen(&app, 160, 40);
        assert!(text.contains(APP_VERSION));
        assert!(text.contains("Data Sources"));
    }

    #[tokio::test]
    async fn signed_out_remote_shell_shows_the_masked_login_form() {
        let mut app = App::new(remote_config(), SessionStore::in_memory()).unwrap();
        press(&mut app, "admin");
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        press(&mut app, "pw");

        let text = screen(&app, 140, 36);
        assert!(text.contains("signed out"));
        assert!(text.contains("Administrator access required"));
        assert!(text.contains("[admin"));
        assert!(text.contains("[••"));
        assert!(!text.contains("[pw"));
    }
}
