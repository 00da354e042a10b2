mod battles;
mod cities;
mod economy;
mod factions;
mod login;
mod overview;
mod players;
mod server;
mod settings;
mod simulation;
mod world;

use ratatui::prelude::*;

use super::components::{render_error, render_skeleton};
use crate::app::App;
use crate::query::{MetricsPayload, QueryState};
use crate::router::Route;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    match app.route() {
        Route::Settings => settings::render(frame, area, app),
        Route::Login => login::render(frame, area, app),
        route => match app.current_query() {
            Some(state) => render_query(frame, area, route, &state),
            None => render_skeleton(frame, area, route.title()),
        },
    }
}

fn render_query(frame: &mut Frame, area: Rect, route: Route, state: &QueryState) {
    let Some(payload) = state.data.as_deref() else {
        if state.is_loading() || state.is_fetching {
            render_skeleton(frame, area, route.title());
        } else {
            let error = state.error.as_deref().unwrap_or("no data");
            render_error(frame, area, route.title(), error);
        }
        return;
    };

    match payload {
        MetricsPayload::Overview(metrics) => overview::render(frame, area, metrics, state),
        MetricsPayload::World(metrics) => world::render(frame, area, metrics),
        MetricsPayload::Players(metrics) => players::render(frame, area, metrics),
        MetricsPayload::Cities(metrics) => cities::render(frame, area, metrics),
        MetricsPayload::Economy(metrics) => economy::render(frame, area, metrics),
        MetricsPayload::Factions(metrics) => factions::render(frame, area, metrics),
        MetricsPayload::Server(metrics) => server::render(frame, area, metrics),
        MetricsPayload::Simulation(metrics) => simulation::render(frame, area, metrics),
        MetricsPayload::Battles(metrics) => battles::render(frame, area, metrics),
    }
}

/// Vertical split helper shared by the pages.
fn rows<const N: usize>(area: Rect, constraints: [Constraint; N]) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area)
}

fn split_columns<const N: usize>(area: Rect, constraints: [Constraint; N]) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use serde::{Serialize, de::DeserializeOwned};
    use serde_json::Value;

    use super::*;
    use crate::metrics::SystemStatus;
    use crate::mock::MockDataService;
    use crate::query::{QueryKey, QueryStatus, source::mock_payload};
    use crate::ui::THEME;

    const SIZES: [(u16, u16); 6] = [(1, 1), (12, 4), (40, 12), (80, 24), (160, 50), (250, 70)];

    fn loaded(payload: MetricsPayload) -> QueryState {
        QueryState {
            status: QueryStatus::Success,
            data: Some(Arc::new(payload)),
            version: 1,
            ..QueryState::default()
        }
    }

    fn draw(width: u16, height: u16, route: Route, state: &QueryState) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                render_query(frame, area, route, state);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn screen(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf.get(x, y).symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Column of the first cell run in row `y` spelling `needle`.
    fn find_in_row(buf: &Buffer, y: u16, needle: &str) -> Option<u16> {
        let chars: Vec<String> = needle.chars().map(String::from).collect();
        let width = buf.area.width;
        (0..width.saturating_sub(chars.len() as u16 - 1)).find(|&x| {
            chars
                .iter()
                .enumerate()
                .all(|(offset, ch)| buf.get(x + offset as u16, y).symbol() == ch)
        })
    }

    fn row_of(buf: &Buffer, needle: &str) -> Option<u16> {
        (0..buf.area.height).find(|&y| find_in_row(buf, y, needle).is_some())
    }

    fn route_for(key: QueryKey) -> Route {
        Route::TABS
            .into_iter()
            .find(|route| route.query_key() == Some(key))
            .unwrap()
    }

    /// Empties every list and zeroes every number while keeping the shape.
    fn hollow(value: &mut Value) {
        match value {
            Value::Array(items) => items.clear(),
            Value::Object(fields) => fields.values_mut().for_each(hollow),
            Value::Number(_) => *value = Value::from(0),
            _ => {}
        }
    }

    fn hollowed<T: Serialize + DeserializeOwned>(metrics: &T) -> T {
        let mut value = serde_json::to_value(metrics).unwrap();
        hollow(&mut value);
        serde_json::from_value(value).unwrap()
    }

    fn sparse(payload: &MetricsPayload) -> MetricsPayload {
        match payload {
            MetricsPayload::Overview(m) => MetricsPayload::Overview(hollowed(m)),
            MetricsPayload::World(m) => MetricsPayload::World(hollowed(m)),
            MetricsPayload::Players(m) => MetricsPayload::Players(hollowed(m)),
            MetricsPayload::Server(m) => MetricsPayload::Server(hollowed(m)),
            MetricsPayload::Battles(m) => MetricsPayload::Battles(hollowed(m)),
            MetricsPayload::Cities(m) => MetricsPayload::Cities(hollowed(m)),
            MetricsPayload::Economy(m) => MetricsPayload::Economy(hollowed(m)),
            MetricsPayload::Factions(m) => MetricsPayload::Factions(hollowed(m)),
            MetricsPayload::Simulation(m) => MetricsPayload::Simulation(hollowed(m)),
        }
    }

    #[test]
    fn every_page_renders_full_and_sparse_payloads_at_any_size() {
        let data = MockDataService::with_seed(3);
        for key in QueryKey::ALL {
            let route = route_for(key);
            let full = mock_payload(&data, key);
            let states = [loaded(sparse(&full)), loaded(full)];
            for state in &states {
                for (width, height) in SIZES {
                    draw(width, height, route, state);
                }
            }
            let text = screen(&draw(160, 50, route, &states[1]));
            assert!(!text.contains("Loading…"), "{route:?} showed a skeleton");
            assert!(!text.contains("Failed to load"), "{route:?} showed an error");
        }
    }

    #[test]
    fn overview_banner_follows_system_status() {
        let data = MockDataService::with_seed(5);
        for status in [SystemStatus::Healthy, SystemStatus::Warning, SystemStatus::Critical] {
            let mut overview = data.overview();
            overview.system_status = status;
            let buf = draw(160, 40, Route::Overview, &loaded(MetricsPayload::Overview(overview)));
            let headline = status.headline();
            let y = row_of(&buf, headline).unwrap();
            let x = find_in_row(&buf, y, headline).unwrap();
            let expected = match status {
                SystemStatus::Healthy => THEME.good,
                SystemStatus::Warning => THEME.warn,
                SystemStatus::Critical => THEME.bad,
            };
            assert_eq!(buf.get(x, y).fg, expected);
        }
    }

    #[test]
    fn city_health_cells_use_the_threshold_colors() {
        let mut cities = MockDataService::with_seed(9).city_metrics();
        let samples = [
            ("Testhold", 85, THEME.good),
            ("Midmarsh", 45, THEME.warn),
            ("Lowfen", 20, THEME.bad),
        ];
        for (city, (name, health, _)) in cities.cities.iter_mut().zip(samples) {
            city.name = name.to_string();
            city.economic_health = health;
            city.production_efficiency = 61;
        }

        let buf = draw(220, 60, Route::Cities, &loaded(MetricsPayload::Cities(cities)));
        for (name, health, color) in samples {
            let y = row_of(&buf, name).unwrap();
            let x = find_in_row(&buf, y, &format!("{health}%")).unwrap();
            assert_eq!(buf.get(x, y).fg, color, "{name}");
        }
    }

    #[test]
    fn pending_first_fetch_shows_the_skeleton() {
        let pending = QueryState {
            status: QueryStatus::Loading,
            is_fetching: true,
            ..QueryState::default()
        };
        let text = screen(&draw(120, 30, Route::World, &pending));
        assert!(text.contains("Loading…"));
        assert!(!text.contains("Failed to load"));

        let retrying = QueryState {
            status: QueryStatus::Error,
            error: Some("connection refused".to_string()),
            is_fetching: true,
            ..QueryState::default()
        };
        assert!(screen(&draw(120, 30, Route::World, &retrying)).contains("Loading…"));
    }

    #[test]
    fn failed_first_fetch_shows_the_error() {
        let failed = QueryState {
            status: QueryStatus::Error,
            error: Some("connection refused".to_string()),
            failure_count: 3,
            ..QueryState::default()
        };
        let text = screen(&draw(120, 30, Route::Server, &failed));
        assert!(text.contains("Failed to load metrics"));
        assert!(text.contains("connection refused"));
        assert!(!text.contains("Loading…"));
    }

    #[test]
    fn stale_data_stays_on_screen_after_a_failure() {
        let mut state = loaded(mock_payload(&MockDataService::with_seed(2), QueryKey::Overview));
        state.status = QueryStatus::Error;
        state.error = Some("timeout".to_string());
        let text = screen(&draw(160, 40, Route::Overview, &state));
        assert!(text.contains("System Status"));
        assert!(!text.contains("Failed to load"));
    }
}
