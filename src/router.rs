use std::sync::Arc;

use tokio::sync::watch;

use crate::query::QueryKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Overview,
    World,
    Players,
    Cities,
    Economy,
    Factions,
    Server,
    Simulation,
    Battles,
    Settings,
    Login,
}

impl Route {
    /// Tab order in the navigation bar. Login is reachable but never tabbed.
    pub const TABS: [Route; 10] = [
        Route::Overview,
        Route::World,
        Route::Players,
        Route::Cities,
        Route::Economy,
        Route::Factions,
        Route::Server,
        Route::Simulation,
        Route::Battles,
        Route::Settings,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Overview => "/admin/overview",
            Route::World => "/admin/world",
            Route::Players => "/admin/players",
            Route::Cities => "/admin/cities",
            Route::Economy => "/admin/economy",
            Route::Factions => "/admin/factions",
            Route::Server => "/admin/server",
            Route::Simulation => "/admin/simulation",
            Route::Battles => "/admin/battles",
            Route::Settings => "/admin/settings",
            Route::Login => "/login",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Overview => "Overview",
            Route::World => "World",
            Route::Players => "Players",
            Route::Cities => "Cities",
            Route::Economy => "Economy",
            Route::Factions => "Factions",
            Route::Server => "Server",
            Route::Simulation => "Simulation",
            Route::Battles => "Battles",
            Route::Settings => "Settings",
            Route::Login => "Login",
        }
    }

    /// Maps a path to a route. Query strings and trailing slashes are ignored;
    /// `/`, `/admin` and anything unknown land on the overview.
    pub fn resolve(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        Self::TABS
            .iter()
            .chain(std::iter::once(&Route::Login))
            .find(|route| route.path() == path)
            .copied()
            .unwrap_or(Route::Overview)
    }

    /// The payload a page polls; settings and login poll nothing.
    pub fn query_key(&self) -> Option<QueryKey> {
        match self {
            Route::Overview => Some(QueryKey::Overview),
            Route::World => Some(QueryKey::WorldSimulation),
            Route::Players => Some(QueryKey::PlayerMetrics),
            Route::Cities => Some(QueryKey::CityMetrics),
            Route::Economy => Some(QueryKey::EconomicMetrics),
            Route::Factions => Some(QueryKey::FactionMetrics),
            Route::Server => Some(QueryKey::ServerMetrics),
            Route::Simulation => Some(QueryKey::SimulationPerformance),
            Route::Battles => Some(QueryKey::BattleMetrics),
            Route::Settings | Route::Login => None,
        }
    }

    pub fn requires_session(&self) -> bool {
        *self != Route::Login
    }

    fn tab_index(&self) -> Option<usize> {
        Self::TABS.iter().position(|r| r == self)
    }

    pub fn next(&self) -> Route {
        match self.tab_index() {
            Some(i) => Self::TABS[(i + 1) % Self::TABS.len()],
            None => Route::Overview,
        }
    }

    pub fn prev(&self) -> Route {
        match self.tab_index() {
            Some(i) => Self::TABS[(i + Self::TABS.len() - 1) % Self::TABS.len()],
            None => Route::Overview,
        }
    }

    /// Digit hotkeys `1`..`9` then `0` for the tenth tab.
    pub fn from_hotkey(c: char) -> Option<Route> {
        let index = match c {
            '1'..='9' => c as usize - '1' as usize,
            '0' => 9,
            _ => return None,
        };
        Self::TABS.get(index).copied()
    }
}

/// Cloneable handle for requesting navigation. The shell watches the
/// receiving side and swaps the mounted page when the route changes.
#[derive(Clone)]
pub struct Navigator {
    tx: Arc<watch::Sender<Route>>,
}

impl Navigator {
    pub fn new(initial: Route) -> (Self, watch::Receiver<Route>) {
        let (tx, rx) = watch::channel(initial);
        (Self { tx: Arc::new(tx) }, rx)
    }

    pub fn navigate(&self, route: Route) {
        self.tx.send_replace(route);
    }

    pub fn navigate_path(&self, path: &str) -> Route {
        let route = Route::resolve(path);
        self.navigate(route);
        route
    }

    pub fn current(&self) -> Route {
        *self.tx.borrow()
    }
}
