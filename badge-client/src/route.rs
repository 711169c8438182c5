//! Routes, the route guard and the navigator.
//!
//! [`decide`] is a pure function of the target and the session presence.
//! [`Navigator`] evaluates it on every navigation attempt; decisions are
//! never cached because the session can change between attempts.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::session::SessionView;

/// Client-side navigable surfaces
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Root,
    /// `/login`
    Login,
    /// `/generator`
    Generator,
    /// `/employee/:id`
    Employee(String),
    /// Any other path
    Unknown(String),
}

/// Protection requirement of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    Public,
    Protected,
}

/// Outcome of the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(Route),
}

impl Route {
    /// Parse a path such as `/employee/42`
    pub fn parse(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Root,
            ["login"] => Route::Login,
            ["generator"] => Route::Generator,
            ["employee", id] => Route::Employee((*id).to_string()),
            _ => Route::Unknown(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Generator => "/generator".to_string(),
            Route::Employee(id) => format!("/employee/{}", id),
            Route::Unknown(path) => path.clone(),
        }
    }

    pub fn protection(&self) -> Protection {
        match self {
            Route::Generator => Protection::Protected,
            _ => Protection::Public,
        }
    }

    /// Identifier carried by `/employee/:id`
    pub fn employee_id(&self) -> Option<&str> {
        match self {
            Route::Employee(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Route guard.
///
/// `/` and unknown paths always lead to the login surface. Protected routes
/// need a session; public routes are always allowed.
pub fn decide(route: &Route, session_present: bool) -> Decision {
    match route {
        Route::Root | Route::Unknown(_) => Decision::Redirect(Route::Login),
        _ => match route.protection() {
            Protection::Public => Decision::Allow,
            Protection::Protected if session_present => Decision::Allow,
            Protection::Protected => Decision::Redirect(Route::Login),
        },
    }
}

// ============================================================================
// Navigator
// ============================================================================

#[derive(Debug)]
struct NavState {
    current: Route,
    history: Vec<Route>,
}

/// Shared navigation state.
///
/// Cloning yields another handle on the same state.
#[derive(Debug, Clone)]
pub struct Navigator {
    session: SessionView,
    state: Arc<Mutex<NavState>>,
}

impl Navigator {
    /// Start on `/`, which itself resolves to the login surface
    pub fn new(session: SessionView) -> Self {
        let navigator = Self {
            session,
            state: Arc::new(Mutex::new(NavState {
                current: Route::Root,
                history: Vec::new(),
            })),
        };
        navigator.navigate(Route::Root);
        navigator
    }

    pub fn current(&self) -> Route {
        self.state.lock().current.clone()
    }

    /// Every route landed on, oldest first
    pub fn history(&self) -> Vec<Route> {
        self.state.lock().history.clone()
    }

    /// Attempt to navigate, following guard redirects.
    ///
    /// Returns the route actually landed on.
    pub fn navigate(&self, target: Route) -> Route {
        let mut landed = target;
        // Redirects only ever point at public routes, two hops suffice.
        for _ in 0..2 {
            match decide(&landed, self.session.has_session()) {
                Decision::Allow => break,
                Decision::Redirect(next) => {
                    tracing::debug!(from = %landed, to = %next, "Route guard redirect");
                    landed = next;
                }
            }
        }

        let mut state = self.state.lock();
        state.current = landed.clone();
        state.history.push(landed.clone());
        landed
    }

    /// Force a transition to the login surface.
    ///
    /// Does nothing when already there, so concurrent authorization
    /// failures navigate once. Returns `true` when a transition happened.
    pub fn force_login(&self) -> bool {
        let mut state = self.state.lock();
        if state.current == Route::Login {
            return false;
        }
        tracing::info!(from = %state.current, "Redirecting to login");
        state.current = Route::Login;
        state.history.push(Route::Login);
        true
    }
}
