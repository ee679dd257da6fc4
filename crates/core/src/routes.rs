//! The navigable view table.
//!
//! Each [`Route`] knows its canonical path and the chain of gates that
//! protects it. Public views (login, registration, not-found) have no
//! gates; every other view sits behind [`Gate::Authenticated`], and the
//! admin dashboard additionally behind [`Gate::Admin`].

use crate::guard::{evaluate_gates, Gate, GuardDecision};
use crate::session::SessionState;

const AUTHENTICATED: &[Gate] = &[Gate::Authenticated];
const ADMIN: &[Gate] = &[Gate::Authenticated, Gate::Admin];

/// A view of the client application.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Home,
    Leads,
    LeadDetail { id: String },
    Deals,
    Pipeline,
    Admin,
    NotFound,
}

impl Route {
    /// Map a path to a route.
    ///
    /// A query string, fragment and trailing slash are ignored. Unknown
    /// paths map to [`Route::NotFound`].
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["leads"] => Route::Leads,
            ["leads", id] => Route::LeadDetail {
                id: (*id).to_string(),
            },
            ["deals"] => Route::Deals,
            ["pipeline"] => Route::Pipeline,
            ["admin"] => Route::Admin,
            _ => Route::NotFound,
        }
    }

    /// Canonical path of the route.
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".into(),
            Route::Register => "/register".into(),
            Route::Home => "/".into(),
            Route::Leads => "/leads".into(),
            Route::LeadDetail { id } => format!("/leads/{id}"),
            Route::Deals => "/deals".into(),
            Route::Pipeline => "/pipeline".into(),
            Route::Admin => "/admin".into(),
            Route::NotFound => "/404".into(),
        }
    }

    /// Gates guarding this route, outermost first.
    pub fn gates(&self) -> &'static [Gate] {
        match self {
            Route::Login | Route::Register | Route::NotFound => &[],
            Route::Home
            | Route::Leads
            | Route::LeadDetail { .. }
            | Route::Deals
            | Route::Pipeline => AUTHENTICATED,
            Route::Admin => ADMIN,
        }
    }

    /// Decide whether this route may render for the given session.
    pub fn resolve(&self, session: &SessionState) -> GuardDecision {
        evaluate_gates(self.gates(), session)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// An entry of the top navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

impl NavLink {
    fn new(label: &'static str, route: Route) -> Self {
        Self { label, route }
    }
}

/// Navigation links visible for the given session.
///
/// Anonymous visitors only see Home; authenticated users see the CRM
/// sections, and admins additionally the admin dashboard.
pub fn nav_links(session: &SessionState) -> Vec<NavLink> {
    if !session.is_authenticated() {
        return vec![NavLink::new("Home", Route::Home)];
    }

    let mut links = vec![
        NavLink::new("Home", Route::Home),
        NavLink::new("Leads", Route::Leads),
        NavLink::new("Deals", Route::Deals),
        NavLink::new("Pipeline", Route::Pipeline),
    ];
    if session.is_admin() {
        links.push(NavLink::new("Admin", Route::Admin));
    }
    links
}
