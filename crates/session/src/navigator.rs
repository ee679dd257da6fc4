//! History-keeping router glue.
//!
//! The navigator owns a history stack of routes and turns guard decisions
//! into what should be on screen. Denials replace the current history
//! entry, so "back" never returns to a page the user was bounced from.
//! Nothing is cached between renders: every call re-evaluates the current
//! route against the session snapshot it is given.

use crm_core::{GuardDecision, Route, SessionState};

/// Upper bound on chained guard redirects within one render.
const MAX_REDIRECTS: usize = 4;

/// What the router should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// The session is still hydrating; show a loading indicator.
    Loading,
    Page(Route),
}

#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<Route>,
}

impl Navigator {
    /// A navigator whose history starts at `initial`.
    pub fn new(initial: Route) -> Self {
        Self {
            history: vec![initial],
        }
    }

    pub fn current(&self) -> &Route {
        // History is never empty: it starts with one entry and `back`
        // refuses to pop the last one.
        &self.history[self.history.len() - 1]
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Push the route for `path` and render it.
    pub fn navigate(&mut self, path: &str, session: &SessionState) -> View {
        self.push(Route::parse(path), session)
    }

    pub fn push(&mut self, route: Route, session: &SessionState) -> View {
        self.history.push(route);
        self.render(session)
    }

    /// Go back one entry and render it. Returns `None` at the start of
    /// history.
    pub fn back(&mut self, session: &SessionState) -> Option<View> {
        if self.history.len() <= 1 {
            return None;
        }
        self.history.pop();
        Some(self.render(session))
    }

    /// Render the current entry against `session`, following guard
    /// redirects.
    pub fn render(&mut self, session: &SessionState) -> View {
        for _ in 0..=MAX_REDIRECTS {
            let route = self.current().clone();
            match route.resolve(session) {
                GuardDecision::Pending => return View::Loading,
                GuardDecision::Allow => return View::Page(route),
                GuardDecision::Deny(redirect) => {
                    tracing::debug!(from = %route, to = %redirect.to, "Guard redirect");
                    if redirect.replace {
                        self.history.pop();
                    }
                    self.history.push(redirect.to);
                }
            }
        }

        tracing::warn!(route = %self.current(), "Too many guard redirects");
        View::Page(Route::NotFound)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

#[cfg(test)]
mod tests {
    use crm_core::{Role, User};

    use super::*;

    fn session(role: Role) -> SessionState {
        SessionState::authenticated(
            "t",
            User {
                id: "1".into(),
                name: "Ann".into(),
                email: "a@x.com".into(),
                role,
            },
        )
    }

    #[test]
    fn anonymous_visit_is_replaced_by_login() {
        let mut nav = Navigator::new(Route::Login);

        let view = nav.navigate("/leads", &SessionState::anonymous());

        assert_eq!(view, View::Page(Route::Login));
        // The denied /leads entry was replaced, not stacked.
        assert_eq!(nav.history(), [Route::Login, Route::Login]);
    }

    #[test]
    fn back_does_not_return_to_denied_page() {
        let mut nav = Navigator::new(Route::Leads);
        let user = session(Role::User);

        assert_eq!(nav.navigate("/admin", &user), View::Page(Route::Home));
        assert_eq!(nav.history(), [Route::Leads, Route::Home]);

        assert_eq!(nav.back(&user), Some(View::Page(Route::Leads)));
        assert_eq!(nav.back(&user), None);
    }

    #[test]
    fn loading_renders_no_redirect() {
        let mut nav = Navigator::default();

        let view = nav.navigate("/admin", &SessionState::loading());

        assert_eq!(view, View::Loading);
        assert_eq!(nav.current(), &Route::Admin);
    }

    #[test]
    fn pending_route_resolves_once_hydrated() {
        let mut nav = Navigator::default();
        assert_eq!(nav.navigate("/admin", &SessionState::loading()), View::Loading);

        assert_eq!(nav.render(&session(Role::Admin)), View::Page(Route::Admin));
    }

    #[test]
    fn logout_flips_guarded_page_on_next_render() {
        let mut nav = Navigator::default();
        assert_eq!(
            nav.navigate("/leads/9", &session(Role::User)),
            View::Page(Route::LeadDetail { id: "9".into() })
        );

        assert_eq!(nav.render(&SessionState::anonymous()), View::Page(Route::Login));
    }

    #[test]
    fn unknown_path_renders_not_found() {
        let mut nav = Navigator::default();
        assert_eq!(
            nav.navigate("/nope", &SessionState::anonymous()),
            View::Page(Route::NotFound)
        );
    }
}
