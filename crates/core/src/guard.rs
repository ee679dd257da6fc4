//! Access guards for subtrees of the view hierarchy.
//!
//! A guard is a pure function of the current [`SessionState`]. It never
//! navigates by itself: it returns a [`GuardDecision`] and the router acts
//! on it. Decisions are recomputed on every render and never cached, so a
//! logout on a guarded page flips the decision the next time it is asked.

use crate::routes::Route;
use crate::session::SessionState;

/// A navigation the router should perform instead of rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    /// Replace the current history entry rather than pushing a new one.
    pub replace: bool,
}

impl Redirect {
    /// A redirect that replaces history, so "back" cannot return to the
    /// page that was denied.
    pub fn replace(to: Route) -> Self {
        Self { to, replace: true }
    }
}

/// Outcome of evaluating a guard against a session snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Hydration has not finished; render a loading indicator.
    Pending,
    /// Render the guarded subtree.
    Allow,
    /// Do not render; redirect instead.
    Deny(Redirect),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// The two gates a subtree can sit behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Any session with a token.
    Authenticated,
    /// A session whose user has the admin role. Only meaningful nested
    /// under [`Gate::Authenticated`].
    Admin,
}

impl Gate {
    pub fn evaluate(self, session: &SessionState) -> GuardDecision {
        if session.is_loading() {
            return GuardDecision::Pending;
        }

        match self {
            Gate::Authenticated if session.is_authenticated() => GuardDecision::Allow,
            Gate::Authenticated => GuardDecision::Deny(Redirect::replace(Route::Login)),
            Gate::Admin if session.is_admin() => GuardDecision::Allow,
            Gate::Admin => GuardDecision::Deny(Redirect::replace(Route::Home)),
        }
    }
}

/// Evaluate a chain of nested gates, outermost first.
///
/// The first gate that does not allow decides the outcome. An empty chain
/// allows.
pub fn evaluate_gates(gates: &[Gate], session: &SessionState) -> GuardDecision {
    gates
        .iter()
        .map(|gate| gate.evaluate(session))
        .find(|decision| !decision.is_allowed())
        .unwrap_or(GuardDecision::Allow)
}
