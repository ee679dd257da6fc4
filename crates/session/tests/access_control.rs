//! Route access decisions driven by a live session store.
//!
//! Walks the scenarios a reader of the client cares about: reloads that
//! must not flash a denial, anonymous visitors, regular users on admin
//! pages, and logout while a guarded page is open.

use crm_api::{ApiClient, ClientConfig};
use crm_core::routes::nav_links;
use crm_core::Route;
use crm_session::{Navigator, SessionStore, TokenStore, View};
use crm_storage::MemoryStorage;
use crm_testkit::fixtures::{ann, bo, seeded, ANN_JSON};

fn session_over(storage: MemoryStorage) -> SessionStore {
    let (_api, writer) = ApiClient::new(&ClientConfig::default()).expect("client");
    SessionStore::new(TokenStore::new(storage.clone(), writer, false), storage)
}

/// Before hydration nothing is decided, even with a valid token stored.
#[test]
fn reload_shows_loading_then_page() {
    let mut session = session_over(seeded(Some("abc123"), Some(ANN_JSON)));
    let mut nav = Navigator::default();

    assert_eq!(nav.navigate("/admin", &session.state()), View::Loading);
    assert_eq!(nav.current(), &Route::Admin, "no redirect while loading");

    session.hydrate();
    assert_eq!(nav.render(&session.state()), View::Page(Route::Admin));
}

/// No cookie and no stored user: protected routes go to `/login`.
#[test]
fn anonymous_visitor_is_sent_to_login() {
    let mut session = session_over(MemoryStorage::new());
    session.hydrate();
    let mut nav = Navigator::default();

    assert_eq!(nav.navigate("/leads", &session.state()), View::Page(Route::Login));
    assert_eq!(nav.navigate("/admin", &session.state()), View::Page(Route::Login));
    assert_eq!(
        nav.navigate("/register", &session.state()),
        View::Page(Route::Register)
    );
}

/// Regular users are sent home from the admin dashboard, not to login.
#[test]
fn regular_user_is_sent_home_from_admin() {
    let mut session = session_over(MemoryStorage::new());
    session.hydrate();
    session.login("tok-2", bo());
    let mut nav = Navigator::default();

    assert_eq!(nav.navigate("/admin", &session.state()), View::Page(Route::Home));
    assert_eq!(nav.navigate("/pipeline", &session.state()), View::Page(Route::Pipeline));
}

/// Authenticated without a profile: CRM pages open, admin does not.
#[test]
fn token_without_profile_is_a_regular_session() {
    let mut session = session_over(seeded(Some("abc123"), Some("garbage")));
    session.hydrate();
    let mut nav = Navigator::default();

    assert_eq!(nav.navigate("/deals", &session.state()), View::Page(Route::Deals));
    assert_eq!(nav.navigate("/admin", &session.state()), View::Page(Route::Home));
    assert!(nav_links(&session.state()).iter().all(|l| l.route != Route::Admin));
}

/// Logging out on a guarded page flips it on the next render.
#[test]
fn logout_on_guarded_page_redirects_next_render() {
    let mut session = session_over(seeded(Some("abc123"), Some(ANN_JSON)));
    session.hydrate();
    let mut nav = Navigator::default();
    assert_eq!(nav.navigate("/admin", &session.state()), View::Page(Route::Admin));

    session.logout();

    assert_eq!(nav.render(&session.state()), View::Page(Route::Login));
    assert_eq!(nav.back(&session.state()), Some(View::Page(Route::Login)));
}

/// The navigation bar tracks the session.
#[test]
fn nav_links_track_session() {
    let mut session = session_over(MemoryStorage::new());
    session.hydrate();
    assert_eq!(nav_links(&session.state()).len(), 1);

    session.login("tok-1", ann());
    let links = nav_links(&session.state());
    assert_eq!(links.last().map(|l| &l.route), Some(&Route::Admin));
}
