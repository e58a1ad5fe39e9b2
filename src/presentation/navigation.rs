//! Route table and authentication guard.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::application::session::CredentialStore;
use crate::domain::ports::NavigationPort;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// One entry of the route table.
///
/// `:name` matches a single segment; a trailing `*` matches the rest of the
/// path, including nothing, so `/geo/*` also guards `/geo` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub pattern: &'static str,
    pub requires_auth: bool,
}

impl Route {
    const fn public(name: &'static str, pattern: &'static str) -> Self {
        Self {
            name,
            pattern,
            requires_auth: false,
        }
    }

    const fn protected(name: &'static str, pattern: &'static str) -> Self {
        Self {
            name,
            pattern,
            requires_auth: true,
        }
    }

    fn matches(&self, path: &str) -> bool {
        let mut pattern = segments(self.pattern);
        let mut path = segments(path);

        loop {
            match (pattern.next(), path.next()) {
                (None, None) => return true,
                (Some("*"), _) => return true,
                (Some(p), Some(s)) if p.starts_with(':') || p == s => {}
                _ => return false,
            }
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

const DEFAULT_ROUTES: &[Route] = &[
    Route::public("login", LOGIN_PATH),
    Route::protected("home", HOME_PATH),
    Route::protected("country-list", "/geo/countries"),
    Route::protected("country-detail", "/geo/countries/:id"),
    Route::protected("region-list", "/geo/regions"),
    Route::protected("city-list", "/geo/cities"),
    Route::protected("district-list", "/geo/districts"),
    Route::protected("channel-list", "/geo/channels"),
    Route::protected("outlet-list", "/geo/outlets"),
    Route::protected("geo", "/geo/*"),
    Route::protected("catalog", "/catalog/*"),
    Route::protected("visits", "/visits/*"),
    Route::protected("users", "/users/*"),
    Route::protected("analytics", "/analytics/*"),
];

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    /// Sign-in required; `redirect` is the full path to return to afterwards.
    RedirectToLogin { redirect: String },
    /// Already signed in; the login page is skipped.
    RedirectHome,
}

/// Guards every navigation against the session's authentication flag.
pub struct NavigationGate {
    session: Arc<CredentialStore>,
    routes: Vec<Route>,
    location: RwLock<Option<String>>,
    pending_redirect: RwLock<Option<String>>,
}

impl NavigationGate {
    #[must_use]
    pub fn new(session: Arc<CredentialStore>) -> Self {
        Self::with_routes(session, DEFAULT_ROUTES.to_vec())
    }

    #[must_use]
    pub fn with_routes(session: Arc<CredentialStore>, routes: Vec<Route>) -> Self {
        Self {
            session,
            routes,
            location: RwLock::new(None),
            pending_redirect: RwLock::new(None),
        }
    }

    /// Returns the first route matching `path`, ignoring any query string.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let bare = path.split_once('?').map_or(path, |(p, _)| p);
        self.routes.iter().find(|route| route.matches(bare))
    }

    /// Decides where a navigation to `path` ends up without performing it.
    #[must_use]
    pub fn guard(&self, path: &str) -> GateDecision {
        let route = self.resolve(path);
        let authenticated = self.session.is_authenticated();

        match route {
            Some(route) if route.requires_auth && !authenticated => GateDecision::RedirectToLogin {
                redirect: path.to_string(),
            },
            Some(route) if route.pattern == LOGIN_PATH && authenticated => {
                GateDecision::RedirectHome
            }
            _ => GateDecision::Proceed,
        }
    }

    /// Navigates to `path`, applying the guard's decision.
    pub fn navigate(&self, path: &str) -> GateDecision {
        let decision = self.guard(path);

        match &decision {
            GateDecision::Proceed => {
                debug!(path, "Navigation allowed");
                *self.location.write() = Some(path.to_string());
            }
            GateDecision::RedirectToLogin { redirect } => {
                info!(path, "Sign-in required");
                self.send_to_login(Some(redirect.clone()));
            }
            GateDecision::RedirectHome => {
                debug!("Already signed in, skipping login");
                *self.location.write() = Some(HOME_PATH.to_string());
            }
        }

        decision
    }

    /// Returns the current location.
    #[must_use]
    pub fn location(&self) -> Option<String> {
        self.location.read().clone()
    }

    /// Takes the destination remembered by the last redirect to login.
    pub fn take_pending_redirect(&self) -> Option<String> {
        self.pending_redirect.write().take()
    }

    fn send_to_login(&self, return_to: Option<String>) {
        *self.pending_redirect.write() = return_to;
        *self.location.write() = Some(LOGIN_PATH.to_string());
    }
}

impl NavigationPort for NavigationGate {
    fn current_location(&self) -> Option<String> {
        self.location()
    }

    fn redirect_to_login(&self, return_to: Option<String>) {
        warn!(return_to = ?return_to, "Session ended, returning to login");
        let return_to = return_to.filter(|path| path != LOGIN_PATH);
        self.send_to_login(return_to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{MockAuthPort, MockTokenStorage};
    use test_case::test_case;

    fn gate() -> (NavigationGate, Arc<CredentialStore>) {
        let session = Arc::new(CredentialStore::new(
            Arc::new(MockAuthPort::new(true)),
            Arc::new(MockTokenStorage::new()),
        ));
        (NavigationGate::new(Arc::clone(&session)), session)
    }

    #[test_case("/login", Some("login") ; "login")]
    #[test_case("/", Some("home") ; "home")]
    #[test_case("/geo/countries", Some("country-list") ; "list")]
    #[test_case("/geo/countries/7", Some("country-detail") ; "detail")]
    #[test_case("/geo/countries/7?tab=regions", Some("country-detail") ; "query ignored")]
    #[test_case("/geo/globalmarkets", Some("geo") ; "module wildcard")]
    #[test_case("/visits/visit-media/3", Some("visits") ; "wildcard depth")]
    #[test_case("/catalog", Some("catalog") ; "module root")]
    #[test_case("/geography", None ; "prefix is not a module")]
    #[test_case("/unknown/place", None ; "unknown")]
    fn test_resolve(path: &str, expected: Option<&str>) {
        let (gate, _) = gate();
        assert_eq!(gate.resolve(path).map(|r| r.name), expected);
    }

    #[test]
    fn test_protected_route_while_logged_out() {
        let (gate, _) = gate();

        let decision = gate.navigate("/geo/countries/7?tab=regions");

        assert_eq!(
            decision,
            GateDecision::RedirectToLogin {
                redirect: "/geo/countries/7?tab=regions".to_string()
            }
        );
        assert_eq!(gate.location().as_deref(), Some("/login"));
        assert_eq!(
            gate.take_pending_redirect().as_deref(),
            Some("/geo/countries/7?tab=regions")
        );
        assert!(gate.take_pending_redirect().is_none());
    }

    #[test_case("/geo" ; "geo")]
    #[test_case("/analytics/" ; "trailing slash")]
    fn test_module_root_requires_sign_in(path: &str) {
        let (gate, _) = gate();

        assert_eq!(
            gate.navigate(path),
            GateDecision::RedirectToLogin {
                redirect: path.to_string()
            }
        );
        assert_eq!(gate.location().as_deref(), Some("/login"));
    }

    #[test]
    fn test_public_and_unknown_routes_proceed() {
        let (gate, _) = gate();

        assert_eq!(gate.navigate("/login"), GateDecision::Proceed);
        assert_eq!(gate.navigate("/about"), GateDecision::Proceed);
        assert_eq!(gate.location().as_deref(), Some("/about"));
    }

    #[tokio::test]
    async fn test_signed_in_navigation() {
        let (gate, session) = gate();
        assert!(session.login("ops", "secret").await.success);

        assert_eq!(gate.navigate("/geo/outlets"), GateDecision::Proceed);
        assert_eq!(gate.navigate("/login"), GateDecision::RedirectHome);
        assert_eq!(gate.location().as_deref(), Some("/"));
    }

    #[test]
    fn test_port_redirect_remembers_location() {
        let (gate, _) = gate();
        *gate.location.write() = Some("/geo/regions".to_string());

        let here = gate.current_location();
        gate.redirect_to_login(here);

        assert_eq!(gate.location().as_deref(), Some("/login"));
        assert_eq!(gate.take_pending_redirect().as_deref(), Some("/geo/regions"));
    }

    #[test]
    fn test_port_redirect_from_login_keeps_no_destination() {
        let (gate, _) = gate();

        gate.redirect_to_login(Some("/login".to_string()));

        assert!(gate.take_pending_redirect().is_none());
    }
}
