//! # Routes
//!
//! The application's views and whether each requires a signed-in user.
//! Unmatched paths redirect to the sign-in view.

use std::fmt;

/// A view of the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Sign in with a DID wallet.
    Login,

    /// Landing view after sign-in and sign-out.
    Home,

    /// Verification progress and issued credentials.
    Dashboard,

    /// Start identity verification with passbase.
    Verify,

    /// Verification completed.
    Verified,
}

impl Route {
    /// Path of the view, without leading slash.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Home => "home",
            Self::Dashboard => "dashboard",
            Self::Verify => "verify",
            Self::Verified => "verified",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The view shown after sign-in (absent a redirect) and after sign-out.
pub const LANDING: Route = Route::Home;

/// The view unauthenticated users are sent to.
pub const SIGN_IN: Route = Route::Login;

/// An entry in the route table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteEntry {
    /// The view.
    pub route: Route,

    /// Whether entering requires a signed-in user.
    pub guarded: bool,
}

/// Route table, in match order.
pub const ROUTES: [RouteEntry; 5] = [
    RouteEntry { route: Route::Login, guarded: false },
    RouteEntry { route: Route::Home, guarded: true },
    RouteEntry { route: Route::Dashboard, guarded: true },
    RouteEntry { route: Route::Verify, guarded: true },
    RouteEntry { route: Route::Verified, guarded: true },
];

/// Outcome of resolving a path against the route table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The path names a view.
    Matched(RouteEntry),

    /// No view matches; show this one instead.
    Redirect(Route),
}

impl Resolution {
    /// The matched view, if any.
    #[must_use]
    pub const fn route(self) -> Option<Route> {
        match self {
            Self::Matched(entry) => Some(entry.route),
            Self::Redirect(_) => None,
        }
    }
}

/// Resolve `path` against [`ROUTES`]. Leading and trailing slashes are
/// ignored and the whole path must match.
#[must_use]
pub fn resolve(path: &str) -> Resolution {
    let path = path.trim_matches('/');
    ROUTES
        .iter()
        .find(|entry| entry.route.path() == path)
        .map_or(Resolution::Redirect(SIGN_IN), |entry| Resolution::Matched(*entry))
}
