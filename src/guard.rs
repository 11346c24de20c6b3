//! # Navigation Guard
//!
//! Decides whether a view may be entered. Decisions use local session state
//! only and never touch the network.

use crate::route::{self, Resolution, Route, SIGN_IN};

/// Read-only view of session state the guard needs.
pub trait SessionState {
    /// Whether a non-expired session token is stored.
    fn is_authenticated(&self) -> bool;
}

/// Guard decision for a requested path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// The view may be shown.
    Allow(Route),

    /// The view may not be shown; show this one instead.
    Redirect(Route),
}

/// Check whether `path` may be entered given `session`.
///
/// Unmatched paths redirect to the sign-in view, as do guarded views when no
/// user is signed in.
pub fn check(path: &str, session: &impl SessionState) -> Access {
    match route::resolve(path) {
        Resolution::Redirect(to) => Access::Redirect(to),
        Resolution::Matched(entry) if entry.guarded && !session.is_authenticated() => {
            tracing::debug!("denied {path}: not signed in");
            Access::Redirect(SIGN_IN)
        }
        Resolution::Matched(entry) => Access::Allow(entry.route),
    }
}

/// Whether the view at `path` may be entered. On `false` the caller should
/// redirect to the sign-in view.
pub fn can_enter(path: &str, session: &impl SessionState) -> bool {
    matches!(check(path, session), Access::Allow(_))
}
