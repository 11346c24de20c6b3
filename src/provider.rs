//! # Provider
//!
//! Capabilities the application shell supplies to the session. A single type
//! usually implements all of them and is handed to
//! [`Session::new`](crate::Session::new) as a [`Provider`].

use std::future::Future;
use std::time::Duration;

pub use crate::credential::{ImportedCredential, VerifiableCredential};
pub use crate::presentation::{ClaimRequest, Presentation};

/// Provider aggregates the capabilities needed by the session and gateway.
pub trait Provider: TokenStore + Wallet + Navigator + Notifier {}

/// Persistent key/value storage for the session token (browser local storage
/// or an equivalent).
pub trait TokenStore: Send + Sync {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be persisted.
    fn put(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str);
}

/// Connection to the holder's identity wallet.
pub trait Wallet: Send + Sync {
    /// Ask the holder to share the requested claims. Resolves to `None` if the
    /// wallet completed without producing a presentation.
    ///
    /// # Errors
    ///
    /// Returns an error if the wallet interaction failed or the holder
    /// cancelled it.
    fn get_credentials(
        &self, request: &ClaimRequest,
    ) -> impl Future<Output = anyhow::Result<Option<Presentation>>> + Send;

    /// Ask the holder to import credentials into their wallet. Resolves to
    /// the credentials the holder accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the wallet interaction failed or the holder
    /// cancelled it.
    fn import_credentials(
        &self, credentials: &[VerifiableCredential],
    ) -> impl Future<Output = anyhow::Result<Vec<ImportedCredential>>> + Send;
}

/// Moves the user interface to another view.
pub trait Navigator: Send + Sync {
    /// Show the view for `path` (for example `home`).
    fn navigate(&self, path: &str);
}

/// Shows transient messages to the user.
pub trait Notifier: Send + Sync {
    /// Display `notification`.
    fn notify(&self, notification: Notification);
}

/// A short-lived message with an optional dismiss action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Message text.
    pub message: String,

    /// Label of the dismiss action.
    pub action: Option<String>,

    /// How long the message stays visible.
    pub duration: Duration,
}

impl Notification {
    /// Shown after a credential has been imported into the wallet.
    #[must_use]
    pub fn credential_imported() -> Self {
        Self {
            message: "Credential successfully imported to your wallet!".into(),
            action: Some("Cool".into()),
            duration: Duration::from_secs(3),
        }
    }
}
