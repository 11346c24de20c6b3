//! # Session
//!
//! The signed-in state of the application. A [`Session`] is constructed once
//! at startup, passed by reference to views and guards, and only changed
//! through its own methods.
//!
//! The bearer token lives in the provider's [`TokenStore`] under
//! [`AUTH_TOKEN_KEY`]. The identity held in memory is always derived from
//! that token: it is decoded when the session is created and again whenever
//! sign-in stores a new token.

use chrono::Utc;
use reqwest::header::CONTENT_TYPE;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::gateway::Gateway;
use crate::guard::{self, Access, SessionState};
use crate::presentation::{ClaimRequest, Presentation};
use crate::provider::{Navigator, Provider, TokenStore, Wallet};
use crate::route::{self, LANDING, SIGN_IN};
use crate::token::{self, Identity};

/// Storage key of the bearer token.
pub const AUTH_TOKEN_KEY: &str = "didauthtoken";

/// Login endpoint.
const LOGIN_PATH: &str = "/api/v1/login";

/// Signed-in state and authentication operations.
#[derive(Debug)]
pub struct Session<P: Provider> {
    config: Config,
    provider: P,
    http: reqwest::Client,
    user: Option<Identity>,
    post_auth_route: Option<String>,
}

impl<P: Provider> Session<P> {
    /// Create a session and load the user from any stored token.
    ///
    /// A stored token that cannot be decoded is removed.
    pub fn new(config: Config, provider: P) -> Self {
        Self::with_client(config, provider, reqwest::Client::new())
    }

    /// Create a session that makes backend calls with `http`.
    pub fn with_client(config: Config, provider: P, http: reqwest::Client) -> Self {
        let mut session = Self {
            config,
            provider,
            http,
            user: None,
            post_auth_route: None,
        };
        session.load_user();
        session
    }

    // Reload the user from the stored token, discarding a token that does not
    // decode.
    fn load_user(&mut self) {
        let Some(stored) = self.token() else {
            return;
        };
        match token::decode(&stored) {
            Ok(user) => {
                tracing::debug!("loaded user from auth token: {user:?}");
                self.user = Some(user);
            }
            Err(e) => {
                tracing::error!("failed to decode stored auth token, removing it: {e}");
                self.provider.remove(AUTH_TOKEN_KEY);
                self.user = None;
            }
        }
    }

    /// Whether a token is stored and has not expired. The store is read on
    /// every call.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|stored| !token::is_expired_at(&stored, Utc::now()))
    }

    /// The stored bearer token.
    pub fn token(&self) -> Option<String> {
        self.provider.get(AUTH_TOKEN_KEY)
    }

    /// Claims of the signed-in user.
    pub const fn current_user(&self) -> Option<&Identity> {
        self.user.as_ref()
    }

    /// DID of the signed-in user.
    pub fn signed_in_did(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.did.as_deref())
    }

    /// Record where to send the user after the next successful sign-in.
    pub fn set_post_auth_redirect(&mut self, path: impl Into<String>) {
        let path = path.into();
        tracing::debug!("setting post auth route to {path}");
        self.post_auth_route = Some(path);
    }

    /// The pending post sign-in redirect, if any.
    pub fn post_auth_redirect(&self) -> Option<&str> {
        self.post_auth_route.as_deref()
    }

    /// Navigate to `path` if the guard allows it. Otherwise navigate to the
    /// view the guard redirects to and, when that is the sign-in view for a
    /// known view, remember `path` for after sign-in.
    pub fn enter(&mut self, path: &str) -> Access {
        let access = guard::check(path, &*self);
        match access {
            Access::Allow(route) => self.provider.navigate(route.path()),
            Access::Redirect(to) => {
                if to == SIGN_IN && route::resolve(path).route().is_some() {
                    self.set_post_auth_redirect(path.trim_matches('/'));
                }
                self.provider.navigate(to.path());
            }
        }
        access
    }

    /// Sign in with the holder's wallet.
    ///
    /// The wallet is asked for a presentation, which is exchanged at the
    /// backend for a bearer token. On success the token is stored, the user
    /// is loaded and the app navigates to the post sign-in redirect (consuming
    /// it) or the landing view. Returns the path navigated to.
    ///
    /// Nothing changes when any step fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Wallet`] or [`Error::NoPresentation`] when the wallet
    /// interaction does not produce a presentation (including the holder
    /// cancelling), [`Error::Did`] when the presentation has no holder, and a
    /// backend, token or storage error when the login exchange fails.
    pub async fn sign_in(&mut self) -> Result<String> {
        tracing::debug!("requesting credentials from the wallet");
        let presentation = match self.provider.get_credentials(&ClaimRequest::default()).await {
            Ok(Some(presentation)) => presentation,
            Ok(None) => {
                tracing::warn!("wallet returned no presentation");
                return Err(Error::NoPresentation);
            }
            Err(e) => {
                tracing::warn!("error while getting credentials: {e:#}");
                return Err(Error::Wallet(e));
            }
        };

        let holder = presentation.holder().inspect_err(|e| {
            tracing::warn!("cannot sign in: {e}");
        })?;
        tracing::info!("signing in {}", holder.method_specific_id());

        let (token, user) = self.login(&presentation).await.inspect_err(|e| {
            tracing::error!("sign in failed: {e}");
        })?;
        self.provider.put(AUTH_TOKEN_KEY, &token).map_err(|e| {
            tracing::error!("failed to store auth token: {e:#}");
            Error::Storage(e)
        })?;
        tracing::debug!("sign in: setting user to {user:?}");
        self.user = Some(user);

        let target = self.post_auth_route.take().unwrap_or_else(|| LANDING.path().to_string());
        self.provider.navigate(&target);
        Ok(target)
    }

    // Exchange the presentation for a token. The token is decoded before
    // being returned so an unusable token is never stored.
    async fn login(&self, presentation: &Presentation) -> Result<(String, Identity)> {
        let response = self
            .http
            .post(self.config.endpoint(LOGIN_PATH))
            .header(CONTENT_TYPE, "application/json")
            .json(&presentation.to_json())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::status(response.status()));
        }
        let token = response.json::<String>().await?;
        let user = token::decode(&token)?;
        Ok((token, user))
    }

    /// Sign out: forget the user, remove the token and return to the landing
    /// view.
    pub fn sign_out(&mut self) {
        self.user = None;
        self.provider.remove(AUTH_TOKEN_KEY);
        self.provider.navigate(LANDING.path());
    }

    /// Backend calls authenticated with this session's token.
    pub const fn gateway(&self) -> Gateway<'_, P> {
        Gateway::new(self)
    }

    /// Client configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The provider supplied at construction.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    pub(crate) const fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

impl<P: Provider> SessionState for Session<P> {
    fn is_authenticated(&self) -> bool {
        Self::is_authenticated(self)
    }
}
