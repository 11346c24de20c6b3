//! # Configuration
//!
//! Location of the backend service. Applications either build a [`Config`]
//! directly or read it from the environment (optionally seeded from a `.env`
//! file).

use url::Url;

use crate::error::{Error, Result};

/// Environment variable holding the backend base URL.
pub const API_URL_VAR: &str = "API_URL";

/// Variable read when [`API_URL_VAR`] is unset, as named in the web app's
/// `.env` files.
pub const LEGACY_API_URL_VAR: &str = "NG_APP_API_URL";

/// Client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    api_url: String,
}

impl Config {
    /// Create a configuration for the backend at `api_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `api_url` is not an absolute http(s) URL.
    pub fn new(api_url: &str) -> Result<Self> {
        let url = Url::parse(api_url).map_err(|e| Error::Config(format!("{API_URL_VAR}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!("{API_URL_VAR}: unsupported scheme {}", url.scheme())));
        }
        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Read the configuration from the environment, loading a `.env` file
    /// first if one is present. [`API_URL_VAR`] is preferred over
    /// [`LEGACY_API_URL_VAR`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if neither variable is set or the URL is
    /// invalid.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenv::dotenv() {
            tracing::debug!("no .env file loaded: {e}");
        }
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = var(API_URL_VAR)
            .or_else(|| {
                let legacy = var(LEGACY_API_URL_VAR);
                if legacy.is_some() {
                    tracing::debug!("{API_URL_VAR} unset, using {LEGACY_API_URL_VAR}");
                }
                legacy
            })
            .ok_or_else(|| Error::Config(format!("{API_URL_VAR} is not set")))?;
        Self::new(&api_url)
    }

    /// Backend base URL, without a trailing slash.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Absolute URL for an API path such as `/api/v1/login`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }
}
