//! # Decentralized Identifiers
//!
//! Minimal parsing of DID strings (`did:<method>:<method-specific-id>`) and
//! DID URLs (a DID followed by a `#fragment`, `?query` or `/path`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A parsed decentralized identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Did {
    method: String,
    method_specific_id: String,
}

impl Did {
    /// The DID method, e.g. `elastos` for `did:elastos:iXyz`.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The method-specific identifier, e.g. `iXyz` for `did:elastos:iXyz`.
    #[must_use]
    pub fn method_specific_id(&self) -> &str {
        &self.method_specific_id
    }

    /// Parse the DID part of a DID URL, discarding any path, query or
    /// fragment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Did`] if the DID part is malformed.
    pub fn from_url(url: &str) -> Result<Self, Error> {
        let end = url.find(['#', '?', '/']).unwrap_or(url.len());
        url[..end].parse()
    }
}

impl FromStr for Did {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some("did"), Some(method), Some(id)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::Did(format!("not a DID: {s}")));
        };
        if method.is_empty() || !method.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(Error::Did(format!("invalid DID method in {s}")));
        }
        if id.is_empty() {
            return Err(Error::Did(format!("missing method-specific id in {s}")));
        }
        Ok(Self {
            method: method.to_string(),
            method_specific_id: id.to_string(),
        })
    }
}

impl TryFrom<String> for Did {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Did> for String {
    fn from(did: Did) -> Self {
        did.to_string()
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "did:{}:{}", self.method, self.method_specific_id)
    }
}
