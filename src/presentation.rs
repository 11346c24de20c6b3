//! # Identity Presentation
//!
//! The verifiable presentation a wallet returns when the holder agrees to
//! share credentials with the application. It is sent verbatim to the
//! backend's login endpoint, which verifies it; locally it is only inspected
//! to find the holder.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::did::Did;
use crate::error::{Error, Result};

/// Claims requested from the wallet at sign-in.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClaimRequest {
    /// Requested claims keyed by name. `true` marks a claim as required,
    /// `false` as optional.
    pub claims: Map<String, Value>,
}

impl Default for ClaimRequest {
    /// The sign-in request: email is optional and only used to pre-fill the
    /// verification form.
    fn default() -> Self {
        let mut claims = Map::new();
        claims.insert("email".into(), Value::Bool(false));
        Self { claims }
    }
}

impl ClaimRequest {
    /// Whether `claim` is requested and required.
    #[must_use]
    pub fn is_required(&self, claim: &str) -> bool {
        self.claims.get(claim).and_then(Value::as_bool).unwrap_or(false)
    }
}

/// A verifiable presentation produced by the wallet.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Presentation(Map<String, Value>);

impl Presentation {
    /// Wrap a JSON presentation document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if `document` is not a JSON object.
    pub fn from_json(document: Value) -> Result<Self> {
        Ok(serde_json::from_value(document)?)
    }

    /// The presentation as a JSON document.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// DID of the holder that signed the presentation.
    ///
    /// Taken from `holder` when present, otherwise from the DID part of the
    /// proof's verification method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Did`] if neither member yields a DID.
    pub fn holder(&self) -> Result<Did> {
        if let Some(holder) = self.0.get("holder").and_then(Value::as_str) {
            return holder.parse();
        }
        let method = self
            .0
            .get("proof")
            .and_then(|proof| proof.get("verificationMethod"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Did("presentation has no holder".into()))?;
        Did::from_url(method)
    }
}
