//! # Bearer Token
//!
//! The backend issues a JWT on sign-in. The client only needs its claims to
//! display who is signed in and to know when the session lapses, so the
//! payload is decoded WITHOUT verifying the signature. The backend remains the
//! authority: every protected call sends the raw token and the backend
//! validates it.

use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::{DateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::did::Did;
use crate::error::{Error, Result};

/// Claims carried by the session token.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Identity {
    /// DID of the signed-in holder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did: Option<String>,

    /// Expiry as whole seconds since the Unix epoch. Fractional values are
    /// accepted and rounded down.
    #[serde(default, deserialize_with = "numeric_date", skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Any other claims issued by the backend.
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

impl Identity {
    /// Expiry time of the token these claims came from, if it has one.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    /// Whether the claims have expired at `now`. Claims without an expiry
    /// never expire.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp.is_some_and(|exp| now.timestamp() >= exp)
    }

    /// The holder DID parsed from the `did` claim, if it is well formed.
    #[must_use]
    pub fn parsed_did(&self) -> Option<Did> {
        self.did.as_deref().and_then(|did| did.parse().ok())
    }
}

// A JWT NumericDate may carry a fraction of a second.
#[allow(clippy::cast_possible_truncation)]
fn numeric_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(secs) = number.as_i64() {
        return Ok(Some(secs));
    }
    match number.as_f64() {
        Some(secs) if secs.is_finite() => Ok(Some(secs.floor() as i64)),
        _ => Err(de::Error::custom(format!("exp out of range: {number}"))),
    }
}

/// Decode the claims of `token` without checking its signature.
///
/// Only the payload segment is inspected. Base64url padding is tolerated.
///
/// # Errors
///
/// Returns [`Error::Token`] if the token has no payload segment, the segment
/// is not base64url or it is not a JSON object.
pub fn decode(token: &str) -> Result<Identity> {
    let Some(payload) = token.split('.').nth(1) else {
        return Err(Error::Token("missing payload segment".into()));
    };
    let bytes = Base64UrlUnpadded::decode_vec(payload.trim_end_matches('='))
        .map_err(|e| Error::Token(format!("payload is not base64url: {e}")))?;
    let claims = serde_json::from_slice::<Identity>(&bytes)
        .map_err(|e| Error::Token(format!("payload is not a claims object: {e}")))?;
    Ok(claims)
}

/// Whether `token` has expired at `now`. Tokens that cannot be decoded are
/// treated as expired.
#[must_use]
pub fn is_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    decode(token).map_or(true, |identity| identity.is_expired_at(now))
}
