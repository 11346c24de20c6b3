//! # Credentials
//!
//! Verifiable credentials issued by the backend once a holder's identity has
//! been verified, and the third-party verification status that gates their
//! issuance.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// A verifiable credential document.
///
/// The issuer's proof covers the document as issued, so members are kept in
/// their original form: dates keep their text, `type` keeps its shape and
/// members not modelled here are kept in `extra`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiableCredential {
    /// Credential identifier (a DID URL).
    pub id: String,

    /// Credential types.
    #[serde(rename = "type")]
    pub type_: OneMany<String>,

    /// DID of the issuer.
    pub issuer: String,

    /// When the credential was issued.
    pub issuance_date: Timestamp,

    /// When the credential ceases to be valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<Timestamp>,

    /// Claims about the subject, including the subject's `id`.
    pub credential_subject: Map<String, Value>,

    /// Issuer proof. Not verified by this crate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<Value>,

    /// Remaining document members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VerifiableCredential {
    /// Parse a credential from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if a required member is missing or has
    /// the wrong shape.
    pub fn parse(document: Value) -> Result<Self> {
        Ok(serde_json::from_value(document)?)
    }

    /// The credential's types.
    #[must_use]
    pub fn types(&self) -> &[String] {
        self.type_.as_slice()
    }

    /// The credential subject's identifier, usually the holder DID.
    #[must_use]
    pub fn subject_id(&self) -> Option<&str> {
        self.credential_subject.get("id").and_then(Value::as_str)
    }

    /// Whether the credential has an expiry date before `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.as_ref().is_some_and(|exp| exp.to_utc() <= now)
    }
}

/// A single value or an array of values, serialized in the shape it was
/// read in.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OneMany<T> {
    /// A lone value.
    One(T),

    /// An array of values.
    Many(Vec<T>),
}

impl<T> OneMany<T> {
    /// The values as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(one) => std::slice::from_ref(one),
            Self::Many(many) => many,
        }
    }
}

/// An RFC 3339 date-time that keeps the text it was parsed from.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp {
    text: String,
    at: DateTime<Utc>,
}

impl Timestamp {
    /// The date-time in UTC.
    #[must_use]
    pub const fn to_utc(&self) -> DateTime<Utc> {
        self.at
    }

    /// The date-time as originally written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl TryFrom<String> for Timestamp {
    type Error = chrono::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let at = DateTime::parse_from_rfc3339(&value)?.with_timezone(&Utc);
        Ok(Self { text: value, at })
    }
}

impl From<Timestamp> for String {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.text
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A credential as reported back by the wallet after import.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImportedCredential {
    /// Identifier of the credential in the wallet.
    pub id: String,
}

/// Third-party (passbase) identity verification status of the user.
///
/// [`VerificationStatus::Unknown`] means the status could not be determined,
/// not that the user is unverified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum VerificationStatus {
    /// Status could not be determined.
    #[default]
    Unknown,

    /// Verification has been submitted and awaits review.
    Pending,

    /// Identity has been verified.
    Approved,

    /// Verification was declined.
    Rejected,
}

impl VerificationStatus {
    /// Status name as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for VerificationStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" | "declined" => Self::Rejected,
            _ => Self::Unknown,
        })
    }
}

impl From<String> for VerificationStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl From<VerificationStatus> for String {
    fn from(status: VerificationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of the verification status endpoint.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct VerificationStatusResponse {
    /// Passbase verification status.
    pub passbase: VerificationStatus,
}
