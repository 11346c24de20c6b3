//! # Credential Gateway
//!
//! Authenticated calls to the backend for passbase linkage, verification
//! status and verifiable credentials.
//!
//! Every request is a single attempt. The session token is sent in the
//! `token` header when one is stored; without one the request is still made
//! and the backend rejects it. Read calls never fail: a non-success status or
//! a transport error is logged and a safe default returned.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::credential::{VerifiableCredential, VerificationStatus, VerificationStatusResponse};
use crate::error::{Error, Result};
use crate::provider::{Notification, Notifier, Provider, Wallet};
use crate::session::Session;

const PASSBASE_UUID_PATH: &str = "/api/v1/user/passbase/uuid";
const PASSBASE_METADATA_PATH: &str = "/api/v1/user/passbase/metadata";
const VERIFICATION_STATUS_PATH: &str = "/api/v1/user/verificationstatus";
const CREDENTIALS_PATH: &str = "/api/v1/user/credentials";

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "token";

/// Body linking a passbase verification to the user.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PassbaseLink {
    /// Passbase identity UUID.
    #[serde(rename = "passbaseUUID")]
    pub passbase_uuid: Uuid,
}

/// Backend calls on behalf of the signed-in user.
#[derive(Debug)]
pub struct Gateway<'a, P: Provider> {
    session: &'a Session<P>,
}

impl<'a, P: Provider> Gateway<'a, P> {
    pub(crate) const fn new(session: &'a Session<P>) -> Self {
        Self { session }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.session.config().endpoint(path);
        let mut builder =
            self.session.http().request(method, url).header(CONTENT_TYPE, "application/json");
        match self.session.token() {
            Some(token) => builder = builder.header(TOKEN_HEADER, token),
            None => tracing::debug!("no session token for {path}"),
        }
        builder
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path).send().await?;
        if !response.status().is_success() {
            return Err(Error::status(response.status()));
        }
        Ok(response.json::<T>().await?)
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> Result<()> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        if !response.status().is_success() {
            return Err(Error::status(response.status()));
        }
        Ok(())
    }

    /// Link a passbase verification to the user's DID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] or [`Error::Status`] if the backend could not
    /// be reached or did not accept the link. The failure is also logged.
    pub async fn save_passbase_uuid(&self, passbase_uuid: Uuid) -> Result<()> {
        let result = self.post(PASSBASE_UUID_PATH, &PassbaseLink { passbase_uuid }).await;

        match &result {
            Ok(()) => tracing::info!("passbase UUID saved"),
            Err(e) => tracing::error!("failed to save passbase UUID: {e}"),
        }
        result
    }

    /// Passbase metadata held by the backend for the user, or `None` if it
    /// could not be fetched.
    pub async fn fetch_passbase_metadata(&self) -> Option<String> {
        match self.get::<String>(PASSBASE_METADATA_PATH).await {
            Ok(metadata) => {
                tracing::debug!("received passbase metadata: {metadata}");
                Some(metadata)
            }
            Err(e) => {
                tracing::error!("failed to fetch passbase metadata: {e}");
                None
            }
        }
    }

    /// The user's passbase verification status, or
    /// [`VerificationStatus::Unknown`] if it could not be fetched.
    pub async fn fetch_verification_status(&self) -> VerificationStatus {
        match self.get::<VerificationStatusResponse>(VERIFICATION_STATUS_PATH).await {
            Ok(status) => {
                tracing::debug!("received verification status: {}", status.passbase);
                status.passbase
            }
            Err(e) => {
                tracing::error!("failed to fetch verification status: {e}");
                VerificationStatus::Unknown
            }
        }
    }

    /// Credentials issued to the user. Empty if they could not be fetched or
    /// any of them failed to parse.
    pub async fn fetch_credentials(&self) -> Vec<VerifiableCredential> {
        let documents = match self.get::<Vec<Value>>(CREDENTIALS_PATH).await {
            Ok(documents) => documents,
            Err(e) => {
                tracing::error!("failed to fetch credentials: {e}");
                return vec![];
            }
        };
        tracing::debug!("received {} credentials", documents.len());

        match documents.into_iter().map(VerifiableCredential::parse).collect::<Result<Vec<_>>>() {
            Ok(credentials) => credentials,
            Err(e) => {
                tracing::error!("failed to parse credentials: {e}");
                vec![]
            }
        }
    }

    /// Offer `credential` to the holder's wallet. Shows a confirmation when
    /// exactly one credential was imported. Returns the number imported.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Wallet`] if the wallet interaction failed or was
    /// cancelled.
    pub async fn import_credential(&self, credential: &VerifiableCredential) -> Result<usize> {
        let provider = self.session.provider();
        let imported =
            provider.import_credentials(std::slice::from_ref(credential)).await.map_err(|e| {
                tracing::warn!("failed to import credential {}: {e:#}", credential.id);
                Error::Wallet(e)
            })?;

        if imported.len() == 1 {
            provider.notify(Notification::credential_imported());
        }
        Ok(imported.len())
    }
}
