//! In-memory provider standing in for the application shell: local storage, a
//! scripted wallet, and recorders for navigation and notifications.
#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::{Duration, Utc};
use kyc_holder::provider::{
    self, ClaimRequest, ImportedCredential, Navigator, Notification, Notifier, Presentation,
    TokenStore, VerifiableCredential, Wallet,
};
use kyc_holder::session::AUTH_TOKEN_KEY;
use kyc_holder::store::MemoryStore;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

pub const HOLDER_DID: &str = "did:elastos:iqjN3CLRjd7a4jGCZe6B3isXyeLy7KKDuK";

/// Build an unsigned JWT carrying `claims`.
pub fn jwt(claims: &Value) -> String {
    let header = Base64UrlUnpadded::encode_string(br#"{"alg":"ES256","typ":"JWT"}"#);
    let payload = Base64UrlUnpadded::encode_string(claims.to_string().as_bytes());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

/// Token for the holder expiring `ttl` from now (negative for already expired).
pub fn token(ttl: Duration) -> String {
    jwt(&json!({
        "did": HOLDER_DID,
        "exp": (Utc::now() + ttl).timestamp(),
    }))
}

/// Presentation signed by the holder, as produced by the wallet.
pub fn presentation() -> Presentation {
    Presentation::from_json(json!({
        "type": "VerifiablePresentation",
        "created": "2021-11-03T09:12:44Z",
        "verifiableCredential": [],
        "proof": {
            "type": "ECDSAsecp256r1",
            "verificationMethod": format!("{HOLDER_DID}#primary"),
            "realm": "kyc.example.com",
            "nonce": "8a3c5e",
            "signature": "c2lnbmF0dXJl"
        }
    }))
    .expect("should build presentation")
}

/// How the wallet answers a credential request.
#[derive(Clone, Debug)]
pub enum WalletReply {
    Present(Presentation),
    Nothing,
    Cancel,
}

#[derive(Debug)]
struct WalletState {
    reply: WalletReply,
    accept_imports: bool,
    fail_imports: bool,
    requests: Vec<ClaimRequest>,
    offered: Vec<VerifiableCredential>,
}

#[derive(Clone, Debug)]
pub struct Provider {
    store: MemoryStore,
    wallet: Arc<Mutex<WalletState>>,
    navigations: Arc<Mutex<Vec<String>>>,
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl Provider {
    #[must_use]
    pub fn new() -> Self {
        // Set RUST_LOG=kyc_holder=debug to see the crate's logs.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        Self {
            store: MemoryStore::new(),
            wallet: Arc::new(Mutex::new(WalletState {
                reply: WalletReply::Present(presentation()),
                accept_imports: true,
                fail_imports: false,
                requests: vec![],
                offered: vec![],
            })),
            navigations: Arc::default(),
            notifications: Arc::default(),
        }
    }

    /// A provider whose local storage already holds `token`.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let provider = Self::new();
        provider.store.put(AUTH_TOKEN_KEY, token).expect("should store token");
        provider
    }

    fn wallet(&self) -> MutexGuard<'_, WalletState> {
        self.wallet.lock().expect("should lock")
    }

    pub fn wallet_replies(&self, reply: WalletReply) {
        self.wallet().reply = reply;
    }

    pub fn decline_imports(&self) {
        self.wallet().accept_imports = false;
    }

    pub fn fail_imports(&self) {
        self.wallet().fail_imports = true;
    }

    pub fn claim_requests(&self) -> Vec<ClaimRequest> {
        self.wallet().requests.clone()
    }

    pub fn offered(&self) -> Vec<VerifiableCredential> {
        self.wallet().offered.clone()
    }

    /// Overwrite local storage directly, as another tab or a user would.
    pub fn set_stored_token(&self, token: &str) {
        self.store.put(AUTH_TOKEN_KEY, token).expect("should store token");
    }

    pub fn stored_token(&self) -> Option<String> {
        self.store.get(AUTH_TOKEN_KEY)
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().expect("should lock").clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().expect("should lock").clone()
    }
}

impl provider::Provider for Provider {}

impl TokenStore for Provider {
    fn get(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.store.put(key, value)
    }

    fn remove(&self, key: &str) {
        self.store.remove(key);
    }
}

impl Wallet for Provider {
    async fn get_credentials(&self, request: &ClaimRequest) -> anyhow::Result<Option<Presentation>> {
        let mut wallet = self.wallet();
        wallet.requests.push(request.clone());
        match &wallet.reply {
            WalletReply::Present(presentation) => Ok(Some(presentation.clone())),
            WalletReply::Nothing => Ok(None),
            WalletReply::Cancel => Err(anyhow!("user cancelled the wallet request")),
        }
    }

    async fn import_credentials(
        &self, credentials: &[VerifiableCredential],
    ) -> anyhow::Result<Vec<ImportedCredential>> {
        let mut wallet = self.wallet();
        wallet.offered.extend_from_slice(credentials);
        if wallet.fail_imports {
            return Err(anyhow!("wallet connection lost"));
        }
        if !wallet.accept_imports {
            return Ok(vec![]);
        }
        Ok(credentials.iter().map(|vc| ImportedCredential { id: vc.id.clone() }).collect())
    }
}

impl Navigator for Provider {
    fn navigate(&self, path: &str) {
        self.navigations.lock().expect("should lock").push(path.to_string());
    }
}

impl Notifier for Provider {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().expect("should lock").push(notification);
    }
}
