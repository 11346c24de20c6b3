//! Mock of the identity-verification backend. Records every request and
//! answers with canned data, or with a fixed error status when told to fail.
#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Duration;
use serde::Serialize;
use serde_json::{json, Value};

use crate::provider;

/// A request as seen by the backend.
#[derive(Clone, Debug, Serialize)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub token: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug)]
struct Canned {
    failure: Option<StatusCode>,
    token: String,
    metadata: String,
    status: Value,
    credentials: Vec<Value>,
    requests: Vec<Recorded>,
}

#[derive(Clone, Debug)]
pub struct Backend {
    canned: Arc<Mutex<Canned>>,
}

/// A credential document as issued after a successful verification.
pub fn credential(id: &str) -> Value {
    json!({
        "id": format!("{}#{id}", provider::HOLDER_DID),
        "type": ["VerifiableCredential", "EmailCredential"],
        "issuer": "did:elastos:iKycIssuer",
        "issuanceDate": "2021-11-03T09:12:44Z",
        "credentialSubject": {
            "id": provider::HOLDER_DID,
            "email": "alice@example.com"
        },
        "proof": {
            "type": "ECDSAsecp256r1",
            "verificationMethod": "did:elastos:iKycIssuer#primary",
            "signature": "c2lnbmF0dXJl"
        }
    })
}

impl Backend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            canned: Arc::new(Mutex::new(Canned {
                failure: None,
                token: provider::token(Duration::hours(1)),
                metadata: r#"{"firstName":"Alice"}"#.into(),
                status: json!({ "passbase": "approved" }),
                credentials: vec![credential("email")],
                requests: vec![],
            })),
        }
    }

    fn canned(&self) -> MutexGuard<'_, Canned> {
        self.canned.lock().expect("should lock")
    }

    /// Answer every request with `status`.
    pub fn fail_with(&self, status: StatusCode) {
        self.canned().failure = Some(status);
    }

    pub fn recover(&self) {
        self.canned().failure = None;
    }

    pub fn issue_token(&self, token: &str) {
        self.canned().token = token.into();
    }

    pub fn set_status(&self, status: Value) {
        self.canned().status = status;
    }

    pub fn set_credentials(&self, credentials: Vec<Value>) {
        self.canned().credentials = credentials;
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.canned().requests.clone()
    }

    /// Serve on an ephemeral local port and return the base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/api/v1/login", post(login))
            .route("/api/v1/user/passbase/uuid", post(passbase_uuid))
            .route("/api/v1/user/passbase/metadata", get(passbase_metadata))
            .route("/api/v1/user/verificationstatus", get(verification_status))
            .route("/api/v1/user/credentials", get(credentials))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("should bind");
        let addr = listener.local_addr().expect("should have address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("should serve");
        });
        format!("http://{addr}")
    }

    fn record(&self, method: &str, path: &str, headers: &HeaderMap, body: Option<Value>) {
        let token = headers.get("token").and_then(|v| v.to_str().ok()).map(ToString::to_string);
        self.canned().requests.push(Recorded {
            method: method.into(),
            path: path.into(),
            token,
            body,
        });
    }

    fn reply(&self, f: impl FnOnce(&Canned) -> Value) -> Response {
        let canned = self.canned();
        match canned.failure {
            Some(status) => (status, "backend failure").into_response(),
            None => Json(f(&canned)).into_response(),
        }
    }
}

async fn login(
    State(backend): State<Backend>, headers: HeaderMap, Json(body): Json<Value>,
) -> Response {
    backend.record("POST", "/api/v1/login", &headers, Some(body));
    backend.reply(|c| json!(c.token))
}

async fn passbase_uuid(
    State(backend): State<Backend>, headers: HeaderMap, Json(body): Json<Value>,
) -> Response {
    backend.record("POST", "/api/v1/user/passbase/uuid", &headers, Some(body));
    backend.reply(|_| Value::Null)
}

async fn passbase_metadata(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.record("GET", "/api/v1/user/passbase/metadata", &headers, None);
    backend.reply(|c| json!(c.metadata))
}

async fn verification_status(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.record("GET", "/api/v1/user/verificationstatus", &headers, None);
    backend.reply(|c| c.status.clone())
}

async fn credentials(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.record("GET", "/api/v1/user/credentials", &headers, None);
    backend.reply(|c| Value::Array(c.credentials.clone()))
}
