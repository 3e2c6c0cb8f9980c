// --- File: crates/citaflow_gcal/src/credentials.rs ---
//! Admin credential persistence with refresh-on-expiry.
//!
//! The persisted record holds everything needed to refresh itself (token URI,
//! client id/secret), so a rotated credential file keeps working without a
//! restart. All refresh traffic goes through one async mutex: a single writer
//! loads, refreshes and saves, so two concurrent requests can never race on
//! the underlying store.

use chrono::{DateTime, Duration, Utc};
use citaflow_common::services::BoxFuture;
use citaflow_common::HTTP_CLIENT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Failed to read or write credential store: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse stored credentials: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Token refresh request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Token endpoint returned status {status}: {body}")]
    Refresh { status: u16, body: String },
    #[error("Credential expired and no refresh token is stored")]
    NotRefreshable,
}

/// The persisted admin credential record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: String,
    pub refresh_token: Option<String>,
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Absent for records written before expiry tracking existed; such
    /// tokens are treated as still valid.
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

impl StoredCredentials {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry.is_some_and(|expiry| expiry <= now)
    }
}

/// Where the admin credential record lives.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> BoxFuture<'_, StoredCredentials, CredentialError>;
    fn save(&self, creds: StoredCredentials) -> BoxFuture<'_, (), CredentialError>;
}

/// JSON-file-backed credential store.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> BoxFuture<'_, StoredCredentials, CredentialError> {
        Box::pin(async move {
            let raw = tokio::fs::read_to_string(&self.path).await?;
            Ok(serde_json::from_str(&raw)?)
        })
    }

    fn save(&self, creds: StoredCredentials) -> BoxFuture<'_, (), CredentialError> {
        Box::pin(async move {
            let raw = serde_json::to_string_pretty(&creds)?;
            tokio::fs::write(&self.path, raw).await?;
            Ok(())
        })
    }
}

#[derive(Deserialize)]
struct RefreshResponse {
    access_token: String,
    expires_in: Option<i64>,
    refresh_token: Option<String>,
}

/// Single-writer owner of the admin credential.
pub struct AdminCredentials {
    store: Arc<dyn CredentialStore>,
    refresh_lock: Mutex<()>,
}

impl AdminCredentials {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            refresh_lock: Mutex::new(()),
        }
    }

    /// A currently valid access token, refreshing and persisting first when
    /// the stored one has expired.
    pub async fn access_token(&self) -> Result<String, CredentialError> {
        let _guard = self.refresh_lock.lock().await;

        let creds = self.store.load().await?;
        if !creds.is_expired(Utc::now()) {
            debug!("admin credential still valid");
            return Ok(creds.token);
        }

        let refresh_token = creds
            .refresh_token
            .clone()
            .ok_or(CredentialError::NotRefreshable)?;

        info!("admin credential expired, refreshing");
        let response = HTTP_CLIENT
            .post(&creds.token_uri)
            .form(&[
                ("client_id", creds.client_id.as_str()),
                ("client_secret", creds.client_secret.as_str()),
                ("refresh_token", refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CredentialError::Refresh {
                status: status.as_u16(),
                body,
            });
        }

        let refreshed: RefreshResponse = response.json().await?;
        let updated = StoredCredentials {
            token: refreshed.access_token,
            // Google usually omits the refresh token here; keep the old one.
            refresh_token: refreshed.refresh_token.or(creds.refresh_token),
            expiry: refreshed
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
            ..creds
        };
        self.store.save(updated.clone()).await?;
        Ok(updated.token)
    }
}
