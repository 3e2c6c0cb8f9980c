// --- File: crates/citaflow_gcal/src/auth.rs ---
//! Google OAuth2: consent URL, code exchange, token refresh.

use crate::logic::GcalError;
use citaflow_common::HTTP_CLIENT;
use citaflow_config::OauthConfig;
use serde::{Deserialize, Serialize};

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

// calendar.events is what event creation needs; the identity scopes let the
// frontend show who signed in.
const OAUTH_SCOPES: &str =
    "openid email profile https://www.googleapis.com/auth/calendar.events";

/// Tokens returned by Google's token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
}

#[derive(Clone)]
pub struct GoogleOAuthClient {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl GoogleOAuthClient {
    pub fn from_config(config: &OauthConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
        }
    }

    /// The consent-screen URL the login endpoint redirects to.
    ///
    /// `access_type=offline` with `prompt=consent` makes Google return a
    /// refresh token on every exchange, not just the first one.
    pub fn authorization_url(&self) -> Result<String, GcalError> {
        let query = serde_urlencoded::to_string([
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", OAUTH_SCOPES),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ])
        .map_err(|e| GcalError::Encode(format!("OAuth query: {e}")))?;
        Ok(format!("{GOOGLE_AUTH_URL}?{query}"))
    }

    /// Exchange an authorization code for access and refresh tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<GoogleTokenResponse, GcalError> {
        let response = HTTP_CLIENT
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GcalError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<GoogleTokenResponse>().await?)
    }
}
