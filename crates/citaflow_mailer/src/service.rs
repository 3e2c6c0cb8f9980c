// --- File: crates/citaflow_mailer/src/service.rs ---
//! Mail delivery over an HTTP mail API.

use citaflow_common::services::{BoxFuture, NotificationResult, NotificationService};
use citaflow_common::HTTP_CLIENT;
use citaflow_config::MailerConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Mailer-specific error types.
#[derive(Error, Debug)]
pub enum MailerError {
    /// Error occurred during a mail API request
    #[error("Mail API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the mail API
    #[error("Mail API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Missing or incomplete mailer configuration
    #[error("Mailer configuration missing or incomplete")]
    ConfigError,
}

#[derive(Serialize)]
struct OutgoingMessage {
    from: String,
    to: Vec<String>,
    subject: String,
    text: String,
}

#[derive(Deserialize, Default)]
struct SendResponse {
    id: Option<String>,
}

/// Sends appointment emails through a JSON mail API with bearer-key auth.
pub struct AppointmentMailer {
    config: MailerConfig,
}

impl AppointmentMailer {
    pub fn new(config: MailerConfig) -> Self {
        Self { config }
    }
}

impl NotificationService for AppointmentMailer {
    type Error = MailerError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let message = OutgoingMessage {
            from: self.config.from_address.clone(),
            to: vec![to.to_string()],
            subject: subject.to_string(),
            text: body.to_string(),
        };

        Box::pin(async move {
            let response = HTTP_CLIENT
                .post(&self.config.api_url)
                .bearer_auth(&self.config.api_key)
                .json(&message)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(MailerError::ApiError {
                    status_code: status.as_u16(),
                    message,
                });
            }

            // Mail APIs differ in their response body; an id is nice to have
            // but not required.
            let parsed: SendResponse = response.json().await.unwrap_or_default();
            debug!(message_id = ?parsed.id, "email accepted by mail API");

            Ok(NotificationResult {
                message_id: parsed.id,
                status: "sent".to_string(),
            })
        })
    }
}
