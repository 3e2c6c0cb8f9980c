// --- File: crates/citaflow_gcal/src/routes.rs ---

use crate::auth::GoogleOAuthClient;
use crate::credentials::{AdminCredentials, FileCredentialStore};
use crate::handlers::{
    availability_handler, busy_hours_handler, create_event_handler, google_login_handler,
    oauth_callback_handler, GcalState,
};
use crate::service::GoogleCalendarClient;
use axum::{
    routing::{get, post},
    Router,
};
use citaflow_common::services::NotificationService;
use citaflow_config::AppConfig;
use citaflow_mailer::{AppointmentMailer, MailerError};
use std::sync::Arc;

/// Creates a router containing all routes for the booking feature.
///
/// Only called when `use_gcal` is set, so a missing `[oauth]` section is a
/// deployment mistake worth failing loudly on at startup.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let oauth_config = config
        .oauth
        .as_ref()
        .expect("OAuth config missing while use_gcal is enabled");
    let oauth = GoogleOAuthClient::from_config(oauth_config);

    let store = FileCredentialStore::new(oauth_config.token_file());
    let admin_credentials = Arc::new(AdminCredentials::new(Arc::new(store)));

    let mailer: Option<Arc<dyn NotificationService<Error = MailerError>>> =
        if config.use_mailer {
            config
                .mailer
                .as_ref()
                .map(|m| {
                    Arc::new(AppointmentMailer::new(m.clone()))
                        as Arc<dyn NotificationService<Error = MailerError>>
                })
        } else {
            None
        };

    let gcal_state = Arc::new(GcalState {
        config,
        calendar: Arc::new(GoogleCalendarClient::new()),
        admin_credentials,
        oauth,
        mailer,
    });

    Router::new()
        .route("/google/login", get(google_login_handler))
        .route("/auth/callback", get(oauth_callback_handler))
        .route("/obtener-horas-ocupadas", post(busy_hours_handler))
        .route("/obtener-horas-disponibles", post(availability_handler))
        .route("/crear-evento", post(create_event_handler))
        .with_state(gcal_state)
}
