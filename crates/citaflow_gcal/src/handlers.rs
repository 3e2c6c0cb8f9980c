// --- File: crates/citaflow_gcal/src/handlers.rs ---
//! Axum handlers for the booking endpoints.

use crate::auth::GoogleOAuthClient;
use crate::credentials::AdminCredentials;
use crate::logic::{
    busy_slot_label, candidate_slots, compute_availability, local_day_bounds, AvailabilityRequest,
    AvailabilityResponse, BusyHoursRequest, BusyHoursResponse, CreateEventRequest,
    CreateEventResponse, GcalError, NewAppointment,
};
use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::Json;
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use citaflow_common::services::{AppointmentEvent, CalendarService, NotificationService};
use citaflow_common::ApiError;
use citaflow_config::AppConfig;
use citaflow_mailer::templates::{
    admin_notice_body, confirmation_body, AppointmentDetails, ADMIN_NOTICE_SUBJECT,
    CONFIRMATION_SUBJECT,
};
use citaflow_mailer::MailerError;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared state for the booking endpoints.
pub struct GcalState {
    pub config: Arc<AppConfig>,
    pub calendar: Arc<dyn CalendarService<Error = GcalError>>,
    pub admin_credentials: Arc<AdminCredentials>,
    pub oauth: GoogleOAuthClient,
    pub mailer: Option<Arc<dyn NotificationService<Error = MailerError>>>,
}

impl GcalState {
    fn calendar_id(&self) -> &str {
        self.config
            .gcal
            .as_ref()
            .and_then(|g| g.calendar_id.as_deref())
            .unwrap_or("primary")
    }

    fn time_zone(&self) -> Tz {
        let name = self
            .config
            .gcal
            .as_ref()
            .map(|g| g.time_zone())
            .unwrap_or("America/Santiago");
        Tz::from_str(name).unwrap_or_else(|_| {
            warn!(%name, "unrecognized time zone in config, using America/Santiago");
            Tz::America__Santiago
        })
    }
}

#[derive(Deserialize, Debug)]
pub struct OauthCallbackParams {
    pub code: Option<String>,
}

/// GET /google/login — redirect the browser to Google's consent screen.
pub async fn google_login_handler(
    State(state): State<Arc<GcalState>>,
) -> Result<Redirect, ApiError> {
    let url = state
        .oauth
        .authorization_url()
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Redirect::temporary(&url))
}

/// GET /auth/callback — exchange the authorization code and hand the tokens
/// back to the frontend via its redirect URL.
pub async fn oauth_callback_handler(
    State(state): State<Arc<GcalState>>,
    Query(params): Query<OauthCallbackParams>,
) -> Result<Redirect, ApiError> {
    let code = params
        .code
        .ok_or_else(|| ApiError::bad_request("No se recibió el código de autorización"))?;

    let tokens = state.oauth.exchange_code(&code).await.map_err(|e| {
        error!(error = %e, "OAuth code exchange failed");
        ApiError::bad_request("Fallo al obtener el token")
    })?;

    let frontend_url = state
        .config
        .oauth
        .as_ref()
        .map(|o| o.frontend_url.as_str())
        .unwrap_or("/");
    let query = serde_urlencoded::to_string([
        ("token", tokens.access_token.as_str()),
        ("refresh_token", tokens.refresh_token.as_deref().unwrap_or("")),
    ])
    .map_err(|e| ApiError::internal(format!("Failed to encode redirect: {e}")))?;

    info!("OAuth login completed, redirecting to frontend");
    Ok(Redirect::temporary(&format!("{frontend_url}?{query}")))
}

/// POST /obtener-horas-ocupadas — HH:MM start labels of events on one date.
pub async fn busy_hours_handler(
    State(state): State<Arc<GcalState>>,
    Json(payload): Json<BusyHoursRequest>,
) -> Result<Json<BusyHoursResponse>, ApiError> {
    let (access_token, fecha) = payload.validate().map_err(missing_fields)?;

    let date = NaiveDate::parse_from_str(&fecha, "%Y-%m-%d")
        .map_err(|_| ApiError::bad_request("Formato de fecha inválido (YYYY-MM-DD)"))?;
    let tz = state.time_zone();
    let (from, to) = local_day_bounds(date, tz).map_err(calendar_error)?;

    let starts = state
        .calendar
        .event_start_times(&access_token, state.calendar_id(), from, to)
        .await
        .map_err(calendar_error)?;

    let horas_ocupadas = starts.iter().filter_map(|s| busy_slot_label(s)).collect();
    Ok(Json(BusyHoursResponse { horas_ocupadas }))
}

/// POST /obtener-horas-disponibles — free hourly slots per weekday over the
/// rolling window, starting today.
pub async fn availability_handler(
    State(state): State<Arc<GcalState>>,
    Json(payload): Json<AvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let access_token = payload
        .validate()
        .map_err(|_| ApiError::bad_request("Token de acceso no proporcionado"))?;

    let tz = state.time_zone();
    let gcal = state.config.gcal.as_ref();
    let open_hour = gcal.map_or(9, |g| g.open_hour());
    let close_hour = gcal.map_or(18, |g| g.close_hour());
    let window_days = gcal.map_or(7, |g| g.window_days());

    let today = Utc::now().with_timezone(&tz).date_naive();
    let candidates = candidate_slots(open_hour, close_hour);

    // One events query per weekday; failures abort rather than reporting a
    // day as fully free.
    let mut busy_by_date: HashMap<NaiveDate, HashSet<String>> = HashMap::new();
    for date in crate::logic::weekday_window(today, window_days) {
        let (from, to) = local_day_bounds(date, tz).map_err(calendar_error)?;
        let starts = state
            .calendar
            .event_start_times(&access_token, state.calendar_id(), from, to)
            .await
            .map_err(calendar_error)?;
        let busy = starts.iter().filter_map(|s| busy_slot_label(s)).collect();
        busy_by_date.insert(date, busy);
    }

    let availability = compute_availability(today, window_days, &candidates, |date| {
        busy_by_date.remove(&date).unwrap_or_default()
    });

    let horas_disponibles = availability
        .into_iter()
        .map(|(date, slots)| (date.to_string(), slots))
        .collect();
    Ok(Json(AvailabilityResponse { horas_disponibles }))
}

/// POST /crear-evento — create a one-hour appointment, then send the
/// confirmation and admin-notice emails.
pub async fn create_event_handler(
    State(state): State<Arc<GcalState>>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<Json<CreateEventResponse>, ApiError> {
    let appointment = payload.validate().map_err(missing_fields)?;

    let access_token = if appointment.usar_token_admin {
        state.admin_credentials.access_token().await.map_err(|e| {
            error!(error = %e, "admin credential unavailable");
            ApiError::internal("Error interno en el servidor")
        })?
    } else {
        // validate() guarantees the token is present in this branch
        appointment.access_token.clone().unwrap_or_default()
    };

    let tz = state.time_zone();
    let fecha = NaiveDate::parse_from_str(&appointment.fecha, "%Y-%m-%d")
        .map_err(|_| ApiError::bad_request("Formato de fecha inválido (YYYY-MM-DD)"))?;
    let hora = NaiveTime::parse_from_str(&appointment.hora, "%H:%M")
        .map_err(|_| ApiError::bad_request("Formato de hora inválido (HH:MM)"))?;
    let start = tz
        .from_local_datetime(&fecha.and_time(hora))
        .earliest()
        .ok_or_else(|| ApiError::bad_request("Hora inexistente en la zona horaria configurada"))?;
    let end = start + Duration::hours(1);

    let event = AppointmentEvent {
        summary: format!("Cita: {} {}", appointment.nombres, appointment.apellidos),
        description: appointment.motivo.clone(),
        start_rfc3339: start.to_rfc3339(),
        end_rfc3339: end.to_rfc3339(),
        time_zone: tz.name().to_string(),
        attendee_email: appointment.correo.clone(),
    };

    let created = state
        .calendar
        .insert_event(&access_token, state.calendar_id(), event)
        .await
        .map_err(calendar_error)?;
    info!(event_id = ?created.event_id, "appointment created");

    if let Some(mailer) = &state.mailer {
        send_appointment_emails(mailer.as_ref(), &state, &appointment).await?;
    }

    Ok(Json(CreateEventResponse {
        mensaje: "Evento creado correctamente".to_string(),
        id: created.event_id,
    }))
}

async fn send_appointment_emails(
    mailer: &dyn NotificationService<Error = MailerError>,
    state: &GcalState,
    appointment: &NewAppointment,
) -> Result<(), ApiError> {
    let details = AppointmentDetails {
        nombre: &appointment.nombres,
        correo: &appointment.correo,
        fecha: &appointment.fecha,
        hora: &appointment.hora,
        motivo: &appointment.motivo,
    };

    mailer
        .send_email(
            &appointment.correo,
            CONFIRMATION_SUBJECT,
            &confirmation_body(&details),
        )
        .await
        .map_err(mail_error)?;

    if let Some(admin_address) = state
        .config
        .mailer
        .as_ref()
        .map(|m| m.admin_address.as_str())
    {
        mailer
            .send_email(admin_address, ADMIN_NOTICE_SUBJECT, &admin_notice_body(&details))
            .await
            .map_err(mail_error)?;
    }
    Ok(())
}

fn missing_fields(missing: Vec<&'static str>) -> ApiError {
    ApiError::validation(
        "Faltan parámetros requeridos",
        missing.into_iter().map(String::from).collect(),
    )
}

fn mail_error(err: MailerError) -> ApiError {
    error!(error = %err, "failed to send appointment email");
    ApiError::internal("No se pudo enviar el correo de confirmación")
}

/// Maps calendar failures onto wire errors. Upstream API statuses pass
/// through so an expired token surfaces as the 401 Google returned.
fn calendar_error(err: GcalError) -> ApiError {
    match err {
        GcalError::Api { status, body } => {
            warn!(status, %body, "Google Calendar API error");
            ApiError::upstream(status, "Error al obtener eventos de Google Calendar")
        }
        other => {
            error!(error = %other, "calendar operation failed");
            ApiError::internal("Error interno en el servidor")
        }
    }
}
