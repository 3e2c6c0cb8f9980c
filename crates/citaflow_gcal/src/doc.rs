// --- File: crates/citaflow_gcal/src/doc.rs ---

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{
    AvailabilityRequest, AvailabilityResponse, BusyHoursRequest, BusyHoursResponse,
    CreateEventRequest, CreateEventResponse,
};

#[utoipa::path(
    post,
    path = "/obtener-horas-ocupadas",
    request_body(content = BusyHoursRequest, example = json!({
        "access_token": "ya29.a0AfB...",
        "fecha": "2025-05-05"
    })),
    responses(
        (status = 200, description = "Occupied hour labels for the date", body = BusyHoursResponse,
         example = json!({ "horas_ocupadas": ["09:00", "11:00"] })
        ),
        (status = 400, description = "Missing parameters or malformed date",
         example = json!({ "error": "Faltan parámetros requeridos", "missing": ["fecha"] })
        ),
        (status = 401, description = "Google rejected the access token")
    )
)]
fn doc_busy_hours_handler() {}

#[utoipa::path(
    post,
    path = "/obtener-horas-disponibles",
    request_body(content = AvailabilityRequest, example = json!({
        "access_token": "ya29.a0AfB..."
    })),
    responses(
        (status = 200, description = "Free hourly slots per weekday over the window", body = AvailabilityResponse,
         example = json!({
             "horas_disponibles": {
                 "2025-05-05": ["09:00", "10:00", "12:00"],
                 "2025-05-06": ["09:00"]
             }
         })
        ),
        (status = 400, description = "Missing access token",
         example = json!({ "error": "Token de acceso no proporcionado" })
        )
    )
)]
fn doc_availability_handler() {}

#[utoipa::path(
    post,
    path = "/crear-evento",
    request_body(content = CreateEventRequest, example = json!({
        "nombres": "Ana",
        "apellidos": "Rojas",
        "correo": "ana@example.cl",
        "motivo": "Consulta inicial",
        "fecha": "2025-05-05",
        "hora": "10:00",
        "usar_token_admin": true
    })),
    responses(
        (status = 200, description = "Event created", body = CreateEventResponse,
         example = json!({
             "mensaje": "Evento creado correctamente",
             "id": "abc123xyz456"
         })
        ),
        (status = 400, description = "Missing fields or malformed date/time",
         example = json!({ "error": "Faltan parámetros requeridos", "missing": ["correo", "hora"] })
        ),
        (status = 500, description = "Calendar insert or email delivery failed",
         example = json!({ "error": "Error interno en el servidor" })
        )
    )
)]
fn doc_create_event_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_busy_hours_handler, doc_availability_handler, doc_create_event_handler),
    components(schemas(
        BusyHoursRequest,
        BusyHoursResponse,
        AvailabilityRequest,
        AvailabilityResponse,
        CreateEventRequest,
        CreateEventResponse
    )),
    tags((name = "Citas", description = "Appointment booking endpoints"))
)]
pub struct GcalApiDoc;
