// --- File: crates/citaflow_gcal/src/logic.rs ---
use crate::credentials::CredentialError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug)]
pub enum GcalError {
    #[error("Google API returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse time: {0}")]
    TimeParse(String),
    #[error("Failed to encode request: {0}")]
    Encode(String),
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),
}

// --- Request / Response DTOs ---
// Field names are the wire contract (Spanish, as the frontend expects them).
// Request fields are all optional so validation can report every missing
// field at once instead of failing on the first absent key.

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BusyHoursRequest {
    pub access_token: Option<String>,
    /// Date in YYYY-MM-DD format
    pub fecha: Option<String>,
}

impl BusyHoursRequest {
    pub fn validate(self) -> Result<(String, String), Vec<&'static str>> {
        let mut missing = Vec::new();
        if is_blank(&self.access_token) {
            missing.push("access_token");
        }
        if is_blank(&self.fecha) {
            missing.push("fecha");
        }
        if missing.is_empty() {
            Ok((
                self.access_token.unwrap_or_default(),
                self.fecha.unwrap_or_default(),
            ))
        } else {
            Err(missing)
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BusyHoursResponse {
    /// Occupied HH:MM labels for the requested date
    pub horas_ocupadas: Vec<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AvailabilityRequest {
    pub access_token: Option<String>,
}

impl AvailabilityRequest {
    pub fn validate(self) -> Result<String, Vec<&'static str>> {
        if is_blank(&self.access_token) {
            Err(vec!["access_token"])
        } else {
            Ok(self.access_token.unwrap_or_default())
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AvailabilityResponse {
    /// ISO date → ordered free HH:MM labels; weekends carry no entry
    pub horas_disponibles: BTreeMap<String, Vec<String>>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateEventRequest {
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    pub correo: Option<String>,
    pub motivo: Option<String>,
    /// Date in YYYY-MM-DD format
    pub fecha: Option<String>,
    /// Hour in HH:MM format
    pub hora: Option<String>,
    /// Book with the persisted admin credential instead of a user token
    #[serde(default)]
    pub usar_token_admin: bool,
    pub access_token: Option<String>,
}

/// A fully validated appointment request.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub nombres: String,
    pub apellidos: String,
    pub correo: String,
    pub motivo: String,
    pub fecha: String,
    pub hora: String,
    pub usar_token_admin: bool,
    pub access_token: Option<String>,
}

impl CreateEventRequest {
    pub fn validate(self) -> Result<NewAppointment, Vec<&'static str>> {
        let mut missing = Vec::new();
        for (field, name) in [
            (&self.nombres, "nombres"),
            (&self.apellidos, "apellidos"),
            (&self.correo, "correo"),
            (&self.motivo, "motivo"),
            (&self.fecha, "fecha"),
            (&self.hora, "hora"),
        ] {
            if is_blank(field) {
                missing.push(name);
            }
        }
        // A user token is only required when not booking as admin.
        if !self.usar_token_admin && is_blank(&self.access_token) {
            missing.push("access_token");
        }
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(NewAppointment {
            nombres: self.nombres.unwrap_or_default(),
            apellidos: self.apellidos.unwrap_or_default(),
            correo: self.correo.unwrap_or_default(),
            motivo: self.motivo.unwrap_or_default(),
            fecha: self.fecha.unwrap_or_default(),
            hora: self.hora.unwrap_or_default(),
            usar_token_admin: self.usar_token_admin,
            access_token: self.access_token,
        })
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateEventResponse {
    pub mensaje: String,
    pub id: Option<String>,
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |v| v.trim().is_empty())
}

// --- Availability Logic ---

/// The fixed hourly candidate labels, `open_hour` inclusive to `close_hour`
/// exclusive: `candidate_slots(9, 18)` yields "09:00" through "17:00".
pub fn candidate_slots(open_hour: u32, close_hour: u32) -> Vec<String> {
    (open_hour..close_hour)
        .map(|hour| format!("{hour:02}:00"))
        .collect()
}

/// Truncates an RFC 3339 event start to its HH:MM label, in the event's own
/// offset. Returns None for unparseable input (e.g. all-day events report a
/// bare date, not a timestamp).
pub fn busy_slot_label(start_rfc3339: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(start_rfc3339)
        .ok()
        .map(|dt| dt.format("%H:%M").to_string())
}

/// Candidate slots not occupied on a given day, in candidate order.
///
/// Matching is exact label equality: an event starting at "09:30" does NOT
/// block the "09:00" slot. Off-hour starts simply never match a candidate.
/// This mirrors the booking frontend, which only ever creates on-the-hour
/// events.
pub fn free_slots(candidates: &[String], busy: &HashSet<String>) -> Vec<String> {
    candidates
        .iter()
        .filter(|slot| !busy.contains(slot.as_str()))
        .cloned()
        .collect()
}

/// The weekdays within `[start, start + days)`; Saturdays and Sundays are
/// dropped entirely rather than reported empty.
pub fn weekday_window(start: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days)
        .map(|offset| start + Duration::days(i64::from(offset)))
        .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

/// Computes free slots per weekday across the window.
///
/// Pure and total: `busy_for` is expected to be a lookup over data the caller
/// already fetched, so this function itself performs no I/O and cannot fail.
/// A fully booked weekday yields an empty entry, which is distinct from a
/// skipped weekend (no entry at all).
pub fn compute_availability<F>(
    window_start: NaiveDate,
    window_days: u32,
    candidates: &[String],
    mut busy_for: F,
) -> BTreeMap<NaiveDate, Vec<String>>
where
    F: FnMut(NaiveDate) -> HashSet<String>,
{
    let mut availability = BTreeMap::new();
    for date in weekday_window(window_start, window_days) {
        let busy = busy_for(date);
        availability.insert(date, free_slots(candidates, &busy));
    }
    availability
}

/// Local midnight-to-23:59:59 bounds of a date in the given zone.
///
/// In Chile the spring-forward gap sits at local midnight, so midnight itself
/// may not exist; the start then falls on the first instant after the gap.
pub fn local_day_bounds(date: NaiveDate, tz: Tz) -> Result<(DateTime<Tz>, DateTime<Tz>), GcalError> {
    let start_naive = date.and_time(NaiveTime::MIN);
    let end_naive = start_naive + Duration::days(1) - Duration::seconds(1);
    let start = resolve_local(tz, start_naive)?;
    let end = resolve_local(tz, end_naive)?;
    Ok((start, end))
}

/// Resolves a wall-clock time in `tz`, stepping forward past a DST gap when
/// the requested time was skipped.
fn resolve_local(tz: Tz, naive: NaiveDateTime) -> Result<DateTime<Tz>, GcalError> {
    for offset_hours in 0..=3 {
        let candidate = naive + Duration::hours(offset_hours);
        if let Some(resolved) = tz.from_local_datetime(&candidate).earliest() {
            return Ok(resolved);
        }
    }
    Err(GcalError::TimeParse(format!("no valid local time near {naive}")))
}
