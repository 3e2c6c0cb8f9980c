// --- File: crates/citaflow_common/src/services.rs ---
//! Service abstractions for external collaborators.
//!
//! These traits decouple the HTTP handlers from the concrete Google Calendar
//! and mail API clients, so tests can inject in-memory implementations.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// An appointment to be written into the shared calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentEvent {
    /// Event title, e.g. "Cita: Ana Rojas".
    pub summary: String,
    /// Reason for the appointment.
    pub description: String,
    /// RFC 3339 start, in the configured zone.
    pub start_rfc3339: String,
    /// RFC 3339 end, one hour after the start.
    pub end_rfc3339: String,
    /// IANA time zone name recorded on the event.
    pub time_zone: String,
    /// Client email to invite as attendee.
    pub attendee_email: String,
}

/// The calendar's answer after inserting an event.
#[derive(Debug, Clone)]
pub struct CreatedEvent {
    pub event_id: Option<String>,
    pub status: String,
}

/// Result of a notification delivery attempt.
#[derive(Debug, Clone)]
pub struct NotificationResult {
    pub message_id: Option<String>,
    pub status: String,
}

/// A trait for calendar operations against a single shared calendar.
///
/// Every method takes the caller's bearer token: this system authenticates
/// each request with an OAuth user token or the refreshed admin token.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// RFC 3339 start timestamps of events between `from` and `to`.
    /// All-day events (date only, no time) are not reported.
    fn event_start_times(
        &self,
        access_token: &str,
        calendar_id: &str,
        from: DateTime<Tz>,
        to: DateTime<Tz>,
    ) -> BoxFuture<'_, Vec<String>, Self::Error>;

    /// Insert an appointment event into the calendar.
    fn insert_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event: AppointmentEvent,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error>;
}

/// A trait for notification delivery (confirmation and admin emails).
pub trait NotificationService: Send + Sync {
    /// Error type returned by notification operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send a plain-text email.
    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> BoxFuture<'_, NotificationResult, Self::Error>;
}
