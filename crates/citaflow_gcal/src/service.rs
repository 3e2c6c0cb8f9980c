// --- File: crates/citaflow_gcal/src/service.rs ---
//! Google Calendar REST client.
//!
//! Talks to the Calendar v3 API directly with the caller's bearer token.
//! Non-success responses surface the upstream status code untouched so the
//! HTTP layer can pass it through; nothing is retried.

use crate::logic::GcalError;
use chrono::DateTime;
use chrono_tz::Tz;
use citaflow_common::services::{AppointmentEvent, BoxFuture, CalendarService, CreatedEvent};
use citaflow_common::HTTP_CLIENT;
use serde::{Deserialize, Serialize};
use tracing::debug;

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

// --- Wire types, Google's camelCase field names ---

#[derive(Deserialize)]
struct EventsPage {
    items: Option<Vec<EventResource>>,
}

#[derive(Deserialize)]
struct EventResource {
    start: Option<EventTime>,
}

#[derive(Deserialize)]
struct EventTime {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
    // all-day events carry `date` instead; they are not bookable slots
}

#[derive(Serialize)]
struct InsertEventBody {
    summary: String,
    description: String,
    start: EventTimeSpec,
    end: EventTimeSpec,
    attendees: Vec<Attendee>,
}

#[derive(Serialize)]
struct EventTimeSpec {
    #[serde(rename = "dateTime")]
    date_time: String,
    #[serde(rename = "timeZone")]
    time_zone: String,
}

#[derive(Serialize)]
struct Attendee {
    email: String,
}

#[derive(Deserialize)]
struct InsertedEvent {
    id: Option<String>,
    status: Option<String>,
}

/// Google Calendar client over the REST API.
#[derive(Default)]
pub struct GoogleCalendarClient;

impl GoogleCalendarClient {
    pub fn new() -> Self {
        Self
    }

    fn events_url(&self, calendar_id: &str) -> String {
        format!("{CALENDAR_API_BASE}/calendars/{calendar_id}/events")
    }
}

impl CalendarService for GoogleCalendarClient {
    type Error = GcalError;

    fn event_start_times(
        &self,
        access_token: &str,
        calendar_id: &str,
        from: DateTime<Tz>,
        to: DateTime<Tz>,
    ) -> BoxFuture<'_, Vec<String>, Self::Error> {
        let access_token = access_token.to_string();
        let url = self.events_url(calendar_id);

        Box::pin(async move {
            let response = HTTP_CLIENT
                .get(&url)
                .bearer_auth(&access_token)
                .query(&[
                    ("timeMin", from.to_rfc3339()),
                    ("timeMax", to.to_rfc3339()),
                    ("singleEvents", "true".to_string()),
                    ("orderBy", "startTime".to_string()),
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

            let page: EventsPage = response.json().await?;
            let starts: Vec<String> = page
                .items
                .unwrap_or_default()
                .into_iter()
                .filter_map(|event| event.start.and_then(|start| start.date_time))
                .collect();
            debug!(count = starts.len(), "fetched event starts");
            Ok(starts)
        })
    }

    fn insert_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event: AppointmentEvent,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error> {
        let access_token = access_token.to_string();
        let url = self.events_url(calendar_id);

        Box::pin(async move {
            let body = InsertEventBody {
                summary: event.summary,
                description: event.description,
                start: EventTimeSpec {
                    date_time: event.start_rfc3339,
                    time_zone: event.time_zone.clone(),
                },
                end: EventTimeSpec {
                    date_time: event.end_rfc3339,
                    time_zone: event.time_zone,
                },
                attendees: vec![Attendee {
                    email: event.attendee_email,
                }],
            };

            let response = HTTP_CLIENT
                .post(&url)
                .bearer_auth(&access_token)
                .json(&body)
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

            let created: InsertedEvent = response.json().await?;
            Ok(CreatedEvent {
                event_id: created.id,
                status: created.status.unwrap_or_else(|| "confirmed".to_string()),
            })
        })
    }
}

/// Mock implementation of CalendarService for testing.
#[cfg(test)]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    /// In-memory calendar holding RFC 3339 event starts. Can be told to
    /// answer like a failing upstream after a number of successful calls.
    pub struct MockCalendarService {
        starts: Mutex<Vec<String>>,
        inserted: Mutex<Vec<AppointmentEvent>>,
        fail_with: Option<u16>,
        fail_after: Mutex<usize>,
    }

    impl MockCalendarService {
        pub fn new(starts: Vec<String>) -> Self {
            Self {
                starts: Mutex::new(starts),
                inserted: Mutex::new(Vec::new()),
                fail_with: None,
                fail_after: Mutex::new(0),
            }
        }

        /// A calendar whose every call answers with the given status.
        pub fn failing(status: u16) -> Self {
            Self::failing_after(0, status)
        }

        /// A calendar that succeeds `calls` times, then answers with the
        /// given status.
        pub fn failing_after(calls: usize, status: u16) -> Self {
            Self {
                starts: Mutex::new(Vec::new()),
                inserted: Mutex::new(Vec::new()),
                fail_with: Some(status),
                fail_after: Mutex::new(calls),
            }
        }

        pub fn inserted_events(&self) -> Vec<AppointmentEvent> {
            self.inserted.lock().expect("mock lock").clone()
        }

        fn check_failure(&self) -> Result<(), GcalError> {
            if let Some(status) = self.fail_with {
                let mut remaining = self.fail_after.lock().expect("mock lock");
                if *remaining == 0 {
                    return Err(GcalError::Api {
                        status,
                        body: "upstream rejected the request".to_string(),
                    });
                }
                *remaining -= 1;
            }
            Ok(())
        }
    }

    impl CalendarService for MockCalendarService {
        type Error = GcalError;

        fn event_start_times(
            &self,
            _access_token: &str,
            _calendar_id: &str,
            from: DateTime<Tz>,
            to: DateTime<Tz>,
        ) -> BoxFuture<'_, Vec<String>, Self::Error> {
            Box::pin(async move {
                self.check_failure()?;
                let starts = self.starts.lock().expect("mock lock").clone();
                let mut in_range = Vec::new();
                for start in starts {
                    let parsed = DateTime::parse_from_rfc3339(&start)
                        .map_err(|e| GcalError::TimeParse(e.to_string()))?
                        .with_timezone(&Utc);
                    if parsed >= from.with_timezone(&Utc) && parsed <= to.with_timezone(&Utc) {
                        in_range.push(start);
                    }
                }
                Ok(in_range)
            })
        }

        fn insert_event(
            &self,
            _access_token: &str,
            _calendar_id: &str,
            event: AppointmentEvent,
        ) -> BoxFuture<'_, CreatedEvent, Self::Error> {
            Box::pin(async move {
                self.check_failure()?;
                self.starts
                    .lock()
                    .expect("mock lock")
                    .push(event.start_rfc3339.clone());
                self.inserted.lock().expect("mock lock").push(event);
                Ok(CreatedEvent {
                    event_id: Some(format!("mock-event-{}", uuid::Uuid::new_v4())),
                    status: "confirmed".to_string(),
                })
            })
        }
    }
}
