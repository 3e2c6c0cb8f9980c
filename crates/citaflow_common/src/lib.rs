// --- File: crates/citaflow_common/src/lib.rs ---

// Declare modules within this crate
pub mod features; // Feature flag handling
pub mod http; // HTTP error shape and shared client
pub mod logging; // Logging utilities
pub mod services; // Service abstractions

// Re-export the pieces dependent crates reach for most
pub use features::is_feature_enabled;
pub use http::{ApiError, HTTP_CLIENT};
pub use services::{
    AppointmentEvent, BoxFuture, CalendarService, CreatedEvent, NotificationResult,
    NotificationService,
};
