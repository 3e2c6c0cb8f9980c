// --- File: crates/citaflow_mailer/src/lib.rs ---
// Declare modules within this crate
pub mod service;
pub mod templates;

pub use service::{AppointmentMailer, MailerError};
