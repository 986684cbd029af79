//! Error types for the DocSpot core.

use chrono::NaiveDate;

use crate::appointment::AppointmentStatus;

/// Errors produced by DocSpot core operations.
///
/// Authorization denials at the routing layer are *not* errors — they are
/// [`RouteAccess`](crate::gate::RouteAccess) values. Likewise a sign-in with
/// an unknown email or a registration against a taken email report
/// `Ok(false)` rather than an error, because those are expected user
/// outcomes, not faults. Nothing in this taxonomy is retried.
#[derive(Debug, thiserror::Error)]
pub enum DocspotError {
    /// A required field was missing or an input value was unusable.
    #[error("invalid input: {0}")]
    Validation(String),
    /// No doctor with the given id exists in the directory.
    #[error("no doctor with id '{0}'")]
    DoctorNotFound(String),
    /// No patient with the given id exists in the user collection.
    #[error("no patient with id '{0}'")]
    PatientNotFound(String),
    /// No appointment with the given id exists in the ledger.
    #[error("no appointment with id '{0}'")]
    AppointmentNotFound(String),
    /// The acting identity does not own the appointment it tried to change.
    #[error("identity '{actor_id}' does not own appointment '{appointment_id}'")]
    NotOwner {
        appointment_id: String,
        actor_id: String,
    },
    /// The requested status change is not an edge of the appointment lifecycle.
    #[error("appointment cannot move from '{from}' to '{to}'")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
    /// The requested time is not one of the bookable slots.
    #[error("'{0}' is not a bookable time slot")]
    InvalidSlot(String),
    /// The requested date falls outside the open booking window.
    #[error("date {date} is outside the booking window [{opens}, {closes}]")]
    DateOutOfWindow {
        date: NaiveDate,
        opens: NaiveDate,
        closes: NaiveDate,
    },
    /// Failed to read the persisted session document.
    #[error("failed to read session file: {0}")]
    SessionRead(std::io::Error),
    /// Failed to write the persisted session document.
    #[error("failed to write session file: {0}")]
    SessionWrite(std::io::Error),
    /// Failed to serialize the session identity.
    #[error("failed to serialize session identity: {0}")]
    Serialization(serde_json::Error),
    /// A value failed validation in one of the shared typed wrappers.
    #[error(transparent)]
    InvalidValue(#[from] docspot_types::TypeError),
}

/// Result alias for DocSpot core operations.
pub type DocspotResult<T> = std::result::Result<T, DocspotError>;
