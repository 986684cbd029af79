//! Appointment records and their lifecycle.
//!
//! The lifecycle is a small state machine:
//!
//! ```text
//! pending ──> confirmed ──> completed
//!    │
//!    └──────> cancelled
//! ```
//!
//! `cancelled` and `completed` are terminal. The legal edges are encoded on
//! [`AppointmentStatus`]; who may drive each edge is enforced by the ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::TIME_SLOTS;
use crate::error::{DocspotError, DocspotResult};

/// Lifecycle status of an appointment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Booked by the patient, awaiting the doctor's decision.
    Pending,
    /// Accepted by the doctor.
    Confirmed,
    /// Called off by the doctor or the patient. Terminal.
    Cancelled,
    /// Carried out by the doctor. Terminal.
    Completed,
}

impl AppointmentStatus {
    /// Returns true if no further transition is possible from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Cancelled | AppointmentStatus::Completed)
    }

    /// Returns true if `next` is a legal edge from this status.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (*self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed)
        )
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A time-of-day slot label from the fixed bookable set.
///
/// Once constructed, the label is guaranteed to be one of
/// [`TIME_SLOTS`](crate::constants::TIME_SLOTS).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot(String);

impl Slot {
    /// Validates a slot label against the fixed set.
    ///
    /// # Errors
    ///
    /// Returns [`DocspotError::InvalidSlot`] when the label is not offered.
    pub fn parse(label: &str) -> DocspotResult<Self> {
        if TIME_SLOTS.contains(&label) {
            Ok(Self(label.to_owned()))
        } else {
            Err(DocspotError::InvalidSlot(label.to_owned()))
        }
    }

    /// Returns the slot label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Slot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Slot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Slot::parse(&label).map_err(serde::de::Error::custom)
    }
}

/// A booked appointment.
///
/// `patient_name`, `doctor_name` and `doctor_specialty` are snapshots taken
/// at booking time and are never resynchronised with the live records. This
/// is intentional: the appointment is a historical record of what the patient
/// saw when booking, and it stays displayable even after the doctor record is
/// renamed or removed. Do not replace these fields with a live lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Opaque record id.
    pub id: String,
    /// Id of the booking patient.
    pub patient_id: String,
    /// Id of the booked doctor.
    pub doctor_id: String,
    /// Patient display name, snapshotted at booking time.
    pub patient_name: String,
    /// Doctor display name, snapshotted at booking time.
    pub doctor_name: String,
    /// Doctor specialty, snapshotted at booking time.
    pub doctor_specialty: String,
    /// Calendar date of the appointment.
    pub date: NaiveDate,
    /// Time-of-day slot label.
    pub time: Slot,
    /// Lifecycle status.
    pub status: AppointmentStatus,
    /// Free-form notes supplied by the patient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Names of uploaded documents. Only the names are retained, never the
    /// content — a deliberate simplification, not a bug.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<String>,
}

/// Input to [`book`](crate::Docspot::book).
#[derive(Clone, Debug, Deserialize)]
pub struct BookingRequest {
    /// Id of the doctor to book.
    pub doctor_id: String,
    /// Requested calendar date.
    pub date: NaiveDate,
    /// Requested slot label.
    pub time: Slot,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Uploaded document names (content is never retained).
    #[serde(default)]
    pub documents: Vec<String>,
}
