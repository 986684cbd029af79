//! The doctor directory and its admin approval operations.
//!
//! The directory owns the doctor collection; approval and rejection are the
//! only mutations. Approval flips `approved` to true exactly once (approving
//! again is a no-op, not an error). Rejection deletes the record outright —
//! there is no "rejected" flag. Appointments already booked with a rejected
//! doctor are intentionally orphaned: their snapshot fields remain
//! displayable while a live lookup of the doctor fails.

use docspot_types::EmailAddress;

use crate::error::{DocspotError, DocspotResult};
use crate::identity::Doctor;

/// The owned collection of doctor records.
#[derive(Debug, Default)]
pub struct DoctorDirectory {
    doctors: Vec<Doctor>,
}

impl DoctorDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory pre-populated with existing records.
    pub(crate) fn with_doctors(doctors: Vec<Doctor>) -> Self {
        Self { doctors }
    }

    /// Adds a newly registered doctor.
    pub(crate) fn push(&mut self, doctor: Doctor) {
        self.doctors.push(doctor);
    }

    /// Approves a doctor for the public listing. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`DocspotError::DoctorNotFound`] when no record matches.
    pub fn approve(&mut self, doctor_id: &str) -> DocspotResult<()> {
        let doctor = self
            .doctors
            .iter_mut()
            .find(|d| d.id() == doctor_id)
            .ok_or_else(|| DocspotError::DoctorNotFound(doctor_id.to_owned()))?;
        if !doctor.approved {
            doctor.approved = true;
            tracing::info!(doctor_id, "doctor approved");
        }
        Ok(())
    }

    /// Removes a doctor from the directory entirely. Not reversible.
    ///
    /// # Errors
    ///
    /// Returns [`DocspotError::DoctorNotFound`] when no record matches.
    pub fn reject(&mut self, doctor_id: &str) -> DocspotResult<()> {
        let index = self
            .doctors
            .iter()
            .position(|d| d.id() == doctor_id)
            .ok_or_else(|| DocspotError::DoctorNotFound(doctor_id.to_owned()))?;
        self.doctors.remove(index);
        tracing::info!(doctor_id, "doctor rejected and removed");
        Ok(())
    }

    /// Looks up a doctor by id.
    pub fn get(&self, doctor_id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id() == doctor_id)
    }

    /// Looks up a doctor by sign-in email.
    pub fn get_by_email(&self, email: &EmailAddress) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.email() == email)
    }

    /// All doctors, including unapproved ones. Admin overview.
    pub fn all(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Doctors visible in the public marketplace listing.
    pub fn approved(&self) -> Vec<&Doctor> {
        self.doctors.iter().filter(|d| d.approved).collect()
    }

    /// Doctors awaiting admin review.
    pub fn pending(&self) -> Vec<&Doctor> {
        self.doctors.iter().filter(|d| !d.approved).collect()
    }

    /// Number of doctor records.
    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    /// Returns true when the directory holds no records.
    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}
