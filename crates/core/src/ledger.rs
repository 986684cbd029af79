//! The appointment ledger.
//!
//! The ledger owns the appointment collection outright: callers create and
//! transition records only through the operations here, never by reaching
//! into a shared array. Every mutation takes `&mut self`, so two logically
//! concurrent actors (a doctor confirming while the patient cancels) are
//! serialised by the borrow rather than resolving last-write-wins.
//!
//! Appointments are only ever created by booking and are never deleted; a
//! cancelled or completed record stays in the ledger as history.

use serde::Serialize;

use crate::appointment::{Appointment, AppointmentStatus, BookingRequest};
use crate::config::BookingWindow;
use crate::error::{DocspotError, DocspotResult};
use crate::identity::{Doctor, Identity};
use crate::ids;

/// Per-status appointment counts for a dashboard view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub cancelled: usize,
    pub completed: usize,
}

impl StatusSummary {
    fn tally<'a>(appointments: impl Iterator<Item = &'a Appointment>) -> Self {
        let mut summary = Self::default();
        for appointment in appointments {
            summary.total += 1;
            match appointment.status {
                AppointmentStatus::Pending => summary.pending += 1,
                AppointmentStatus::Confirmed => summary.confirmed += 1,
                AppointmentStatus::Cancelled => summary.cancelled += 1,
                AppointmentStatus::Completed => summary.completed += 1,
            }
        }
        summary
    }
}

/// The owned collection of appointment records.
#[derive(Debug, Default)]
pub struct AppointmentLedger {
    appointments: Vec<Appointment>,
}

impl AppointmentLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger pre-populated with existing records.
    pub(crate) fn with_appointments(appointments: Vec<Appointment>) -> Self {
        Self { appointments }
    }

    /// Books a new appointment for `patient` with `doctor`.
    ///
    /// Snapshots the patient name and the doctor's name and specialty into
    /// the new record; those fields stay frozen for the life of the
    /// appointment. The new record always starts `pending`.
    ///
    /// # Errors
    ///
    /// Returns [`DocspotError::DateOutOfWindow`] when the requested date is
    /// not inside `window`. The slot is already proven valid by its type, and
    /// the caller has already resolved the doctor record.
    pub fn book(
        &mut self,
        patient: &Identity,
        doctor: &Doctor,
        request: BookingRequest,
        window: BookingWindow,
    ) -> DocspotResult<Appointment> {
        if !window.contains(request.date) {
            return Err(DocspotError::DateOutOfWindow {
                date: request.date,
                opens: window.opens(),
                closes: window.closes(),
            });
        }

        let appointment = Appointment {
            id: ids::generate(),
            patient_id: patient.id.clone(),
            doctor_id: doctor.id().to_owned(),
            patient_name: patient.name.to_string(),
            doctor_name: doctor.profile.name.to_string(),
            doctor_specialty: doctor.specialty.clone(),
            date: request.date,
            time: request.time,
            status: AppointmentStatus::Pending,
            notes: request.notes.filter(|n| !n.trim().is_empty()),
            documents: request.documents,
        };

        tracing::info!(
            appointment_id = %appointment.id,
            doctor_id = %appointment.doctor_id,
            date = %appointment.date,
            "appointment booked"
        );

        self.appointments.push(appointment.clone());
        Ok(appointment)
    }

    /// Confirms a pending appointment. Only the owning doctor may confirm.
    pub fn confirm(&mut self, appointment_id: &str, actor_id: &str) -> DocspotResult<()> {
        let appointment = self.find_mut(appointment_id)?;
        if appointment.doctor_id != actor_id {
            return Err(DocspotError::NotOwner {
                appointment_id: appointment_id.to_owned(),
                actor_id: actor_id.to_owned(),
            });
        }
        Self::transition(appointment, AppointmentStatus::Confirmed)
    }

    /// Cancels a pending appointment. The owning doctor or the owning
    /// patient may cancel.
    pub fn cancel(&mut self, appointment_id: &str, actor_id: &str) -> DocspotResult<()> {
        let appointment = self.find_mut(appointment_id)?;
        if appointment.doctor_id != actor_id && appointment.patient_id != actor_id {
            return Err(DocspotError::NotOwner {
                appointment_id: appointment_id.to_owned(),
                actor_id: actor_id.to_owned(),
            });
        }
        Self::transition(appointment, AppointmentStatus::Cancelled)
    }

    /// Marks a confirmed appointment as completed. Only the owning doctor
    /// may complete.
    pub fn complete(&mut self, appointment_id: &str, actor_id: &str) -> DocspotResult<()> {
        let appointment = self.find_mut(appointment_id)?;
        if appointment.doctor_id != actor_id {
            return Err(DocspotError::NotOwner {
                appointment_id: appointment_id.to_owned(),
                actor_id: actor_id.to_owned(),
            });
        }
        Self::transition(appointment, AppointmentStatus::Completed)
    }

    /// All appointments, in booking order. Read-only admin overview.
    pub fn all(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Looks up a single appointment.
    pub fn get(&self, appointment_id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == appointment_id)
    }

    /// Appointments booked by the given patient. Pure read.
    pub fn for_patient(&self, patient_id: &str) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .collect()
    }

    /// Appointments in the given doctor's queue. Pure read.
    pub fn for_doctor(&self, doctor_id: &str) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.doctor_id == doctor_id)
            .collect()
    }

    /// Appointments currently in the given status. Pure read.
    pub fn with_status(&self, status: AppointmentStatus) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.status == status)
            .collect()
    }

    /// Status counts for a patient's booking history view.
    pub fn summary_for_patient(&self, patient_id: &str) -> StatusSummary {
        StatusSummary::tally(
            self.appointments
                .iter()
                .filter(|a| a.patient_id == patient_id),
        )
    }

    /// Status counts for a doctor's queue view.
    pub fn summary_for_doctor(&self, doctor_id: &str) -> StatusSummary {
        StatusSummary::tally(self.appointments.iter().filter(|a| a.doctor_id == doctor_id))
    }

    fn find_mut(&mut self, appointment_id: &str) -> DocspotResult<&mut Appointment> {
        self.appointments
            .iter_mut()
            .find(|a| a.id == appointment_id)
            .ok_or_else(|| DocspotError::AppointmentNotFound(appointment_id.to_owned()))
    }

    fn transition(appointment: &mut Appointment, next: AppointmentStatus) -> DocspotResult<()> {
        if !appointment.status.can_transition_to(next) {
            return Err(DocspotError::InvalidTransition {
                from: appointment.status,
                to: next,
            });
        }
        tracing::info!(
            appointment_id = %appointment.id,
            from = %appointment.status,
            to = %next,
            "appointment status changed"
        );
        appointment.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::Slot;
    use crate::identity::Role;
    use chrono::NaiveDate;
    use docspot_types::{EmailAddress, NonEmptyText, Rating};

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid test date")
    }

    fn patient() -> Identity {
        Identity {
            id: "1".into(),
            email: EmailAddress::parse("john@example.com").expect("valid email"),
            name: NonEmptyText::new("John Smith").expect("valid name"),
            role: Role::Customer,
            avatar: None,
        }
    }

    fn doctor(id: &str, name: &str, specialty: &str) -> Doctor {
        Doctor {
            profile: Identity {
                id: id.into(),
                email: EmailAddress::parse(&format!("{id}@example.com")).expect("valid email"),
                name: NonEmptyText::new(name).expect("valid name"),
                role: Role::Doctor,
                avatar: None,
            },
            specialty: specialty.into(),
            experience: 10,
            rating: Rating::new(4.8).expect("valid rating"),
            location: "Downtown Medical Center".into(),
            bio: "Test doctor".into(),
            fees: 200,
            availability: vec!["Mon".into()],
            approved: true,
            qualifications: vec!["MBBS".into()],
        }
    }

    fn window() -> BookingWindow {
        BookingWindow::starting(date("2024-01-15"))
    }

    fn request(doctor_id: &str, date_str: &str, slot: &str) -> BookingRequest {
        BookingRequest {
            doctor_id: doctor_id.into(),
            date: date(date_str),
            time: Slot::parse(slot).expect("valid slot"),
            notes: Some("Regular check-up".into()),
            documents: vec!["scan.pdf".into()],
        }
    }

    fn booked_ledger() -> (AppointmentLedger, String) {
        let mut ledger = AppointmentLedger::new();
        let appointment = ledger
            .book(
                &patient(),
                &doctor("doc1", "Dr. Sarah Smith", "Cardiology"),
                request("doc1", "2024-02-01", "10:00 AM"),
                window(),
            )
            .expect("booking succeeds");
        let id = appointment.id.clone();
        (ledger, id)
    }

    #[test]
    fn booking_creates_a_pending_snapshot() {
        let (ledger, id) = booked_ledger();
        assert_eq!(ledger.all().len(), 1);

        let appointment = ledger.get(&id).expect("appointment exists");
        assert_eq!(appointment.status, AppointmentStatus::Pending);
        assert_eq!(appointment.patient_id, "1");
        assert_eq!(appointment.doctor_id, "doc1");
        assert_eq!(appointment.patient_name, "John Smith");
        assert_eq!(appointment.doctor_name, "Dr. Sarah Smith");
        assert_eq!(appointment.doctor_specialty, "Cardiology");
        assert_eq!(appointment.time.as_str(), "10:00 AM");
        assert_eq!(appointment.documents, vec!["scan.pdf"]);
    }

    #[test]
    fn booking_rejects_dates_outside_the_window() {
        let mut ledger = AppointmentLedger::new();
        let doc = doctor("doc1", "Dr. Sarah Smith", "Cardiology");

        for bad in ["2024-01-14", "2024-02-15", "2023-06-01"] {
            let err = ledger
                .book(&patient(), &doc, request("doc1", bad, "10:00 AM"), window())
                .expect_err("out-of-window date must fail");
            assert!(matches!(err, DocspotError::DateOutOfWindow { .. }));
        }
        assert!(ledger.all().is_empty());
    }

    #[test]
    fn doctor_confirms_then_completes() {
        let (mut ledger, id) = booked_ledger();
        ledger.confirm(&id, "doc1").expect("confirm");
        assert_eq!(
            ledger.get(&id).expect("exists").status,
            AppointmentStatus::Confirmed
        );
        ledger.complete(&id, "doc1").expect("complete");
        assert_eq!(
            ledger.get(&id).expect("exists").status,
            AppointmentStatus::Completed
        );
    }

    #[test]
    fn non_owning_doctor_cannot_confirm() {
        let (mut ledger, id) = booked_ledger();
        let err = ledger.confirm(&id, "doc2").expect_err("wrong doctor");
        assert!(matches!(err, DocspotError::NotOwner { .. }));
        assert_eq!(
            ledger.get(&id).expect("exists").status,
            AppointmentStatus::Pending
        );
    }

    #[test]
    fn patient_or_doctor_may_cancel_pending() {
        let (mut ledger, id) = booked_ledger();
        ledger.cancel(&id, "1").expect("patient cancels own booking");
        assert_eq!(
            ledger.get(&id).expect("exists").status,
            AppointmentStatus::Cancelled
        );

        let (mut ledger, id) = booked_ledger();
        ledger.cancel(&id, "doc1").expect("doctor cancels own queue");
        assert_eq!(
            ledger.get(&id).expect("exists").status,
            AppointmentStatus::Cancelled
        );

        let (mut ledger, id) = booked_ledger();
        let err = ledger.cancel(&id, "stranger").expect_err("stranger");
        assert!(matches!(err, DocspotError::NotOwner { .. }));
    }

    #[test]
    fn terminal_statuses_reject_further_transitions() {
        let (mut ledger, id) = booked_ledger();
        ledger.cancel(&id, "1").expect("cancel");

        let err = ledger.confirm(&id, "doc1").expect_err("cancelled is terminal");
        assert!(matches!(err, DocspotError::InvalidTransition { .. }));

        let (mut ledger, id) = booked_ledger();
        ledger.confirm(&id, "doc1").expect("confirm");
        ledger.complete(&id, "doc1").expect("complete");
        let err = ledger.cancel(&id, "1").expect_err("completed is terminal");
        assert!(matches!(err, DocspotError::InvalidTransition { .. }));
    }

    #[test]
    fn completing_a_pending_appointment_is_rejected() {
        let (mut ledger, id) = booked_ledger();
        let err = ledger.complete(&id, "doc1").expect_err("must confirm first");
        assert!(matches!(
            err,
            DocspotError::InvalidTransition {
                from: AppointmentStatus::Pending,
                to: AppointmentStatus::Completed,
            }
        ));
    }

    #[test]
    fn transitions_on_unknown_ids_fail_loudly() {
        let mut ledger = AppointmentLedger::new();
        assert!(matches!(
            ledger.confirm("missing", "doc1"),
            Err(DocspotError::AppointmentNotFound(_))
        ));
        assert!(matches!(
            ledger.cancel("missing", "1"),
            Err(DocspotError::AppointmentNotFound(_))
        ));
    }

    #[test]
    fn filters_are_pure_reads() {
        let (mut ledger, _) = booked_ledger();
        ledger
            .book(
                &patient(),
                &doctor("doc2", "Dr. Michael Johnson", "Dermatology"),
                request("doc2", "2024-01-20", "2:30 PM"),
                window(),
            )
            .expect("second booking");

        let before = ledger.all().len();
        let for_patient = ledger.for_patient("1");
        let for_doctor = ledger.for_doctor("doc1");
        let pending = ledger.with_status(AppointmentStatus::Pending);

        assert_eq!(for_patient.len(), 2);
        assert_eq!(for_doctor.len(), 1);
        assert_eq!(pending.len(), 2);
        assert_eq!(ledger.all().len(), before);
    }

    #[test]
    fn summaries_count_per_status() {
        let (mut ledger, id) = booked_ledger();
        ledger
            .book(
                &patient(),
                &doctor("doc1", "Dr. Sarah Smith", "Cardiology"),
                request("doc1", "2024-01-20", "2:30 PM"),
                window(),
            )
            .expect("second booking");
        ledger.confirm(&id, "doc1").expect("confirm");

        let summary = ledger.summary_for_doctor("doc1");
        assert_eq!(summary.total, 2);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.confirmed, 1);
        assert_eq!(summary.cancelled, 0);
        assert_eq!(summary.completed, 0);

        assert_eq!(ledger.summary_for_patient("1").total, 2);
        assert_eq!(ledger.summary_for_patient("absent").total, 0);
    }

    #[test]
    fn blank_notes_are_dropped() {
        let mut ledger = AppointmentLedger::new();
        let mut req = request("doc1", "2024-02-01", "10:00 AM");
        req.notes = Some("   ".into());
        let appointment = ledger
            .book(
                &patient(),
                &doctor("doc1", "Dr. Sarah Smith", "Cardiology"),
                req,
                window(),
            )
            .expect("booking succeeds");
        assert!(appointment.notes.is_none());
    }
}
