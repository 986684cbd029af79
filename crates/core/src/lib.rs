//! # DocSpot Core
//!
//! Domain logic for the DocSpot appointment-booking marketplace: patients
//! book appointments with doctors, doctors manage their queue, and admins
//! approve doctor applications.
//!
//! This crate contains pure in-memory state and the operations over it:
//! - The session/identity store (sign-in, registration, sign-out, persisted
//!   session restore)
//! - The appointment ledger and its lifecycle state machine
//! - The doctor directory with admin approval/rejection
//! - The role-based authorization gate
//!
//! All state lives in collections owned by [`Docspot`]; nothing outside this
//! crate can mutate a record except through the operations here. There is no
//! database and no network protocol — persistence is limited to the single
//! serialized session identity.
//!
//! **No API concerns**: HTTP routing, request/response shapes, and CORS
//! belong to the `docspot-run` binary.

pub mod appointment;
pub mod config;
pub mod constants;
pub mod directory;
pub mod error;
pub mod gate;
pub mod identity;
pub mod ids;
pub mod ledger;
pub mod persist;
pub mod seed;
pub mod session;

pub use appointment::{Appointment, AppointmentStatus, BookingRequest, Slot};
pub use config::{BookingWindow, CoreConfig};
pub use directory::DoctorDirectory;
pub use error::{DocspotError, DocspotResult};
pub use gate::{check_route, dashboard_route, RouteAccess};
pub use identity::{Doctor, Identity, RegisterData, Role};
pub use ledger::{AppointmentLedger, StatusSummary};
pub use persist::{IdentityStorage, JsonFileStorage, MemoryStorage};
pub use session::{AcceptAnyPassword, CredentialVerifier, SessionStore};

/// The marketplace store.
///
/// Owns the user collection, the doctor directory, the appointment ledger,
/// and the session store, and exposes only the operations the presentation
/// layer needs. Mutations require `&mut self`, so a doctor confirming while
/// the patient cancels the same appointment is serialised by the borrow
/// instead of resolving last-write-wins.
pub struct Docspot {
    users: Vec<Identity>,
    directory: DoctorDirectory,
    ledger: AppointmentLedger,
    session: SessionStore,
    config: CoreConfig,
}

impl Docspot {
    /// Creates an empty marketplace with file-backed session storage at the
    /// configured path. Attempts to restore a persisted session.
    pub fn new(config: CoreConfig) -> Self {
        let storage = Box::new(JsonFileStorage::new(config.session_file().to_path_buf()));
        Self::with_storage(config, storage)
    }

    /// Creates an empty marketplace with explicit session storage.
    pub fn with_storage(config: CoreConfig, storage: Box<dyn IdentityStorage>) -> Self {
        let mut session = SessionStore::new(config.auth_latency(), storage);
        session.restore();
        Self {
            users: Vec::new(),
            directory: DoctorDirectory::new(),
            ledger: AppointmentLedger::new(),
            session,
            config,
        }
    }

    /// Creates a marketplace pre-populated with the demo seed data.
    pub fn seeded(config: CoreConfig) -> DocspotResult<Self> {
        let storage = Box::new(JsonFileStorage::new(config.session_file().to_path_buf()));
        Self::seeded_with_storage(config, storage)
    }

    /// Creates a seeded marketplace with explicit session storage.
    pub fn seeded_with_storage(
        config: CoreConfig,
        storage: Box<dyn IdentityStorage>,
    ) -> DocspotResult<Self> {
        let mut marketplace = Self::with_storage(config, storage);
        marketplace.users = seed::users()?;
        marketplace.directory = DoctorDirectory::with_doctors(seed::doctors()?);
        marketplace.ledger = AppointmentLedger::with_appointments(seed::appointments()?);
        Ok(marketplace)
    }

    // ------------------------------------------------------------------
    // Session / identity
    // ------------------------------------------------------------------

    /// Signs in with an email and password. Suspends for the configured
    /// simulated latency. See [`SessionStore::sign_in`].
    pub async fn sign_in(&mut self, email: &str, password: &str) -> DocspotResult<bool> {
        self.session
            .sign_in(&self.users, &self.directory, email, password)
            .await
    }

    /// Registers a new identity. Suspends for the configured simulated
    /// latency. See [`SessionStore::register`].
    pub async fn register(&mut self, data: RegisterData) -> DocspotResult<bool> {
        self.session
            .register(&mut self.users, &mut self.directory, data)
            .await
    }

    /// Signs out the current identity and deletes the persisted session.
    pub fn sign_out(&mut self) -> DocspotResult<()> {
        self.session.sign_out()
    }

    /// The currently authenticated identity, if any.
    pub fn current_identity(&self) -> Option<&Identity> {
        self.session.current()
    }

    /// True while a sign-in or registration is in flight.
    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    // ------------------------------------------------------------------
    // Appointments
    // ------------------------------------------------------------------

    /// Books an appointment for the given patient. Suspends for the
    /// configured simulated latency.
    ///
    /// # Errors
    ///
    /// [`DocspotError::PatientNotFound`] for an unknown patient id,
    /// [`DocspotError::Validation`] when the actor is not a customer,
    /// [`DocspotError::DoctorNotFound`] for an unknown doctor id, and
    /// [`DocspotError::DateOutOfWindow`] for a date outside the booking
    /// window. The slot is validated by its type.
    pub async fn book(
        &mut self,
        patient_id: &str,
        request: BookingRequest,
    ) -> DocspotResult<Appointment> {
        tokio::time::sleep(self.config.booking_latency()).await;

        let patient = self
            .users
            .iter()
            .find(|u| u.id == patient_id)
            .ok_or_else(|| DocspotError::PatientNotFound(patient_id.to_owned()))?;
        if patient.role != Role::Customer {
            return Err(DocspotError::Validation(
                "only customers can book appointments".into(),
            ));
        }

        let doctor = self
            .directory
            .get(&request.doctor_id)
            .ok_or_else(|| DocspotError::DoctorNotFound(request.doctor_id.clone()))?;

        self.ledger
            .book(patient, doctor, request, self.config.booking_window())
    }

    /// Confirms a pending appointment as the acting doctor.
    pub fn confirm_appointment(&mut self, appointment_id: &str, actor_id: &str) -> DocspotResult<()> {
        self.ledger.confirm(appointment_id, actor_id)
    }

    /// Cancels a pending appointment as the owning doctor or patient.
    pub fn cancel_appointment(&mut self, appointment_id: &str, actor_id: &str) -> DocspotResult<()> {
        self.ledger.cancel(appointment_id, actor_id)
    }

    /// Completes a confirmed appointment as the acting doctor.
    pub fn complete_appointment(&mut self, appointment_id: &str, actor_id: &str) -> DocspotResult<()> {
        self.ledger.complete(appointment_id, actor_id)
    }

    /// All appointments, in booking order.
    pub fn appointments(&self) -> &[Appointment] {
        self.ledger.all()
    }

    /// Looks up a single appointment.
    pub fn appointment(&self, appointment_id: &str) -> Option<&Appointment> {
        self.ledger.get(appointment_id)
    }

    /// Appointments booked by a patient.
    pub fn appointments_for_patient(&self, patient_id: &str) -> Vec<&Appointment> {
        self.ledger.for_patient(patient_id)
    }

    /// Appointments in a doctor's queue.
    pub fn appointments_for_doctor(&self, doctor_id: &str) -> Vec<&Appointment> {
        self.ledger.for_doctor(doctor_id)
    }

    /// Appointments currently in a given status.
    pub fn appointments_with_status(&self, status: AppointmentStatus) -> Vec<&Appointment> {
        self.ledger.with_status(status)
    }

    /// Status counts for a patient's history view.
    pub fn patient_summary(&self, patient_id: &str) -> StatusSummary {
        self.ledger.summary_for_patient(patient_id)
    }

    /// Status counts for a doctor's queue view.
    pub fn doctor_summary(&self, doctor_id: &str) -> StatusSummary {
        self.ledger.summary_for_doctor(doctor_id)
    }

    // ------------------------------------------------------------------
    // Doctor directory
    // ------------------------------------------------------------------

    /// Approves a doctor for the public listing. Admin-only at the gate.
    pub fn approve_doctor(&mut self, doctor_id: &str) -> DocspotResult<()> {
        self.directory.approve(doctor_id)
    }

    /// Removes a doctor from the directory entirely. Admin-only at the gate.
    pub fn reject_doctor(&mut self, doctor_id: &str) -> DocspotResult<()> {
        self.directory.reject(doctor_id)
    }

    /// Looks up a doctor by id.
    pub fn doctor(&self, doctor_id: &str) -> Option<&Doctor> {
        self.directory.get(doctor_id)
    }

    /// All doctors, including unapproved ones.
    pub fn doctors(&self) -> &[Doctor] {
        self.directory.all()
    }

    /// Doctors visible in the public marketplace listing.
    pub fn approved_doctors(&self) -> Vec<&Doctor> {
        self.directory.approved()
    }

    /// Doctors awaiting admin review.
    pub fn pending_doctors(&self) -> Vec<&Doctor> {
        self.directory.pending()
    }

    /// The plain-user collection (customers and admins).
    pub fn users(&self) -> &[Identity] {
        &self.users
    }

    /// Total identities across users and doctors, for the admin overview.
    pub fn user_count(&self) -> usize {
        self.users.len() + self.directory.len()
    }

    /// The configuration the store was started with.
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }
}
