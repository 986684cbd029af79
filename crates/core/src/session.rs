//! The session/identity store.
//!
//! Holds the currently authenticated identity (or none), exposes sign-in,
//! registration and sign-out, and persists the identity across restarts via
//! an [`IdentityStorage`] backend.
//!
//! Sign-in, registration and booking simulate network latency: the store
//! suspends on `tokio::time::sleep` and reports a transient `loading` state
//! while a call is in flight. Because every mutating operation takes
//! `&mut self`, overlapping calls serialise on the exclusive borrow instead
//! of racing over the persisted identity.

use std::time::Duration;

use docspot_types::EmailAddress;

use crate::directory::DoctorDirectory;
use crate::error::DocspotResult;
use crate::identity::{Identity, RegisterData, Role};
use crate::ids;
use crate::persist::IdentityStorage;

/// Checks a presented password against an identity.
///
/// Abstracted so real credential verification can be plugged in later; the
/// store only asks "may this identity sign in with this password".
pub trait CredentialVerifier: Send {
    /// Returns true when `password` is acceptable for `identity`.
    fn verify(&self, identity: &Identity, password: &str) -> bool;
}

/// A verifier stub that accepts any password.
///
/// This is **not** authentication. The marketplace never stored credentials,
/// so sign-in succeeds for any password as long as the email exists. Kept as
/// an explicit, named stub so nobody mistakes it for a real check.
#[derive(Debug, Default)]
pub struct AcceptAnyPassword;

impl CredentialVerifier for AcceptAnyPassword {
    fn verify(&self, _identity: &Identity, _password: &str) -> bool {
        true
    }
}

/// The session/identity store.
pub struct SessionStore {
    current: Option<Identity>,
    loading: bool,
    latency: Duration,
    storage: Box<dyn IdentityStorage>,
    verifier: Box<dyn CredentialVerifier>,
}

impl SessionStore {
    /// Creates a store with the [`AcceptAnyPassword`] stub verifier.
    ///
    /// `latency` is the simulated network delay applied to sign-in and
    /// registration.
    pub fn new(latency: Duration, storage: Box<dyn IdentityStorage>) -> Self {
        Self::with_verifier(latency, storage, Box::new(AcceptAnyPassword))
    }

    /// Creates a store with an explicit credential verifier.
    pub fn with_verifier(
        latency: Duration,
        storage: Box<dyn IdentityStorage>,
        verifier: Box<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            current: None,
            loading: false,
            latency,
            storage,
            verifier,
        }
    }

    /// Attempts to restore a persisted session.
    ///
    /// Absent or malformed state yields an unauthenticated store; a storage
    /// failure is logged and likewise treated as unauthenticated.
    pub fn restore(&mut self) {
        match self.storage.load() {
            Ok(identity) => self.current = identity,
            Err(err) => {
                tracing::warn!(error = %err, "session restore failed, starting unauthenticated");
                self.current = None;
            }
        }
    }

    /// Signs in with an email and password.
    ///
    /// The email is looked up across the plain users first, then the doctor
    /// directory. Returns `Ok(false)` when no identity matches or the
    /// verifier declines. On success the identity becomes current and is
    /// persisted.
    pub async fn sign_in(
        &mut self,
        users: &[Identity],
        doctors: &DoctorDirectory,
        email: &str,
        password: &str,
    ) -> DocspotResult<bool> {
        self.loading = true;
        tokio::time::sleep(self.latency).await;
        let result = self.sign_in_inner(users, doctors, email, password);
        self.loading = false;
        result
    }

    fn sign_in_inner(
        &mut self,
        users: &[Identity],
        doctors: &DoctorDirectory,
        email: &str,
        password: &str,
    ) -> DocspotResult<bool> {
        let Ok(email) = EmailAddress::parse(email) else {
            // An unparseable email cannot match any identity.
            return Ok(false);
        };

        let found = users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .or_else(|| doctors.get_by_email(&email).map(|d| d.profile.clone()));

        let Some(identity) = found else {
            return Ok(false);
        };

        if !self.verifier.verify(&identity, password) {
            return Ok(false);
        }

        self.storage.store(&identity)?;
        tracing::info!(identity_id = %identity.id, role = %identity.role, "signed in");
        self.current = Some(identity);
        Ok(true)
    }

    /// Registers a new identity.
    ///
    /// Validation failures are errors and mutate nothing. A duplicate email
    /// in either collection returns `Ok(false)` and mutates nothing. On
    /// success the new identity is appended to the right collection, becomes
    /// the current session, and is persisted — a freshly registered doctor is
    /// signed in even though still unapproved; the routing gate decides what
    /// that session may actually reach.
    pub async fn register(
        &mut self,
        users: &mut Vec<Identity>,
        doctors: &mut DoctorDirectory,
        data: RegisterData,
    ) -> DocspotResult<bool> {
        self.loading = true;
        tokio::time::sleep(self.latency).await;
        let result = self.register_inner(users, doctors, data);
        self.loading = false;
        result
    }

    fn register_inner(
        &mut self,
        users: &mut Vec<Identity>,
        doctors: &mut DoctorDirectory,
        data: RegisterData,
    ) -> DocspotResult<bool> {
        data.validate()?;

        let email_taken = users.iter().any(|u| u.email == data.email)
            || doctors.get_by_email(&data.email).is_some();
        if email_taken {
            return Ok(false);
        }

        let id = ids::generate();
        let identity = match data.role {
            Role::Doctor => {
                let doctor = data.to_doctor(id)?;
                let identity = doctor.profile.clone();
                doctors.push(doctor);
                identity
            }
            _ => {
                let identity = data.to_identity(id)?;
                users.push(identity.clone());
                identity
            }
        };

        self.storage.store(&identity)?;
        tracing::info!(identity_id = %identity.id, role = %identity.role, "registered");
        self.current = Some(identity);
        Ok(true)
    }

    /// Signs out: clears the current identity and the persisted document.
    /// Synchronous — no simulated latency.
    pub fn sign_out(&mut self) -> DocspotResult<()> {
        self.current = None;
        self.storage.clear()
    }

    /// The currently authenticated identity, if any.
    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// True while a sign-in or registration is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
