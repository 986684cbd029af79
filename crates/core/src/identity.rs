//! Identity and doctor profile types.
//!
//! An [`Identity`] is any authenticated party in the marketplace. Doctors
//! carry a marketplace profile on top of their identity; the two are kept in
//! separate collections (plain users vs. the doctor directory) and the email
//! space is unique across both.

use serde::{Deserialize, Serialize};

use docspot_types::{EmailAddress, NonEmptyText, Rating};

use crate::constants::DEFAULT_AVATAR_URL;
use crate::error::{DocspotError, DocspotResult};

// Profile values applied when a registering doctor leaves an optional field
// blank. These mirror the marketplace's original onboarding defaults.
const DEFAULT_LOCATION: &str = "City Center";
const DEFAULT_BIO: &str = "Experienced healthcare professional";
const DEFAULT_QUALIFICATION: &str = "MBBS";
const DEFAULT_RATING: f32 = 4.5;
const DEFAULT_FEES: u32 = 150;
const DEFAULT_AVAILABILITY: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

/// The role of an authenticated party.
///
/// A closed set matched exhaustively at the authorization gate. Role is fixed
/// at registration and never changes afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A patient browsing and booking appointments.
    Customer,
    /// A practitioner managing an appointment queue.
    Doctor,
    /// A platform administrator.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Doctor => write!(f, "doctor"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// An authenticated party: customer, doctor, or admin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque record id.
    pub id: String,
    /// Sign-in email, unique across users and doctors.
    pub email: EmailAddress,
    /// Display name.
    pub name: NonEmptyText,
    /// Role fixed at registration.
    pub role: Role,
    /// Profile image URL, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A doctor: an [`Identity`] extended with a marketplace profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    /// The doctor's identity fields, flattened into the same document.
    #[serde(flatten)]
    pub profile: Identity,
    /// Medical specialty shown in the marketplace listing.
    pub specialty: String,
    /// Years of practice.
    pub experience: u32,
    /// Marketplace rating on the 0–5 scale.
    pub rating: Rating,
    /// Clinic or hospital location.
    pub location: String,
    /// Free-form profile text.
    pub bio: String,
    /// Consultation fee in currency units.
    pub fees: u32,
    /// Weekday tokens on which the doctor takes bookings.
    pub availability: Vec<String>,
    /// Whether an admin has approved the doctor for the public listing.
    /// Flips to `true` exactly once; rejection deletes the record instead.
    pub approved: bool,
    /// Ordered credential strings.
    pub qualifications: Vec<String>,
}

impl Doctor {
    /// The doctor's record id.
    pub fn id(&self) -> &str {
        &self.profile.id
    }

    /// The doctor's sign-in email.
    pub fn email(&self) -> &EmailAddress {
        &self.profile.email
    }
}

/// Input to [`register`](crate::Docspot::register).
#[derive(Clone, Debug, Deserialize)]
pub struct RegisterData {
    pub email: EmailAddress,
    pub password: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub experience: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub qualifications: Option<Vec<String>>,
}

impl RegisterData {
    /// Checks the required fields for the requested role.
    ///
    /// # Errors
    ///
    /// Returns [`DocspotError::Validation`] when a required field is blank,
    /// when doctor-specific fields are missing for a doctor registration, or
    /// when the admin role is requested (admins are seeded, never
    /// self-registered).
    pub fn validate(&self) -> DocspotResult<()> {
        if self.name.trim().is_empty() {
            return Err(DocspotError::Validation("name is required".into()));
        }
        if self.password.trim().is_empty() {
            return Err(DocspotError::Validation("password is required".into()));
        }
        match self.role {
            Role::Admin => Err(DocspotError::Validation(
                "administrators cannot self-register".into(),
            )),
            Role::Doctor => {
                let specialty_missing = self
                    .specialty
                    .as_deref()
                    .map_or(true, |s| s.trim().is_empty());
                if specialty_missing {
                    return Err(DocspotError::Validation(
                        "specialty is required for doctor registration".into(),
                    ));
                }
                if self.experience.is_none() {
                    return Err(DocspotError::Validation(
                        "experience is required for doctor registration".into(),
                    ));
                }
                Ok(())
            }
            Role::Customer => Ok(()),
        }
    }

    /// Builds the identity record for this registration.
    pub(crate) fn to_identity(&self, id: String) -> DocspotResult<Identity> {
        Ok(Identity {
            id,
            email: self.email.clone(),
            name: NonEmptyText::new(&self.name)?,
            role: self.role,
            avatar: Some(DEFAULT_AVATAR_URL.to_owned()),
        })
    }

    /// Builds the doctor record for this registration.
    ///
    /// Optional profile fields fall back to the onboarding defaults. The new
    /// doctor always starts unapproved.
    pub(crate) fn to_doctor(&self, id: String) -> DocspotResult<Doctor> {
        let profile = self.to_identity(id)?;
        Ok(Doctor {
            profile,
            specialty: self
                .specialty
                .clone()
                .unwrap_or_else(|| "General Medicine".to_owned()),
            experience: self.experience.unwrap_or(1),
            rating: Rating::new(DEFAULT_RATING)?,
            location: self
                .location
                .clone()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOCATION.to_owned()),
            bio: self
                .bio
                .clone()
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BIO.to_owned()),
            fees: DEFAULT_FEES,
            availability: DEFAULT_AVAILABILITY.map(str::to_owned).to_vec(),
            approved: false,
            qualifications: self
                .qualifications
                .clone()
                .filter(|q| !q.is_empty())
                .unwrap_or_else(|| vec![DEFAULT_QUALIFICATION.to_owned()]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer_data() -> RegisterData {
        RegisterData {
            email: EmailAddress::parse("new@example.com").expect("valid email"),
            password: "secret".into(),
            name: "New Patient".into(),
            role: Role::Customer,
            specialty: None,
            experience: None,
            location: None,
            bio: None,
            qualifications: None,
        }
    }

    #[test]
    fn customer_registration_needs_name_and_password() {
        assert!(customer_data().validate().is_ok());

        let mut blank_name = customer_data();
        blank_name.name = "   ".into();
        assert!(matches!(
            blank_name.validate(),
            Err(DocspotError::Validation(_))
        ));

        let mut blank_password = customer_data();
        blank_password.password = String::new();
        assert!(matches!(
            blank_password.validate(),
            Err(DocspotError::Validation(_))
        ));
    }

    #[test]
    fn doctor_registration_needs_specialty_and_experience() {
        let mut data = customer_data();
        data.role = Role::Doctor;
        assert!(matches!(data.validate(), Err(DocspotError::Validation(_))));

        data.specialty = Some("Cardiology".into());
        assert!(matches!(data.validate(), Err(DocspotError::Validation(_))));

        data.experience = Some(7);
        assert!(data.validate().is_ok());
    }

    #[test]
    fn admin_role_cannot_self_register() {
        let mut data = customer_data();
        data.role = Role::Admin;
        assert!(matches!(data.validate(), Err(DocspotError::Validation(_))));
    }

    #[test]
    fn doctor_record_fills_onboarding_defaults() {
        let mut data = customer_data();
        data.role = Role::Doctor;
        data.specialty = Some("Cardiology".into());
        data.experience = Some(7);

        let doctor = data.to_doctor("d1".into()).expect("build doctor");
        assert!(!doctor.approved);
        assert_eq!(doctor.location, DEFAULT_LOCATION);
        assert_eq!(doctor.bio, DEFAULT_BIO);
        assert_eq!(doctor.qualifications, vec![DEFAULT_QUALIFICATION]);
        assert_eq!(doctor.fees, DEFAULT_FEES);
        assert_eq!(doctor.availability.len(), 5);
    }

    #[test]
    fn role_serialises_lowercase() {
        assert_eq!(
            serde_json::to_string(&Role::Customer).expect("serialize"),
            "\"customer\""
        );
        let role: Role = serde_json::from_str("\"doctor\"").expect("deserialize");
        assert_eq!(role, Role::Doctor);
    }
}
