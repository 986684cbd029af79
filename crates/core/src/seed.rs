//! Seed data loaded into a freshly started marketplace.
//!
//! All state is in-memory; these records give the demo deployment a usable
//! starting point: two plain users (a customer and the admin), four doctors
//! (one still awaiting approval), and two appointments already on the books.

use chrono::NaiveDate;

use docspot_types::{EmailAddress, NonEmptyText, Rating};

use crate::appointment::{Appointment, AppointmentStatus, Slot};
use crate::error::{DocspotError, DocspotResult};
use crate::identity::{Doctor, Identity, Role};

fn avatar(path: &str) -> Option<String> {
    Some(format!(
        "https://images.unsplash.com/{path}?w=150&h=150&fit=crop&crop=face"
    ))
}

fn identity(id: &str, email: &str, name: &str, role: Role, photo: &str) -> DocspotResult<Identity> {
    Ok(Identity {
        id: id.to_owned(),
        email: EmailAddress::parse(email)?,
        name: NonEmptyText::new(name)?,
        role,
        avatar: avatar(photo),
    })
}

fn seed_date(value: &str) -> DocspotResult<NaiveDate> {
    value
        .parse()
        .map_err(|_| DocspotError::Validation(format!("invalid seed date '{value}'")))
}

/// The seeded plain-user collection: one customer and the platform admin.
pub fn users() -> DocspotResult<Vec<Identity>> {
    Ok(vec![
        identity(
            "1",
            "john@example.com",
            "John Smith",
            Role::Customer,
            "photo-1472099645785-5658abf4ff4e",
        )?,
        identity(
            "2",
            "admin@docspot.com",
            "Admin User",
            Role::Admin,
            "photo-1507003211169-0a1dd7228f2d",
        )?,
    ])
}

#[allow(clippy::too_many_arguments)]
fn doctor(
    id: &str,
    email: &str,
    name: &str,
    photo: &str,
    specialty: &str,
    experience: u32,
    rating: f32,
    location: &str,
    bio: &str,
    fees: u32,
    availability: &[&str],
    approved: bool,
    qualifications: &[&str],
) -> DocspotResult<Doctor> {
    Ok(Doctor {
        profile: identity(id, email, name, Role::Doctor, photo)?,
        specialty: specialty.to_owned(),
        experience,
        rating: Rating::new(rating)?,
        location: location.to_owned(),
        bio: bio.to_owned(),
        fees,
        availability: availability.iter().map(|d| (*d).to_owned()).collect(),
        approved,
        qualifications: qualifications.iter().map(|q| (*q).to_owned()).collect(),
    })
}

/// The seeded doctor directory. `doc4` starts unapproved.
pub fn doctors() -> DocspotResult<Vec<Doctor>> {
    Ok(vec![
        doctor(
            "doc1",
            "dr.smith@example.com",
            "Dr. Sarah Smith",
            "photo-1559839734-2b71ea197ec2",
            "Cardiology",
            12,
            4.8,
            "Downtown Medical Center",
            "Experienced cardiologist specializing in heart disease prevention and treatment.",
            200,
            &["Mon", "Tue", "Wed", "Thu", "Fri"],
            true,
            &["MBBS", "MD Cardiology", "FACC"],
        )?,
        doctor(
            "doc2",
            "dr.johnson@example.com",
            "Dr. Michael Johnson",
            "photo-1612349317150-e413f6a5b16d",
            "Dermatology",
            8,
            4.6,
            "Skin Care Clinic",
            "Board-certified dermatologist with expertise in skin disorders and cosmetic procedures.",
            180,
            &["Mon", "Wed", "Fri", "Sat"],
            true,
            &["MBBS", "MD Dermatology"],
        )?,
        doctor(
            "doc3",
            "dr.wilson@example.com",
            "Dr. Emily Wilson",
            "photo-1594824388262-82bb6b63f33e",
            "Pediatrics",
            15,
            4.9,
            "Children's Hospital",
            "Pediatric specialist with over 15 years of experience caring for children and adolescents.",
            160,
            &["Tue", "Thu", "Fri", "Sat"],
            true,
            &["MBBS", "MD Pediatrics", "DCH"],
        )?,
        doctor(
            "doc4",
            "dr.brown@example.com",
            "Dr. David Brown",
            "photo-1582750433449-648ed127bb54",
            "Orthopedics",
            5,
            4.3,
            "Bone & Joint Center",
            "Orthopedic surgeon specializing in sports injuries and joint replacement.",
            220,
            &["Mon", "Wed", "Thu"],
            false,
            &["MBBS", "MS Orthopedics"],
        )?,
    ])
}

/// The seeded appointment ledger: one confirmed, one pending, both for the
/// seeded customer.
pub fn appointments() -> DocspotResult<Vec<Appointment>> {
    Ok(vec![
        Appointment {
            id: "app1".into(),
            patient_id: "1".into(),
            doctor_id: "doc1".into(),
            patient_name: "John Smith".into(),
            doctor_name: "Dr. Sarah Smith".into(),
            doctor_specialty: "Cardiology".into(),
            date: seed_date("2024-01-15")?,
            time: Slot::parse("10:00 AM")?,
            status: AppointmentStatus::Confirmed,
            notes: Some("Regular check-up for heart condition".into()),
            documents: Vec::new(),
        },
        Appointment {
            id: "app2".into(),
            patient_id: "1".into(),
            doctor_id: "doc2".into(),
            patient_name: "John Smith".into(),
            doctor_name: "Dr. Michael Johnson".into(),
            doctor_specialty: "Dermatology".into(),
            date: seed_date("2024-01-20")?,
            time: Slot::parse("2:30 PM")?,
            status: AppointmentStatus::Pending,
            notes: Some("Skin consultation".into()),
            documents: Vec::new(),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_collections_build_cleanly() {
        let users = users().expect("seed users");
        let doctors = doctors().expect("seed doctors");
        let appointments = appointments().expect("seed appointments");

        assert_eq!(users.len(), 2);
        assert_eq!(doctors.len(), 4);
        assert_eq!(appointments.len(), 2);
    }

    #[test]
    fn seed_emails_are_unique_across_collections() {
        let users = users().expect("seed users");
        let doctors = doctors().expect("seed doctors");

        let mut emails: Vec<&str> = users
            .iter()
            .map(|u| u.email.as_str())
            .chain(doctors.iter().map(|d| d.email().as_str()))
            .collect();
        let total = emails.len();
        emails.sort_unstable();
        emails.dedup();
        assert_eq!(emails.len(), total);
    }

    #[test]
    fn only_doc4_awaits_approval() {
        let doctors = doctors().expect("seed doctors");
        let pending: Vec<&str> = doctors
            .iter()
            .filter(|d| !d.approved)
            .map(|d| d.id())
            .collect();
        assert_eq!(pending, vec!["doc4"]);
    }
}
