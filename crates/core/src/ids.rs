//! Record id generation.
//!
//! New identities and appointments get a random v4 UUID rendered in simple
//! form (32 lowercase hex characters, no hyphens). A timestamp-derived token
//! can collide when two records are created within the same clock tick;
//! random UUIDs close that gap. Seeded records keep their original short ids
//! (`1`, `doc1`, `app1`, ...), so ids are treated as opaque strings
//! everywhere — only *new* ids are guaranteed to be in UUID form.

use uuid::Uuid;

/// Generates a fresh record id.
pub fn generate() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_canonical_hex() {
        let id = generate();
        assert_eq!(id.len(), 32);
        assert!(id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
    }

    #[test]
    fn generated_ids_do_not_repeat() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
    }
}
