//! Session persistence.
//!
//! The active session identity is persisted as a single JSON document under a
//! fixed namespace, written on sign-in/registration, deleted on sign-out, and
//! read back on startup. The original marketplace used browser-local storage
//! for this; [`JsonFileStorage`] is the server-side stand-in, and
//! [`MemoryStorage`] backs tests.
//!
//! Restore is deliberately lenient: an absent or malformed document yields an
//! unauthenticated state, never a startup failure.

use std::fs;
use std::path::PathBuf;

use crate::error::{DocspotError, DocspotResult};
use crate::identity::Identity;

/// Durable storage for the active session identity.
pub trait IdentityStorage: Send {
    /// Reads the persisted identity, if any.
    ///
    /// A missing or unparseable document is `Ok(None)`, not an error; only a
    /// real I/O failure reports one.
    fn load(&self) -> DocspotResult<Option<Identity>>;

    /// Persists `identity`, replacing any previous document.
    fn store(&mut self, identity: &Identity) -> DocspotResult<()>;

    /// Deletes the persisted document, if present.
    fn clear(&mut self) -> DocspotResult<()>;
}

/// File-backed session storage: one JSON document at a configured path.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Creates storage rooted at `path`. The file and its parent directory
    /// are created lazily on the first store.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl IdentityStorage for JsonFileStorage {
    fn load(&self) -> DocspotResult<Option<Identity>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(DocspotError::SessionRead(err)),
        };

        match serde_json::from_str::<Identity>(&contents) {
            Ok(identity) => Ok(Some(identity)),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "discarding malformed session document"
                );
                Ok(None)
            }
        }
    }

    fn store(&mut self, identity: &Identity) -> DocspotResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(DocspotError::SessionWrite)?;
        }
        let json =
            serde_json::to_string_pretty(identity).map_err(DocspotError::Serialization)?;
        fs::write(&self.path, json).map_err(DocspotError::SessionWrite)
    }

    fn clear(&mut self) -> DocspotResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(DocspotError::SessionWrite(err)),
        }
    }
}

/// In-memory session storage for tests and ephemeral processes.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Option<Identity>,
}

impl MemoryStorage {
    /// Creates empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStorage for MemoryStorage {
    fn load(&self) -> DocspotResult<Option<Identity>> {
        Ok(self.slot.clone())
    }

    fn store(&mut self, identity: &Identity) -> DocspotResult<()> {
        self.slot = Some(identity.clone());
        Ok(())
    }

    fn clear(&mut self) -> DocspotResult<()> {
        self.slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Role;
    use docspot_types::{EmailAddress, NonEmptyText};

    fn identity() -> Identity {
        Identity {
            id: "1".into(),
            email: EmailAddress::parse("john@example.com").expect("valid email"),
            name: NonEmptyText::new("John Smith").expect("valid name"),
            role: Role::Customer,
            avatar: None,
        }
    }

    #[test]
    fn file_storage_round_trips_an_identity() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = JsonFileStorage::new(dir.path().join("docspot_user.json"));

        assert!(storage.load().expect("load empty").is_none());

        storage.store(&identity()).expect("store");
        let restored = storage.load().expect("load").expect("present");
        assert_eq!(restored, identity());

        storage.clear().expect("clear");
        assert!(storage.load().expect("load after clear").is_none());
    }

    #[test]
    fn file_storage_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("a").join("b").join("docspot_user.json");
        let mut storage = JsonFileStorage::new(nested);
        storage.store(&identity()).expect("store into fresh dirs");
        assert!(storage.load().expect("load").is_some());
    }

    #[test]
    fn malformed_document_is_discarded_not_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("docspot_user.json");
        std::fs::write(&path, "{ not json").expect("write garbage");

        let storage = JsonFileStorage::new(path);
        assert!(storage.load().expect("lenient load").is_none());
    }

    #[test]
    fn clearing_an_absent_document_is_a_no_op() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = JsonFileStorage::new(dir.path().join("docspot_user.json"));
        storage.clear().expect("clear nothing");
    }
}
