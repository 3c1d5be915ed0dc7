//! In-memory SessionRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use encounter_core::{EncounterSession, SnapshotCodec};

use crate::repository::{RepositoryError, Result, SessionRepository};

/// In-memory implementation of SessionRepository.
///
/// Keeps the encoded snapshot bytes rather than live sessions, so loads are
/// checked exactly like file loads.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored bytes for a session, if any.
    pub fn bytes(&self, session_id: &str) -> Result<Option<Vec<u8>>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(sessions.get(session_id).cloned())
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn save(&self, session_id: &str, session: &EncounterSession) -> Result<()> {
        let bytes = SnapshotCodec::serialize(session)?;
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        sessions.insert(session_id.to_string(), bytes);
        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<Option<EncounterSession>> {
        match self.bytes(session_id)? {
            Some(bytes) => Ok(Some(SnapshotCodec::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    fn exists(&self, session_id: &str) -> bool {
        self.sessions
            .read()
            .map(|sessions| sessions.contains_key(session_id))
            .unwrap_or(false)
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        sessions.remove(session_id);
        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<String>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<String> = sessions.keys().cloned().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
