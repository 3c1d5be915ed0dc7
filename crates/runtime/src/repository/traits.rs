//! Repository contracts for saving and loading encounter sessions.

use encounter_core::EncounterSession;

use super::Result;

/// Repository for session persistence, keyed by session id.
///
/// Implementations store the snapshot codec bytes, so a load goes through the
/// same header and structural checks as any other snapshot.
pub trait SessionRepository: Send + Sync {
    /// Save a session, replacing any previous save under the same id
    fn save(&self, session_id: &str, session: &EncounterSession) -> Result<()>;

    /// Load a session by id
    fn load(&self, session_id: &str) -> Result<Option<EncounterSession>>;

    /// Check if a session exists
    fn exists(&self, session_id: &str) -> bool;

    /// Delete a session
    fn delete(&self, session_id: &str) -> Result<()>;

    /// List all stored session ids
    fn list_sessions(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
