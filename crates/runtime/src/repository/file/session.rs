//! File-based SessionRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use encounter_core::{EncounterSession, SnapshotCodec};

use crate::repository::{RepositoryError, Result, SessionRepository};

/// File-based implementation of SessionRepository.
///
/// Sessions are stored as `{session_id}.snap` in snapshot codec format. Writes
/// go to a temporary file first and are renamed into place, so a crash never
/// leaves a half-written snapshot under the real name.
pub struct FileSessionRepository {
    base_dir: PathBuf,
}

impl FileSessionRepository {
    /// Create a new file-based session repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn session_path(&self, session_id: &str) -> Result<PathBuf> {
        let valid = !session_id.is_empty()
            && session_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::InvalidSessionId(session_id.to_string()));
        }
        Ok(self.base_dir.join(format!("{}.snap", session_id)))
    }
}

impl SessionRepository for FileSessionRepository {
    fn save(&self, session_id: &str, session: &EncounterSession) -> Result<()> {
        let path = self.session_path(session_id)?;
        let temp_path = path.with_extension("snap.tmp");

        let bytes = SnapshotCodec::serialize(session)?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved session[{}] to {}", session_id, path.display());

        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<Option<EncounterSession>> {
        let path = self.session_path(session_id)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let session = SnapshotCodec::deserialize(&bytes)?;

        tracing::debug!("Loaded session[{}] from {}", session_id, path.display());

        Ok(Some(session))
    }

    fn exists(&self, session_id: &str) -> bool {
        self.session_path(session_id)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        let path = self.session_path(session_id)?;

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted session[{}]", session_id);
        }

        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<String>> {
        let mut sessions = Vec::new();

        for entry in fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)? {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id) = filename.strip_suffix(".snap")
            {
                sessions.push(id.to_string());
            }
        }

        sessions.sort_unstable();
        Ok(sessions)
    }
}
