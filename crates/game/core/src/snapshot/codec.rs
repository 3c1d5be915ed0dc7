use bincode::Options;
use tracing::debug;

use crate::error::{ErrorSeverity, GameError};
use crate::state::EncounterSession;

/// Leading bytes of every snapshot.
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"ENCS";

/// Current layout version, stored little-endian after the magic.
pub const SNAPSHOT_VERSION: u16 = 1;

const HEADER_LEN: usize = SNAPSHOT_MAGIC.len() + 2;

/// Upper bound on decoded payload size.
const SIZE_LIMIT: u64 = 16 * 1024 * 1024;

/// Snapshot encode/decode failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("session could not be encoded: {0}")]
    Encode(String),

    /// Missing, truncated, or structurally invalid input. Never replaced by
    /// a default session.
    #[error("malformed snapshot: {0}")]
    Malformed(String),
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Encode(_) => ErrorSeverity::Internal,
            Self::Malformed(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Encode(_) => "SNAPSHOT_ENCODE",
            Self::Malformed(_) => "SNAPSHOT_MALFORMED",
        }
    }
}

/// Binary codec for [`EncounterSession`].
///
/// Layout: `magic (4) | version (u16 LE) | bincode payload`. The payload uses
/// fixed-width integers and rejects trailing bytes, so equal sessions always
/// produce equal bytes.
pub struct SnapshotCodec;

impl SnapshotCodec {
    fn options() -> impl Options {
        bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .with_little_endian()
            .with_limit(SIZE_LIMIT)
            .reject_trailing_bytes()
    }

    pub fn serialize(session: &EncounterSession) -> Result<Vec<u8>, SnapshotError> {
        let payload = Self::options()
            .serialize(session)
            .map_err(|e| SnapshotError::Encode(e.to_string()))?;

        let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
        bytes.extend_from_slice(&SNAPSHOT_MAGIC);
        bytes.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&payload);
        Ok(bytes)
    }

    /// Decodes and structurally checks a session.
    pub fn deserialize(bytes: &[u8]) -> Result<EncounterSession, SnapshotError> {
        if bytes.len() < HEADER_LEN {
            return Err(SnapshotError::Malformed(format!(
                "expected at least {HEADER_LEN} header bytes, got {}",
                bytes.len()
            )));
        }
        let (header, payload) = bytes.split_at(HEADER_LEN);
        if header[..SNAPSHOT_MAGIC.len()] != SNAPSHOT_MAGIC {
            return Err(SnapshotError::Malformed("bad magic".into()));
        }
        let version = u16::from_le_bytes([header[4], header[5]]);
        if version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Malformed(format!(
                "unsupported version {version}"
            )));
        }

        let session: EncounterSession = Self::options()
            .deserialize(payload)
            .map_err(|e| SnapshotError::Malformed(e.to_string()))?;
        session
            .check_invariants()
            .map_err(|e| SnapshotError::Malformed(e.to_string()))?;

        debug!(
            round = session.round(),
            bytes = bytes.len(),
            "snapshot decoded"
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_input() {
        let err = SnapshotCodec::deserialize(b"ENC").unwrap_err();
        assert!(matches!(err, SnapshotError::Malformed(_)));
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn rejects_wrong_magic() {
        let err = SnapshotCodec::deserialize(b"XXXX\x01\x00rest").unwrap_err();
        assert_eq!(err, SnapshotError::Malformed("bad magic".into()));
    }

    #[test]
    fn rejects_future_version() {
        let err = SnapshotCodec::deserialize(b"ENCS\x09\x00").unwrap_err();
        assert_eq!(err, SnapshotError::Malformed("unsupported version 9".into()));
    }
}
