//! Mid-session persistence.
//!
//! A snapshot is the complete session: stream state and position, both fate
//! piles in order, every pool, status, and intent, plus the bestiary and rule
//! tables. Nothing is recomputed on load.

mod codec;

pub use codec::{SNAPSHOT_MAGIC, SNAPSHOT_VERSION, SnapshotCodec, SnapshotError};
