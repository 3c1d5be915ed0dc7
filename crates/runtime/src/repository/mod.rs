//! Repository layer for dynamic runtime data
//!
//! Repositories handle data that CHANGES during play:
//! - Session snapshots (for save/resume)
//! - The action log (for replay and audit)
//!
//! Static encounter content is handled by `encounter-content`, not here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{ActionLog, ActionLogEntry, FileSessionRepository};
pub use memory::InMemorySessionRepository;
pub use traits::SessionRepository;
