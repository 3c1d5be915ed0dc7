//! File-based repository implementations.

mod log;
mod session;

pub use log::{ActionLog, ActionLogEntry};
pub use session::FileSessionRepository;
