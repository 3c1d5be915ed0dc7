//! Async host for encounter sessions.
//!
//! This crate wraps a single [`encounter_core::EncounterEngine`] in a worker
//! task and exposes it through a cloneable [`RuntimeHandle`]. Calls are
//! serialised through a bounded command channel; committed change batches are
//! broadcast to subscribers.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`repository`] persists session snapshots and the action log
//! - [`replay`] rebuilds sessions from recorded actions
//! - [`logging`] installs a `tracing` subscriber for binaries and tests
pub mod api;
pub mod logging;
pub mod replay;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use logging::init_tracing;
pub use replay::{ReplayOutcome, replay, verify_log};
pub use repository::{
    ActionLog, ActionLogEntry, FileSessionRepository, InMemorySessionRepository, RepositoryError,
    SessionRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
