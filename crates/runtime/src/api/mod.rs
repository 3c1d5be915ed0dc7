//! Public API surface for runtime consumers.
//!
//! Re-exports the handle and error types so downstream crates can depend on
//! a single module.
mod errors;
mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
