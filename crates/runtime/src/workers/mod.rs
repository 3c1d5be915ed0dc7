//! Background workers that run inside the runtime.

mod session;

pub use session::{Command, SessionWorker};
