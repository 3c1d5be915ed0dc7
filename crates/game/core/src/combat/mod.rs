//! Combat resolution.
//!
//! - `damage`: the pure strike formula
//! - `strike`: fate draws and pool updates against the session
//! - `outcome`: terminal marking, loot, and session outcome
//! - `roster`: adversary spawning

pub mod damage;
pub(crate) mod outcome;
pub(crate) mod roster;
pub(crate) mod strike;

pub use damage::{StrikeInput, effective_amount};
pub use outcome::evaluate_outcome;
