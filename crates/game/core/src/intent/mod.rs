//! Adversary intent planning.
//!
//! One generic planner interprets every adversary's behaviour pattern. It is
//! invoked once per active adversary during the intent-reveal phase, and the
//! intent it returns is stored on the adversary until resolution executes it.
mod planner;

pub use planner::{PlannedIntent, plan_intent};
