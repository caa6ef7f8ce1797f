//! Core data models for the poker ledger.

mod ids;
mod participation;
mod stats;

pub use ids::*;
pub use participation::*;
pub use stats::*;
