//! Domain models for procedure fee calculation.

mod breakdown;
mod procedure;

pub use breakdown::*;
pub use procedure::*;
