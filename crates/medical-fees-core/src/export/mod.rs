//! Export of the calculation history.

mod history;

pub use history::*;
