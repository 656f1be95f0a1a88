//! Combat systems (arbitration + movement impulse)

pub mod arbitrator;
pub mod impulse;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod arbitrator_tests;

pub use arbitrator::*;
pub use impulse::*;
