//! Combat components

pub mod runtime;

pub use runtime::*;
