//! Command implementations.

pub mod analyze;
pub mod types;
