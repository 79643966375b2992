//! CLI command implementations.

pub mod batch;
pub mod extract;
pub mod fill;
pub mod rules;
