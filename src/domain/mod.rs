//! Domain aggregates handled by the assignment engine.

pub mod client;
pub mod order;
pub mod types;
