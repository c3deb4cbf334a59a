//! DTO modules that bridge services with the screens.

pub mod clients;
pub mod dashboard;
pub mod orders;
