//! Pure derivations over a snapshot of the store: aggregates and the
//! filtered/sorted listings. Nothing in here mutates state.

pub mod aggregates;
pub mod clients;
pub mod orders;

pub use aggregates::dashboard_summary;
