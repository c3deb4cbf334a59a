//! Order-item attribution engine for a personal shopper: assigns retailer
//! order items to clients, tracks payment status, and derives the filtered
//! listings and counters the app screens show.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod notifications;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod selection;
#[cfg(feature = "data")]
pub mod services;
#[cfg(feature = "data")]
pub mod session;
#[cfg(feature = "data")]
pub mod views;
