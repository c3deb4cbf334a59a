//! Records loaded from outside the engine: configuration and seed data.

pub mod config;
pub mod seed;
