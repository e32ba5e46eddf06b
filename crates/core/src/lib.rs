//! Salonbook Core - Domain entities, services, and traits.
//!
//! This crate contains the finance side of the salon back-office: the
//! financial health engine, the finance settings document with its funds,
//! and the read models the engine consumes (appointments, catalog, costs).
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod appointments;
pub mod catalog;
pub mod constants;
pub mod costs;
pub mod errors;
pub mod events;
pub mod health;
pub mod settings;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
