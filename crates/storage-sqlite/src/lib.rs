//! SQLite storage implementation for Salonbook.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `salonbook-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for the salon ledger and finance settings
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `salonbook-core` is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain, finance health engine)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```
//!
//! Reads go straight to the connection pool. Writes are serialized through a
//! single writer task (see [`db::write_actor`]).

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod appointments;
pub mod catalog;
pub mod costs;
pub mod settings;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use appointments::AppointmentRepository;
pub use catalog::CatalogRepository;
pub use costs::CostRepository;
pub use settings::FinanceSettingsRepository;

// Re-export from salonbook-core for convenience
pub use salonbook_core::errors::{DatabaseError, Error, Result};
