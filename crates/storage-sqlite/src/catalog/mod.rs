//! SQLite storage implementation for the service catalog.

mod model;
mod repository;

pub use model::SalonServiceDB;
pub use repository::CatalogRepository;

pub use salonbook_core::catalog::CatalogRepositoryTrait;
