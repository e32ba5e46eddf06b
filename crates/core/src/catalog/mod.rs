//! Catalog module - sellable salon services.

mod catalog_model;
mod catalog_service;
mod catalog_traits;

pub use catalog_model::{NewSalonService, SalonService};
pub use catalog_service::CatalogService;
pub use catalog_traits::{CatalogRepositoryTrait, CatalogServiceTrait};
