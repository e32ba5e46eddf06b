use async_trait::async_trait;

use crate::catalog::catalog_model::{NewSalonService, SalonService};
use crate::errors::Result;

/// Trait for service catalog storage
#[async_trait]
pub trait CatalogRepositoryTrait: Send + Sync {
    fn get_services(&self, account_id: &str) -> Result<Vec<SalonService>>;
    async fn create_service(&self, new_service: NewSalonService) -> Result<SalonService>;
    /// Returns the number of rows removed; rows of other accounts are never touched.
    async fn delete_service(&self, account_id: &str, service_id: &str) -> Result<usize>;
}

/// Trait for catalog operations that notify listeners
#[async_trait]
pub trait CatalogServiceTrait: Send + Sync {
    fn get_services(&self, account_id: &str) -> Result<Vec<SalonService>>;
    async fn create_service(&self, new_service: NewSalonService) -> Result<SalonService>;
    async fn delete_service(&self, account_id: &str, service_id: &str) -> Result<()>;
}
