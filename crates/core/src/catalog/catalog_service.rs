use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::catalog_model::{NewSalonService, SalonService};
use super::catalog_traits::{CatalogRepositoryTrait, CatalogServiceTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::events::{DomainEvent, DomainEventSink};

/// Service for managing the salon's service catalog
pub struct CatalogService {
    repository: Arc<dyn CatalogRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl CatalogService {
    pub fn new(
        repository: Arc<dyn CatalogRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }
}

#[async_trait]
impl CatalogServiceTrait for CatalogService {
    fn get_services(&self, account_id: &str) -> Result<Vec<SalonService>> {
        self.repository.get_services(account_id)
    }

    async fn create_service(&self, new_service: NewSalonService) -> Result<SalonService> {
        new_service.validate()?;
        let account_id = new_service.account_id.clone();

        let service = self.repository.create_service(new_service).await?;
        debug!("Added service '{}' to account {}", service.name, account_id);
        self.event_sink.emit(DomainEvent::catalog_changed(account_id));
        Ok(service)
    }

    async fn delete_service(&self, account_id: &str, service_id: &str) -> Result<()> {
        let deleted = self.repository.delete_service(account_id, service_id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Service {} not found",
                service_id
            ))));
        }
        self.event_sink.emit(DomainEvent::catalog_changed(account_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MockDomainEventSink;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryCatalogRepository {
        services: Mutex<Vec<(String, SalonService)>>,
    }

    #[async_trait]
    impl CatalogRepositoryTrait for InMemoryCatalogRepository {
        fn get_services(&self, account_id: &str) -> Result<Vec<SalonService>> {
            Ok(self
                .services
                .lock()
                .unwrap()
                .iter()
                .filter(|(owner, _)| owner == account_id)
                .map(|(_, service)| service.clone())
                .collect())
        }

        async fn create_service(&self, new_service: NewSalonService) -> Result<SalonService> {
            let owner = new_service.account_id.clone();
            let service = SalonService {
                id: new_service.id.unwrap_or_else(|| "svc".to_string()),
                name: new_service.name,
                price: new_service.price,
            };
            self.services.lock().unwrap().push((owner, service.clone()));
            Ok(service)
        }

        async fn delete_service(&self, account_id: &str, service_id: &str) -> Result<usize> {
            let mut services = self.services.lock().unwrap();
            let before = services.len();
            services.retain(|(owner, s)| !(owner == account_id && s.id == service_id));
            Ok(before - services.len())
        }
    }

    #[tokio::test]
    async fn test_create_and_delete_service() {
        let sink = MockDomainEventSink::new();
        let service = CatalogService::new(
            Arc::new(InMemoryCatalogRepository::default()),
            Arc::new(sink.clone()),
        );

        let created = service
            .create_service(NewSalonService {
                id: Some("svc-1".to_string()),
                account_id: "acc-1".to_string(),
                name: "Progressiva".to_string(),
                price: dec!(250),
            })
            .await
            .unwrap();
        assert_eq!(service.get_services("acc-1").unwrap(), vec![created]);

        let foreign = service.delete_service("acc-2", "svc-1").await;
        assert!(matches!(
            foreign,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
        assert_eq!(service.get_services("acc-1").unwrap().len(), 1);
        assert_eq!(sink.len(), 1);

        service.delete_service("acc-1", "svc-1").await.unwrap();
        assert!(service.get_services("acc-1").unwrap().is_empty());
        assert_eq!(sink.len(), 2);

        let missing = service.delete_service("acc-1", "svc-1").await;
        assert!(matches!(
            missing,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
        assert_eq!(sink.len(), 2);
    }
}
