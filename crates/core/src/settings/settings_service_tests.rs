//! Unit tests for the finance settings service.

use super::*;
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::events::{DomainEvent, MockDomainEventSink};
use async_trait::async_trait;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

// ============================================================================
// Mock Implementations
// ============================================================================

#[derive(Default)]
struct InMemorySettingsRepository {
    documents: RwLock<HashMap<String, Value>>,
}

impl InMemorySettingsRepository {
    fn with_document(account_id: &str, document: Value) -> Self {
        let repo = Self::default();
        repo.documents
            .write()
            .unwrap()
            .insert(account_id.to_string(), document);
        repo
    }

    fn document(&self, account_id: &str) -> Option<Value> {
        self.documents.read().unwrap().get(account_id).cloned()
    }
}

#[async_trait]
impl FinanceSettingsRepositoryTrait for InMemorySettingsRepository {
    fn get_settings_document(&self, account_id: &str) -> Result<Option<Value>> {
        Ok(self.document(account_id))
    }

    async fn upsert_settings_document(&self, account_id: &str, patch: Value) -> Result<()> {
        let mut documents = self.documents.write().unwrap();
        let entry = documents
            .entry(account_id.to_string())
            .or_insert_with(|| json!({}));
        if let (Some(target), Value::Object(fields)) = (entry.as_object_mut(), patch) {
            for (key, value) in fields {
                target.insert(key, value);
            }
        }
        Ok(())
    }
}

struct FailingSettingsRepository;

#[async_trait]
impl FinanceSettingsRepositoryTrait for FailingSettingsRepository {
    fn get_settings_document(&self, _account_id: &str) -> Result<Option<Value>> {
        Ok(None)
    }

    async fn upsert_settings_document(&self, _account_id: &str, _patch: Value) -> Result<()> {
        Err(Error::Database(DatabaseError::QueryFailed(
            "disk I/O error".to_string(),
        )))
    }
}

fn service_with(
    repo: Arc<dyn FinanceSettingsRepositoryTrait>,
) -> (FinanceSettingsService, MockDomainEventSink) {
    let sink = MockDomainEventSink::new();
    let service = FinanceSettingsService::new(repo, Arc::new(sink.clone()));
    (service, sink)
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_get_settings_for_new_account_returns_defaults() {
    let (service, sink) = service_with(Arc::new(InMemorySettingsRepository::default()));
    let settings = service.get_settings("acc-1").unwrap();
    assert_eq!(settings, FinanceSettings::default());
    assert!(sink.is_empty());
}

#[test]
fn test_get_settings_repairs_malformed_document() {
    let repo = InMemorySettingsRepository::with_document(
        "acc-1",
        json!({ "monthlyGoal": 3000, "taxRate": { "oops": true } }),
    );
    let (service, _sink) = service_with(Arc::new(repo));

    let settings = service.get_settings("acc-1").unwrap();
    assert_eq!(settings.monthly_goal, dec!(3000));
    assert_eq!(settings.tax_rate, dec!(6));
}

#[tokio::test]
async fn test_update_settings_writes_only_changed_fields() {
    let repo = Arc::new(InMemorySettingsRepository::with_document(
        "acc-1",
        json!({ "taxRate": 8, "futureField": "kept" }),
    ));
    let (service, sink) = service_with(repo.clone());

    let updated = service
        .update_settings(
            "acc-1",
            &FinanceSettingsUpdate {
                monthly_goal: Some(dec!(4200)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.monthly_goal, dec!(4200));
    assert_eq!(updated.tax_rate, dec!(8));

    let stored = repo.document("acc-1").unwrap();
    assert_eq!(stored["monthlyGoal"], json!(4200.0));
    assert_eq!(stored["taxRate"], json!(8));
    assert_eq!(stored["futureField"], json!("kept"));
    assert!(stored.get("customFunds").is_none());

    assert_eq!(
        sink.events(),
        vec![DomainEvent::finance_settings_changed(
            "acc-1",
            vec!["monthlyGoal".to_string()]
        )]
    );
}

#[tokio::test]
async fn test_update_settings_rejects_invalid_rate() {
    let repo = Arc::new(InMemorySettingsRepository::default());
    let (service, sink) = service_with(repo.clone());

    let result = service
        .update_settings(
            "acc-1",
            &FinanceSettingsUpdate {
                tax_rate: Some(dec!(150)),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::OutOfRange { .. }))
    ));
    assert!(repo.document("acc-1").is_none());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_empty_update_does_not_write() {
    let repo = Arc::new(InMemorySettingsRepository::default());
    let (service, sink) = service_with(repo.clone());

    service
        .update_settings("acc-1", &FinanceSettingsUpdate::default())
        .await
        .unwrap();

    assert!(repo.document("acc-1").is_none());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_add_fund_persists_whole_fund_list() {
    let repo = Arc::new(InMemorySettingsRepository::default());
    let (service, sink) = service_with(repo.clone());

    let fund = service
        .add_fund(
            "acc-1",
            NewFund {
                name: "Equipment".to_string(),
                percentage: dec!(3),
                color: FundColor::Orange,
                enabled: true,
            },
        )
        .await
        .unwrap();

    let settings = service.get_settings("acc-1").unwrap();
    assert_eq!(settings.custom_funds.len(), 3);
    assert_eq!(settings.custom_funds[2], fund);
    assert_eq!(
        sink.events(),
        vec![DomainEvent::finance_settings_changed(
            "acc-1",
            vec!["customFunds".to_string()]
        )]
    );
}

#[tokio::test]
async fn test_add_fund_rejects_blank_name() {
    let repo = Arc::new(InMemorySettingsRepository::default());
    let (service, sink) = service_with(repo.clone());

    let result = service
        .add_fund(
            "acc-1",
            NewFund {
                name: " ".to_string(),
                percentage: dec!(3),
                color: FundColor::Orange,
                enabled: true,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::MissingField(_)))
    ));
    assert!(repo.document("acc-1").is_none());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_update_and_remove_fund() {
    let repo = Arc::new(InMemorySettingsRepository::default());
    let (service, sink) = service_with(repo.clone());

    let updated = service
        .update_fund(
            "acc-1",
            DEFAULT_MAINTENANCE_FUND_ID,
            &FundPatch {
                name: Some("Upkeep".to_string()),
                enabled: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let upkeep = updated
        .custom_funds
        .iter()
        .find(|f| f.id == DEFAULT_MAINTENANCE_FUND_ID)
        .unwrap();
    assert_eq!(upkeep.name, "Upkeep");
    assert!(!upkeep.enabled);

    let after_remove = service
        .remove_fund("acc-1", DEFAULT_EMERGENCY_FUND_ID)
        .await
        .unwrap();
    assert_eq!(after_remove.custom_funds.len(), 1);
    assert_eq!(service.get_settings("acc-1").unwrap(), after_remove);
    assert_eq!(sink.len(), 2);
}

#[tokio::test]
async fn test_unknown_fund_ids_are_noops_without_writes() {
    let repo = Arc::new(InMemorySettingsRepository::default());
    let (service, sink) = service_with(repo.clone());

    let updated = service
        .update_fund(
            "acc-1",
            "missing",
            &FundPatch {
                percentage: Some(dec!(50)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated, FinanceSettings::default());

    let removed = service.remove_fund("acc-1", "missing").await.unwrap();
    assert_eq!(removed, FinanceSettings::default());

    assert!(repo.document("acc-1").is_none());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_reset_funds_restores_defaults() {
    let repo = Arc::new(InMemorySettingsRepository::with_document(
        "acc-1",
        json!({ "customFunds": [] }),
    ));
    let (service, _sink) = service_with(repo.clone());
    assert!(service.get_settings("acc-1").unwrap().custom_funds.is_empty());

    let reset = service.reset_funds("acc-1").await.unwrap();
    assert_eq!(reset.custom_funds, default_funds());
    assert_eq!(
        service.get_settings("acc-1").unwrap().custom_funds,
        default_funds()
    );
}

#[tokio::test]
async fn test_store_failure_surfaces_and_emits_nothing() {
    let (service, sink) = service_with(Arc::new(FailingSettingsRepository));

    let result = service
        .update_settings(
            "acc-1",
            &FinanceSettingsUpdate {
                monthly_goal: Some(dec!(1000)),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(Error::Database(_))));
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_fund_stored_without_id_can_be_updated_by_the_id_read() {
    let repo = Arc::new(InMemorySettingsRepository::with_document(
        "acc-1",
        json!({ "customFunds": [{ "name": "Legacy", "percentage": 5 }] }),
    ));
    let (service, sink) = service_with(repo.clone());

    let read_id = service.get_settings("acc-1").unwrap().custom_funds[0].id.clone();
    assert_eq!(
        service.get_settings("acc-1").unwrap().custom_funds[0].id,
        read_id
    );

    let updated = service
        .update_fund(
            "acc-1",
            &read_id,
            &FundPatch {
                enabled: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.custom_funds.len(), 1);
    assert_eq!(updated.custom_funds[0].id, read_id);
    assert!(!updated.custom_funds[0].enabled);
    assert_eq!(sink.len(), 1);

    let reloaded = service.get_settings("acc-1").unwrap();
    assert_eq!(reloaded.custom_funds[0].id, read_id);
    assert!(!reloaded.custom_funds[0].enabled);
}

#[tokio::test]
async fn test_add_fund_keeps_funds_next_to_a_broken_one() {
    let repo = Arc::new(InMemorySettingsRepository::with_document(
        "acc-1",
        json!({
            "customFunds": [
                { "id": "vac", "name": "Vacation", "percentage": 4 },
                { "id": "brk", "name": "Broken", "percentage": "oops" }
            ]
        }),
    ));
    let (service, _sink) = service_with(repo.clone());

    let settings = service.get_settings("acc-1").unwrap();
    assert_eq!(settings.custom_funds.len(), 2);
    assert_eq!(settings.custom_funds[0].percentage, dec!(4));

    service
        .add_fund(
            "acc-1",
            NewFund {
                name: "Equipment".to_string(),
                percentage: dec!(3),
                color: FundColor::Orange,
                enabled: true,
            },
        )
        .await
        .unwrap();

    let stored = repo.document("acc-1").unwrap();
    let names: Vec<&str> = stored["customFunds"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Vacation", "Broken", "Equipment"]);
    assert_eq!(stored["customFunds"][0]["percentage"], json!(4.0));
}
