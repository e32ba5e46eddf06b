//! Repository and service traits for finance settings.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::Result;
use crate::settings::funds::{FundPatch, NewFund};
use crate::settings::settings_model::{FinanceSettings, FinanceSettingsUpdate, Fund};

/// Document store holding one finance settings document per account.
#[async_trait]
pub trait FinanceSettingsRepositoryTrait: Send + Sync {
    /// Get the raw persisted document, if the account has one.
    fn get_settings_document(&self, account_id: &str) -> Result<Option<Value>>;

    /// Merge the top-level keys of `patch` into the stored document,
    /// creating it when absent. Keys not in `patch` are preserved.
    async fn upsert_settings_document(&self, account_id: &str, patch: Value) -> Result<()>;
}

/// Trait for finance settings service operations
#[async_trait]
pub trait FinanceSettingsServiceTrait: Send + Sync {
    /// Settings with defaults merged in. Never fails on a malformed document.
    fn get_settings(&self, account_id: &str) -> Result<FinanceSettings>;

    async fn update_settings(
        &self,
        account_id: &str,
        update: &FinanceSettingsUpdate,
    ) -> Result<FinanceSettings>;

    async fn add_fund(&self, account_id: &str, new_fund: NewFund) -> Result<Fund>;

    async fn update_fund(
        &self,
        account_id: &str,
        fund_id: &str,
        patch: &FundPatch,
    ) -> Result<FinanceSettings>;

    async fn remove_fund(&self, account_id: &str, fund_id: &str) -> Result<FinanceSettings>;

    async fn reset_funds(&self, account_id: &str) -> Result<FinanceSettings>;
}
