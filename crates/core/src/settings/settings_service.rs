use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

use super::funds::{self, FundPatch, NewFund};
use super::settings_model::{FinanceSettings, FinanceSettingsUpdate, Fund};
use super::settings_traits::{FinanceSettingsRepositoryTrait, FinanceSettingsServiceTrait};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};

const FUNDS_FIELD: &str = "customFunds";

pub struct FinanceSettingsService {
    settings_repository: Arc<dyn FinanceSettingsRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl FinanceSettingsService {
    pub fn new(
        settings_repository: Arc<dyn FinanceSettingsRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        FinanceSettingsService {
            settings_repository,
            event_sink,
        }
    }

    /// Writes the named fields of `settings` and announces the change once the store confirms.
    async fn persist_fields(
        &self,
        account_id: &str,
        settings: &FinanceSettings,
        fields: &[&str],
    ) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let patch = settings.document_patch(fields)?;
        self.settings_repository
            .upsert_settings_document(account_id, patch)
            .await?;

        info!(
            "Saved finance settings for account {} (fields: {})",
            account_id,
            fields.join(", ")
        );
        self.event_sink.emit(DomainEvent::finance_settings_changed(
            account_id,
            fields.iter().map(|f| f.to_string()).collect(),
        ));
        Ok(())
    }

    async fn persist_funds(&self, account_id: &str, settings: &FinanceSettings) -> Result<()> {
        self.persist_fields(account_id, settings, &[FUNDS_FIELD])
            .await
    }
}

#[async_trait]
impl FinanceSettingsServiceTrait for FinanceSettingsService {
    fn get_settings(&self, account_id: &str) -> Result<FinanceSettings> {
        let document = self.settings_repository.get_settings_document(account_id)?;
        let loaded = FinanceSettings::from_document(document.as_ref());
        if !loaded.repaired_fields.is_empty() {
            warn!(
                "Finance settings for account {} had unreadable fields, defaults used: {:?}",
                account_id, loaded.repaired_fields
            );
        }
        Ok(loaded.settings)
    }

    async fn update_settings(
        &self,
        account_id: &str,
        update: &FinanceSettingsUpdate,
    ) -> Result<FinanceSettings> {
        update.validate()?;

        let mut settings = self.get_settings(account_id)?;
        let changed = settings.apply_update(update);
        debug!(
            "Updating finance settings for account {}: {:?}",
            account_id, changed
        );

        self.persist_fields(account_id, &settings, &changed).await?;
        Ok(settings)
    }

    async fn add_fund(&self, account_id: &str, new_fund: NewFund) -> Result<Fund> {
        let current = self.get_settings(account_id)?;
        let (updated, fund) = funds::add_fund(&current, new_fund);
        fund.validate()?;

        self.persist_funds(account_id, &updated).await?;
        debug!("Added fund '{}' ({}) to account {}", fund.name, fund.id, account_id);
        Ok(fund)
    }

    async fn update_fund(
        &self,
        account_id: &str,
        fund_id: &str,
        patch: &FundPatch,
    ) -> Result<FinanceSettings> {
        let current = self.get_settings(account_id)?;
        let updated = funds::update_fund(&current, fund_id, patch);
        if updated == current {
            debug!("Fund {} not changed for account {}", fund_id, account_id);
            return Ok(current);
        }
        if let Some(fund) = updated.custom_funds.iter().find(|f| f.id == fund_id) {
            fund.validate()?;
        }

        self.persist_funds(account_id, &updated).await?;
        Ok(updated)
    }

    async fn remove_fund(&self, account_id: &str, fund_id: &str) -> Result<FinanceSettings> {
        let current = self.get_settings(account_id)?;
        let updated = funds::remove_fund(&current, fund_id);
        if updated == current {
            debug!("Fund {} not found for account {}", fund_id, account_id);
            return Ok(current);
        }

        self.persist_funds(account_id, &updated).await?;
        Ok(updated)
    }

    async fn reset_funds(&self, account_id: &str) -> Result<FinanceSettings> {
        let current = self.get_settings(account_id)?;
        let updated = funds::reset_funds(&current);

        self.persist_funds(account_id, &updated).await?;
        Ok(updated)
    }
}
