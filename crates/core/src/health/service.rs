//! Financial health service implementation.
//!
//! Gathers the engine inputs from the repositories, runs the pure
//! computation and keeps the last snapshot per account until an input
//! changes.

use chrono::{Datelike, NaiveDate};
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::engine::compute_financial_health;
use super::model::FinancialHealthSnapshot;
use super::traits::FinancialHealthServiceTrait;
use crate::appointments::AppointmentRepositoryTrait;
use crate::catalog::CatalogRepositoryTrait;
use crate::costs::CostRepositoryTrait;
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::settings::FinanceSettingsServiceTrait;

#[derive(Default)]
struct CacheState {
    snapshots: HashMap<String, FinancialHealthSnapshot>,
    /// Bumped on every invalidation; a snapshot computed under an older
    /// generation is never stored.
    generations: HashMap<String, u64>,
}

/// Last computed snapshot per account id.
#[derive(Default)]
struct SnapshotCache {
    state: RwLock<CacheState>,
}

impl SnapshotCache {
    fn get(&self, account_id: &str, today: NaiveDate) -> Option<FinancialHealthSnapshot> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .snapshots
            .get(account_id)
            .filter(|snapshot| snapshot.computed_for == today)
            .cloned()
    }

    fn generation(&self, account_id: &str) -> u64 {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.generations.get(account_id).copied().unwrap_or(0)
    }

    /// Stores `snapshot` unless the account was invalidated since `generation`
    /// was read. Returns whether it was stored.
    fn put_if_current(
        &self,
        account_id: &str,
        generation: u64,
        snapshot: FinancialHealthSnapshot,
    ) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.generations.get(account_id).copied().unwrap_or(0) != generation {
            return false;
        }
        state.snapshots.insert(account_id.to_string(), snapshot);
        true
    }

    fn remove(&self, account_id: &str) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state.generations.entry(account_id.to_string()).or_insert(0) += 1;
        state.snapshots.remove(account_id).is_some()
    }
}

/// Service for computing financial health snapshots.
pub struct FinancialHealthService {
    appointment_repository: Arc<dyn AppointmentRepositoryTrait>,
    catalog_repository: Arc<dyn CatalogRepositoryTrait>,
    cost_repository: Arc<dyn CostRepositoryTrait>,
    settings_service: Arc<dyn FinanceSettingsServiceTrait>,
    cache: Arc<SnapshotCache>,
}

impl FinancialHealthService {
    pub fn new(
        appointment_repository: Arc<dyn AppointmentRepositoryTrait>,
        catalog_repository: Arc<dyn CatalogRepositoryTrait>,
        cost_repository: Arc<dyn CostRepositoryTrait>,
        settings_service: Arc<dyn FinanceSettingsServiceTrait>,
    ) -> Self {
        Self {
            appointment_repository,
            catalog_repository,
            cost_repository,
            settings_service,
            cache: Arc::new(SnapshotCache::default()),
        }
    }

    /// Event sink that invalidates this service's snapshots whenever one of
    /// the engine inputs changes.
    pub fn recompute_sink(&self) -> HealthRecomputeSink {
        HealthRecomputeSink {
            cache: self.cache.clone(),
        }
    }

    fn compute(&self, account_id: &str, today: NaiveDate) -> Result<FinancialHealthSnapshot> {
        let appointments = self.appointment_repository.get_appointments_for_month(
            account_id,
            today.year(),
            today.month(),
        )?;
        let revenue_by_date = self.appointment_repository.get_revenue_by_date(account_id)?;
        let fixed_costs = self.cost_repository.get_fixed_costs(account_id)?;
        let variable_costs = self.cost_repository.get_variable_costs(account_id)?;
        let services = self.catalog_repository.get_services(account_id)?;
        let settings = self.settings_service.get_settings(account_id)?;

        Ok(compute_financial_health(
            today,
            &appointments,
            &revenue_by_date,
            &fixed_costs,
            &variable_costs,
            &services,
            &settings,
        ))
    }
}

impl FinancialHealthServiceTrait for FinancialHealthService {
    fn get_financial_health(
        &self,
        account_id: &str,
        today: NaiveDate,
    ) -> Result<FinancialHealthSnapshot> {
        if let Some(snapshot) = self.cache.get(account_id, today) {
            return Ok(snapshot);
        }

        debug!("Computing financial health for account {} on {}", account_id, today);
        let generation = self.cache.generation(account_id);
        let snapshot = self.compute(account_id, today)?;
        if !self.cache.put_if_current(account_id, generation, snapshot.clone()) {
            debug!(
                "Inputs for account {} changed while computing, snapshot not cached",
                account_id
            );
        }
        Ok(snapshot)
    }

    fn invalidate(&self, account_id: &str) {
        if self.cache.remove(account_id) {
            debug!("Invalidated financial health snapshot for account {}", account_id);
        }
    }
}

/// Domain event sink that drops cached snapshots of the affected account.
///
/// Register it next to the other sinks (see `FanOutDomainEventSink`) so the
/// next read after any settings, ledger, cost or catalog change recomputes
/// the whole snapshot.
#[derive(Clone)]
pub struct HealthRecomputeSink {
    cache: Arc<SnapshotCache>,
}

impl DomainEventSink for HealthRecomputeSink {
    fn emit(&self, event: DomainEvent) {
        let account_id = event.account_id();
        if self.cache.remove(account_id) {
            debug!(
                "Financial health for account {} marked stale after {:?}",
                account_id, event
            );
        }
    }
}
