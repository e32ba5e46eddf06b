use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::costs_model::{FixedCost, NewFixedCost, NewVariableCost, VariableCost};
use super::costs_traits::{CostRepositoryTrait, CostServiceTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::events::{DomainEvent, DomainEventSink};

/// Service for fixed bills and variable expenses
pub struct CostService {
    repository: Arc<dyn CostRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl CostService {
    pub fn new(
        repository: Arc<dyn CostRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }

    fn announce(&self, account_id: impl Into<String>) {
        self.event_sink.emit(DomainEvent::costs_changed(account_id));
    }
}

#[async_trait]
impl CostServiceTrait for CostService {
    fn get_fixed_costs(&self, account_id: &str) -> Result<Vec<FixedCost>> {
        self.repository.get_fixed_costs(account_id)
    }

    fn get_variable_costs(&self, account_id: &str) -> Result<Vec<VariableCost>> {
        self.repository.get_variable_costs(account_id)
    }

    async fn create_fixed_cost(&self, new_cost: NewFixedCost) -> Result<FixedCost> {
        new_cost.validate()?;
        let account_id = new_cost.account_id.clone();

        let cost = self.repository.create_fixed_cost(new_cost).await?;
        debug!(
            "Added fixed cost '{}' due on day {} for account {}",
            cost.name, cost.day_due, account_id
        );
        self.announce(account_id);
        Ok(cost)
    }

    async fn set_fixed_cost_paid(
        &self,
        account_id: &str,
        cost_id: &str,
        paid: bool,
    ) -> Result<FixedCost> {
        let cost = self
            .repository
            .set_fixed_cost_paid(account_id, cost_id, paid)
            .await?;
        self.announce(account_id);
        Ok(cost)
    }

    async fn delete_fixed_cost(&self, account_id: &str, cost_id: &str) -> Result<()> {
        let deleted = self.repository.delete_fixed_cost(account_id, cost_id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Fixed cost {} not found",
                cost_id
            ))));
        }
        self.announce(account_id);
        Ok(())
    }

    async fn create_variable_cost(&self, new_cost: NewVariableCost) -> Result<VariableCost> {
        new_cost.validate()?;
        let account_id = new_cost.account_id.clone();

        let cost = self.repository.create_variable_cost(new_cost).await?;
        self.announce(account_id);
        Ok(cost)
    }
}
