use async_trait::async_trait;

use crate::costs::costs_model::{FixedCost, NewFixedCost, NewVariableCost, VariableCost};
use crate::errors::Result;

/// Trait for fixed and variable cost storage
#[async_trait]
pub trait CostRepositoryTrait: Send + Sync {
    fn get_fixed_costs(&self, account_id: &str) -> Result<Vec<FixedCost>>;
    fn get_variable_costs(&self, account_id: &str) -> Result<Vec<VariableCost>>;
    async fn create_fixed_cost(&self, new_cost: NewFixedCost) -> Result<FixedCost>;
    /// Fails with `NotFound` when the cost does not belong to `account_id`.
    async fn set_fixed_cost_paid(
        &self,
        account_id: &str,
        cost_id: &str,
        paid: bool,
    ) -> Result<FixedCost>;
    async fn delete_fixed_cost(&self, account_id: &str, cost_id: &str) -> Result<usize>;
    async fn create_variable_cost(&self, new_cost: NewVariableCost) -> Result<VariableCost>;
}

/// Trait for cost operations that notify listeners
#[async_trait]
pub trait CostServiceTrait: Send + Sync {
    fn get_fixed_costs(&self, account_id: &str) -> Result<Vec<FixedCost>>;
    fn get_variable_costs(&self, account_id: &str) -> Result<Vec<VariableCost>>;
    async fn create_fixed_cost(&self, new_cost: NewFixedCost) -> Result<FixedCost>;
    async fn set_fixed_cost_paid(
        &self,
        account_id: &str,
        cost_id: &str,
        paid: bool,
    ) -> Result<FixedCost>;
    async fn delete_fixed_cost(&self, account_id: &str, cost_id: &str) -> Result<()>;
    async fn create_variable_cost(&self, new_cost: NewVariableCost) -> Result<VariableCost>;
}
