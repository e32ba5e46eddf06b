//! Costs module - recurring fixed bills and one-off variable expenses.

mod costs_model;
mod costs_service;
mod costs_traits;

pub use costs_model::{FixedCost, NewFixedCost, NewVariableCost, VariableCost};
pub use costs_service::CostService;
pub use costs_traits::{CostRepositoryTrait, CostServiceTrait};
