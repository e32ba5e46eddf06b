//! SQLite storage implementation for fixed and variable costs.

mod model;
mod repository;

pub use model::{FixedCostDB, VariableCostDB};
pub use repository::CostRepository;

pub use salonbook_core::costs::CostRepositoryTrait;
