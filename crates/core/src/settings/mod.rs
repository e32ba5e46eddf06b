//! Finance settings module - settings document, funds, and their service.

pub mod funds;
pub mod settings_model;
pub mod settings_service;
pub mod settings_traits;

pub use funds::{add_fund, remove_fund, reset_funds, update_fund, FundPatch, NewFund};
pub use settings_model::*;
pub use settings_service::FinanceSettingsService;
pub use settings_traits::{FinanceSettingsRepositoryTrait, FinanceSettingsServiceTrait};

#[cfg(test)]
mod settings_service_tests;
