//! SQLite storage implementation for the finance settings document.

mod model;
mod repository;

pub use model::FinanceSettingsDB;
pub use repository::FinanceSettingsRepository;

// Re-export trait from core for convenience
pub use salonbook_core::settings::FinanceSettingsRepositoryTrait;
