//! Domain event types.

use serde::{Deserialize, Serialize};

/// Domain events emitted by core services after successful mutations.
///
/// Each event names the account whose finance inputs changed. Consumers
/// treat them as "recompute from scratch", never as deltas.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// The finance settings document (including funds) was written.
    FinanceSettingsChanged {
        account_id: String,
        /// Top-level settings fields that were written
        changed_fields: Vec<String>,
    },

    /// Appointments were created or changed status, or daily revenue was recorded.
    AppointmentsChanged { account_id: String },

    /// Fixed or variable costs were created, paid, or deleted.
    CostsChanged { account_id: String },

    /// Services were added to or removed from the catalog.
    CatalogChanged { account_id: String },
}

impl DomainEvent {
    /// Creates a FinanceSettingsChanged event.
    pub fn finance_settings_changed(account_id: impl Into<String>, changed_fields: Vec<String>) -> Self {
        Self::FinanceSettingsChanged {
            account_id: account_id.into(),
            changed_fields,
        }
    }

    /// Creates an AppointmentsChanged event.
    pub fn appointments_changed(account_id: impl Into<String>) -> Self {
        Self::AppointmentsChanged {
            account_id: account_id.into(),
        }
    }

    /// Creates a CostsChanged event.
    pub fn costs_changed(account_id: impl Into<String>) -> Self {
        Self::CostsChanged {
            account_id: account_id.into(),
        }
    }

    /// Creates a CatalogChanged event.
    pub fn catalog_changed(account_id: impl Into<String>) -> Self {
        Self::CatalogChanged {
            account_id: account_id.into(),
        }
    }

    /// The account the event refers to.
    pub fn account_id(&self) -> &str {
        match self {
            DomainEvent::FinanceSettingsChanged { account_id, .. }
            | DomainEvent::AppointmentsChanged { account_id }
            | DomainEvent::CostsChanged { account_id }
            | DomainEvent::CatalogChanged { account_id } => account_id,
        }
    }
}
