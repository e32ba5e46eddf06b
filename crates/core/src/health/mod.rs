//! Financial health module.
//!
//! Derives the finance dashboard snapshot for a salon account from its
//! appointment ledger, realized daily revenue, costs, service catalog and
//! finance settings.
//!
//! # Architecture
//!
//! ```text
//! FinancialHealthService → compute_financial_health (pure) → FinancialHealthSnapshot
//!        ↑                                                          ↓
//! HealthRecomputeSink (invalidates on DomainEvent)          advice + combo offer
//! ```
//!
//! - **Models** (`model.rs`) - Snapshot, goal status, advice and combo types
//! - **Engine** (`engine.rs`) - The deterministic computation
//! - **Advisory** (`advisory.rs`) - Combo selection and advice messages
//! - **Service** (`service.rs`) - Input gathering and per-account caching
//!
//! # Goal Status
//!
//! Today's realized revenue is compared with `monthly_goal / days_in_month`:
//! - **Ahead** - revenue at or above the target
//! - **On track** - short by less than 20% of the target
//! - **Behind** - short by 20% of the target or more

pub mod advisory;
pub mod engine;
pub mod model;
pub mod service;
pub mod traits;


pub use advisory::{build_advice, suggest_combo};
pub use engine::{classify_goal, compute_financial_health};
pub use model::{Advice, AdviceKind, ComboSuggestion, FinancialHealthSnapshot, GoalStatus};
pub use service::{FinancialHealthService, HealthRecomputeSink};
pub use traits::FinancialHealthServiceTrait;
