//! Fund operations over a settings value.
//!
//! These are pure transforms: they return a new `FinanceSettings` and never
//! touch storage. Persisting the result is the settings service's job.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::settings_model::{default_funds, FinanceSettings, Fund, FundColor};

/// Input model for creating a fund; the id is generated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewFund {
    pub name: String,
    pub percentage: Decimal,
    #[serde(default)]
    pub color: FundColor,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

/// Partial fund update; `None` fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundPatch {
    pub name: Option<String>,
    pub percentage: Option<Decimal>,
    pub color: Option<FundColor>,
    pub enabled: Option<bool>,
}

/// Generates a random fund id not present in `existing`.
///
/// Ids are UUIDs rather than counters because several devices may add
/// funds to the same account concurrently.
pub fn generate_fund_id(existing: &[Fund]) -> String {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if !existing.iter().any(|f| f.id == candidate) {
            return candidate;
        }
    }
}

/// Appends a new fund and returns the updated settings with the created fund.
pub fn add_fund(settings: &FinanceSettings, new_fund: NewFund) -> (FinanceSettings, Fund) {
    let fund = Fund {
        id: generate_fund_id(&settings.custom_funds),
        name: new_fund.name,
        percentage: new_fund.percentage,
        color: new_fund.color,
        enabled: new_fund.enabled,
    };
    let mut updated = settings.clone();
    updated.custom_funds.push(fund.clone());
    (updated, fund)
}

/// Merges `patch` into the fund with `fund_id`. Unknown ids leave the settings unchanged.
pub fn update_fund(settings: &FinanceSettings, fund_id: &str, patch: &FundPatch) -> FinanceSettings {
    let mut updated = settings.clone();
    if let Some(fund) = updated.custom_funds.iter_mut().find(|f| f.id == fund_id) {
        if let Some(name) = &patch.name {
            fund.name = name.clone();
        }
        if let Some(percentage) = patch.percentage {
            fund.percentage = percentage;
        }
        if let Some(color) = patch.color {
            fund.color = color;
        }
        if let Some(enabled) = patch.enabled {
            fund.enabled = enabled;
        }
    }
    updated
}

/// Removes the fund with `fund_id`, if present.
pub fn remove_fund(settings: &FinanceSettings, fund_id: &str) -> FinanceSettings {
    let mut updated = settings.clone();
    updated.custom_funds.retain(|f| f.id != fund_id);
    updated
}

/// Replaces the fund list with the two seed funds.
pub fn reset_funds(settings: &FinanceSettings) -> FinanceSettings {
    let mut updated = settings.clone();
    updated.custom_funds = default_funds();
    updated
}
