//! Finance settings domain models.
//!
//! The settings document is a singleton per account. It is always read
//! through [`FinanceSettings::from_document`], which overlays whatever was
//! persisted onto the canonical defaults, so fields introduced later are
//! populated without a migration step.

use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::constants::DEFAULT_TICKET_THRESHOLD;
use crate::errors::{Result, ValidationError};

/// Id of the seeded "Emergency" fund.
pub const DEFAULT_EMERGENCY_FUND_ID: &str = "default-emergency";
/// Id of the seeded "Maintenance" fund.
pub const DEFAULT_MAINTENANCE_FUND_ID: &str = "default-maintenance";

// =============================================================================
// Fund color
// =============================================================================

/// Presentation palette for funds.
///
/// Unknown palette keys deserialize to the default instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FundColor {
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
    Pink,
    Red,
    Yellow,
    Gray,
}

impl FundColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            FundColor::Blue => "blue",
            FundColor::Green => "green",
            FundColor::Purple => "purple",
            FundColor::Orange => "orange",
            FundColor::Pink => "pink",
            FundColor::Red => "red",
            FundColor::Yellow => "yellow",
            FundColor::Gray => "gray",
        }
    }

    /// Resolves a palette key, falling back to the default color.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "blue" => FundColor::Blue,
            "green" => FundColor::Green,
            "purple" => FundColor::Purple,
            "orange" => FundColor::Orange,
            "pink" => FundColor::Pink,
            "red" => FundColor::Red,
            "yellow" => FundColor::Yellow,
            "gray" | "grey" => FundColor::Gray,
            _ => FundColor::default(),
        }
    }
}

impl<'de> Deserialize<'de> for FundColor {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = Option::<String>::deserialize(deserializer)?;
        Ok(key.as_deref().map(FundColor::from_key).unwrap_or_default())
    }
}

// =============================================================================
// Fund
// =============================================================================

/// A named, percentage-of-revenue savings bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Share of monthly revenue, 0-100. Funds are not required to sum to 100.
    #[serde(default)]
    pub percentage: Decimal,
    #[serde(default)]
    pub color: FundColor,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Fund {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("fund name".to_string()));
        }
        validate_percentage("fund percentage", self.percentage)
    }
}

// =============================================================================
// Neighborhood
// =============================================================================

/// Price bracket of the salon's area, used to judge the average ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Neighborhood {
    Simples,
    Media,
    Rica,
}

impl Neighborhood {
    /// Average ticket a salon in this bracket is expected to clear.
    pub fn ticket_threshold(&self) -> Decimal {
        match self {
            Neighborhood::Simples => dec!(80),
            Neighborhood::Media => dec!(120),
            Neighborhood::Rica => dec!(200),
        }
    }
}

/// Ticket threshold for an optional neighborhood setting.
pub fn ticket_threshold_for(neighborhood: Option<Neighborhood>) -> Decimal {
    neighborhood
        .map(|n| n.ticket_threshold())
        .unwrap_or(DEFAULT_TICKET_THRESHOLD)
}

// =============================================================================
// Finance settings
// =============================================================================

/// Finance configuration of one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FinanceSettings {
    pub monthly_goal: Decimal,
    pub tax_rate: Decimal,
    pub card_fee_rate: Decimal,
    /// Superseded by `custom_funds`; still carried for older documents.
    pub reinvestment_rate: Decimal,
    /// Superseded by `custom_funds`; seeds the Emergency fund of older documents.
    pub emergency_fund_rate: Decimal,
    pub owner_salary_fixed: Decimal,
    pub owner_salary_percent: Decimal,
    pub neighborhood: Option<Neighborhood>,
    pub custom_funds: Vec<Fund>,
}

impl Default for FinanceSettings {
    fn default() -> Self {
        Self {
            monthly_goal: dec!(5000),
            tax_rate: dec!(6),
            card_fee_rate: dec!(3),
            reinvestment_rate: dec!(10),
            emergency_fund_rate: dec!(5),
            owner_salary_fixed: Decimal::ZERO,
            owner_salary_percent: dec!(30),
            neighborhood: None,
            custom_funds: default_funds(),
        }
    }
}

/// The two funds every account starts with.
pub fn default_funds() -> Vec<Fund> {
    vec![
        Fund {
            id: DEFAULT_EMERGENCY_FUND_ID.to_string(),
            name: "Emergency".to_string(),
            percentage: dec!(5),
            color: FundColor::Red,
            enabled: true,
        },
        Fund {
            id: DEFAULT_MAINTENANCE_FUND_ID.to_string(),
            name: "Maintenance".to_string(),
            percentage: dec!(10),
            color: FundColor::Blue,
            enabled: true,
        },
    ]
}

/// Id for a persisted fund that was stored without one.
///
/// Derived from the fund's position and name so every load of the same
/// document yields the same id.
fn derived_fund_id(position: usize, name: &str) -> String {
    let key = format!("fund:{}:{}", position, name.trim());
    Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()).to_string()
}

/// Rebuilds a fund whose entry did not deserialize, keeping every readable field.
///
/// Returns `None` when the entry has no usable name.
fn salvage_fund(entry: &Value) -> Option<Fund> {
    let fields = entry.as_object()?;
    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())?;

    let mut fund = Fund {
        id: String::new(),
        name: name.to_string(),
        percentage: Decimal::ZERO,
        color: FundColor::default(),
        enabled: default_enabled(),
    };
    if let Some(id) = fields.get("id").and_then(Value::as_str) {
        fund.id = id.to_string();
    }
    if let Some(Ok(percentage)) = fields
        .get("percentage")
        .map(|value| serde_json::from_value::<Decimal>(value.clone()))
    {
        fund.percentage = percentage;
    }
    if let Some(Ok(color)) = fields
        .get("color")
        .map(|value| serde_json::from_value::<FundColor>(value.clone()))
    {
        fund.color = color;
    }
    if let Some(enabled) = fields.get("enabled").and_then(Value::as_bool) {
        fund.enabled = enabled;
    }
    Some(fund)
}

/// Reads a persisted fund list entry by entry.
///
/// Returns the funds and whether anything had to be repaired.
fn repair_funds(entries: &[Value]) -> (Vec<Fund>, bool) {
    let mut repaired = false;
    let mut funds = Vec::with_capacity(entries.len());

    for (position, entry) in entries.iter().enumerate() {
        let mut fund = match serde_json::from_value::<Fund>(entry.clone()) {
            Ok(fund) => fund,
            Err(e) => {
                repaired = true;
                match salvage_fund(entry) {
                    Some(fund) => {
                        warn!("Repaired unreadable fields of fund '{}': {}", fund.name, e);
                        fund
                    }
                    None => {
                        warn!("Dropping unreadable fund at position {}: {}", position, entry);
                        continue;
                    }
                }
            }
        };
        if fund.id.trim().is_empty() {
            fund.id = derived_fund_id(position, &fund.name);
            repaired = true;
        }
        funds.push(fund);
    }
    (funds, repaired)
}

/// Outcome of loading a persisted settings document.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSettings {
    pub settings: FinanceSettings,
    /// Persisted keys that could not be read and were replaced by defaults.
    pub repaired_fields: Vec<String>,
}

impl FinanceSettings {
    /// Builds settings from a persisted document, overlaying it onto the defaults.
    ///
    /// Never fails: an absent document yields the defaults, a malformed
    /// field falls back to its default while the other fields are kept.
    pub fn from_document(document: Option<&Value>) -> LoadedSettings {
        let defaults = FinanceSettings::default();
        let persisted = match document {
            None | Some(Value::Null) => {
                return LoadedSettings {
                    settings: defaults,
                    repaired_fields: Vec::new(),
                }
            }
            Some(Value::Object(map)) => map,
            Some(other) => {
                warn!("Finance settings document is not an object ({}), using defaults", other);
                return LoadedSettings {
                    settings: defaults,
                    repaired_fields: vec!["$".to_string()],
                };
            }
        };

        let mut merged = match serde_json::to_value(&defaults) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        // Older documents only carried the flat emergency rate.
        if !persisted.contains_key("customFunds") {
            if let Some(rate) = persisted.get("emergencyFundRate") {
                if let Some(Value::Array(funds)) = merged.get_mut("customFunds") {
                    for fund in funds.iter_mut() {
                        if fund.get("id").and_then(Value::as_str) == Some(DEFAULT_EMERGENCY_FUND_ID) {
                            fund["percentage"] = rate.clone();
                        }
                    }
                }
            }
        }

        let mut repaired_fields = Vec::new();
        for (key, value) in persisted {
            if let ("customFunds", Value::Array(entries)) = (key.as_str(), value) {
                let (funds, repaired) = repair_funds(entries);
                match serde_json::to_value(&funds) {
                    Ok(funds) => {
                        merged.insert(key.clone(), funds);
                        if repaired {
                            repaired_fields.push(key.clone());
                        }
                        continue;
                    }
                    Err(e) => warn!("Could not rebuild fund list: {}", e),
                }
            }

            let previous = merged.insert(key.clone(), value.clone());
            if serde_json::from_value::<FinanceSettings>(Value::Object(merged.clone())).is_err() {
                warn!("Ignoring malformed finance setting '{}': {}", key, value);
                match previous {
                    Some(previous) => merged.insert(key.clone(), previous),
                    None => merged.remove(key),
                };
                repaired_fields.push(key.clone());
            }
        }

        let settings: FinanceSettings =
            serde_json::from_value(Value::Object(merged)).unwrap_or(defaults);

        LoadedSettings {
            settings,
            repaired_fields,
        }
    }

    /// Serializes the named top-level fields as a partial document.
    pub fn document_patch(&self, fields: &[&str]) -> Result<Value> {
        let full = serde_json::to_value(self)?;
        let mut patch = Map::new();
        if let Value::Object(map) = full {
            for field in fields {
                if let Some(value) = map.get(*field) {
                    patch.insert((*field).to_string(), value.clone());
                }
            }
        }
        Ok(Value::Object(patch))
    }

    /// Applies a partial update and returns the camelCase names of the fields it set.
    pub fn apply_update(&mut self, update: &FinanceSettingsUpdate) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if let Some(value) = update.monthly_goal {
            self.monthly_goal = value;
            changed.push("monthlyGoal");
        }
        if let Some(value) = update.tax_rate {
            self.tax_rate = value;
            changed.push("taxRate");
        }
        if let Some(value) = update.card_fee_rate {
            self.card_fee_rate = value;
            changed.push("cardFeeRate");
        }
        if let Some(value) = update.reinvestment_rate {
            self.reinvestment_rate = value;
            changed.push("reinvestmentRate");
        }
        if let Some(value) = update.emergency_fund_rate {
            self.emergency_fund_rate = value;
            changed.push("emergencyFundRate");
        }
        if let Some(value) = update.owner_salary_fixed {
            self.owner_salary_fixed = value;
            changed.push("ownerSalaryFixed");
        }
        if let Some(value) = update.owner_salary_percent {
            self.owner_salary_percent = value;
            changed.push("ownerSalaryPercent");
        }
        if let Some(value) = update.neighborhood {
            self.neighborhood = value;
            changed.push("neighborhood");
        }
        changed
    }

    /// Checks user-editable values before they are persisted.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let rates = [
            ("taxRate", self.tax_rate),
            ("cardFeeRate", self.card_fee_rate),
            ("reinvestmentRate", self.reinvestment_rate),
            ("emergencyFundRate", self.emergency_fund_rate),
            ("ownerSalaryPercent", self.owner_salary_percent),
        ];
        for (field, rate) in rates {
            validate_percentage(field, rate)?;
        }
        if self.monthly_goal < Decimal::ZERO {
            return Err(ValidationError::out_of_range("monthlyGoal", "must not be negative"));
        }
        if self.owner_salary_fixed < Decimal::ZERO {
            return Err(ValidationError::out_of_range(
                "ownerSalaryFixed",
                "must not be negative",
            ));
        }
        for fund in &self.custom_funds {
            fund.validate()?;
        }
        Ok(())
    }

    /// Enabled funds, in display order.
    pub fn enabled_funds(&self) -> impl Iterator<Item = &Fund> {
        self.custom_funds.iter().filter(|f| f.enabled)
    }
}

pub(crate) fn validate_percentage(
    field: &str,
    value: Decimal,
) -> std::result::Result<(), ValidationError> {
    if value < Decimal::ZERO || value > dec!(100) {
        return Err(ValidationError::out_of_range(
            field,
            format!("{} is not between 0 and 100", value),
        ));
    }
    Ok(())
}

/// Partial update of the scalar settings fields. Funds have their own operations.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSettingsUpdate {
    pub monthly_goal: Option<Decimal>,
    pub tax_rate: Option<Decimal>,
    pub card_fee_rate: Option<Decimal>,
    pub reinvestment_rate: Option<Decimal>,
    pub emergency_fund_rate: Option<Decimal>,
    pub owner_salary_fixed: Option<Decimal>,
    pub owner_salary_percent: Option<Decimal>,
    /// `Some(None)` clears the bracket back to the default ticket threshold.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub neighborhood: Option<Option<Neighborhood>>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`).
fn deserialize_present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl FinanceSettingsUpdate {
    /// Checks only the fields the update sets.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let rates = [
            ("taxRate", self.tax_rate),
            ("cardFeeRate", self.card_fee_rate),
            ("reinvestmentRate", self.reinvestment_rate),
            ("emergencyFundRate", self.emergency_fund_rate),
            ("ownerSalaryPercent", self.owner_salary_percent),
        ];
        for (field, rate) in rates {
            if let Some(rate) = rate {
                validate_percentage(field, rate)?;
            }
        }
        let amounts = [
            ("monthlyGoal", self.monthly_goal),
            ("ownerSalaryFixed", self.owner_salary_fixed),
        ];
        for (field, amount) in amounts {
            if matches!(amount, Some(value) if value < Decimal::ZERO) {
                return Err(ValidationError::out_of_range(field, "must not be negative"));
            }
        }
        Ok(())
    }
}
