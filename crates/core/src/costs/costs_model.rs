//! Cost domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// A monthly recurring bill (rent, electricity, software...).
///
/// `day_due` is a day-of-month; `paid` refers to the current month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FixedCost {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub day_due: u32,
    pub paid: bool,
}

/// Input model for creating a fixed cost
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewFixedCost {
    pub id: Option<String>,
    pub account_id: String,
    pub name: String,
    pub amount: Decimal,
    pub day_due: u32,
    #[serde(default)]
    pub paid: bool,
}

/// A one-off expense (products, commissions...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariableCost {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Input model for creating a variable cost
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewVariableCost {
    pub id: Option<String>,
    pub account_id: String,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

fn validate_cost(name: &str, amount: Decimal) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Cost name cannot be empty".to_string(),
        )));
    }
    if amount.is_sign_negative() {
        return Err(Error::Validation(ValidationError::out_of_range(
            "amount",
            "Cost amount cannot be negative",
        )));
    }
    Ok(())
}

impl NewFixedCost {
    pub fn validate(&self) -> Result<()> {
        validate_cost(&self.name, self.amount)?;
        if !(1..=31).contains(&self.day_due) {
            return Err(Error::Validation(ValidationError::out_of_range(
                "dayDue",
                format!("Day due must be between 1 and 31, got {}", self.day_due),
            )));
        }
        Ok(())
    }
}

impl NewVariableCost {
    pub fn validate(&self) -> Result<()> {
        validate_cost(&self.name, self.amount)
    }
}
