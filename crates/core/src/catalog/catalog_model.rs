use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// A service offered by the salon (cut, coloring, manicure...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalonService {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub price: Decimal,
}

impl SalonService {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            price,
        }
    }
}

/// Input model for adding a service to the catalog
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewSalonService {
    pub id: Option<String>,
    pub account_id: String,
    pub name: String,
    pub price: Decimal,
}

impl NewSalonService {
    /// Validates the new service data
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Service name cannot be empty".to_string(),
            )));
        }
        if self.price.is_sign_negative() {
            return Err(Error::Validation(ValidationError::out_of_range(
                "price",
                "Service price cannot be negative",
            )));
        }
        Ok(())
    }
}
