//! Database models for costs.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::{parse_decimal_tolerant, parse_stored_date, to_stored_date};
use salonbook_core::costs::{FixedCost, NewFixedCost, NewVariableCost, VariableCost};
use salonbook_core::errors::{Error, ValidationError};

fn id_or_new(id: Option<String>) -> String {
    id.filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Database model for fixed (monthly) costs
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::fixed_costs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct FixedCostDB {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub amount: String,
    pub day_due: i32,
    pub paid: bool,
}

/// Database model for variable costs
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::variable_costs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct VariableCostDB {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub amount: String,
    pub cost_date: String,
}

impl From<NewFixedCost> for FixedCostDB {
    fn from(domain: NewFixedCost) -> Self {
        Self {
            id: id_or_new(domain.id),
            account_id: domain.account_id,
            name: domain.name,
            amount: domain.amount.to_string(),
            day_due: domain.day_due as i32,
            paid: domain.paid,
        }
    }
}

impl TryFrom<FixedCostDB> for FixedCost {
    type Error = Error;

    fn try_from(db: FixedCostDB) -> Result<Self, Self::Error> {
        let day_due = u32::try_from(db.day_due).map_err(|_| {
            Error::Validation(ValidationError::out_of_range(
                "dayDue",
                format!("Fixed cost {} has day due {}", db.id, db.day_due),
            ))
        })?;
        Ok(Self {
            amount: parse_decimal_tolerant(&db.amount, "amount"),
            id: db.id,
            name: db.name,
            day_due,
            paid: db.paid,
        })
    }
}

impl From<NewVariableCost> for VariableCostDB {
    fn from(domain: NewVariableCost) -> Self {
        Self {
            id: id_or_new(domain.id),
            account_id: domain.account_id,
            name: domain.name,
            amount: domain.amount.to_string(),
            cost_date: to_stored_date(domain.date),
        }
    }
}

impl TryFrom<VariableCostDB> for VariableCost {
    type Error = Error;

    fn try_from(db: VariableCostDB) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: parse_decimal_tolerant(&db.amount, "amount"),
            date: parse_stored_date(&db.cost_date)?,
            id: db.id,
            name: db.name,
        })
    }
}
