//! Database models for catalog services.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::parse_decimal_tolerant;
use salonbook_core::catalog::{NewSalonService, SalonService};

/// Database model for salon services
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
#[diesel(table_name = crate::schema::salon_services)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct SalonServiceDB {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub price: String,
}

impl From<NewSalonService> for SalonServiceDB {
    fn from(domain: NewSalonService) -> Self {
        Self {
            id: domain
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            account_id: domain.account_id,
            name: domain.name.trim().to_string(),
            price: domain.price.to_string(),
        }
    }
}

impl From<SalonServiceDB> for SalonService {
    fn from(db: SalonServiceDB) -> Self {
        Self {
            price: parse_decimal_tolerant(&db.price, "price"),
            id: db.id,
            name: db.name,
        }
    }
}
