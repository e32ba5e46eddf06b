//! Database model for finance settings documents.

use chrono::NaiveDateTime;
use diesel::prelude::*;

/// One JSON settings document per account
#[derive(Queryable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::finance_settings)]
#[diesel(primary_key(account_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FinanceSettingsDB {
    pub account_id: String,
    pub settings_json: String,
    pub updated_at: NaiveDateTime,
}
