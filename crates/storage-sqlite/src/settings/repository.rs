use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::warn;
use serde_json::{Map, Value};
use std::sync::Arc;

use super::model::FinanceSettingsDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::finance_settings;
use salonbook_core::errors::{Error, Result, ValidationError};
use salonbook_core::settings::FinanceSettingsRepositoryTrait;

pub struct FinanceSettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FinanceSettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        FinanceSettingsRepository { pool, writer }
    }
}

fn load_document(conn: &mut SqliteConnection, account_id: &str) -> Result<Option<String>> {
    Ok(finance_settings::table
        .find(account_id)
        .select(finance_settings::settings_json)
        .first::<String>(conn)
        .optional()
        .map_err(StorageError::from)?)
}

/// Parses a stored document, treating unreadable JSON as absent.
fn parse_document(account_id: &str, raw: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(
                "Finance settings for account {} are not valid JSON, ignoring them: {}",
                account_id, e
            );
            None
        }
    }
}

#[async_trait]
impl FinanceSettingsRepositoryTrait for FinanceSettingsRepository {
    fn get_settings_document(&self, account_id: &str) -> Result<Option<Value>> {
        let mut conn = get_connection(&self.pool)?;
        let raw = load_document(&mut conn, account_id)?;
        Ok(raw.and_then(|raw| parse_document(account_id, &raw)))
    }

    async fn upsert_settings_document(&self, account_id: &str, patch: Value) -> Result<()> {
        let Value::Object(patch_fields) = patch else {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Settings patch must be a JSON object".to_string(),
            )));
        };
        let account_id = account_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let mut document = match load_document(conn, &account_id)?
                    .and_then(|raw| parse_document(&account_id, &raw))
                {
                    Some(Value::Object(fields)) => fields,
                    _ => Map::new(),
                };
                for (key, value) in patch_fields {
                    document.insert(key, value);
                }

                let row = FinanceSettingsDB {
                    account_id: account_id.clone(),
                    settings_json: serde_json::to_string(&Value::Object(document))
                        .map_err(StorageError::from)?,
                    updated_at: Utc::now().naive_utc(),
                };
                diesel::insert_into(finance_settings::table)
                    .values(&row)
                    .on_conflict(finance_settings::account_id)
                    .do_update()
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
