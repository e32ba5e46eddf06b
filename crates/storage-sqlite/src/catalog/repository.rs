use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::SalonServiceDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::salon_services;
use crate::schema::salon_services::dsl::*;
use salonbook_core::catalog::{CatalogRepositoryTrait, NewSalonService, SalonService};
use salonbook_core::Result;

pub struct CatalogRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CatalogRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CatalogRepository { pool, writer }
    }
}

#[async_trait]
impl CatalogRepositoryTrait for CatalogRepository {
    fn get_services(&self, account: &str) -> Result<Vec<SalonService>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = salon_services
            .filter(account_id.eq(account))
            .order((name.asc(), id.asc()))
            .select(SalonServiceDB::as_select())
            .load::<SalonServiceDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(SalonService::from).collect())
    }

    async fn create_service(&self, new_service: NewSalonService) -> Result<SalonService> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SalonService> {
                let service_db: SalonServiceDB = new_service.into();
                let result_db = diesel::insert_into(salon_services::table)
                    .values(&service_db)
                    .returning(SalonServiceDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(SalonService::from(result_db))
            })
            .await
    }

    async fn delete_service(&self, account: &str, service_id: &str) -> Result<usize> {
        let account = account.to_string();
        let service_id = service_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    salon_services
                        .filter(id.eq(service_id))
                        .filter(account_id.eq(account)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
