use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::{FixedCostDB, VariableCostDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{fixed_costs, variable_costs};
use crate::utils::collect_valid_rows;
use salonbook_core::costs::{
    CostRepositoryTrait, FixedCost, NewFixedCost, NewVariableCost, VariableCost,
};
use salonbook_core::Result;

pub struct CostRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CostRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CostRepository { pool, writer }
    }
}

#[async_trait]
impl CostRepositoryTrait for CostRepository {
    fn get_fixed_costs(&self, account_id: &str) -> Result<Vec<FixedCost>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = fixed_costs::table
            .filter(fixed_costs::account_id.eq(account_id))
            .order((fixed_costs::day_due.asc(), fixed_costs::name.asc()))
            .select(FixedCostDB::as_select())
            .load::<FixedCostDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(collect_valid_rows(rows, "fixed_costs"))
    }

    fn get_variable_costs(&self, account_id: &str) -> Result<Vec<VariableCost>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = variable_costs::table
            .filter(variable_costs::account_id.eq(account_id))
            .order((variable_costs::cost_date.asc(), variable_costs::id.asc()))
            .select(VariableCostDB::as_select())
            .load::<VariableCostDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(collect_valid_rows(rows, "variable_costs"))
    }

    async fn create_fixed_cost(&self, new_cost: NewFixedCost) -> Result<FixedCost> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<FixedCost> {
                let cost_db: FixedCostDB = new_cost.into();
                let result_db = diesel::insert_into(fixed_costs::table)
                    .values(&cost_db)
                    .returning(FixedCostDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                FixedCost::try_from(result_db)
            })
            .await
    }

    async fn set_fixed_cost_paid(
        &self,
        account_id: &str,
        cost_id: &str,
        paid: bool,
    ) -> Result<FixedCost> {
        let account_id = account_id.to_string();
        let cost_id = cost_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<FixedCost> {
                let result_db = diesel::update(
                    fixed_costs::table
                        .filter(fixed_costs::id.eq(&cost_id))
                        .filter(fixed_costs::account_id.eq(&account_id)),
                )
                .set(fixed_costs::paid.eq(paid))
                .returning(FixedCostDB::as_returning())
                .get_result(conn)
                .map_err(StorageError::from)?;
                FixedCost::try_from(result_db)
            })
            .await
    }

    async fn delete_fixed_cost(&self, account_id: &str, cost_id: &str) -> Result<usize> {
        let account_id = account_id.to_string();
        let cost_id = cost_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    fixed_costs::table
                        .filter(fixed_costs::id.eq(cost_id))
                        .filter(fixed_costs::account_id.eq(account_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    async fn create_variable_cost(&self, new_cost: NewVariableCost) -> Result<VariableCost> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<VariableCost> {
                let cost_db: VariableCostDB = new_cost.into();
                let result_db = diesel::insert_into(variable_costs::table)
                    .values(&cost_db)
                    .returning(VariableCostDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                VariableCost::try_from(result_db)
            })
            .await
    }
}
