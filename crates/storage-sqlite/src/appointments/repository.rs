use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::warn;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::model::{AppointmentDB, DailyRevenueDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{appointments, daily_revenue};
use crate::utils::{collect_valid_rows, parse_decimal_tolerant, parse_stored_date, to_stored_date};
use salonbook_core::appointments::{
    Appointment, AppointmentRepositoryTrait, AppointmentStatus, NewAppointment, RevenueByDate,
};
use salonbook_core::errors::{DatabaseError, Error, Result};

pub struct AppointmentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AppointmentRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        AppointmentRepository { pool, writer }
    }
}

#[async_trait]
impl AppointmentRepositoryTrait for AppointmentRepository {
    fn get_appointments(&self, account_id: &str) -> Result<Vec<Appointment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = appointments::table
            .filter(appointments::account_id.eq(account_id))
            .order((appointments::appointment_date.asc(), appointments::id.asc()))
            .select(AppointmentDB::as_select())
            .load::<AppointmentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(collect_valid_rows(rows, "appointments"))
    }

    fn get_appointments_for_month(
        &self,
        account_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<Appointment>> {
        let mut conn = get_connection(&self.pool)?;
        let month_prefix = format!("{:04}-{:02}-%", year, month);
        let rows = appointments::table
            .filter(appointments::account_id.eq(account_id))
            .filter(appointments::appointment_date.like(month_prefix))
            .order((appointments::appointment_date.asc(), appointments::id.asc()))
            .select(AppointmentDB::as_select())
            .load::<AppointmentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(collect_valid_rows(rows, "appointments"))
    }

    fn get_revenue_by_date(&self, account_id: &str) -> Result<RevenueByDate> {
        let mut conn = get_connection(&self.pool)?;
        let rows = daily_revenue::table
            .filter(daily_revenue::account_id.eq(account_id))
            .select(DailyRevenueDB::as_select())
            .load::<DailyRevenueDB>(&mut conn)
            .map_err(StorageError::from)?;

        let mut revenue = RevenueByDate::new();
        for row in rows {
            match parse_stored_date(&row.revenue_date) {
                Ok(date) => {
                    revenue.insert(date, parse_decimal_tolerant(&row.amount, "amount"));
                }
                Err(e) => warn!("Skipping unreadable row in daily_revenue: {}", e),
            }
        }
        Ok(revenue)
    }

    async fn create_appointment(&self, new_appointment: NewAppointment) -> Result<Appointment> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Appointment> {
                let appointment_db: AppointmentDB = new_appointment.into();
                let result_db = diesel::insert_into(appointments::table)
                    .values(&appointment_db)
                    .returning(AppointmentDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Appointment::try_from(result_db)
            })
            .await
    }

    async fn update_appointment_status(
        &self,
        account_id: &str,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment> {
        let account_id = account_id.to_string();
        let appointment_id = appointment_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Appointment> {
                let updated = diesel::update(
                    appointments::table
                        .filter(appointments::id.eq(&appointment_id))
                        .filter(appointments::account_id.eq(&account_id)),
                )
                .set(appointments::status.eq(status.as_str()))
                .execute(conn)
                .map_err(StorageError::from)?;
                if updated == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Appointment {} not found for account {}",
                        appointment_id, account_id
                    ))));
                }
                let result_db = appointments::table
                    .filter(appointments::id.eq(&appointment_id))
                    .filter(appointments::account_id.eq(&account_id))
                    .select(AppointmentDB::as_select())
                    .first::<AppointmentDB>(conn)
                    .map_err(StorageError::from)?;
                Appointment::try_from(result_db)
            })
            .await
    }

    async fn record_daily_revenue(
        &self,
        account_id: &str,
        date: NaiveDate,
        amount: Decimal,
    ) -> Result<()> {
        let row = DailyRevenueDB {
            account_id: account_id.to_string(),
            revenue_date: to_stored_date(date),
            amount: amount.to_string(),
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::insert_into(daily_revenue::table)
                    .values(&row)
                    .on_conflict((daily_revenue::account_id, daily_revenue::revenue_date))
                    .do_update()
                    .set(daily_revenue::amount.eq(&row.amount))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
