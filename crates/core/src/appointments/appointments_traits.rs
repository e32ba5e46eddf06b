use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::appointments::appointments_model::{
    Appointment, AppointmentStatus, NewAppointment, RevenueByDate,
};
use crate::errors::Result;

/// Trait for appointment ledger and daily revenue storage
#[async_trait]
pub trait AppointmentRepositoryTrait: Send + Sync {
    fn get_appointments(&self, account_id: &str) -> Result<Vec<Appointment>>;

    /// Appointments dated within the given calendar month, any status.
    fn get_appointments_for_month(
        &self,
        account_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<Appointment>>;

    fn get_revenue_by_date(&self, account_id: &str) -> Result<RevenueByDate>;

    async fn create_appointment(&self, new_appointment: NewAppointment) -> Result<Appointment>;

    /// Fails with `NotFound` when the appointment does not belong to `account_id`.
    async fn update_appointment_status(
        &self,
        account_id: &str,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment>;

    /// Sets the realized revenue for a day, replacing any previous total.
    async fn record_daily_revenue(
        &self,
        account_id: &str,
        date: NaiveDate,
        amount: Decimal,
    ) -> Result<()>;
}

/// Trait for appointment ledger operations that notify listeners
#[async_trait]
pub trait AppointmentServiceTrait: Send + Sync {
    fn get_appointments(&self, account_id: &str) -> Result<Vec<Appointment>>;
    fn get_revenue_by_date(&self, account_id: &str) -> Result<RevenueByDate>;
    async fn create_appointment(&self, new_appointment: NewAppointment) -> Result<Appointment>;
    async fn update_appointment_status(
        &self,
        account_id: &str,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment>;
    async fn record_daily_revenue(
        &self,
        account_id: &str,
        date: NaiveDate,
        amount: Decimal,
    ) -> Result<()>;
}
