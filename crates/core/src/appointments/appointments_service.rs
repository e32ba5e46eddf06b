use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::appointments_model::{Appointment, AppointmentStatus, NewAppointment, RevenueByDate};
use super::appointments_traits::{AppointmentRepositoryTrait, AppointmentServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink};

/// Service for the appointment ledger and realized daily revenue
pub struct AppointmentService {
    repository: Arc<dyn AppointmentRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl AppointmentService {
    pub fn new(
        repository: Arc<dyn AppointmentRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }
}

#[async_trait]
impl AppointmentServiceTrait for AppointmentService {
    fn get_appointments(&self, account_id: &str) -> Result<Vec<Appointment>> {
        self.repository.get_appointments(account_id)
    }

    fn get_revenue_by_date(&self, account_id: &str) -> Result<RevenueByDate> {
        self.repository.get_revenue_by_date(account_id)
    }

    async fn create_appointment(&self, new_appointment: NewAppointment) -> Result<Appointment> {
        new_appointment.validate()?;
        let account_id = new_appointment.account_id.clone();

        let appointment = self.repository.create_appointment(new_appointment).await?;
        debug!(
            "Created appointment {} on {} for account {}",
            appointment.id, appointment.date, account_id
        );
        self.event_sink
            .emit(DomainEvent::appointments_changed(account_id));
        Ok(appointment)
    }

    async fn update_appointment_status(
        &self,
        account_id: &str,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment> {
        let appointment = self
            .repository
            .update_appointment_status(account_id, appointment_id, status)
            .await?;
        self.event_sink
            .emit(DomainEvent::appointments_changed(account_id));
        Ok(appointment)
    }

    async fn record_daily_revenue(
        &self,
        account_id: &str,
        date: NaiveDate,
        amount: Decimal,
    ) -> Result<()> {
        if amount.is_sign_negative() {
            return Err(Error::Validation(ValidationError::out_of_range(
                "amount",
                "Daily revenue cannot be negative",
            )));
        }
        self.repository
            .record_daily_revenue(account_id, date, amount)
            .await?;
        self.event_sink
            .emit(DomainEvent::appointments_changed(account_id));
        Ok(())
    }
}
