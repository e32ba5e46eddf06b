//! Database models for appointments.

use diesel::prelude::*;
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::{parse_decimal_tolerant, parse_stored_date, to_stored_date};
use salonbook_core::appointments::{Appointment, AppointmentStatus, NewAppointment};
use salonbook_core::errors::Error;

/// Database model for appointments
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
#[diesel(table_name = crate::schema::appointments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDB {
    pub id: String,
    pub account_id: String,
    pub appointment_date: String,
    pub price: String,
    pub status: String,
    pub client_name: Option<String>,
    pub service_name: Option<String>,
}

/// Database model for realized daily revenue
#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::daily_revenue)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DailyRevenueDB {
    pub account_id: String,
    pub revenue_date: String,
    pub amount: String,
}

impl From<NewAppointment> for AppointmentDB {
    fn from(domain: NewAppointment) -> Self {
        Self {
            id: domain
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            account_id: domain.account_id,
            appointment_date: to_stored_date(domain.date),
            price: domain.price.to_string(),
            status: domain.status.as_str().to_string(),
            client_name: domain.client_name,
            service_name: domain.service_name,
        }
    }
}

impl TryFrom<AppointmentDB> for Appointment {
    type Error = Error;

    fn try_from(db: AppointmentDB) -> Result<Self, Self::Error> {
        let date = parse_stored_date(&db.appointment_date)?;
        let status = db.status.parse::<AppointmentStatus>().unwrap_or_else(|_| {
            warn!(
                "Appointment {} has unknown status '{}', treating it as pending",
                db.id, db.status
            );
            AppointmentStatus::Pending
        });

        Ok(Self {
            price: parse_decimal_tolerant(&db.price, "price"),
            id: db.id,
            date,
            status,
            client_name: db.client_name,
            service_name: db.service_name,
        })
    }
}
