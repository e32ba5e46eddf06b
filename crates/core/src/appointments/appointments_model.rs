//! Appointment domain models.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Realized revenue per calendar day, pre-aggregated by the booking side.
pub type RevenueByDate = BTreeMap<NaiveDate, Decimal>;

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" | "canceled" => Ok(AppointmentStatus::Cancelled),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown appointment status '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing a booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub date: NaiveDate,
    pub price: Decimal,
    pub status: AppointmentStatus,
    pub client_name: Option<String>,
    pub service_name: Option<String>,
}

impl Appointment {
    pub fn is_confirmed(&self) -> bool {
        self.status == AppointmentStatus::Confirmed
    }
}

/// Input model for creating a new appointment
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub id: Option<String>,
    pub account_id: String,
    pub date: NaiveDate,
    pub price: Decimal,
    #[serde(default)]
    pub status: AppointmentStatus,
    pub client_name: Option<String>,
    pub service_name: Option<String>,
}

impl NewAppointment {
    /// Validates the new appointment data
    pub fn validate(&self) -> Result<(), Error> {
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "accountId".to_string(),
            )));
        }
        if self.price.is_sign_negative() {
            return Err(Error::Validation(ValidationError::out_of_range(
                "price",
                "Appointment price cannot be negative",
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            "confirmed".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::Confirmed
        );
        assert_eq!(
            "Canceled".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::Cancelled
        );
        assert!("done".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn test_appointment_wire_shape() {
        let json = r#"{"id":"a1","date":"2024-05-10","price":80.5,"status":"confirmed","clientName":null,"serviceName":"Corte"}"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.date, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        assert_eq!(appointment.price, dec!(80.5));
        assert!(appointment.is_confirmed());
    }

    #[test]
    fn test_new_appointment_validation() {
        let mut new_appointment = NewAppointment {
            id: None,
            account_id: "acc-1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            price: dec!(80),
            status: AppointmentStatus::default(),
            client_name: None,
            service_name: None,
        };
        assert!(new_appointment.validate().is_ok());

        new_appointment.price = dec!(-1);
        assert!(new_appointment.validate().is_err());

        new_appointment.price = dec!(0);
        new_appointment.account_id = " ".to_string();
        assert!(new_appointment.validate().is_err());
    }
}
