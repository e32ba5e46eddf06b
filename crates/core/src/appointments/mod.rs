//! Appointments module - booking records and realized daily revenue.
//!
//! The booking subsystem owns these records; the finance engine only reads them.

mod appointments_model;
mod appointments_service;
mod appointments_traits;

pub use appointments_model::{Appointment, AppointmentStatus, NewAppointment, RevenueByDate};
pub use appointments_service::AppointmentService;
pub use appointments_traits::{AppointmentRepositoryTrait, AppointmentServiceTrait};
