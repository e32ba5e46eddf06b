//! SQLite storage implementation for appointments and daily revenue.

mod model;
mod repository;

pub use model::{AppointmentDB, DailyRevenueDB};
pub use repository::AppointmentRepository;

// Re-export trait from core for convenience
pub use salonbook_core::appointments::AppointmentRepositoryTrait;
