//! Domain events module.
//!
//! Provides domain event types and the sink trait for emitting events
//! after successful domain mutations. The finance health service listens
//! on a sink to know when a cached snapshot must be recomputed; runtime
//! adapters can add their own sinks to push change notifications to clients.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
