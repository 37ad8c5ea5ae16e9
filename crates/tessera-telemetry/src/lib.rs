//! # tessera-telemetry
//!
//! Event bus for simulation telemetry. Emits structured events
//! (timing, collisions, skipped updates, energy) that can be consumed
//! by pluggable sinks.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventLog, EventSink, TracingSink, VecSink};
