//! Pluggable event sinks.
//!
//! Sinks consume events from the bus and process them
//! (collect for tests, forward to `tracing`, etc.).

use std::sync::{Arc, Mutex};

use crate::events::{EventKind, SimulationEvent};

/// Trait for event consumers.
///
/// Implement this to create custom telemetry outputs.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the simulation ends. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Shared handle to the events a [`VecSink`] has collected.
pub type EventLog = Arc<Mutex<Vec<SimulationEvent>>>;

/// A simple sink that collects events for testing and inspection.
///
/// The sink is boxed into the bus, so collected events are read
/// through the [`EventLog`] handle returned by [`VecSink::log`].
#[derive(Default)]
pub struct VecSink {
    events: EventLog,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the collected events; stays valid after the sink is boxed.
    pub fn log(&self) -> EventLog {
        Arc::clone(&self.events)
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// A sink that forwards events to the `tracing` crate.
pub struct TracingSink {
    level: tracing::Level,
    forwarded: u64,
}

impl TracingSink {
    /// Creates a new tracing sink at the given log level.
    pub fn new(level: tracing::Level) -> Self {
        Self { level, forwarded: 0 }
    }

    /// Number of events forwarded so far.
    pub fn forwarded(&self) -> u64 {
        self.forwarded
    }
}

macro_rules! forward {
    ($level:expr, $($args:tt)+) => {{
        let level = $level;
        if level == tracing::Level::ERROR {
            tracing::error!($($args)+)
        } else if level == tracing::Level::WARN {
            tracing::warn!($($args)+)
        } else if level == tracing::Level::INFO {
            tracing::info!($($args)+)
        } else if level == tracing::Level::DEBUG {
            tracing::debug!($($args)+)
        } else {
            tracing::trace!($($args)+)
        }
    }};
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.forwarded += 1;
        match &event.kind {
            EventKind::Skipped { reason, count } => forward!(
                self.level,
                timestep = event.timestep,
                reason = reason.label(),
                count,
                "updates skipped"
            ),
            kind => forward!(
                self.level,
                timestep = event.timestep,
                event = ?kind,
                "simulation_event"
            ),
        }
    }

    fn finalize(&mut self) {
        forward!(self.level, forwarded = self.forwarded, "telemetry finished");
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
