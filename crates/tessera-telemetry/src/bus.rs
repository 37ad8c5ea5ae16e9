//! Event bus: queued dispatch of step telemetry to pluggable sinks.
//!
//! The solver side only holds `&EventBus` and calls `emit`; events queue
//! on an `mpsc` channel until the owner calls `flush`, which hands them
//! to every registered sink in emission order.

use std::sync::mpsc::{self, Receiver, Sender};

use tessera_types::{SkipCounts, SkipReason};

use crate::events::{EventKind, SimulationEvent};
use crate::sinks::EventSink;

/// Telemetry queue shared by a simulation loop and its sinks.
pub struct EventBus {
    tx: Sender<SimulationEvent>,
    rx: Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    enabled: bool,
}

impl EventBus {
    /// An enabled bus with no sinks.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            sinks: Vec::new(),
            enabled: true,
        }
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// While disabled, `emit` drops events instead of queueing them.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Queue an event for the next `flush`.
    pub fn emit(&self, event: SimulationEvent) {
        if self.enabled {
            // The receiver lives in `self`, so the send cannot fail.
            let _ = self.tx.send(event);
        }
    }

    /// Emit one `Skipped` event per reason with a non-zero count.
    pub fn emit_skips(&self, timestep: u32, skipped: &SkipCounts) {
        for reason in SkipReason::ALL {
            let count = skipped.get(reason);
            if count > 0 {
                self.emit(SimulationEvent::new(timestep, EventKind::Skipped { reason, count }));
            }
        }
    }

    /// Deliver every queued event to every sink, oldest first.
    pub fn flush(&mut self) {
        for event in self.rx.try_iter() {
            for sink in self.sinks.iter_mut() {
                sink.handle(&event);
            }
        }
    }

    /// Flush, then finalize each sink. Call once at the end of a run.
    pub fn finish(&mut self) {
        self.flush();
        self.sinks.iter_mut().for_each(|sink| sink.finalize());
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
