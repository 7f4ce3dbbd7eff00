//! Event logging for simulation replay and analysis.
//!
//! Every significant scheduling decision is recorded as an `Event` in
//! occurrence order. The log is plain data: a presentation layer can
//! render a Gantt timeline from the selection/preemption/completion
//! events, and tests use it to assert on promotion and quantum
//! behavior, without the engine knowing anything about display.

/// Scheduling event capturing a state change.
///
/// All events carry the tick at which they occurred. Within a tick,
/// events are logged in the order the driver and policy produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Process became eligible and was admitted to a ready queue
    Arrival { tick: usize, process: String },

    /// Process was dispatched to the CPU
    ///
    /// `level` is the MLFQ queue level it was taken from (0 = highest);
    /// None for single-queue policies.
    Selected {
        tick: usize,
        process: String,
        level: Option<usize>,
    },

    /// Running process was displaced by a shorter candidate (SRTF)
    Preempted {
        tick: usize,
        process: String,
        by: String,
    },

    /// Running process exhausted its quantum (Round-Robin, MLFQ)
    QuantumExpired { tick: usize, process: String },

    /// Process was promoted to a higher queue level by aging (MLFQ)
    Promoted {
        tick: usize,
        process: String,
        new_priority: usize,
    },

    /// Process was demoted to a lower queue level after sustained running (MLFQ)
    Demoted {
        tick: usize,
        process: String,
        new_priority: usize,
    },

    /// Process finished its burst
    Completed {
        tick: usize,
        process: String,
        turnaround: usize,
    },
}

impl Event {
    /// Tick at which the event occurred
    pub fn tick(&self) -> usize {
        match self {
            Event::Arrival { tick, .. }
            | Event::Selected { tick, .. }
            | Event::Preempted { tick, .. }
            | Event::QuantumExpired { tick, .. }
            | Event::Promoted { tick, .. }
            | Event::Demoted { tick, .. }
            | Event::Completed { tick, .. } => *tick,
        }
    }

    /// Id of the process the event concerns
    pub fn process(&self) -> &str {
        match self {
            Event::Arrival { process, .. }
            | Event::Selected { process, .. }
            | Event::Preempted { process, .. }
            | Event::QuantumExpired { process, .. }
            | Event::Promoted { process, .. }
            | Event::Demoted { process, .. }
            | Event::Completed { process, .. } => process,
        }
    }
}

/// Append-only log of scheduling events
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in occurrence order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Events concerning one process, in occurrence order
    pub fn for_process<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Event> {
        self.events.iter().filter(move |e| e.process() == id)
    }

    /// Discard all events (simulation reset)
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
