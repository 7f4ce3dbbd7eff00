//! CPU Scheduling Simulator Core
//!
//! Discrete-tick CPU scheduling engine with deterministic execution.
//!
//! # Architecture
//!
//! - **clock**: Simulation clock (discrete ticks)
//! - **models**: Domain types (Process, ProcessTable, events, snapshots)
//! - **policy**: Scheduling algorithms (FCFS, SJF, SRTF, Round-Robin, Priority, MLFQ)
//! - **sim**: Simulation driver, configuration, and metrics reduction
//!
//! # Critical Invariants
//!
//! 1. Exactly one process may execute per tick (single simulated CPU)
//! 2. The trajectory is a pure function of (process set, policy config)
//! 3. A failed `tick()` mutates nothing (atomic per tick)

// Module declarations
pub mod clock;
pub mod models;
pub mod policy;
pub mod sim;

// Re-exports for convenience
pub use clock::SimClock;
pub use models::{
    event::{Event, EventLog},
    process::{Process, ProcessError, ProcessState},
    snapshot::{ProcessView, Snapshot},
    table::{ProcessId, ProcessTable},
};
pub use policy::SchedulingPolicy;
pub use sim::{
    demo_workload, MetricAverages, Metrics, PolicyConfig, ProcessMetrics, ProcessSpec,
    Simulation, SimulationError, TickReport,
};
