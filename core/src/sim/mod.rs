//! Simulation driver, configuration, and metrics

pub mod engine;
pub mod metrics;

pub use engine::{
    demo_workload, PolicyConfig, ProcessSpec, Simulation, SimulationError, TickReport,
};
pub use metrics::{MetricAverages, Metrics, ProcessMetrics};
