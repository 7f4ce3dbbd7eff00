//! Read-only snapshot of the simulation for presentation layers.
//!
//! A `Snapshot` is plain serializable data: per-level queue contents,
//! the running process, and the live fields of every process. Queue
//! and Gantt rendering, tables, and log formatting are consumers of
//! this type, never dependencies of the engine.

use serde::Serialize;

use crate::models::process::{Process, ProcessState};

/// Live fields of one process, for rendering
#[derive(Debug, Clone, Serialize)]
pub struct ProcessView {
    pub id: String,
    pub state: ProcessState,
    pub arrival_time: usize,
    pub original_burst_time: usize,
    pub remaining_burst_time: usize,
    pub priority: usize,
    pub processed_time: usize,
    pub wait_in_level_time: usize,
    pub first_response_time: Option<usize>,
    pub completion_time: Option<usize>,
}

impl ProcessView {
    pub fn of(process: &Process) -> Self {
        Self {
            id: process.id().to_string(),
            state: process.state(),
            arrival_time: process.arrival_time(),
            original_burst_time: process.original_burst_time(),
            remaining_burst_time: process.remaining_burst_time(),
            priority: process.priority(),
            processed_time: process.processed_time(),
            wait_in_level_time: process.wait_in_level_time(),
            first_response_time: process.first_response_time(),
            completion_time: process.completion_time(),
        }
    }
}

/// Point-in-time view of the whole simulation
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Current simulation tick
    pub tick: usize,

    /// Whether every process has completed
    pub finished: bool,

    /// Id of the running process, if any
    pub running: Option<String>,

    /// Ready queue contents per level, head first
    ///
    /// Single-queue policies report one level; MLFQ reports one entry
    /// per priority level, highest priority first.
    pub queues: Vec<Vec<String>>,

    /// Live fields for every process, in insertion order
    pub processes: Vec<ProcessView>,
}
