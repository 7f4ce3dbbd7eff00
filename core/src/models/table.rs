//! Process table
//!
//! Owns every process in the simulation. Policies and the driver refer
//! to processes by `ProcessId` (the insertion-sequence index), so ready
//! queues hold plain indices and no process is ever stored in two
//! places at once.
//!
//! # Critical Invariants
//!
//! 1. `ProcessId` equals the process's `seq` number
//! 2. Process ids (strings) are unique within a table
//! 3. The table is rebuilt or fully reset between simulation runs

use crate::models::process::{Process, ProcessState};

/// Index of a process in the table; equals its insertion-sequence number
pub type ProcessId = usize;

/// Owning container for all processes in one simulation run
#[derive(Debug, Clone, Default)]
pub struct ProcessTable {
    processes: Vec<Process>,
}

impl ProcessTable {
    /// Create a table from processes in insertion order
    ///
    /// # Panics
    ///
    /// Panics if a process's `seq` does not match its table index.
    pub fn new(processes: Vec<Process>) -> Self {
        for (index, process) in processes.iter().enumerate() {
            assert_eq!(
                process.seq(),
                index,
                "process {} has seq {} at table index {}",
                process.id(),
                process.seq(),
                index
            );
        }
        Self { processes }
    }

    /// Get reference to a process
    pub fn get(&self, pid: ProcessId) -> &Process {
        &self.processes[pid]
    }

    /// Get mutable reference to a process
    pub fn get_mut(&mut self, pid: ProcessId) -> &mut Process {
        &mut self.processes[pid]
    }

    /// Number of processes in the table
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Iterate processes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    /// All process ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = ProcessId> + '_ {
        0..self.processes.len()
    }

    /// True when every process has finished its burst (vacuously true if empty)
    pub fn all_completed(&self) -> bool {
        self.processes.iter().all(|p| p.is_completed())
    }

    /// Processes currently sitting in a ready queue
    pub fn ready_ids(&self) -> Vec<ProcessId> {
        self.processes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.state() == ProcessState::Ready)
            .map(|(pid, _)| pid)
            .collect()
    }

    /// Processes whose arrival tick equals `tick` and are still unarrived
    pub fn arrivals_at(&self, tick: usize) -> Vec<ProcessId> {
        self.processes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.state() == ProcessState::Unarrived && p.arrival_time() == tick)
            .map(|(pid, _)| pid)
            .collect()
    }
}
