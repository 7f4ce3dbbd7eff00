//! Process model
//!
//! Mutable simulation state for one job. Each process has:
//! - A caller-supplied string id and a stable insertion-sequence number
//!   (`seq`) used as the final tie-break in all ordered selections
//! - Arrival tick and CPU burst length (original and remaining)
//! - Static and current priority (lower number = higher priority)
//! - Timing bookkeeping: first response, completion, per-level run and
//!   wait counters that drive MLFQ demotion and aging
//!
//! # Critical Invariants
//!
//! 1. `0 <= remaining_burst_time <= original_burst_time`
//! 2. A process is completed iff `remaining_burst_time == 0`
//! 3. `first_response_time`, once set, never changes
//! 4. `completion_time` is set exactly once, at the tick the process finishes

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state of a process
///
/// `Unarrived -> Ready -> Running -> {Ready <-> Running} -> Completed`.
/// `Completed` is terminal; no process re-enters a queue after completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessState {
    /// Not yet eligible to run (simulation has not reached arrival_time)
    Unarrived,

    /// Sitting in a ready queue, awaiting CPU time
    Ready,

    /// Executing on the simulated CPU
    Running,

    /// All burst ticks executed; terminal
    Completed,
}

/// Errors that can occur during process operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProcessError {
    #[error("cannot execute process {id}: no burst time remaining")]
    NoBurstRemaining { id: String },

    #[error("cannot complete process {id}: {remaining} burst ticks remaining")]
    BurstRemaining { id: String, remaining: usize },

    #[error("completion time for process {id} is already set")]
    CompletionAlreadySet { id: String },
}

/// Mutable simulation state for one job
///
/// # Example
/// ```
/// use sched_sim_core::Process;
///
/// let mut p = Process::new("P1".to_string(), 0, 2, 2, 1);
/// p.execute_one_tick().unwrap();
/// p.execute_one_tick().unwrap();
/// assert!(p.is_completed());
///
/// let turnaround = p.complete(7).unwrap();
/// assert_eq!(turnaround, 5); // completion 7 - arrival 2
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Process {
    /// Caller-supplied identifier (e.g. "P1")
    id: String,

    /// Insertion-sequence number assigned at creation; final tie-break
    seq: usize,

    /// Tick at which the process becomes eligible to run
    arrival_time: usize,

    /// Total CPU ticks required (immutable reference value)
    original_burst_time: usize,

    /// Ticks left to execute; decremented by one per executed tick
    remaining_burst_time: usize,

    /// Priority at creation (lower number = higher priority)
    original_priority: usize,

    /// Current priority; mutable under MLFQ aging/demotion
    priority: usize,

    /// Tick of first dispatch; unset until then, never changes after
    first_response_time: Option<usize>,

    /// Ticks executed since the last demotion reset (drives MLFQ demotion)
    processed_time: usize,

    /// Ticks waited at the current queue level (drives MLFQ aging)
    wait_in_level_time: usize,

    /// Tick at which remaining_burst_time reached 0
    completion_time: Option<usize>,

    /// Lifecycle state
    state: ProcessState,
}

impl Process {
    /// Create a new process with its full burst remaining
    pub fn new(
        id: String,
        seq: usize,
        arrival_time: usize,
        burst_time: usize,
        priority: usize,
    ) -> Self {
        Self {
            id,
            seq,
            arrival_time,
            original_burst_time: burst_time,
            remaining_burst_time: burst_time,
            original_priority: priority,
            priority,
            first_response_time: None,
            processed_time: 0,
            wait_in_level_time: 0,
            completion_time: None,
            state: ProcessState::Unarrived,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Stable insertion-sequence number, final tie-break in selections
    pub fn seq(&self) -> usize {
        self.seq
    }

    pub fn arrival_time(&self) -> usize {
        self.arrival_time
    }

    pub fn original_burst_time(&self) -> usize {
        self.original_burst_time
    }

    pub fn remaining_burst_time(&self) -> usize {
        self.remaining_burst_time
    }

    pub fn original_priority(&self) -> usize {
        self.original_priority
    }

    pub fn priority(&self) -> usize {
        self.priority
    }

    pub fn first_response_time(&self) -> Option<usize> {
        self.first_response_time
    }

    pub fn processed_time(&self) -> usize {
        self.processed_time
    }

    pub fn wait_in_level_time(&self) -> usize {
        self.wait_in_level_time
    }

    pub fn completion_time(&self) -> Option<usize> {
        self.completion_time
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// A process is completed iff its remaining burst is zero
    pub fn is_completed(&self) -> bool {
        self.remaining_burst_time == 0
    }

    /// `completion_time - arrival_time`; None until completed
    pub fn turnaround_time(&self) -> Option<usize> {
        self.completion_time.map(|t| t - self.arrival_time)
    }

    /// `turnaround_time - original_burst_time`; None until completed
    pub fn waiting_time(&self) -> Option<usize> {
        self.turnaround_time().map(|t| t - self.original_burst_time)
    }

    /// `first_response_time - arrival_time`; None until first dispatch
    pub fn response_time(&self) -> Option<usize> {
        self.first_response_time.map(|t| t - self.arrival_time)
    }

    // ========================================================================
    // Tick operations
    // ========================================================================

    /// Execute one tick of CPU time
    ///
    /// Decrements the remaining burst and increments `processed_time`.
    /// No other side effects.
    pub fn execute_one_tick(&mut self) -> Result<(), ProcessError> {
        if self.remaining_burst_time == 0 {
            return Err(ProcessError::NoBurstRemaining {
                id: self.id.clone(),
            });
        }
        self.remaining_burst_time -= 1;
        self.processed_time += 1;
        Ok(())
    }

    /// Finalize the process at the given tick and return its turnaround time
    ///
    /// Requires the burst to be fully executed and the completion time unset.
    pub fn complete(&mut self, tick: usize) -> Result<usize, ProcessError> {
        if self.remaining_burst_time > 0 {
            return Err(ProcessError::BurstRemaining {
                id: self.id.clone(),
                remaining: self.remaining_burst_time,
            });
        }
        if self.completion_time.is_some() {
            return Err(ProcessError::CompletionAlreadySet {
                id: self.id.clone(),
            });
        }
        self.completion_time = Some(tick);
        self.state = ProcessState::Completed;
        Ok(tick - self.arrival_time)
    }

    /// Raise priority by one level (lower number) and reset the wait counter
    pub fn promote(&mut self) {
        debug_assert!(self.priority > 1, "cannot promote past the top level");
        self.priority -= 1;
        self.wait_in_level_time = 0;
    }

    /// Lower priority by one level (higher number) and reset the run counter
    pub fn demote(&mut self) {
        self.priority += 1;
        self.processed_time = 0;
    }

    /// Reset the run counter without changing level (bottom-level demotions)
    pub fn reset_processed_time(&mut self) {
        self.processed_time = 0;
    }

    /// Accrue one tick of waiting at the current queue level
    ///
    /// Called once per tick for every process sitting in a queue (not running).
    pub fn tick_waiting(&mut self) {
        self.wait_in_level_time += 1;
    }

    /// Clear waiting accrual; called when the process is dequeued for dispatch
    pub fn reset_wait_in_level(&mut self) {
        self.wait_in_level_time = 0;
    }

    /// Stamp the first-dispatch tick; later calls are no-ops
    pub fn record_response(&mut self, tick: usize) {
        if self.first_response_time.is_none() {
            self.first_response_time = Some(tick);
        }
    }

    /// Transition lifecycle state (Ready <-> Running moves by the policies)
    pub fn set_state(&mut self, state: ProcessState) {
        debug_assert!(
            self.state != ProcessState::Completed,
            "completed state is terminal"
        );
        self.state = state;
    }
}
