//! Scheduling policy module
//!
//! Each algorithm variant implements the `SchedulingPolicy` trait. The
//! variants share one per-tick contract and differ only in selection
//! key, preemption trigger, and requeue point:
//!
//! 1. **FCFS**: pop the head of a single FIFO queue; no preemption
//! 2. **SJF**: scan for minimum (remaining burst, arrival, seq); no preemption
//! 3. **SRTF**: SJF key plus preemption when a queued candidate's
//!    remaining burst is strictly shorter than the running process's
//! 4. **Round-Robin**: FIFO with mandatory requeue at quantum expiry
//! 5. **Priority**: scan for minimum (priority, arrival, seq); no preemption
//! 6. **MLFQ**: one FIFO per priority level with per-level quantum,
//!    aging promotion and run-time demotion
//!
//! # Per-tick contract
//!
//! `step(tick)` performs exactly one of:
//! - execute one unit on the process that was running at tick start,
//!   then handle completion or quantum expiry (which may immediately
//!   dispatch a successor that starts executing the *next* tick), or
//! - dispatch a process when the CPU is idle, or switch to a shorter
//!   candidate (SRTF preemption); dispatch and switch ticks execute
//!   no unit.
//!
//! A dispatched process gets its `first_response_time` stamped if
//! unset. `step` never selects a process that is already running or
//! completed; an empty queue leaves the CPU idle for the tick.
//!
//! Shared per-tick bookkeeping (arrival admission, waiting-time
//! accrual) lives in the driver, not in the variants; the `rebalance`
//! hook exists only for MLFQ aging and defaults to a no-op.

use std::collections::VecDeque;

use crate::models::event::{Event, EventLog};
use crate::models::process::{Process, ProcessError, ProcessState};
use crate::models::table::{ProcessId, ProcessTable};

pub mod fcfs;
pub mod mlfq;
pub mod priority;
pub mod round_robin;
pub mod sjf;
pub mod srtf;

pub use fcfs::FcfsPolicy;
pub use mlfq::MlfqPolicy;
pub use priority::PriorityPolicy;
pub use round_robin::RoundRobinPolicy;
pub use sjf::SjfPolicy;
pub use srtf::SrtfPolicy;

/// Per-tick scheduling contract shared by all algorithm variants
pub trait SchedulingPolicy {
    /// Human-readable policy name for display layers
    fn name(&self) -> String;

    /// Admit a newly-arrived process into the ready queue(s)
    fn enqueue(&mut self, pid: ProcessId, table: &ProcessTable);

    /// Aging/promotion pass, run before arrivals are admitted each tick
    ///
    /// Only MLFQ does anything here; the waiting-time accrual that
    /// feeds it has already been applied by the driver.
    fn rebalance(&mut self, _tick: usize, _table: &mut ProcessTable, _events: &mut EventLog) {}

    /// Run one tick: execute the current process or dispatch a new one
    ///
    /// Returns the id of the process that executed a unit this tick,
    /// or None on dispatch/switch/idle ticks.
    fn step(
        &mut self,
        tick: usize,
        table: &mut ProcessTable,
        events: &mut EventLog,
    ) -> Result<Option<ProcessId>, ProcessError>;

    /// Currently running process, if any
    fn running(&self) -> Option<ProcessId>;

    /// Ready queue contents per level, head first
    fn queues(&self) -> Vec<Vec<ProcessId>>;
}

/// Selection key for shortest-job orderings: ties fall back to arrival
/// time, then to the insertion-sequence number
pub(crate) fn burst_key(process: &Process) -> (usize, usize, usize) {
    (
        process.remaining_burst_time(),
        process.arrival_time(),
        process.seq(),
    )
}

/// Selection key for priority ordering (lower number wins)
pub(crate) fn priority_key(process: &Process) -> (usize, usize, usize) {
    (process.priority(), process.arrival_time(), process.seq())
}

/// Position of the queue entry minimizing `key`, or None if empty
pub(crate) fn min_position_by<K: Ord>(
    queue: &VecDeque<ProcessId>,
    table: &ProcessTable,
    key: impl Fn(&Process) -> K,
) -> Option<usize> {
    (0..queue.len()).min_by_key(|&i| key(table.get(queue[i])))
}

/// Move a dequeued process onto the CPU and stamp its first response
pub(crate) fn dispatch(
    pid: ProcessId,
    tick: usize,
    table: &mut ProcessTable,
    events: &mut EventLog,
    level: Option<usize>,
) {
    let process = table.get_mut(pid);
    process.set_state(ProcessState::Running);
    process.record_response(tick);
    events.log(Event::Selected {
        tick,
        process: process.id().to_string(),
        level,
    });
}

/// Finalize a process that has exhausted its burst
pub(crate) fn finish(
    pid: ProcessId,
    tick: usize,
    table: &mut ProcessTable,
    events: &mut EventLog,
) -> Result<(), ProcessError> {
    let turnaround = table.get_mut(pid).complete(tick)?;
    events.log(Event::Completed {
        tick,
        process: table.get(pid).id().to_string(),
        turnaround,
    });
    Ok(())
}
