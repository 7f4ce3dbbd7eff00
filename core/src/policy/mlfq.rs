//! Multi-Level Feedback Queue with aging and demotion
//!
//! N priority levels (level 0 = highest), each with its own FIFO queue
//! and quantum. Two scalar parameters steer movement between levels:
//!
//! - `aging_time`: ticks a process may wait at its level before being
//!   promoted one level up. Checked every tick for every queued
//!   process, in the rebalance pass before arrivals are admitted.
//! - `demotion_time`: ticks of accumulated running at a level before
//!   the process is demoted. Checked only at quantum boundaries, never
//!   mid-quantum; sustained running is punished, long waiting rewarded,
//!   and the two triggers are deliberately asymmetric.
//!
//! Selection scans levels from highest to lowest and takes the head of
//! the first non-empty queue; dequeueing clears the waiting accrual.

use std::collections::VecDeque;

use super::{dispatch, finish, SchedulingPolicy};
use crate::models::event::{Event, EventLog};
use crate::models::process::{ProcessError, ProcessState};
use crate::models::table::{ProcessId, ProcessTable};

/// One priority level: a FIFO queue and its quantum
#[derive(Debug)]
struct MlfqLevel {
    queue: VecDeque<ProcessId>,
    quantum: usize,
}

/// MLFQ with per-level quantums, linear aging and demotion
#[derive(Debug)]
pub struct MlfqPolicy {
    levels: Vec<MlfqLevel>,
    aging_time: usize,
    demotion_time: usize,
    elapsed_in_quantum: usize,
    running: Option<ProcessId>,
}

impl MlfqPolicy {
    /// Parameters are validated as positive by the simulation config
    pub fn new(quantums: Vec<usize>, aging_time: usize, demotion_time: usize) -> Self {
        debug_assert!(!quantums.is_empty(), "MLFQ needs at least one level");
        debug_assert!(quantums.iter().all(|&q| q > 0), "quantums must be positive");
        debug_assert!(aging_time > 0 && demotion_time > 0);
        Self {
            levels: quantums
                .into_iter()
                .map(|quantum| MlfqLevel {
                    queue: VecDeque::new(),
                    quantum,
                })
                .collect(),
            aging_time,
            demotion_time,
            elapsed_in_quantum: 0,
            running: None,
        }
    }

    /// Queue level for a priority number (priority 1 = level 0)
    fn level_of(priority: usize) -> usize {
        priority - 1
    }

    /// Scan levels from highest priority down, dispatch the first head
    fn select(&mut self, tick: usize, table: &mut ProcessTable, events: &mut EventLog) {
        self.elapsed_in_quantum = 0;
        self.running = None;
        for level in 0..self.levels.len() {
            if let Some(pid) = self.levels[level].queue.pop_front() {
                // Dequeueing clears the waiting accrual at this level.
                table.get_mut(pid).reset_wait_in_level();
                dispatch(pid, tick, table, events, Some(level));
                self.running = Some(pid);
                return;
            }
        }
    }
}

impl SchedulingPolicy for MlfqPolicy {
    fn name(&self) -> String {
        format!("Multi-Level Feedback Queue ({} levels)", self.levels.len())
    }

    fn enqueue(&mut self, pid: ProcessId, table: &ProcessTable) {
        let level = Self::level_of(table.get(pid).priority());
        self.levels[level].queue.push_back(pid);
    }

    /// Aging pass: promote every queued process that has waited out
    /// `aging_time` at its level, moving it to the tail of the
    /// next-higher queue. Top-level processes are never promoted.
    fn rebalance(&mut self, tick: usize, table: &mut ProcessTable, events: &mut EventLog) {
        for level in 1..self.levels.len() {
            let mut promoted = Vec::new();
            let aging_time = self.aging_time;
            self.levels[level].queue.retain(|&pid| {
                if table.get(pid).wait_in_level_time() >= aging_time {
                    promoted.push(pid);
                    false
                } else {
                    true
                }
            });
            for pid in promoted {
                table.get_mut(pid).promote();
                events.log(Event::Promoted {
                    tick,
                    process: table.get(pid).id().to_string(),
                    new_priority: table.get(pid).priority(),
                });
                self.levels[level - 1].queue.push_back(pid);
            }
        }
    }

    fn step(
        &mut self,
        tick: usize,
        table: &mut ProcessTable,
        events: &mut EventLog,
    ) -> Result<Option<ProcessId>, ProcessError> {
        match self.running {
            Some(pid) => {
                table.get_mut(pid).execute_one_tick()?;
                self.elapsed_in_quantum += 1;
                let level = Self::level_of(table.get(pid).priority());

                if table.get(pid).is_completed() {
                    finish(pid, tick, table, events)?;
                    self.select(tick, table, events);
                } else if self.elapsed_in_quantum >= self.levels[level].quantum {
                    events.log(Event::QuantumExpired {
                        tick,
                        process: table.get(pid).id().to_string(),
                    });
                    if table.get(pid).processed_time() >= self.demotion_time {
                        if level + 1 < self.levels.len() {
                            table.get_mut(pid).demote();
                            events.log(Event::Demoted {
                                tick,
                                process: table.get(pid).id().to_string(),
                                new_priority: table.get(pid).priority(),
                            });
                        } else {
                            // Bottom level: the run credit resets but
                            // the process stays where it is.
                            table.get_mut(pid).reset_processed_time();
                        }
                    }
                    let new_level = Self::level_of(table.get(pid).priority());
                    table.get_mut(pid).set_state(ProcessState::Ready);
                    self.levels[new_level].queue.push_back(pid);
                    self.select(tick, table, events);
                }
                Ok(Some(pid))
            }
            None => {
                self.select(tick, table, events);
                Ok(None)
            }
        }
    }

    fn running(&self) -> Option<ProcessId> {
        self.running
    }

    fn queues(&self) -> Vec<Vec<ProcessId>> {
        self.levels
            .iter()
            .map(|level| level.queue.iter().copied().collect())
            .collect()
    }
}
