//! Round-Robin
//!
//! Single FIFO queue with a fixed quantum. The running process is
//! requeued at the tail after `quantum` consecutive executed ticks
//! unless it completes first; `elapsed_in_quantum` resets on every
//! dispatch.

use std::collections::VecDeque;

use super::{dispatch, finish, SchedulingPolicy};
use crate::models::event::{Event, EventLog};
use crate::models::process::{ProcessError, ProcessState};
use crate::models::table::{ProcessId, ProcessTable};

/// Round-Robin with a fixed time quantum
#[derive(Debug)]
pub struct RoundRobinPolicy {
    quantum: usize,
    elapsed_in_quantum: usize,
    queue: VecDeque<ProcessId>,
    running: Option<ProcessId>,
}

impl RoundRobinPolicy {
    /// Quantum is validated as positive by the simulation config
    pub fn new(quantum: usize) -> Self {
        debug_assert!(quantum > 0, "quantum must be positive");
        Self {
            quantum,
            elapsed_in_quantum: 0,
            queue: VecDeque::new(),
            running: None,
        }
    }

    fn select(&mut self, tick: usize, table: &mut ProcessTable, events: &mut EventLog) {
        self.elapsed_in_quantum = 0;
        self.running = self.queue.pop_front();
        if let Some(pid) = self.running {
            dispatch(pid, tick, table, events, None);
        }
    }
}

impl SchedulingPolicy for RoundRobinPolicy {
    fn name(&self) -> String {
        format!("Round-Robin (q={})", self.quantum)
    }

    fn enqueue(&mut self, pid: ProcessId, _table: &ProcessTable) {
        self.queue.push_back(pid);
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

                if table.get(pid).is_completed() {
                    finish(pid, tick, table, events)?;
                    self.select(tick, table, events);
                } else if self.elapsed_in_quantum >= self.quantum {
                    events.log(Event::QuantumExpired {
                        tick,
                        process: table.get(pid).id().to_string(),
                    });
                    table.get_mut(pid).set_state(ProcessState::Ready);
                    self.queue.push_back(pid);
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
        vec![self.queue.iter().copied().collect()]
    }
}
