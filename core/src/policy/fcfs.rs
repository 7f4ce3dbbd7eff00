//! First-Come-First-Served
//!
//! Simplest baseline policy: run the longest-waiting process to
//! completion. A single FIFO queue; insertion order breaks arrival
//! ties; no preemption.

use std::collections::VecDeque;

use super::{dispatch, finish, SchedulingPolicy};
use crate::models::event::EventLog;
use crate::models::process::ProcessError;
use crate::models::table::{ProcessId, ProcessTable};

/// FCFS: pop the queue head, run it to completion
#[derive(Debug, Default)]
pub struct FcfsPolicy {
    queue: VecDeque<ProcessId>,
    running: Option<ProcessId>,
}

impl FcfsPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    fn select(&mut self, tick: usize, table: &mut ProcessTable, events: &mut EventLog) {
        self.running = self.queue.pop_front();
        if let Some(pid) = self.running {
            dispatch(pid, tick, table, events, None);
        }
    }
}

impl SchedulingPolicy for FcfsPolicy {
    fn name(&self) -> String {
        "First-Come-First-Served".to_string()
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
                if table.get(pid).is_completed() {
                    finish(pid, tick, table, events)?;
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
