//! Shortest-Job-First (non-preemptive)
//!
//! Selection scans the whole queue for the minimum ordered key
//! (remaining burst, arrival, seq). Once dispatched, a process runs to
//! completion uninterrupted by newer, shorter arrivals.

use std::collections::VecDeque;

use super::{burst_key, dispatch, finish, min_position_by, SchedulingPolicy};
use crate::models::event::EventLog;
use crate::models::process::ProcessError;
use crate::models::table::{ProcessId, ProcessTable};

/// SJF: pick the shortest queued job, run it to completion
#[derive(Debug, Default)]
pub struct SjfPolicy {
    queue: VecDeque<ProcessId>,
    running: Option<ProcessId>,
}

impl SjfPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    fn select(&mut self, tick: usize, table: &mut ProcessTable, events: &mut EventLog) {
        self.running = min_position_by(&self.queue, table, burst_key)
            .and_then(|position| self.queue.remove(position));
        if let Some(pid) = self.running {
            dispatch(pid, tick, table, events, None);
        }
    }
}

impl SchedulingPolicy for SjfPolicy {
    fn name(&self) -> String {
        "Shortest-Job-First (non-preemptive)".to_string()
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
