//! Priority scheduling (non-preemptive)
//!
//! Selection scans the queue for the minimum (priority, arrival, seq);
//! a lower priority number wins. No preemption once running.

use std::collections::VecDeque;

use super::{dispatch, finish, min_position_by, priority_key, SchedulingPolicy};
use crate::models::event::EventLog;
use crate::models::process::ProcessError;
use crate::models::table::{ProcessId, ProcessTable};

/// Non-preemptive priority scheduling
#[derive(Debug, Default)]
pub struct PriorityPolicy {
    queue: VecDeque<ProcessId>,
    running: Option<ProcessId>,
}

impl PriorityPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    fn select(&mut self, tick: usize, table: &mut ProcessTable, events: &mut EventLog) {
        self.running = min_position_by(&self.queue, table, priority_key)
            .and_then(|position| self.queue.remove(position));
        if let Some(pid) = self.running {
            dispatch(pid, tick, table, events, None);
        }
    }
}

impl SchedulingPolicy for PriorityPolicy {
    fn name(&self) -> String {
        "Priority (non-preemptive)".to_string()
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
