//! Shortest-Remaining-Time-First (preemptive)
//!
//! SJF's selection key plus preemption: once per tick, before any unit
//! of execution, the running process is compared against the best
//! queued candidate. If the candidate's remaining burst is strictly
//! shorter, the running process is pushed to the queue tail (it keeps
//! no positional privilege) and the candidate takes the CPU; the
//! switch consumes that tick. Ties keep the running process.

use std::collections::VecDeque;

use super::{burst_key, dispatch, finish, min_position_by, SchedulingPolicy};
use crate::models::event::{Event, EventLog};
use crate::models::process::{ProcessError, ProcessState};
use crate::models::table::{ProcessId, ProcessTable};

/// SRTF: always run the job with the least remaining burst
#[derive(Debug, Default)]
pub struct SrtfPolicy {
    queue: VecDeque<ProcessId>,
    running: Option<ProcessId>,
}

impl SrtfPolicy {
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

    /// Best queued candidate, if strictly shorter than the running process
    fn preempting_candidate(&self, running: ProcessId, table: &ProcessTable) -> Option<usize> {
        let position = min_position_by(&self.queue, table, burst_key)?;
        let candidate = table.get(self.queue[position]);
        if candidate.remaining_burst_time() < table.get(running).remaining_burst_time() {
            Some(position)
        } else {
            None
        }
    }
}

impl SchedulingPolicy for SrtfPolicy {
    fn name(&self) -> String {
        "Shortest-Remaining-Time-First (preemptive)".to_string()
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
                if let Some(position) = self.preempting_candidate(pid, table) {
                    let candidate = self.queue[position];
                    self.queue.remove(position);
                    self.queue.push_back(pid);
                    table.get_mut(pid).set_state(ProcessState::Ready);
                    events.log(Event::Preempted {
                        tick,
                        process: table.get(pid).id().to_string(),
                        by: table.get(candidate).id().to_string(),
                    });
                    dispatch(candidate, tick, table, events, None);
                    self.running = Some(candidate);
                    return Ok(None);
                }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::process::Process;

    #[test]
    fn test_srtf_preempts_on_strictly_shorter() {
        let mut table = ProcessTable::new(vec![
            Process::new("P1".to_string(), 0, 0, 5, 3),
            Process::new("P2".to_string(), 1, 1, 3, 3),
        ]);
        let mut events = EventLog::new();
        let mut policy = SrtfPolicy::new();
        policy.enqueue(0, &table);
        policy.step(0, &mut table, &mut events).unwrap();
        assert_eq!(policy.running(), Some(0));

        // P2 (3 remaining) preempts P1 (5 remaining); the switch tick
        // executes no unit and P1 goes to the queue tail.
        policy.enqueue(1, &table);
        assert_eq!(policy.step(1, &mut table, &mut events).unwrap(), None);
        assert_eq!(policy.running(), Some(1));
        assert_eq!(policy.queues(), vec![vec![0]]);
        assert_eq!(table.get(0).remaining_burst_time(), 5);
        assert_eq!(table.get(1).first_response_time(), Some(1));
    }

    #[test]
    fn test_srtf_tie_keeps_running_process() {
        let mut table = ProcessTable::new(vec![
            Process::new("P1".to_string(), 0, 0, 3, 3),
            Process::new("P2".to_string(), 1, 0, 3, 3),
        ]);
        let mut events = EventLog::new();
        let mut policy = SrtfPolicy::new();
        policy.enqueue(0, &table);
        policy.step(0, &mut table, &mut events).unwrap();
        policy.enqueue(1, &table);

        policy.step(1, &mut table, &mut events).unwrap();
        assert_eq!(policy.running(), Some(0));
        assert_eq!(table.get(0).remaining_burst_time(), 2);
    }
}
