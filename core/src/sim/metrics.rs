//! Metrics reducer
//!
//! Computed only after all processes are completed:
//! - waiting time = turnaround - original burst
//! - turnaround time = completion - arrival
//! - response time = first response - arrival
//!
//! Averages are None (not-applicable) for an empty process set; the
//! reducer never divides by zero.

use serde::Serialize;

use crate::models::table::ProcessTable;

/// Final timing metrics for one process
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessMetrics {
    pub id: String,
    pub completion_time: usize,
    pub turnaround_time: usize,
    pub waiting_time: usize,
    pub response_time: usize,
}

/// Averages across all processes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricAverages {
    pub waiting_time: f64,
    pub turnaround_time: f64,
    pub response_time: f64,
}

/// Per-process metrics plus averages for one completed run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    /// One entry per process, in insertion order
    pub per_process: Vec<ProcessMetrics>,

    /// None when the process set is empty
    pub averages: Option<MetricAverages>,
}

impl Metrics {
    /// Reduce a fully-completed process table to final metrics
    pub(crate) fn reduce(table: &ProcessTable) -> Self {
        let mut per_process = Vec::with_capacity(table.len());
        let mut total_waiting = 0;
        let mut total_turnaround = 0;
        let mut total_response = 0;

        for process in table.iter() {
            let (Some(completion), Some(first_response)) =
                (process.completion_time(), process.first_response_time())
            else {
                // Reduce is only called on finished tables; a process
                // cannot complete without having been dispatched.
                continue;
            };
            let turnaround = completion - process.arrival_time();
            let waiting = turnaround - process.original_burst_time();
            let response = first_response - process.arrival_time();

            total_waiting += waiting;
            total_turnaround += turnaround;
            total_response += response;
            per_process.push(ProcessMetrics {
                id: process.id().to_string(),
                completion_time: completion,
                turnaround_time: turnaround,
                waiting_time: waiting,
                response_time: response,
            });
        }

        let averages = if per_process.is_empty() {
            None
        } else {
            let n = per_process.len() as f64;
            Some(MetricAverages {
                waiting_time: total_waiting as f64 / n,
                turnaround_time: total_turnaround as f64 / n,
                response_time: total_response as f64 / n,
            })
        };

        Metrics {
            per_process,
            averages,
        }
    }

    /// Metrics entry for one process by id
    pub fn for_process(&self, id: &str) -> Option<&ProcessMetrics> {
        self.per_process.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::process::Process;

    #[test]
    fn test_empty_table_has_no_averages() {
        let metrics = Metrics::reduce(&ProcessTable::default());
        assert!(metrics.per_process.is_empty());
        assert!(metrics.averages.is_none());
    }

    #[test]
    fn test_reduce_derives_waiting_from_turnaround() {
        let mut p = Process::new("P1".to_string(), 0, 2, 3, 1);
        p.record_response(4);
        for _ in 0..3 {
            p.execute_one_tick().unwrap();
        }
        p.complete(9).unwrap();

        let metrics = Metrics::reduce(&ProcessTable::new(vec![p]));
        let m = metrics.for_process("P1").unwrap();
        assert_eq!(m.turnaround_time, 7);
        assert_eq!(m.waiting_time, 4);
        assert_eq!(m.response_time, 2);
        let averages = metrics.averages.unwrap();
        assert_eq!(averages.turnaround_time, 7.0);
        assert_eq!(averages.waiting_time, 4.0);
    }
}
