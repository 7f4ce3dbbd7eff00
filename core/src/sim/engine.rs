//! Simulation driver
//!
//! Owns the tick loop and coordinates all components:
//! - Arrival admission (processes become Ready at their arrival tick)
//! - Waiting-time accrual for every queued process
//! - Policy invocation (one `step` per tick)
//! - Completion detection and metrics reduction
//! - Event logging (complete scheduling history)
//!
//! # Tick loop
//!
//! ```text
//! For each tick t:
//! 1. Accrue waiting time for every queued process
//! 2. Run the policy's rebalance pass (MLFQ aging)
//! 3. Admit processes whose arrival_time == t
//! 4. Invoke the policy's step(t)
//! 5. Detect global completion
//! ```
//!
//! The driver is policy-agnostic: it holds one `SchedulingPolicy`
//! trait object and treats it purely through the step contract. The
//! loop may be driven as a tight batch loop (`run`) or as discrete
//! externally-triggered steps (`tick`); both produce identical
//! trajectories, since the simulation is a pure function of the
//! process set and policy configuration.
//!
//! # Example
//!
//! ```rust
//! use sched_sim_core::{PolicyConfig, ProcessSpec, Simulation};
//!
//! let processes = vec![
//!     ProcessSpec::new("P1", 0, 5, 3),
//!     ProcessSpec::new("P2", 1, 3, 3),
//! ];
//!
//! let mut sim = Simulation::new(processes, PolicyConfig::Fcfs).unwrap();
//! let metrics = sim.run().unwrap();
//! assert_eq!(metrics.averages.unwrap().waiting_time, 2.0);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::clock::SimClock;
use crate::models::event::{Event, EventLog};
use crate::models::process::{Process, ProcessError, ProcessState};
use crate::models::snapshot::{ProcessView, Snapshot};
use crate::models::table::ProcessTable;
use crate::policy::{
    FcfsPolicy, MlfqPolicy, PriorityPolicy, RoundRobinPolicy, SchedulingPolicy, SjfPolicy,
    SrtfPolicy,
};
use crate::sim::metrics::Metrics;

// ============================================================================
// Configuration Types
// ============================================================================

/// Immutable description of one process, as supplied by the caller
///
/// The engine assigns each spec an insertion-sequence number in input
/// order; that number is the final tie-break in every ordered
/// selection, so callers are not tied to any particular id format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Unique identifier (e.g. "P1")
    pub id: String,

    /// Tick at which the process becomes eligible to run
    pub arrival_time: usize,

    /// Total CPU ticks required; must be positive
    pub burst_time: usize,

    /// Priority level; lower number = higher priority
    #[serde(default = "default_priority")]
    pub priority: usize,
}

fn default_priority() -> usize {
    3
}

impl ProcessSpec {
    pub fn new(id: &str, arrival_time: usize, burst_time: usize, priority: usize) -> Self {
        Self {
            id: id.to_string(),
            arrival_time,
            burst_time,
            priority,
        }
    }
}

/// Policy selection and parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PolicyConfig {
    /// First-Come-First-Served (non-preemptive)
    Fcfs,

    /// Shortest-Job-First (non-preemptive)
    Sjf,

    /// Shortest-Remaining-Time-First (preemptive)
    Srtf,

    /// Round-Robin with a fixed quantum
    RoundRobin { quantum: usize },

    /// Priority scheduling (non-preemptive, lower number wins)
    Priority,

    /// Multi-Level Feedback Queue with aging and demotion
    ///
    /// `quantums` holds one quantum per level, highest priority first;
    /// its length fixes the number of levels and the valid priority
    /// range (1..=levels).
    Mlfq {
        quantums: Vec<usize>,
        aging_time: usize,
        demotion_time: usize,
    },
}

impl PolicyConfig {
    /// Three-level MLFQ with the reference parameters
    /// (quantum 3 per level, aging 5, demotion 6)
    pub fn mlfq_default() -> Self {
        PolicyConfig::Mlfq {
            quantums: vec![3, 3, 3],
            aging_time: 5,
            demotion_time: 6,
        }
    }
}

/// Seven-process reference workload used by the CLI demo and tests
pub fn demo_workload() -> Vec<ProcessSpec> {
    vec![
        ProcessSpec::new("P1", 1, 20, 3),
        ProcessSpec::new("P2", 3, 10, 2),
        ProcessSpec::new("P3", 5, 2, 1),
        ProcessSpec::new("P4", 8, 7, 2),
        ProcessSpec::new("P5", 11, 15, 3),
        ProcessSpec::new("P6", 15, 8, 2),
        ProcessSpec::new("P7", 20, 4, 1),
    ]
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    /// Tick number this report covers
    pub tick: usize,

    /// Id of the process that executed a unit this tick, if any
    pub executed: Option<String>,

    /// Number of processes admitted this tick
    pub num_arrivals: usize,

    /// Whether every process has now completed
    pub finished: bool,
}

/// Simulation error types
///
/// All are local, synchronous, and recoverable by the caller: fix the
/// input and retry. None are silently swallowed.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Malformed process or policy parameters, detected at
    /// initialization or reset before any state is built
    InvalidConfig(String),

    /// `tick` was called after every process completed
    AlreadyFinished,

    /// `metrics` was requested before every process completed
    NotFinished,

    /// A process operation violated its preconditions (engine bug)
    Process(ProcessError),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::InvalidConfig(msg) => write!(f, "invalid config: {}", msg),
            SimulationError::AlreadyFinished => {
                write!(f, "simulation already finished")
            }
            SimulationError::NotFinished => {
                write!(f, "metrics unavailable before all processes complete")
            }
            SimulationError::Process(e) => write!(f, "process error: {}", e),
        }
    }
}

impl std::error::Error for SimulationError {}

// ============================================================================
// Simulation
// ============================================================================

/// Simulation handle owning the clock, process table, and active policy
///
/// Created by `new`, driven by `tick` (step mode) or `run` (batch
/// mode), inspected through `snapshot` and `metrics`, and reusable via
/// `reset`. There are no process-wide singletons: all mutable state
/// lives here for the duration of one run.
pub struct Simulation {
    /// Simulation clock
    clock: SimClock,

    /// All processes for this run
    table: ProcessTable,

    /// Active scheduling policy
    policy: Box<dyn SchedulingPolicy>,

    /// Configuration the policy was built from (kept for reset)
    policy_config: PolicyConfig,

    /// Event log (all scheduling events)
    events: EventLog,

    /// Set once every process has completed
    finished: bool,
}

impl Simulation {
    /// Create a simulation from process specs and a policy configuration
    ///
    /// Fails with `InvalidConfig` if any quantum/aging/demotion
    /// parameter is zero, any process has a zero burst time, a
    /// priority is outside the supported level range, or two processes
    /// share an id.
    pub fn new(specs: Vec<ProcessSpec>, policy: PolicyConfig) -> Result<Self, SimulationError> {
        Self::validate(&specs, &policy)?;
        let table = Self::build_table(specs);
        let finished = table.all_completed(); // vacuously true for an empty set
        Ok(Self {
            clock: SimClock::new(),
            table,
            policy: Self::build_policy(&policy),
            policy_config: policy,
            events: EventLog::new(),
            finished,
        })
    }

    /// Validate process specs against a policy configuration
    fn validate(specs: &[ProcessSpec], policy: &PolicyConfig) -> Result<(), SimulationError> {
        match policy {
            PolicyConfig::RoundRobin { quantum } if *quantum == 0 => {
                return Err(SimulationError::InvalidConfig(
                    "quantum must be > 0".to_string(),
                ));
            }
            PolicyConfig::Mlfq {
                quantums,
                aging_time,
                demotion_time,
            } => {
                if quantums.is_empty() {
                    return Err(SimulationError::InvalidConfig(
                        "MLFQ needs at least one level".to_string(),
                    ));
                }
                if quantums.iter().any(|&q| q == 0) {
                    return Err(SimulationError::InvalidConfig(
                        "every level quantum must be > 0".to_string(),
                    ));
                }
                if *aging_time == 0 {
                    return Err(SimulationError::InvalidConfig(
                        "aging_time must be > 0".to_string(),
                    ));
                }
                if *demotion_time == 0 {
                    return Err(SimulationError::InvalidConfig(
                        "demotion_time must be > 0".to_string(),
                    ));
                }
            }
            _ => {}
        }

        let num_levels = match policy {
            PolicyConfig::Mlfq { quantums, .. } => Some(quantums.len()),
            _ => None,
        };

        let mut ids = HashSet::new();
        for spec in specs {
            if !ids.insert(spec.id.as_str()) {
                return Err(SimulationError::InvalidConfig(format!(
                    "duplicate process id: {}",
                    spec.id
                )));
            }
            if spec.burst_time == 0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "process {} has zero burst time",
                    spec.id
                )));
            }
            if spec.priority == 0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "process {} has priority 0 (levels start at 1)",
                    spec.id
                )));
            }
            if let Some(levels) = num_levels {
                if spec.priority > levels {
                    return Err(SimulationError::InvalidConfig(format!(
                        "process {} has priority {} outside the {} MLFQ levels",
                        spec.id, spec.priority, levels
                    )));
                }
            }
        }

        Ok(())
    }

    fn build_table(specs: Vec<ProcessSpec>) -> ProcessTable {
        let processes: Vec<Process> = specs
            .into_iter()
            .enumerate()
            .map(|(seq, spec)| {
                Process::new(spec.id, seq, spec.arrival_time, spec.burst_time, spec.priority)
            })
            .collect();
        ProcessTable::new(processes)
    }

    fn build_policy(config: &PolicyConfig) -> Box<dyn SchedulingPolicy> {
        match config {
            PolicyConfig::Fcfs => Box::new(FcfsPolicy::new()),
            PolicyConfig::Sjf => Box::new(SjfPolicy::new()),
            PolicyConfig::Srtf => Box::new(SrtfPolicy::new()),
            PolicyConfig::RoundRobin { quantum } => Box::new(RoundRobinPolicy::new(*quantum)),
            PolicyConfig::Priority => Box::new(PriorityPolicy::new()),
            PolicyConfig::Mlfq {
                quantums,
                aging_time,
                demotion_time,
            } => Box::new(MlfqPolicy::new(
                quantums.clone(),
                *aging_time,
                *demotion_time,
            )),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current tick number
    pub fn current_tick(&self) -> usize {
        self.clock.current_tick()
    }

    /// Whether every process has completed
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Display name of the active policy
    pub fn policy_name(&self) -> String {
        self.policy.name()
    }

    /// Reference to the event log
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    // ========================================================================
    // Tick Loop
    // ========================================================================

    /// Advance the simulation by one tick
    ///
    /// Fails with `AlreadyFinished` after completion; the failure
    /// happens before any state change, so a tick either fully applies
    /// its transition or mutates nothing.
    pub fn tick(&mut self) -> Result<TickReport, SimulationError> {
        if self.finished {
            return Err(SimulationError::AlreadyFinished);
        }

        let tick = self.clock.current_tick();

        // STEP 1: WAITING ACCRUAL
        // Every process sitting in a queue (not running) waits one tick.
        for pid in self.table.ready_ids() {
            self.table.get_mut(pid).tick_waiting();
        }

        // STEP 2: REBALANCE
        // MLFQ aging/promotion; a no-op for every other policy.
        self.policy
            .rebalance(tick, &mut self.table, &mut self.events);

        // STEP 3: ARRIVALS
        let mut num_arrivals = 0;
        for pid in self.table.arrivals_at(tick) {
            self.table.get_mut(pid).set_state(ProcessState::Ready);
            self.policy.enqueue(pid, &self.table);
            self.events.log(Event::Arrival {
                tick,
                process: self.table.get(pid).id().to_string(),
            });
            num_arrivals += 1;
        }

        // STEP 4: POLICY STEP
        let executed = self
            .policy
            .step(tick, &mut self.table, &mut self.events)
            .map_err(SimulationError::Process)?;

        // STEP 5: COMPLETION CHECK
        self.finished = self.table.all_completed();

        let report = TickReport {
            tick,
            executed: executed.map(|pid| self.table.get(pid).id().to_string()),
            num_arrivals,
            finished: self.finished,
        };

        // The clock stops at the completion tick; further calls fail.
        if !self.finished {
            self.clock.advance();
        }

        Ok(report)
    }

    /// Drive the simulation to completion and return the final metrics
    ///
    /// Batch mode; equivalent to calling `tick` until `finished`.
    pub fn run(&mut self) -> Result<Metrics, SimulationError> {
        while !self.finished {
            self.tick()?;
        }
        self.metrics()
    }

    // ========================================================================
    // Read Models
    // ========================================================================

    /// Read-only snapshot of queues, running process, and live fields
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.clock.current_tick(),
            finished: self.finished,
            running: self
                .policy
                .running()
                .map(|pid| self.table.get(pid).id().to_string()),
            queues: self
                .policy
                .queues()
                .into_iter()
                .map(|level| {
                    level
                        .into_iter()
                        .map(|pid| self.table.get(pid).id().to_string())
                        .collect()
                })
                .collect(),
            processes: self.table.iter().map(ProcessView::of).collect(),
        }
    }

    /// Per-process and average timing metrics
    ///
    /// Fails with `NotFinished` until every process has completed. An
    /// empty process set yields averages of None (not-applicable)
    /// rather than dividing by zero.
    pub fn metrics(&self) -> Result<Metrics, SimulationError> {
        if !self.finished {
            return Err(SimulationError::NotFinished);
        }
        Ok(Metrics::reduce(&self.table))
    }

    // ========================================================================
    // Reset
    // ========================================================================

    /// Reinitialize for a fresh run with an edited process set
    ///
    /// Clears all queues, the clock, and the event log; the policy is
    /// rebuilt from its original configuration. Validation failures
    /// leave the current run untouched.
    pub fn reset(&mut self, specs: Vec<ProcessSpec>) -> Result<(), SimulationError> {
        Self::validate(&specs, &self.policy_config)?;
        self.table = Self::build_table(specs);
        self.policy = Self::build_policy(&self.policy_config);
        self.clock = SimClock::new();
        self.events.clear();
        self.finished = self.table.all_completed();
        Ok(())
    }
}
