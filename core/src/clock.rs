//! Simulation clock
//!
//! The simulation operates in discrete ticks; exactly one process may
//! execute per tick. This module provides deterministic time advancement.

use serde::{Deserialize, Serialize};

/// Tracks simulation time in discrete ticks
///
/// # Example
/// ```
/// use sched_sim_core::SimClock;
///
/// let mut clock = SimClock::new();
/// assert_eq!(clock.current_tick(), 0);
///
/// clock.advance();
/// assert_eq!(clock.current_tick(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimClock {
    /// Total ticks elapsed since simulation start
    current_tick: usize,
}

impl SimClock {
    /// Create a new clock at tick 0
    pub fn new() -> Self {
        Self { current_tick: 0 }
    }

    /// Advance time by one tick
    pub fn advance(&mut self) {
        self.current_tick += 1;
    }

    /// Get the current tick (total ticks since start)
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }
}
