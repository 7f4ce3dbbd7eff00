//! Scenario tests for the non-quantum policies
//!
//! Drives full simulations through the public API and checks exact
//! completion ticks and derived metrics.

use sched_sim_core::{Event, PolicyConfig, ProcessSpec, Simulation};

// ============================================================================
// Test Helpers
// ============================================================================

fn run(specs: Vec<ProcessSpec>, policy: PolicyConfig) -> Simulation {
    let mut sim = Simulation::new(specs, policy).expect("valid config");
    sim.run().expect("simulation runs to completion");
    sim
}

fn completion(sim: &Simulation, id: &str) -> usize {
    sim.metrics()
        .expect("finished")
        .for_process(id)
        .expect("known process")
        .completion_time
}

// ============================================================================
// FCFS
// ============================================================================

#[test]
fn test_fcfs_two_process_scenario() {
    // P1(arrival 0, burst 5), P2(arrival 1, burst 3): P1 finishes at
    // tick 5, P2 at tick 8, average waiting (0 + 4) / 2 = 2.0.
    let sim = run(
        vec![
            ProcessSpec::new("P1", 0, 5, 3),
            ProcessSpec::new("P2", 1, 3, 3),
        ],
        PolicyConfig::Fcfs,
    );

    assert_eq!(completion(&sim, "P1"), 5);
    assert_eq!(completion(&sim, "P2"), 8);

    let metrics = sim.metrics().unwrap();
    assert_eq!(metrics.for_process("P1").unwrap().turnaround_time, 5);
    assert_eq!(metrics.for_process("P2").unwrap().turnaround_time, 7);
    assert_eq!(metrics.averages.unwrap().waiting_time, 2.0);
}

#[test]
fn test_fcfs_single_process_completes_without_overhead() {
    // No contention: completion == arrival + burst exactly.
    let sim = run(vec![ProcessSpec::new("P1", 2, 3, 3)], PolicyConfig::Fcfs);
    assert_eq!(completion(&sim, "P1"), 5);

    let metrics = sim.metrics().unwrap();
    assert_eq!(metrics.for_process("P1").unwrap().waiting_time, 0);
    assert_eq!(metrics.for_process("P1").unwrap().response_time, 0);
}

#[test]
fn test_fcfs_idles_through_arrival_gap() {
    let sim = run(
        vec![
            ProcessSpec::new("P1", 0, 2, 3),
            ProcessSpec::new("P2", 10, 2, 3),
        ],
        PolicyConfig::Fcfs,
    );
    assert_eq!(completion(&sim, "P1"), 2);
    assert_eq!(completion(&sim, "P2"), 12);
}

#[test]
fn test_fcfs_aggregate_metrics_ignore_input_order() {
    // Two processes with identical (arrival, burst): swapping input
    // order changes who waits, not the aggregate metrics.
    let forward = run(
        vec![
            ProcessSpec::new("A", 0, 4, 3),
            ProcessSpec::new("B", 0, 4, 3),
        ],
        PolicyConfig::Fcfs,
    );
    let reversed = run(
        vec![
            ProcessSpec::new("B", 0, 4, 3),
            ProcessSpec::new("A", 0, 4, 3),
        ],
        PolicyConfig::Fcfs,
    );

    assert_eq!(
        forward.metrics().unwrap().averages,
        reversed.metrics().unwrap().averages
    );
}

#[test]
fn test_fcfs_demo_workload_completions() {
    let sim = run(sched_sim_core::demo_workload(), PolicyConfig::Fcfs);

    for (id, expected) in [
        ("P1", 21),
        ("P2", 31),
        ("P3", 33),
        ("P4", 40),
        ("P5", 55),
        ("P6", 63),
        ("P7", 67),
    ] {
        assert_eq!(completion(&sim, id), expected, "completion of {}", id);
    }

    let averages = sim.metrics().unwrap().averages.unwrap();
    assert!((averages.waiting_time - 181.0 / 7.0).abs() < 1e-9);
}

// ============================================================================
// SJF
// ============================================================================

#[test]
fn test_sjf_runs_shortest_job_next() {
    // P1 is short and runs first; then P2 beats P3 on the seq tie-break
    // (equal burst, equal arrival).
    let sim = run(
        vec![
            ProcessSpec::new("P1", 0, 1, 3),
            ProcessSpec::new("P2", 0, 5, 3),
            ProcessSpec::new("P3", 0, 5, 3),
        ],
        PolicyConfig::Sjf,
    );

    assert_eq!(completion(&sim, "P1"), 1);
    assert_eq!(completion(&sim, "P2"), 6);
    assert_eq!(completion(&sim, "P3"), 11);
}

#[test]
fn test_sjf_is_non_preemptive() {
    // A shorter job arriving mid-run does not displace the running one.
    let sim = run(
        vec![
            ProcessSpec::new("P1", 0, 6, 3),
            ProcessSpec::new("P2", 2, 1, 3),
        ],
        PolicyConfig::Sjf,
    );
    assert_eq!(completion(&sim, "P1"), 6);
    assert_eq!(completion(&sim, "P2"), 7);
    assert!(!sim
        .events()
        .iter()
        .any(|e| matches!(e, Event::Preempted { .. })));
}

// ============================================================================
// SRTF
// ============================================================================

#[test]
fn test_srtf_two_process_scenario() {
    // P2 preempts P1 at tick 1; P2 finishes at tick 4 (turnaround 3),
    // P1 at tick 9 (turnaround 9).
    let sim = run(
        vec![
            ProcessSpec::new("P1", 0, 5, 3),
            ProcessSpec::new("P2", 1, 3, 3),
        ],
        PolicyConfig::Srtf,
    );

    assert_eq!(completion(&sim, "P2"), 4);
    assert_eq!(completion(&sim, "P1"), 9);

    let metrics = sim.metrics().unwrap();
    assert_eq!(metrics.for_process("P2").unwrap().turnaround_time, 3);
    assert_eq!(metrics.for_process("P1").unwrap().turnaround_time, 9);

    assert!(sim
        .events()
        .iter()
        .any(|e| matches!(e, Event::Preempted { tick: 1, .. })));
}

#[test]
fn test_srtf_equal_remaining_keeps_running_process() {
    // Tie on remaining burst: the running process keeps the CPU, and
    // the seq tie-break only orders queue selections.
    let sim = run(
        vec![
            ProcessSpec::new("P1", 0, 3, 3),
            ProcessSpec::new("P2", 0, 3, 3),
        ],
        PolicyConfig::Srtf,
    );
    assert_eq!(completion(&sim, "P1"), 3);
    assert_eq!(completion(&sim, "P2"), 6);
    assert!(!sim
        .events()
        .iter()
        .any(|e| matches!(e, Event::Preempted { .. })));
}

// ============================================================================
// Priority
// ============================================================================

#[test]
fn test_priority_lower_number_runs_first() {
    let sim = run(
        vec![
            ProcessSpec::new("P1", 0, 4, 3),
            ProcessSpec::new("P2", 0, 4, 1),
        ],
        PolicyConfig::Priority,
    );
    assert_eq!(completion(&sim, "P2"), 4);
    assert_eq!(completion(&sim, "P1"), 8);
}

#[test]
fn test_priority_is_non_preemptive() {
    // A priority-1 arrival does not displace the running priority-3 job.
    let sim = run(
        vec![
            ProcessSpec::new("P1", 0, 6, 3),
            ProcessSpec::new("P2", 1, 2, 1),
        ],
        PolicyConfig::Priority,
    );
    assert_eq!(completion(&sim, "P1"), 6);
    assert_eq!(completion(&sim, "P2"), 8);
}
