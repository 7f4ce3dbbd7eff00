//! Batch scenario runner
//!
//! Loads a JSON scenario (process list + policy config), drives the
//! simulation to completion, and prints the final metrics as JSON.
//! With no arguments it runs the built-in demo workload under the
//! default three-level MLFQ.
//!
//! ```text
//! sched-sim [scenario.json]
//! ```
//!
//! Scenario format:
//!
//! ```json
//! {
//!   "processes": [
//!     { "id": "P1", "arrival_time": 0, "burst_time": 5, "priority": 3 }
//!   ],
//!   "policy": { "type": "RoundRobin", "quantum": 3 }
//! }
//! ```

use serde::Deserialize;

use sched_sim_core::{demo_workload, PolicyConfig, ProcessSpec, Simulation};

#[derive(Debug, Deserialize)]
struct Scenario {
    processes: Vec<ProcessSpec>,
    policy: PolicyConfig,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let scenario = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str::<Scenario>(&text)?
        }
        None => Scenario {
            processes: demo_workload(),
            policy: PolicyConfig::mlfq_default(),
        },
    };

    let mut sim = Simulation::new(scenario.processes, scenario.policy)?;
    let policy_name = sim.policy_name();
    let metrics = sim.run()?;

    eprintln!(
        "{}: finished at tick {} ({} events)",
        policy_name,
        sim.current_tick(),
        sim.events().len()
    );
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}
