use std::{
    io::Write,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::{Duration, Instant},
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use threadpool::ThreadPool;

use crate::{
    generator::{WorkloadConfig, WorkloadGenerator},
    report::SimulationReport,
    scheduling_policy::PolicyKind,
    simulation::DatacenterSimulation,
    system::SystemConfig,
};

const DATACENTER_ID: u32 = 0;
const BROKER_ID: u32 = 1;

struct Run {
    workload: (String, WorkloadConfig),
    system: (String, SystemConfig),
    policy: PolicyKind,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunResult {
    pub workload: String,
    pub system: String,
    pub policy: PolicyKind,
    pub report: SimulationReport,
}

/// Batch driver: repeats the simulation for every combination of workload,
/// system and policy, rebuilding everything from scratch per run.
pub struct Experiment {
    seed: u64,
    workloads: Vec<(String, WorkloadConfig)>,
    systems: Vec<(String, SystemConfig)>,
    policies: Vec<PolicyKind>,
}

impl Experiment {
    pub fn new(
        seed: u64,
        workloads: Vec<(String, WorkloadConfig)>,
        systems: Vec<(String, SystemConfig)>,
        policies: Vec<PolicyKind>,
    ) -> Self {
        Self {
            seed,
            workloads,
            systems,
            policies,
        }
    }

    pub fn run(self, threads: usize) -> Vec<RunResult> {
        let runs = self
            .workloads
            .into_iter()
            .cartesian_product(self.systems)
            .cartesian_product(self.policies)
            .map(|((workload, system), policy)| Run {
                workload,
                system,
                policy,
            })
            .collect::<Vec<_>>();

        let total_runs = runs.len();

        let finished_run_atomic = Arc::new(AtomicUsize::new(0));
        let results = Arc::new(Mutex::new(Vec::new()));

        let pool = ThreadPool::new(threads);
        let start_time = Instant::now();
        let seed = self.seed;
        for run in runs.into_iter() {
            let finished_run_atomic = finished_run_atomic.clone();
            let results = results.clone();
            pool.execute(move || {
                // same seed for every run, so policies see identical workloads
                let (cloudlets, costs) = WorkloadGenerator::new(seed).generate(&run.workload.1, BROKER_ID);
                let (datacenter, vms) = run.system.1.build(DATACENTER_ID, BROKER_ID);

                let report = DatacenterSimulation::new(datacenter, vms, cloudlets, costs, run.policy)
                    .run()
                    .unwrap_or_else(|e| {
                        panic!(
                            "invalid run {}/{}/{}: {}",
                            run.workload.0, run.system.0, run.policy, e
                        )
                    });

                results.lock().unwrap().push(RunResult {
                    workload: run.workload.0,
                    system: run.system.0,
                    policy: run.policy,
                    report,
                });

                finished_run_atomic.fetch_add(1, Ordering::SeqCst);
                let finished_runs = finished_run_atomic.load(Ordering::SeqCst);

                let elapsed = start_time.elapsed();
                let remaining = Duration::from_secs_f64(
                    elapsed.as_secs_f64() / finished_runs as f64 * (total_runs - finished_runs) as f64,
                );
                print!("\r{}", " ".repeat(70));
                print!(
                    "\rFinished {}/{} runs in {:.2?}, remaining time: {:.2?}",
                    finished_runs, total_runs, elapsed, remaining
                );
                std::io::stdout().flush().unwrap();
            });
        }

        pool.join();

        print!("\r{}", " ".repeat(70));
        println!("\rFinished {} runs in {:.2?}", total_runs, start_time.elapsed());

        let mut results = Arc::try_unwrap(results).unwrap().into_inner().unwrap();
        results.sort_by_cached_key(|run| (run.workload.clone(), run.system.clone(), run.policy));
        results
    }
}
