use std::{fs::File, io::Write, path::{Path, PathBuf}};

use clap::Parser;
use cloudlet_sim::{
    experiment::{Experiment, RunResult},
    generator::WorkloadConfig,
    scheduling_policy::PolicyKind,
    system::SystemConfig,
};
use env_logger::Builder;
use serde::Deserialize;

#[derive(Deserialize)]
struct Config {
    seed: u64,
    workloads: Vec<PathBuf>,
    systems: Vec<PathBuf>,
    policies: Vec<PolicyKind>,
}

/// Runs a batch of scheduling experiments.
#[derive(Parser, Debug)]
struct Args {
    /// Path to config.
    #[arg(short, long)]
    config: PathBuf,

    /// Path to file with results.
    #[arg(short, long)]
    output: PathBuf,

    /// Do not run experiments, just read results from --output.
    #[arg(long)]
    precalculated: bool,

    /// Number of threads.
    #[arg(long, default_value_t = std::thread::available_parallelism().unwrap().get())]
    threads: usize,
}

fn filename(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
        .split('.')
        .next()
        .unwrap()
        .to_string()
}

fn run_name(run: &RunResult) -> String {
    format!("{}/{}/{}", run.workload, run.system, run.policy)
}

fn print_cloudlet_table(run: &RunResult) {
    println!("\n=== Results for {} ===", run_name(run));
    println!(
        "{:<12} {:<8} {:<15} {:<6} {:<8} {:<12} {:<12}",
        "Cloudlet ID", "Status", "Datacenter ID", "VM ID", "Time", "Start Time", "Finish Time"
    );
    for record in run.report.records.iter() {
        println!(
            "{:<12} {:<8} {:<15} {:<6} {:<8.2} {:<12.2} {:<12.2}",
            record.cloudlet_id,
            record.status.to_string(),
            record.resource_id,
            record.vm_id,
            record.cpu_time,
            record.start_time,
            record.finish_time
        );
    }
}

fn print_summary(results: &[RunResult]) {
    let width = results
        .iter()
        .map(|run| run_name(run).len())
        .max()
        .unwrap_or(0)
        .max("run".len());
    println!();
    println!(
        "| {: <width$} | makespan | completed | failed | total cpu time |",
        "run",
        width = width
    );
    println!(
        "|-{:-<width$}-|----------|-----------|--------|----------------|",
        "",
        width = width
    );
    for run in results.iter() {
        println!(
            "| {: <width$} | {: >8.2} | {: >9} | {: >6} | {: >14.2} |",
            run_name(run),
            run.report.makespan,
            run.report.completed_count,
            run.report.failed_count,
            run.report.total_cpu_time,
            width = width
        );
    }
}

fn main() {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let args = Args::parse();
    let config: Config = serde_yaml::from_str(&std::fs::read_to_string(args.config).expect("Can't read config file"))
        .expect("Can't parse config file");

    let results: Vec<RunResult> = if args.precalculated {
        serde_json::from_str(&std::fs::read_to_string(args.output).expect("Can't read file with results"))
            .expect("Can't parse file with results")
    } else {
        let experiment = Experiment::new(
            config.seed,
            config
                .workloads
                .into_iter()
                .enumerate()
                .map(|(i, path)| (format!("{}_{}", i, filename(&path)), WorkloadConfig::from_yaml(path)))
                .collect(),
            config
                .systems
                .into_iter()
                .enumerate()
                .map(|(i, path)| (format!("{}_{}", i, filename(&path)), SystemConfig::from_yaml(path)))
                .collect(),
            config.policies,
        );

        let results = experiment.run(args.threads);
        File::create(args.output)
            .expect("Can't create output file")
            .write_all(serde_json::to_string_pretty(&results).unwrap().as_bytes())
            .expect("Can't write to output file");
        results
    };

    for run in results.iter() {
        print_cloudlet_table(run);
    }
    print_summary(&results);
}
