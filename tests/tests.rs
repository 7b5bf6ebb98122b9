use std::collections::BTreeMap;

use cloudlet_sim::{
    cloudlet::Cloudlet,
    datacenter::{Datacenter, Host, Pe},
    error::SimulationError,
    executor::TimeSharedExecutor,
    experiment::Experiment,
    generator::{CostRange, WorkloadConfig, WorkloadGenerator},
    report::{CloudletStatus, SimulationReport},
    scheduling_policies::{
        economic_sjf::EconomicSjfPolicy, fcfs::FcfsPolicy, round_robin::RoundRobinPolicy, sjf::SjfPolicy,
    },
    scheduling_policy::{PolicyKind, Schedule, SchedulingPolicy},
    simulation::DatacenterSimulation,
    system::{HostConfig, SystemConfig, VmFleetConfig},
    vm::{SharingDiscipline, Vm},
};

fn make_datacenter() -> Datacenter {
    Datacenter::new(
        0,
        vec![Host::new(0, vec![Pe { id: 0, mips: 1000.0 }], 4096, 10000, 100000)],
    )
}

fn make_vms(count: u64) -> Vec<Vm> {
    (0..count)
        .map(|id| Vm::new(id, 1, 1000.0, 1, 2048, 10000, 100000, SharingDiscipline::TimeShared))
        .collect()
}

fn make_cloudlets(lengths: &[u64]) -> Vec<Cloudlet> {
    lengths
        .iter()
        .enumerate()
        .map(|(id, &length)| Cloudlet::new(id as u64, length, 1, 1, 300, 300))
        .collect()
}

fn run(
    policy: PolicyKind,
    vm_count: u64,
    lengths: &[u64],
    costs: Option<BTreeMap<u64, f64>>,
) -> SimulationReport {
    DatacenterSimulation::new(make_datacenter(), make_vms(vm_count), make_cloudlets(lengths), costs, policy)
        .run()
        .unwrap()
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
}

#[test]
fn fcfs_assigns_vms_cyclically() {
    let mut policy = FcfsPolicy::new();
    let schedule = policy.schedule(&make_cloudlets(&[1000, 2000, 3000, 4000, 5000]), &make_vms(3));
    assert_eq!(schedule.order, vec![0, 1, 2, 3, 4]);
    for i in 0..5u64 {
        assert_eq!(schedule.assignment[&i], i % 3);
    }
}

#[test]
fn round_robin_matches_fcfs_assignment() {
    let cloudlets = make_cloudlets(&[4000, 1000, 2000, 5000, 3000, 1500, 2500]);
    let vms = make_vms(3);
    let fcfs = FcfsPolicy::new().schedule(&cloudlets, &vms);
    let round_robin = RoundRobinPolicy::new().schedule(&cloudlets, &vms);
    assert_eq!(round_robin, fcfs);
}

#[test]
fn sjf_reorders_by_length() {
    let mut policy = SjfPolicy::new();
    let schedule = policy.schedule(&make_cloudlets(&[5000, 1000, 3000, 2000, 4000]), &make_vms(3));
    assert_eq!(schedule.order, vec![1, 3, 2, 4, 0]);
    assert_eq!(schedule.assignment[&1], 0);
    assert_eq!(schedule.assignment[&3], 1);
    assert_eq!(schedule.assignment[&2], 2);
    assert_eq!(schedule.assignment[&4], 0);
    assert_eq!(schedule.assignment[&0], 1);
}

#[test]
fn sjf_is_stable_on_ties() {
    let mut policy = SjfPolicy::new();
    let schedule = policy.schedule(&make_cloudlets(&[2000, 1000, 2000, 1000]), &make_vms(2));
    assert_eq!(schedule.order, vec![1, 3, 0, 2]);
}

#[test]
fn economic_sjf_orders_by_cost_ratio() {
    let costs = BTreeMap::from([(0, 0.2), (1, 0.1), (2, 0.1)]);
    let mut policy = EconomicSjfPolicy::new(costs);
    // ratios: 0 -> 2e-4, 1 -> 5e-5, 2 -> 5e-5; the tie keeps submission order
    let schedule = policy.schedule(&make_cloudlets(&[1000, 2000, 2000]), &make_vms(2));
    assert_eq!(schedule.order, vec![1, 2, 0]);
}

#[test]
fn every_policy_covers_the_whole_workload() {
    let cloudlets = make_cloudlets(&[4000, 1000, 2000, 5000, 3000, 1500, 2500]);
    let vms = make_vms(3);
    let costs = cloudlets.iter().map(|cloudlet| (cloudlet.id, 0.1)).collect::<BTreeMap<_, _>>();
    let mut policies: Vec<Box<dyn SchedulingPolicy>> = vec![
        Box::new(FcfsPolicy::new()),
        Box::new(SjfPolicy::new()),
        Box::new(RoundRobinPolicy::new()),
        Box::new(EconomicSjfPolicy::new(costs)),
    ];
    for policy in policies.iter_mut() {
        let schedule = policy.schedule(&cloudlets, &vms);
        assert_eq!(schedule.order.len(), cloudlets.len());
        assert_eq!(schedule.assignment.len(), cloudlets.len());
        assert!(schedule.assignment.values().all(|vm_id| *vm_id < 3));
    }
}

#[test]
fn equal_cloudlets_finish_together() {
    let report = run(PolicyKind::Fcfs, 1, &[2000, 2000, 2000, 2000], None);
    assert_eq!(report.completed_count, 4);
    for record in report.records.iter() {
        assert_eq!(record.status, CloudletStatus::Success);
        assert_close(record.start_time, 0.0);
        assert_close(record.finish_time, 8.0);
        assert_close(record.cpu_time, 8.0);
    }
    assert_close(report.makespan, 8.0);
}

#[test]
fn contended_vms_interleave_completions() {
    let report = run(PolicyKind::Fcfs, 3, &[1000, 2000, 3000, 4000, 5000], None);
    let expected_vm = [0, 1, 2, 0, 1];
    let expected_finish = [2.0, 4.0, 3.0, 5.0, 7.0];
    assert_eq!(report.records.len(), 5);
    for (i, record) in report.records.iter().enumerate() {
        assert_eq!(record.cloudlet_id, i as u64);
        assert_eq!(record.status, CloudletStatus::Success);
        assert_eq!(record.vm_id, expected_vm[i]);
        assert_eq!(record.resource_id, 0);
        assert_close(record.start_time, 0.0);
        assert_close(record.finish_time, expected_finish[i]);
        assert_close(record.cpu_time, expected_finish[i]);
    }
    assert_close(report.makespan, 7.0);
}

#[test]
fn sjf_runs_shortest_first_on_unsorted_input() {
    let report = run(PolicyKind::Sjf, 3, &[5000, 1000, 3000, 2000, 4000], None);
    // execution order 1, 3, 2, 4, 0 with the cyclic VM assignment on top
    let expected = [
        (1, 0, 2.0),
        (3, 1, 4.0),
        (2, 2, 3.0),
        (4, 0, 5.0),
        (0, 1, 7.0),
    ];
    for (record, &(cloudlet_id, vm_id, finish_time)) in report.records.iter().zip(expected.iter()) {
        assert_eq!(record.cloudlet_id, cloudlet_id);
        assert_eq!(record.vm_id, vm_id);
        assert_close(record.finish_time, finish_time);
    }
}

#[test]
fn executor_advances_by_completion_events() {
    let cloudlets = make_cloudlets(&[1000, 2000, 3000, 4000, 5000]);
    let vms = make_vms(3);
    let schedule = FcfsPolicy::new().schedule(&cloudlets, &vms);
    let mut executor = TimeSharedExecutor::new(0, &vms, &cloudlets, &schedule);
    let mut steps = 0;
    while executor.step() {
        steps += 1;
    }
    // distinct completion times: 2, 3, 4, 5, 7
    assert_eq!(steps, 5);
    assert_close(executor.time(), 7.0);
}

#[test]
fn unknown_vm_fails_only_the_affected_cloudlet() {
    let cloudlets = make_cloudlets(&[1000, 1000]);
    let vms = make_vms(1);
    let schedule = Schedule {
        order: vec![0, 1],
        assignment: BTreeMap::from([(0, 0), (1, 99)]),
    };
    let records = TimeSharedExecutor::new(0, &vms, &cloudlets, &schedule).run();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].status, CloudletStatus::Success);
    assert_close(records[0].finish_time, 1.0);
    assert_eq!(records[1].status, CloudletStatus::Failed);
    assert_eq!(records[1].vm_id, 99);
    assert_close(records[1].finish_time, 0.0);
}

#[test]
fn same_inputs_yield_identical_reports() {
    let costs = BTreeMap::from([(0, 0.07), (1, 0.12), (2, 0.05), (3, 0.1), (4, 0.09)]);
    let lengths = [5000, 1000, 3000, 2000, 4000];
    let first = run(PolicyKind::EconomicSjf, 3, &lengths, Some(costs.clone()));
    let second = run(PolicyKind::EconomicSjf, 3, &lengths, Some(costs));
    assert_eq!(first, second);
}

#[test]
fn empty_workload_yields_empty_report() {
    for policy in [
        PolicyKind::Fcfs,
        PolicyKind::Sjf,
        PolicyKind::RoundRobin,
        PolicyKind::EconomicSjf,
    ] {
        let report = run(policy, 3, &[], None);
        assert!(report.records.is_empty());
        assert_eq!(report.completed_count, 0);
        assert_close(report.makespan, 0.0);
    }
}

#[test]
fn empty_vm_pool_fails_the_run() {
    let result = DatacenterSimulation::new(
        make_datacenter(),
        Vec::new(),
        make_cloudlets(&[1000, 2000]),
        None,
        PolicyKind::Fcfs,
    )
    .run();
    assert_eq!(result.unwrap_err(), SimulationError::EmptyVmPool { cloudlets: 2 });
}

#[test]
fn zero_length_cloudlet_is_rejected() {
    let result = DatacenterSimulation::new(
        make_datacenter(),
        make_vms(1),
        make_cloudlets(&[1000, 0]),
        None,
        PolicyKind::Fcfs,
    )
    .run();
    assert_eq!(result.unwrap_err(), SimulationError::ZeroLengthCloudlet { id: 1 });
}

#[test]
fn zero_capacity_vm_is_rejected() {
    let mut vms = make_vms(2);
    vms[1].mips = 0.0;
    let result = DatacenterSimulation::new(
        make_datacenter(),
        vms,
        make_cloudlets(&[1000]),
        None,
        PolicyKind::Fcfs,
    )
    .run();
    assert_eq!(result.unwrap_err(), SimulationError::ZeroCapacityVm { id: 1 });
}

#[test]
fn missing_cost_entry_is_rejected() {
    let costs = BTreeMap::from([(0, 0.1), (1, 0.1)]);
    let result = DatacenterSimulation::new(
        make_datacenter(),
        make_vms(2),
        make_cloudlets(&[1000, 2000, 3000]),
        Some(costs),
        PolicyKind::EconomicSjf,
    )
    .run();
    assert_eq!(result.unwrap_err(), SimulationError::MissingCost { id: 2 });

    let result = DatacenterSimulation::new(
        make_datacenter(),
        make_vms(2),
        make_cloudlets(&[1000]),
        None,
        PolicyKind::EconomicSjf,
    )
    .run();
    assert_eq!(result.unwrap_err(), SimulationError::MissingCost { id: 0 });
}

#[test]
fn system_config_builds_datacenter_and_fleet() {
    let config = SystemConfig {
        hosts: vec![
            HostConfig {
                pe_count: 2,
                pe_mips: 1000.0,
                ram: 4096,
                bandwidth: 10000,
                storage: 100000,
            },
            HostConfig {
                pe_count: 1,
                pe_mips: 500.0,
                ram: 2048,
                bandwidth: 10000,
                storage: 100000,
            },
        ],
        vms: VmFleetConfig {
            count: 3,
            mips: 500.0,
            pe_count: 2,
            ram: 2048,
            bandwidth: 10000,
            storage: 100000,
        },
    };
    let (datacenter, vms) = config.build(0, 1);
    assert_eq!(datacenter.hosts.len(), 2);
    assert_close(datacenter.hosts[0].total_mips(), 2000.0);
    assert_close(datacenter.hosts[1].total_mips(), 500.0);
    assert_close(datacenter.total_mips(), 2500.0);
    assert_eq!(vms.iter().map(|vm| vm.id).collect::<Vec<_>>(), vec![0, 1, 2]);
    for vm in vms.iter() {
        assert_eq!(vm.owner_id, 1);
        assert_eq!(vm.discipline, SharingDiscipline::TimeShared);
        assert_close(vm.capacity(), 1000.0);
    }
}

#[test]
fn generator_is_reproducible() {
    let config = WorkloadConfig {
        cloudlet_count: 20,
        length_min: 1000,
        length_max: 5000,
        input_size: 300,
        output_size: 300,
        cost: Some(CostRange { min: 0.05, max: 0.15 }),
    };
    let (first, first_costs) = WorkloadGenerator::new(123).generate(&config, 1);
    let (second, second_costs) = WorkloadGenerator::new(123).generate(&config, 1);
    assert_eq!(
        first.iter().map(|cloudlet| cloudlet.length).collect::<Vec<_>>(),
        second.iter().map(|cloudlet| cloudlet.length).collect::<Vec<_>>()
    );
    assert_eq!(first_costs, second_costs);
    for cloudlet in first.iter() {
        assert!((1000..=5000).contains(&cloudlet.length));
    }
    for cost in first_costs.unwrap().values() {
        assert!((0.05..=0.15).contains(cost));
    }
}

#[test]
fn experiment_runs_every_combination() {
    let workload = WorkloadConfig {
        cloudlet_count: 5,
        length_min: 1000,
        length_max: 5000,
        input_size: 300,
        output_size: 300,
        cost: Some(CostRange { min: 0.05, max: 0.15 }),
    };
    let system = SystemConfig {
        hosts: vec![HostConfig {
            pe_count: 1,
            pe_mips: 1000.0,
            ram: 4096,
            bandwidth: 10000,
            storage: 100000,
        }],
        vms: VmFleetConfig {
            count: 3,
            mips: 1000.0,
            pe_count: 1,
            ram: 2048,
            bandwidth: 10000,
            storage: 100000,
        },
    };
    let policies = vec![
        PolicyKind::Fcfs,
        PolicyKind::Sjf,
        PolicyKind::RoundRobin,
        PolicyKind::EconomicSjf,
    ];
    let results = Experiment::new(
        123,
        vec![("w".to_string(), workload)],
        vec![("s".to_string(), system)],
        policies.clone(),
    )
    .run(2);

    assert_eq!(results.len(), 4);
    assert_eq!(results.iter().map(|run| run.policy).collect::<Vec<_>>(), policies);
    for result in results.iter() {
        assert_eq!(result.report.records.len(), 5);
        assert_eq!(result.report.completed_count, 5);
        assert_eq!(result.report.failed_count, 0);
    }
    // FCFS and round-robin dispatch produce the same schedule, so the same timings
    assert_eq!(results[0].report.records, results[2].report.records);
}
