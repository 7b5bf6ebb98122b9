//! Time-shared execution core.

use std::collections::BTreeMap;

use log::{debug, error};

use crate::{
    cloudlet::{Cloudlet, CloudletId, UtilizationModel},
    report::{CloudletRecord, CloudletStatus},
    scheduling_policy::Schedule,
    vm::{Vm, VmId},
};

/// Remaining instruction counts at or below this are treated as finished,
/// absorbing floating-point drift accumulated over event steps.
const REMAINING_EPS: f64 = 1e-9;

struct RunningCloudlet {
    /// Position in the schedule, used to order the final records.
    position: usize,
    id: CloudletId,
    vm: VmId,
    remaining: f64,
    cpu_utilization: UtilizationModel,
}

/// Discrete-event executor implementing time-shared PE scheduling.
///
/// Every scheduled cloudlet starts at time zero and every VM divides its
/// capacity equally among the cloudlets still active on it, so a cloudlet
/// executes `capacity / active_count` instructions per unit of time and its
/// share grows as its neighbors finish. The clock only ever jumps to the next
/// completion event; total remaining work strictly decreases at every step,
/// so a run always terminates.
pub struct TimeSharedExecutor {
    resource_id: u32,
    vm_capacity: BTreeMap<VmId, f64>,
    running: Vec<RunningCloudlet>,
    finished: Vec<(usize, CloudletRecord)>,
    clock: f64,
}

impl TimeSharedExecutor {
    /// Admits every scheduled cloudlet. A cloudlet assigned to a VM missing
    /// from `vms` is recorded as failed right away and excluded from
    /// execution; the rest of the batch is not affected.
    pub fn new(resource_id: u32, vms: &[Vm], cloudlets: &[Cloudlet], schedule: &Schedule) -> Self {
        let vm_capacity = vms.iter().map(|vm| (vm.id, vm.capacity())).collect::<BTreeMap<_, _>>();
        let cloudlet_by_id = cloudlets
            .iter()
            .map(|cloudlet| (cloudlet.id, cloudlet))
            .collect::<BTreeMap<_, _>>();

        let mut running = Vec::new();
        let mut finished = Vec::new();
        for (position, &cloudlet_id) in schedule.order.iter().enumerate() {
            let cloudlet = cloudlet_by_id[&cloudlet_id];
            let vm = schedule.assignment[&cloudlet_id];
            if !vm_capacity.contains_key(&vm) {
                error!("cloudlet {} is assigned to VM {} which does not exist", cloudlet_id, vm);
                finished.push((
                    position,
                    CloudletRecord {
                        cloudlet_id,
                        status: CloudletStatus::Failed,
                        resource_id,
                        vm_id: vm,
                        cpu_time: 0.0,
                        start_time: 0.0,
                        finish_time: 0.0,
                    },
                ));
                continue;
            }
            running.push(RunningCloudlet {
                position,
                id: cloudlet_id,
                vm,
                remaining: cloudlet.length as f64,
                cpu_utilization: cloudlet.cpu_utilization,
            });
        }

        TimeSharedExecutor {
            resource_id,
            vm_capacity,
            running,
            finished,
            clock: 0.0,
        }
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.clock
    }

    /// Instruction throughput the cloudlet receives under the current shares.
    fn throughput(&self, cloudlet: &RunningCloudlet, active: &BTreeMap<VmId, usize>) -> f64 {
        self.vm_capacity[&cloudlet.vm] / active[&cloudlet.vm] as f64
            * cloudlet.cpu_utilization.utilization(self.clock)
    }

    /// Advances the clock to the next completion event and retires every
    /// cloudlet finishing there. Returns false once no cloudlets remain.
    pub fn step(&mut self) -> bool {
        if self.running.is_empty() {
            return false;
        }

        let mut active: BTreeMap<VmId, usize> = BTreeMap::new();
        for cloudlet in self.running.iter() {
            *active.entry(cloudlet.vm).or_insert(0) += 1;
        }

        let dt = self
            .running
            .iter()
            .map(|cloudlet| cloudlet.remaining / self.throughput(cloudlet, &active))
            .min_by(|a, b| a.total_cmp(b))
            .unwrap();
        let throughputs = self
            .running
            .iter()
            .map(|cloudlet| self.throughput(cloudlet, &active))
            .collect::<Vec<_>>();

        self.clock += dt;
        for (cloudlet, throughput) in self.running.iter_mut().zip(throughputs) {
            cloudlet.remaining -= throughput * dt;
        }

        let mut i = 0;
        while i < self.running.len() {
            if self.running[i].remaining <= REMAINING_EPS {
                let cloudlet = self.running.remove(i);
                debug!(
                    "cloudlet {} finished on VM {} at {:.4}",
                    cloudlet.id, cloudlet.vm, self.clock
                );
                self.finished.push((
                    cloudlet.position,
                    CloudletRecord {
                        cloudlet_id: cloudlet.id,
                        status: CloudletStatus::Success,
                        resource_id: self.resource_id,
                        vm_id: cloudlet.vm,
                        cpu_time: self.clock,
                        start_time: 0.0,
                        finish_time: self.clock,
                    },
                ));
            } else {
                i += 1;
            }
        }
        true
    }

    /// Runs to completion and returns one record per scheduled cloudlet, in
    /// schedule order.
    pub fn run(mut self) -> Vec<CloudletRecord> {
        while self.step() {}
        self.finished.sort_by_key(|(position, _)| *position);
        self.finished.into_iter().map(|(_, record)| record).collect()
    }
}
