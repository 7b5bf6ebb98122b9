use std::collections::BTreeMap;

use crate::{
    cloudlet::Cloudlet,
    scheduling_policy::{Schedule, SchedulingPolicy},
    vm::Vm,
};

/// Round-robin dispatch: cloudlets keep submission order and an explicit
/// cyclic index walks the VM slots. The resulting assignment matches
/// [FcfsPolicy](super::fcfs::FcfsPolicy); the policy exists so that call
/// sites can select round-robin dispatch by name.
pub struct RoundRobinPolicy {
    next_vm: usize,
}

impl RoundRobinPolicy {
    pub fn new() -> Self {
        Self { next_vm: 0 }
    }
}

impl SchedulingPolicy for RoundRobinPolicy {
    fn schedule(&mut self, cloudlets: &[Cloudlet], vms: &[Vm]) -> Schedule {
        let mut order = Vec::with_capacity(cloudlets.len());
        let mut assignment = BTreeMap::new();
        for cloudlet in cloudlets.iter() {
            assignment.insert(cloudlet.id, vms[self.next_vm % vms.len()].id);
            self.next_vm += 1;
            order.push(cloudlet.id);
        }
        Schedule { order, assignment }
    }
}

impl Default for RoundRobinPolicy {
    fn default() -> Self {
        Self::new()
    }
}
