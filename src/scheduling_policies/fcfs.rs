use crate::{
    cloudlet::Cloudlet,
    scheduling_policy::{Schedule, SchedulingPolicy},
    vm::Vm,
};

use super::common::assign_round_robin;

/// First-come-first-served: cloudlets keep submission order and VMs are
/// assigned cyclically over VM slots.
pub struct FcfsPolicy {}

impl FcfsPolicy {
    pub fn new() -> Self {
        Self {}
    }
}

impl SchedulingPolicy for FcfsPolicy {
    fn schedule(&mut self, cloudlets: &[Cloudlet], vms: &[Vm]) -> Schedule {
        let order = cloudlets.iter().map(|cloudlet| cloudlet.id).collect::<Vec<_>>();
        let assignment = assign_round_robin(&order, vms);
        Schedule { order, assignment }
    }
}

impl Default for FcfsPolicy {
    fn default() -> Self {
        Self::new()
    }
}
