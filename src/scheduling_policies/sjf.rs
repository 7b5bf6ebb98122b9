use crate::{
    cloudlet::Cloudlet,
    scheduling_policy::{Schedule, SchedulingPolicy},
    vm::Vm,
};

use super::common::assign_round_robin;

/// Shortest job first: cloudlets are reordered ascending by instruction
/// length before the cyclic VM assignment. The sort is stable, so cloudlets
/// of equal length keep submission order.
pub struct SjfPolicy {}

impl SjfPolicy {
    pub fn new() -> Self {
        Self {}
    }
}

impl SchedulingPolicy for SjfPolicy {
    fn schedule(&mut self, cloudlets: &[Cloudlet], vms: &[Vm]) -> Schedule {
        let mut ordered = cloudlets.iter().collect::<Vec<_>>();
        ordered.sort_by_key(|cloudlet| cloudlet.length);
        let order = ordered.into_iter().map(|cloudlet| cloudlet.id).collect::<Vec<_>>();
        let assignment = assign_round_robin(&order, vms);
        Schedule { order, assignment }
    }
}

impl Default for SjfPolicy {
    fn default() -> Self {
        Self::new()
    }
}
