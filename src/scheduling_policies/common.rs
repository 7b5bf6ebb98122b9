use std::collections::BTreeMap;

use crate::{
    cloudlet::CloudletId,
    vm::{Vm, VmId},
};

/// Assigns the cloudlet at position `i` of `order` to `vms[i % vms.len()]`.
pub fn assign_round_robin(order: &[CloudletId], vms: &[Vm]) -> BTreeMap<CloudletId, VmId> {
    order
        .iter()
        .enumerate()
        .map(|(i, &cloudlet_id)| (cloudlet_id, vms[i % vms.len()].id))
        .collect()
}
