//! Policy interface for ordering cloudlets and assigning them to VMs.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    cloudlet::{Cloudlet, CloudletId},
    vm::{Vm, VmId},
};

/// Ids of the built-in scheduling policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PolicyKind {
    /// First-come-first-served.
    Fcfs,
    /// Shortest job first.
    Sjf,
    /// Round-robin dispatch.
    RoundRobin,
    /// Economic shortest job first.
    EconomicSjf,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Fcfs => write!(f, "FCFS"),
            PolicyKind::Sjf => write!(f, "SJF"),
            PolicyKind::RoundRobin => write!(f, "RoundRobin"),
            PolicyKind::EconomicSjf => write!(f, "EconomicSJF"),
        }
    }
}

/// Execution order and VM assignment produced by a policy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    /// Cloudlet ids in execution order.
    pub order: Vec<CloudletId>,
    /// Assigned VM for every cloudlet.
    pub assignment: BTreeMap<CloudletId, VmId>,
}

/// Strategy deciding in which order cloudlets execute and on which VMs.
///
/// Policies never mutate the cloudlets or the VMs; everything they decide is
/// in the returned [Schedule]. Callers guarantee a non-empty VM slice
/// whenever the workload is non-empty.
pub trait SchedulingPolicy {
    /// Orders the submitted cloudlets and assigns each of them to a VM.
    fn schedule(&mut self, cloudlets: &[Cloudlet], vms: &[Vm]) -> Schedule;
}
