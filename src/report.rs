//! Per-cloudlet metrics from a completed simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{cloudlet::CloudletId, scheduling_policy::PolicyKind, vm::VmId};

/// Terminal status of a cloudlet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudletStatus {
    /// The cloudlet ran to completion.
    Success,
    /// The cloudlet could not execute because its assigned VM does not exist.
    Failed,
}

impl fmt::Display for CloudletStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloudletStatus::Success => write!(f, "SUCCESS"),
            CloudletStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Timing metrics of a single cloudlet.
///
/// The field set and meaning form the contract with external report
/// consumers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CloudletRecord {
    /// Id of the cloudlet.
    pub cloudlet_id: CloudletId,
    /// Terminal status.
    pub status: CloudletStatus,
    /// Id of the datacenter the cloudlet ran in.
    pub resource_id: u32,
    /// Id of the VM the cloudlet was assigned to.
    pub vm_id: VmId,
    /// Wall-clock time during which the cloudlet was active.
    pub cpu_time: f64,
    /// Time at which execution started.
    pub start_time: f64,
    /// Time at which execution finished.
    pub finish_time: f64,
}

/// Metrics from a completed simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Policy the run was scheduled with.
    pub policy: PolicyKind,
    /// One record per scheduled cloudlet, in execution order.
    pub records: Vec<CloudletRecord>,
    /// Finish time of the last completed cloudlet.
    pub makespan: f64,
    /// Number of completed cloudlets.
    pub completed_count: usize,
    /// Number of failed cloudlets.
    pub failed_count: usize,
    /// Total CPU time consumed by completed cloudlets.
    pub total_cpu_time: f64,
}

impl SimulationReport {
    /// Creates an empty report for a run under the given policy.
    pub fn new(policy: PolicyKind) -> Self {
        SimulationReport {
            policy,
            records: Vec::new(),
            makespan: 0.0,
            completed_count: 0,
            failed_count: 0,
            total_cpu_time: 0.0,
        }
    }

    /// Registers one cloudlet record and updates the aggregates.
    pub fn register_cloudlet(&mut self, record: CloudletRecord) {
        match record.status {
            CloudletStatus::Success => {
                self.completed_count += 1;
                self.makespan = self.makespan.max(record.finish_time);
                self.total_cpu_time += record.cpu_time;
            }
            CloudletStatus::Failed => {
                self.failed_count += 1;
            }
        }
        self.records.push(record);
    }
}
