//! Caller-owned simulation run object.

use std::collections::BTreeMap;

use log::info;

use crate::{
    cloudlet::{Cloudlet, CloudletId},
    datacenter::Datacenter,
    error::SimulationError,
    executor::TimeSharedExecutor,
    report::SimulationReport,
    scheduling_policies::{
        economic_sjf::EconomicSjfPolicy, fcfs::FcfsPolicy, round_robin::RoundRobinPolicy, sjf::SjfPolicy,
    },
    scheduling_policy::{PolicyKind, SchedulingPolicy},
    vm::Vm,
};

/// One self-contained simulation run.
///
/// Owns its datacenter, VM pool, workload and cost table; nothing is shared
/// between runs and nothing outlives the returned report, so running the same
/// inputs twice yields identical reports.
pub struct DatacenterSimulation {
    datacenter: Datacenter,
    vms: Vec<Vm>,
    cloudlets: Vec<Cloudlet>,
    costs: Option<BTreeMap<CloudletId, f64>>,
    policy: PolicyKind,
}

impl DatacenterSimulation {
    /// Creates a new run. The cost table is consulted only by
    /// [PolicyKind::EconomicSjf] and must then cover every cloudlet.
    pub fn new(
        datacenter: Datacenter,
        vms: Vec<Vm>,
        cloudlets: Vec<Cloudlet>,
        costs: Option<BTreeMap<CloudletId, f64>>,
        policy: PolicyKind,
    ) -> Self {
        DatacenterSimulation {
            datacenter,
            vms,
            cloudlets,
            costs,
            policy,
        }
    }

    /// Validates the inputs, applies the policy and executes the workload.
    ///
    /// Validation failures abort before any timing is computed. An empty
    /// workload yields an empty report.
    pub fn run(self) -> Result<SimulationReport, SimulationError> {
        self.validate()?;

        let mut report = SimulationReport::new(self.policy);
        if self.cloudlets.is_empty() {
            return Ok(report);
        }

        let mut policy = self.resolve_policy();
        let schedule = policy.schedule(&self.cloudlets, &self.vms);
        info!(
            "scheduled {} cloudlets on {} VMs with {}",
            schedule.order.len(),
            self.vms.len(),
            self.policy
        );

        let executor = TimeSharedExecutor::new(self.datacenter.id, &self.vms, &self.cloudlets, &schedule);
        for record in executor.run() {
            report.register_cloudlet(record);
        }
        Ok(report)
    }

    fn resolve_policy(&self) -> Box<dyn SchedulingPolicy> {
        match self.policy {
            PolicyKind::Fcfs => Box::new(FcfsPolicy::new()),
            PolicyKind::Sjf => Box::new(SjfPolicy::new()),
            PolicyKind::RoundRobin => Box::new(RoundRobinPolicy::new()),
            PolicyKind::EconomicSjf => {
                Box::new(EconomicSjfPolicy::new(self.costs.clone().unwrap_or_default()))
            }
        }
    }

    fn validate(&self) -> Result<(), SimulationError> {
        if !self.cloudlets.is_empty() && self.vms.is_empty() {
            return Err(SimulationError::EmptyVmPool {
                cloudlets: self.cloudlets.len(),
            });
        }
        for host in self.datacenter.hosts.iter() {
            for pe in host.pes.iter() {
                if pe.mips <= 0.0 {
                    return Err(SimulationError::ZeroCapacityPe {
                        host: host.id,
                        pe: pe.id,
                    });
                }
            }
        }
        for vm in self.vms.iter() {
            if vm.capacity() <= 0.0 {
                return Err(SimulationError::ZeroCapacityVm { id: vm.id });
            }
        }
        for cloudlet in self.cloudlets.iter() {
            if cloudlet.length == 0 {
                return Err(SimulationError::ZeroLengthCloudlet { id: cloudlet.id });
            }
        }
        if self.policy == PolicyKind::EconomicSjf {
            for cloudlet in self.cloudlets.iter() {
                let covered = self
                    .costs
                    .as_ref()
                    .map(|costs| costs.contains_key(&cloudlet.id))
                    .unwrap_or(false);
                if !covered {
                    return Err(SimulationError::MissingCost { id: cloudlet.id });
                }
            }
        }
        Ok(())
    }
}
