//! Serializable description of the simulated system.

use serde::{Deserialize, Serialize};

use crate::{
    datacenter::{Datacenter, Host, Pe},
    vm::{SharingDiscipline, Vm},
};

/// Description of one physical host.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HostConfig {
    pub pe_count: u32,
    pub pe_mips: f64,
    pub ram: u64,
    pub bandwidth: u64,
    pub storage: u64,
}

/// Description of the VM pool. All VMs of a pool are identical.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VmFleetConfig {
    pub count: u32,
    pub mips: f64,
    pub pe_count: u32,
    pub ram: u64,
    pub bandwidth: u64,
    pub storage: u64,
}

/// Full system description: one datacenter plus the VM pool hosted on it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SystemConfig {
    pub hosts: Vec<HostConfig>,
    pub vms: VmFleetConfig,
}

impl SystemConfig {
    /// Builds the datacenter and the VM pool. VMs get ids `0..count` and are
    /// owned by `owner_id`.
    pub fn build(&self, datacenter_id: u32, owner_id: u32) -> (Datacenter, Vec<Vm>) {
        let hosts = self
            .hosts
            .iter()
            .enumerate()
            .map(|(host_id, host)| {
                Host::new(
                    host_id as u32,
                    (0..host.pe_count)
                        .map(|pe_id| Pe {
                            id: pe_id,
                            mips: host.pe_mips,
                        })
                        .collect(),
                    host.ram,
                    host.bandwidth,
                    host.storage,
                )
            })
            .collect();
        let vms = (0..self.vms.count as u64)
            .map(|vm_id| {
                Vm::new(
                    vm_id,
                    owner_id,
                    self.vms.mips,
                    self.vms.pe_count,
                    self.vms.ram,
                    self.vms.bandwidth,
                    self.vms.storage,
                    SharingDiscipline::TimeShared,
                )
            })
            .collect();
        (Datacenter::new(datacenter_id, hosts), vms)
    }
}
