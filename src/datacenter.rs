//! Model of the physical resources backing a simulation.

/// A single processing element with a fixed instruction throughput in MIPS.
#[derive(Clone, Debug)]
pub struct Pe {
    /// Id of the PE, unique within its host.
    pub id: u32,
    /// Instruction throughput in millions of instructions per second.
    pub mips: f64,
}

/// Physical machine owning a set of PEs plus RAM, bandwidth and storage.
#[derive(Clone, Debug)]
pub struct Host {
    /// Id of the host, unique within its datacenter.
    pub id: u32,
    /// PEs owned by this host.
    pub pes: Vec<Pe>,
    /// RAM capacity.
    pub ram: u64,
    /// Network bandwidth capacity.
    pub bandwidth: u64,
    /// Storage capacity.
    pub storage: u64,
}

impl Host {
    /// Creates a new host.
    pub fn new(id: u32, pes: Vec<Pe>, ram: u64, bandwidth: u64, storage: u64) -> Self {
        Host {
            id,
            pes,
            ram,
            bandwidth,
            storage,
        }
    }

    /// Aggregate instruction throughput of all PEs on this host.
    pub fn total_mips(&self) -> f64 {
        self.pes.iter().map(|pe| pe.mips).sum()
    }
}

/// A datacenter hosting the VM pool. One simulation run uses exactly one.
#[derive(Clone, Debug)]
pub struct Datacenter {
    /// Id of the datacenter, reported in every cloudlet record.
    pub id: u32,
    /// Hosts of this datacenter.
    pub hosts: Vec<Host>,
}

impl Datacenter {
    /// Creates a new datacenter.
    pub fn new(id: u32, hosts: Vec<Host>) -> Self {
        Datacenter { id, hosts }
    }

    /// Aggregate instruction throughput of all hosts.
    pub fn total_mips(&self) -> f64 {
        self.hosts.iter().map(|host| host.total_mips()).sum()
    }
}
